//! Client reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects; nothing in this module performs I/O.
//! The list only changes once the server has confirmed a mutation.

use crate::client::command::Command;
use crate::client::effects::ClientEffect;
use crate::client::events::ClientEvent;
use crate::client::state::{AuthMode, ClientState, Editing, Session};
use crate::client::view::help_text;
use crate::domain::todo::UpdateTodo;
use crate::domain::user::Credentials;
use tracing::{debug, error};

pub const EMPTY_TODO_ALERT: &str = "Please enter a non-empty todo item";
pub const LOGIN_FAILED_ALERT: &str = "Login failed";
pub const REGISTRATION_FAILED_ALERT: &str = "Registration failed";

pub fn update(state: &mut ClientState, event: ClientEvent) -> Vec<ClientEffect> {
    match event {
        ClientEvent::Command(command) => handle_command(state, command),
        ClientEvent::Registered(result) => match result {
            Ok(message) => {
                state.auth_form.mode = AuthMode::Login;
                vec![ClientEffect::Alert(message)]
            }
            Err(e) => {
                debug!(status = ?e.status(), error = %e, "Registration rejected");
                vec![ClientEffect::Alert(REGISTRATION_FAILED_ALERT.to_string())]
            }
        },
        ClientEvent::LoggedIn {
            credentials,
            result,
        } => match result {
            Ok(response) => {
                state.session = Some(Session {
                    user_id: response.user_id,
                    username: credentials.username,
                    password: credentials.password,
                    token: Some(response.token),
                });
                // Entering the list view loads the list.
                vec![ClientEffect::Alert(response.message), ClientEffect::FetchTodos]
            }
            Err(e) => {
                debug!(status = ?e.status(), error = %e, "Login rejected");
                vec![ClientEffect::Alert(LOGIN_FAILED_ALERT.to_string())]
            }
        },
        other if !state.is_authenticated() => {
            debug!(event = ?other, "Dropping todo result received after logout");
            vec![]
        }
        ClientEvent::TodosLoaded(result) => {
            match result {
                Ok(todos) => state.todos = todos,
                Err(e) => error!(status = ?e.status(), error = %e, "Error fetching todos"),
            }
            vec![]
        }
        ClientEvent::TodoCreated(result) => {
            match result {
                Ok(todo) => {
                    state.todos.push(todo);
                    state.new_todo.clear();
                }
                Err(e) => error!(status = ?e.status(), error = %e, "Error adding todo"),
            }
            vec![]
        }
        ClientEvent::TodoToggled(result) => {
            match result {
                Ok(todo) => state.replace_todo(todo),
                Err(e) => error!(status = ?e.status(), error = %e, "Error updating todo"),
            }
            vec![]
        }
        ClientEvent::TodoEdited(result) => {
            match result {
                Ok(todo) => {
                    state.replace_todo(todo);
                    state.editing = None;
                }
                Err(e) => error!(status = ?e.status(), error = %e, "Error editing todo"),
            }
            vec![]
        }
        ClientEvent::TodoDeleted { id, result } => {
            match result {
                Ok(()) => state.remove_todo(id),
                Err(e) => error!(todo_id = id, status = ?e.status(), error = %e, "Error deleting todo"),
            }
            vec![]
        }
    }
}

fn handle_command(state: &mut ClientState, command: Command) -> Vec<ClientEffect> {
    match command {
        Command::Help => vec![ClientEffect::Alert(help_text(state).to_string())],
        Command::Quit => vec![ClientEffect::Quit],
        command if state.is_authenticated() => handle_list_command(state, command),
        command => handle_form_command(state, command),
    }
}

fn handle_form_command(state: &mut ClientState, command: Command) -> Vec<ClientEffect> {
    match command {
        Command::SwitchForm => {
            state.auth_form.mode = state.auth_form.mode.toggled();
            vec![]
        }
        Command::Login { username, password } => {
            submit_form(state, AuthMode::Login, username, password)
        }
        Command::Register { username, password } => {
            submit_form(state, AuthMode::Register, username, password)
        }
        _ => vec![ClientEffect::Alert("Log in first".to_string())],
    }
}

fn submit_form(
    state: &mut ClientState,
    mode: AuthMode,
    username: String,
    password: String,
) -> Vec<ClientEffect> {
    state.auth_form.mode = mode;
    state.auth_form.username = username.clone();
    state.auth_form.password = password.clone();

    let credentials = Credentials { username, password };
    match mode {
        AuthMode::Login => vec![ClientEffect::Login(credentials)],
        AuthMode::Register => vec![ClientEffect::Register(credentials)],
    }
}

fn handle_list_command(state: &mut ClientState, command: Command) -> Vec<ClientEffect> {
    match command {
        Command::Add { title } => {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return vec![ClientEffect::Alert(EMPTY_TODO_ALERT.to_string())];
            }
            state.new_todo = title.clone();
            vec![ClientEffect::CreateTodo {
                title: trimmed.to_string(),
            }]
        }
        Command::Toggle { id } => match state.todo(id) {
            Some(todo) => vec![ClientEffect::ToggleTodo {
                id,
                changes: UpdateTodo::completed(!todo.completed),
            }],
            None => vec![ClientEffect::Alert(format!("No todo with id {}", id))],
        },
        Command::Edit { id } => {
            let Some(title) = state.todo(id).map(|todo| todo.title.clone()) else {
                return vec![ClientEffect::Alert(format!("No todo with id {}", id))];
            };
            state.editing = Some(Editing { id, title });
            vec![]
        }
        Command::Save { title } => match state.editing.as_mut() {
            // Sent as typed; the server ignores an empty title.
            Some(editing) => {
                editing.title = title.clone();
                vec![ClientEffect::SaveTodoTitle {
                    id: editing.id,
                    changes: UpdateTodo::title(title),
                }]
            }
            None => vec![ClientEffect::Alert(
                "Not editing a todo (use `edit <id>` first)".to_string(),
            )],
        },
        Command::Cancel => {
            state.editing = None;
            vec![]
        }
        Command::Delete { id } => vec![ClientEffect::DeleteTodo { id }],
        Command::Refresh => vec![ClientEffect::FetchTodos],
        Command::Logout => {
            state.logout();
            vec![]
        }
        _ => vec![ClientEffect::Alert(
            "Already logged in; `logout` first".to_string(),
        )],
    }
}
