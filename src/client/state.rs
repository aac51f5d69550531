//! Client-side state.
//!
//! Everything here lives in memory only; quitting the client forgets the
//! session and the cached list.

use crate::domain::todo::Todo;

/// Credentials held after a successful login.
///
/// The server issues a session token at login; the raw username and password
/// are kept as well so requests can fall back to header credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: u32,
    pub username: String,
    pub password: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }
}

/// The login/registration form shown while logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
}

/// A todo whose title is being edited inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editing {
    pub id: u32,
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub session: Option<Session>,
    pub todos: Vec<Todo>,
    pub auth_form: AuthForm,
    /// Draft of the todo being added; cleared once the server accepts it.
    pub new_todo: String,
    pub editing: Option<Editing>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn todo(&self, id: u32) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Swaps in the server's copy of a todo, keeping list position.
    pub fn replace_todo(&mut self, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }

    pub fn remove_todo(&mut self, id: u32) {
        self.todos.retain(|t| t.id != id);
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
    }

    /// Drops the session and everything fetched with it. The form keeps
    /// whatever was typed into it.
    pub fn logout(&mut self) {
        self.session = None;
        self.todos.clear();
        self.new_todo.clear();
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u32, title: &str) -> Todo {
        Todo {
            id,
            user_id: 1,
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn test_replace_todo_keeps_position() {
        let mut state = ClientState::new();
        state.todos = vec![todo(1, "a"), todo(2, "b"), todo(3, "c")];

        let mut updated = todo(2, "b2");
        updated.completed = true;
        state.replace_todo(updated.clone());

        assert_eq!(state.todos[1], updated);
        assert_eq!(state.todos.len(), 3);
    }

    #[test]
    fn test_remove_todo_clears_matching_edit() {
        let mut state = ClientState::new();
        state.todos = vec![todo(1, "a")];
        state.editing = Some(Editing {
            id: 1,
            title: "a".to_string(),
        });

        state.remove_todo(1);
        assert!(state.todos.is_empty());
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_logout_keeps_form() {
        let mut state = ClientState::new();
        state.auth_form.username = "alice".to_string();
        state.session = Some(Session {
            user_id: 1,
            username: "alice".to_string(),
            password: "pw1".to_string(),
            token: None,
        });
        state.todos = vec![todo(1, "a")];

        state.logout();

        assert!(!state.is_authenticated());
        assert!(state.todos.is_empty());
        assert_eq!(state.auth_form.username, "alice");
    }

    #[test]
    fn test_auth_mode_toggles() {
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Register);
        assert_eq!(AuthMode::Register.toggled(), AuthMode::Login);
    }
}
