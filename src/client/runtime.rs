//! Line-oriented driver: read a command, reduce, run effects, render.

use crate::client::api::TodoApiClient;
use crate::client::command;
use crate::client::effects::ClientEffect;
use crate::client::events::ClientEvent;
use crate::client::reducer::update;
use crate::client::state::ClientState;
use crate::client::view::render;
use anyhow::Result;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// Runs the client until `quit` or end of input. Returns the final state.
pub async fn run<R, W>(api: &TodoApiClient, input: R, output: &mut W) -> Result<ClientState>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut state = ClientState::new();
    let mut lines = input.lines();

    write!(output, "{}", render(&state))?;
    prompt(output)?;

    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                prompt(output)?;
                continue;
            }
            Err(e) => {
                writeln!(output, "! {}", e)?;
                prompt(output)?;
                continue;
            }
        };

        let mut pending: VecDeque<ClientEffect> =
            update(&mut state, ClientEvent::Command(command)).into();
        let mut quit = false;
        while let Some(effect) = pending.pop_front() {
            match effect {
                ClientEffect::Quit => quit = true,
                ClientEffect::Alert(message) => writeln!(output, "! {}", message)?,
                request => {
                    if let Some(event) = execute(api, &state, request).await {
                        pending.extend(update(&mut state, event));
                    }
                }
            }
        }
        if quit {
            debug!("Quit requested");
            return Ok(state);
        }

        write!(output, "{}", render(&state))?;
        prompt(output)?;
    }

    Ok(state)
}

fn prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

/// Performs one API effect and turns its outcome into an event.
async fn execute(
    api: &TodoApiClient,
    state: &ClientState,
    effect: ClientEffect,
) -> Option<ClientEvent> {
    if let ClientEffect::Register(credentials) = &effect {
        let result = api.register(credentials).await.map(|r| r.message);
        return Some(ClientEvent::Registered(result));
    }
    if let ClientEffect::Login(credentials) = effect {
        let result = api.login(&credentials).await;
        return Some(ClientEvent::LoggedIn {
            credentials,
            result,
        });
    }

    let Some(session) = state.session.as_ref() else {
        warn!(effect = ?effect, "Skipping request without a session");
        return None;
    };

    let event = match effect {
        ClientEffect::FetchTodos => ClientEvent::TodosLoaded(api.list_todos(session).await),
        ClientEffect::CreateTodo { title } => {
            ClientEvent::TodoCreated(api.create_todo(session, &title).await)
        }
        ClientEffect::ToggleTodo { id, changes } => {
            ClientEvent::TodoToggled(api.update_todo(session, id, &changes).await)
        }
        ClientEffect::SaveTodoTitle { id, changes } => {
            ClientEvent::TodoEdited(api.update_todo(session, id, &changes).await)
        }
        ClientEffect::DeleteTodo { id } => ClientEvent::TodoDeleted {
            id,
            result: api.delete_todo(session, id).await.map(|_| ()),
        },
        ClientEffect::Register(_)
        | ClientEffect::Login(_)
        | ClientEffect::Alert(_)
        | ClientEffect::Quit => return None,
    };
    Some(event)
}
