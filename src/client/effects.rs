//! Effects returned by the reducer for the runtime to execute.
//!
//! API effects carry what the request needs; the runtime supplies the
//! session and feeds the outcome back as a [`ClientEvent`](super::events::ClientEvent).

use crate::domain::todo::UpdateTodo;
use crate::domain::user::Credentials;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEffect {
    Register(Credentials),
    Login(Credentials),
    FetchTodos,
    CreateTodo { title: String },
    /// Flip `completed`; the payload already holds the negated value.
    ToggleTodo { id: u32, changes: UpdateTodo },
    SaveTodoTitle { id: u32, changes: UpdateTodo },
    DeleteTodo { id: u32 },
    /// Blocking notice shown to the user.
    Alert(String),
    Quit,
}
