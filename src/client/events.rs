//! Inputs to the client reducer: parsed commands and API results.

use crate::client::api::ClientError;
use crate::client::command::Command;
use crate::domain::todo::Todo;
use crate::domain::user::{Credentials, LoginResponse};

#[derive(Debug)]
pub enum ClientEvent {
    Command(Command),
    Registered(Result<String, ClientError>),
    LoggedIn {
        credentials: Credentials,
        result: Result<LoginResponse, ClientError>,
    },
    TodosLoaded(Result<Vec<Todo>, ClientError>),
    TodoCreated(Result<Todo, ClientError>),
    TodoToggled(Result<Todo, ClientError>),
    TodoEdited(Result<Todo, ClientError>),
    TodoDeleted {
        id: u32,
        result: Result<(), ClientError>,
    },
}
