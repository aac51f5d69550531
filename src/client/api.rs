//! HTTP client for the to-do API.

use crate::client::state::Session;
use crate::domain::todo::{CreateTodo, Todo, UpdateTodo};
use crate::domain::user::{Credentials, LoginResponse, MessageResponse};
use crate::infrastructure::config::non_empty_var;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    /// Reads `TODO_API_URL` (after loading `.env`), defaulting to
    /// `http://localhost:5000`.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self {
            api_url: non_empty_var("TODO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(_) => None,
        }
    }
}

pub struct TodoApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl TodoApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: &Credentials) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(credentials)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id))]
    pub async fn list_todos(&self, session: &Session) -> Result<Vec<Todo>, ClientError> {
        let request = authorize(self.http.get(self.url("/todos")), session);
        read_json(request.send().await?).await
    }

    #[instrument(skip(self, session, title), fields(user_id = session.user_id))]
    pub async fn create_todo(&self, session: &Session, title: &str) -> Result<Todo, ClientError> {
        let body = CreateTodo {
            title: title.to_string(),
        };
        let request = authorize(self.http.post(self.url("/todos")), session).json(&body);
        read_json(request.send().await?).await
    }

    #[instrument(skip(self, session, changes), fields(user_id = session.user_id))]
    pub async fn update_todo(
        &self,
        session: &Session,
        id: u32,
        changes: &UpdateTodo,
    ) -> Result<Todo, ClientError> {
        let request = authorize(self.http.put(self.url(&format!("/todos/{}", id))), session)
            .json(changes);
        read_json(request.send().await?).await
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id))]
    pub async fn delete_todo(
        &self,
        session: &Session,
        id: u32,
    ) -> Result<MessageResponse, ClientError> {
        let request = authorize(self.http.delete(self.url(&format!("/todos/{}", id))), session);
        read_json(request.send().await?).await
    }
}

/// Bearer token when the session has one, header credentials otherwise.
fn authorize(request: RequestBuilder, session: &Session) -> RequestBuilder {
    match &session.token {
        Some(token) => request.bearer_auth(token),
        None => request
            .header("username", session.username.as_str())
            .header("password", session.password.as_str()),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    debug!(status = status.as_u16(), "Response received");
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
