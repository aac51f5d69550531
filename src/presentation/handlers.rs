use crate::application::auth_service::AuthService;
use crate::application::todo_service::TodoService;
use crate::data::memory::InMemoryTodoRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::todo::{CreateTodo, UpdateTodo};
use crate::domain::user::MessageResponse;
use crate::infrastructure::config::AppConfig;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use std::future::{Ready, ready};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services
pub struct AppState {
    pub todo_service: TodoService<InMemoryTodoRepository>,
    pub auth_service: AuthService<InMemoryUserRepository>,
}

impl AppState {
    /// Fresh, empty in-memory stores.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self {
            todo_service: TodoService::new(Arc::new(InMemoryTodoRepository::new())),
            auth_service: AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                config.jwt_secret.clone(),
                config.token_ttl_secs,
            ),
        }
    }
}

// Every failure body is `{ "message": ... }`
#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // A taken username answers 400, as existing clients expect.
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        if status.is_server_error() {
            error!(error = %error_msg, status = %status, "Request failed");
        } else {
            warn!(error = %error_msg, status = %status, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse {
            message: self.message(),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Conflict(msg)) => ApiError::Conflict(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Internal(err.to_string()),
        }
    }
}

// AuthenticatedUser extractor, filled in by the credential gate
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| ApiError::Unauthorized("Authentication failed".to_string())))
    }
}

/// Ids that do not parse can never match a todo.
fn parse_todo_id(raw: &str) -> Result<u32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Todo not found".to_string()))
}

// Handlers

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_todos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let todos = state.todo_service.list_todos(user.id).await.map_err(|e| {
        error!(error = %e, "Failed to list todos");
        e
    })?;
    info!(count = todos.len(), "Todos listed");
    Ok(HttpResponse::Ok().json(todos))
}

#[instrument(skip(state, user, req), fields(user_id = user.id, todo_id))]
pub async fn create_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateTodo>,
) -> Result<HttpResponse, ApiError> {
    let todo = state
        .todo_service
        .create_todo(user.id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create todo");
            e
        })?;
    tracing::Span::current().record("todo_id", todo.id);
    info!(todo_id = todo.id, "Todo created successfully");
    Ok(HttpResponse::Created().json(todo))
}

#[instrument(skip(state, user, req), fields(user_id = user.id, todo_id = %*path))]
pub async fn update_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<UpdateTodo>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = parse_todo_id(&path)?;
    let changes = req.into_inner();
    info!(
        todo_id = todo_id,
        title_provided = changes.title.is_some(),
        completed = ?changes.completed,
        "Updating todo"
    );
    let todo = state
        .todo_service
        .update_todo(user.id, todo_id, changes)
        .await?;
    info!(todo_id = todo.id, completed = todo.completed, "Todo updated successfully");
    Ok(HttpResponse::Ok().json(todo))
}

#[instrument(skip(state, user), fields(user_id = user.id, todo_id = %*path))]
pub async fn delete_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = parse_todo_id(&path)?;
    state.todo_service.delete_todo(user.id, todo_id).await?;
    info!(todo_id = todo_id, "Todo deleted successfully");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Todo deleted successfully")))
}
