use crate::presentation::auth::{login, register};
use crate::presentation::handlers::{
    ApiError, create_todo, delete_todo, health_check, list_todos, update_todo,
};
use crate::presentation::middleware::CredentialAuth;
use actix_web::web;

/// Mounts every route. Todo routes sit behind the credential gate.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::scope("/todos")
                .wrap(CredentialAuth)
                .route("", web::get().to(list_todos))
                .route("", web::post().to(create_todo))
                .route("/{id}", web::put().to(update_todo))
                .route("/{id}", web::delete().to(delete_todo)),
        );
}

// Malformed bodies answer 400 with the same `{message}` shape as other errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

pub const ROUTES: &str = "GET /health, POST /register, POST /login, GET /todos, POST /todos, PUT /todos/{id}, DELETE /todos/{id}";
