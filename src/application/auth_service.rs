use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{Credentials, User};
use crate::infrastructure::security::{generate_token, validate_token};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

/// A successful login: the user and the session token issued for it.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: User,
    pub token: String,
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    token_ttl_secs: u64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, token_ttl_secs: u64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl_secs,
        }
    }

    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn register_user(&self, req: Credentials) -> Result<User> {
        trace!("Starting user registration");

        let user = self
            .user_repository
            .insert_user(&req.username, &req.password)
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered successfully");
        Ok(user)
    }

    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn login(&self, req: Credentials) -> Result<LoginSession> {
        trace!("Starting login");

        let user = self
            .find_matching_user(&req.username, &req.password)
            .await?
            .ok_or_else(|| {
                warn!(username = %req.username, "Invalid credentials during login");
                DomainError::Unauthorized("Invalid credentials".to_string())
            })?;

        let token = generate_token(user.id, &self.jwt_secret, self.token_ttl_secs).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;

        info!(user_id = user.id, username = %user.username, "Login successful");
        Ok(LoginSession { user, token })
    }

    /// Resolves the user for a `username`/`password` header pair.
    #[instrument(skip(self, password))]
    pub async fn authenticate_credentials(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .find_matching_user(username, password)
            .await?
            .ok_or_else(|| {
                debug!(username = username, "Header credentials rejected");
                DomainError::Unauthorized("Authentication failed".to_string())
            })?;
        trace!(user_id = user.id, "Header credentials accepted");
        Ok(user)
    }

    /// Resolves the user a session token was issued for.
    #[instrument(skip(self, token))]
    pub async fn authenticate_token(&self, token: &str) -> Result<User> {
        let user_id = validate_token(token, &self.jwt_secret).map_err(|e| {
            debug!(error = %e, "Session token rejected");
            DomainError::Unauthorized("Authentication failed".to_string())
        })?;

        let user = self
            .user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user_id, "Session token names an unknown user");
                DomainError::Unauthorized("Authentication failed".to_string())
            })?;
        trace!(user_id = user.id, "Session token accepted");
        Ok(user)
    }

    async fn find_matching_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = self.user_repository.find_user_by_username(username).await?;
        Ok(user.filter(|u| u.password == password))
    }
}
