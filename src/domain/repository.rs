use crate::domain::todo::{Todo, UpdateTodo};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user under the next id. Fails with `DomainError::Conflict`
    /// when the username is taken.
    async fn insert_user(&self, username: &str, password: &str) -> Result<User>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: u32) -> Result<Option<User>>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn insert(&self, user_id: u32, title: String) -> Result<Todo>;
    async fn find_by_owner(&self, user_id: u32) -> Result<Vec<Todo>>;
    /// Applies `changes` to the todo with this id and owner under a single lock.
    async fn update(&self, id: u32, user_id: u32, changes: UpdateTodo) -> Result<Option<Todo>>;
    async fn remove(&self, id: u32, user_id: u32) -> Result<Option<Todo>>;
}
