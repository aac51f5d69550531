use crate::domain::error::DomainError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, UpdateTodo};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_todos(&self, user_id: u32) -> Result<Vec<Todo>> {
        self.repository.find_by_owner(user_id).await
    }

    /// The title is stored as sent; trimming is left to the client.
    #[instrument(skip(self, req))]
    pub async fn create_todo(&self, user_id: u32, req: CreateTodo) -> Result<Todo> {
        let todo = self.repository.insert(user_id, req.title).await?;
        debug!(todo_id = todo.id, user_id = user_id, "Todo created");
        Ok(todo)
    }

    #[instrument(skip(self, changes))]
    pub async fn update_todo(&self, user_id: u32, id: u32, changes: UpdateTodo) -> Result<Todo> {
        self.repository
            .update(id, user_id, changes)
            .await?
            .ok_or_else(|| todo_not_found().into())
    }

    #[instrument(skip(self))]
    pub async fn delete_todo(&self, user_id: u32, id: u32) -> Result<Todo> {
        self.repository
            .remove(id, user_id)
            .await?
            .ok_or_else(|| todo_not_found().into())
    }
}

// Wrong id and wrong owner are deliberately indistinguishable.
fn todo_not_found() -> DomainError {
    DomainError::NotFound("Todo not found".to_string())
}
