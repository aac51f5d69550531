use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Todo, UpdateTodo};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

struct TodoStore {
    todos: Vec<Todo>,
    next_id: u32,
}

/// Todos kept in insertion order. Ids come from a counter that is never
/// rewound, so a deleted id is never handed out again.
#[derive(Clone)]
pub struct InMemoryTodoRepository {
    storage: Arc<RwLock<TodoStore>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(TodoStore {
                todos: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    #[instrument(skip(self, title))]
    async fn insert(&self, user_id: u32, title: String) -> Result<Todo> {
        let mut storage = self.storage.write().await;
        let todo = Todo {
            id: storage.next_id,
            user_id,
            title,
            completed: false,
        };
        storage.next_id += 1;
        storage.todos.push(todo.clone());
        debug!(todo_id = todo.id, user_id = user_id, "Todo saved to memory storage");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, user_id: u32) -> Result<Vec<Todo>> {
        let storage = self.storage.read().await;
        let todos: Vec<Todo> = storage
            .todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        trace!(user_id = user_id, count = todos.len(), "Listed todos for owner");
        Ok(todos)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: u32, user_id: u32, changes: UpdateTodo) -> Result<Option<Todo>> {
        let mut storage = self.storage.write().await;
        let Some(todo) = storage
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
        else {
            trace!(todo_id = id, user_id = user_id, "No todo to update");
            return Ok(None);
        };
        changes.apply_to(todo);
        debug!(todo_id = id, completed = todo.completed, "Todo updated in memory storage");
        Ok(Some(todo.clone()))
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: u32, user_id: u32) -> Result<Option<Todo>> {
        let mut storage = self.storage.write().await;
        let index = storage
            .todos
            .iter()
            .position(|t| t.id == id && t.user_id == user_id);
        let removed = index.map(|i| storage.todos.remove(i));
        if removed.is_some() {
            debug!(todo_id = id, user_id = user_id, "Todo removed from memory storage");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids_across_owners() {
        let repo = InMemoryTodoRepository::new();

        let first = repo.insert(1, "a".to_string()).await.unwrap();
        let second = repo.insert(2, "b".to_string()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.completed);
    }

    #[tokio::test]
    async fn test_find_by_owner_keeps_insertion_order() {
        let repo = InMemoryTodoRepository::new();
        repo.insert(1, "first".to_string()).await.unwrap();
        repo.insert(2, "other".to_string()).await.unwrap();
        repo.insert(1, "second".to_string()).await.unwrap();

        let titles: Vec<String> = repo
            .find_by_owner(1)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_remove() {
        let repo = InMemoryTodoRepository::new();
        repo.insert(1, "a".to_string()).await.unwrap();
        let b = repo.insert(1, "b".to_string()).await.unwrap();

        repo.remove(b.id, 1).await.unwrap();
        let c = repo.insert(1, "c".to_string()).await.unwrap();

        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_update_and_remove_require_owner() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo.insert(1, "mine".to_string()).await.unwrap();

        let updated = repo
            .update(todo.id, 2, UpdateTodo::completed(true))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(repo.remove(todo.id, 2).await.unwrap().is_none());

        let stored = repo.find_by_owner(1).await.unwrap();
        assert_eq!(stored, vec![todo]);
    }

    #[tokio::test]
    async fn test_update_applies_changes_in_place() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo.insert(1, "buy milk".to_string()).await.unwrap();

        let updated = repo
            .update(todo.id, 1, UpdateTodo::completed(true))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.completed);

        let stored = repo.find_by_owner(1).await.unwrap();
        assert_eq!(stored, vec![updated]);
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo.insert(1, "x".to_string()).await.unwrap();

        assert!(repo.remove(todo.id, 1).await.unwrap().is_some());
        assert!(repo.remove(todo.id, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let repo = InMemoryTodoRepository::new();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo_clone = repo.clone();
                tokio::spawn(async move { repo_clone.insert(i % 3, format!("todo {}", i)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
