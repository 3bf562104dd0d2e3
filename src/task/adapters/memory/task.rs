//! In-memory repository for task snapshots.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    state: RwLock<InMemoryTaskState>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.insert(task.id(), task.clone()).is_none() {
            state.order.push(task.id());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let removed = state.tasks.remove(&id);
        if removed.is_some() {
            state.order.retain(|stored| *stored != id);
        }
        Ok(removed)
    }
}
