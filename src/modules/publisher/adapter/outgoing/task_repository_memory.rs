use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::shared::api::listing::{apply_listing, matches_filter, ListParams};
use crate::shared::error::StoreError;

#[derive(Default)]
pub struct InMemoryPublisherTaskRepository {
    tasks: RwLock<HashMap<String, PublisherTask>>,
}

impl InMemoryPublisherTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PublisherTaskRepository for InMemoryPublisherTaskRepository {
    async fn save(&self, task: &PublisherTask) -> Result<(), StoreError> {
        self.tasks
            .write()
            .expect("tasks lock")
            .insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PublisherTask>, StoreError> {
        Ok(self.tasks.read().expect("tasks lock").get(id).cloned())
    }

    async fn find_one(&self, filter: Value) -> Result<Option<PublisherTask>, StoreError> {
        Ok(self
            .tasks
            .read()
            .expect("tasks lock")
            .values()
            .find(|task| {
                let value = serde_json::to_value(task).expect("task serializes");
                matches_filter(&value, &filter)
            })
            .cloned())
    }

    async fn list(&self, params: ListParams) -> Result<Vec<PublisherTask>, StoreError> {
        let serialized: Vec<Value> = self
            .tasks
            .read()
            .expect("tasks lock")
            .values()
            .map(|task| serde_json::to_value(task).expect("task serializes"))
            .collect();
        apply_listing(serialized, &params)
            .into_iter()
            .map(|value| {
                serde_json::from_value(value).map_err(|e| StoreError::Backend(e.to_string()))
            })
            .collect()
    }

    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError> {
        let tasks = self.tasks.read().expect("tasks lock");
        let count = match filter {
            None => tasks.len(),
            Some(filter) => tasks
                .values()
                .filter(|task| {
                    let value = serde_json::to_value(task).expect("task serializes");
                    matches_filter(&value, &filter)
                })
                .count(),
        };
        Ok(count as u64)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.tasks.write().expect("tasks lock").remove(id).is_some())
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.tasks.write().expect("tasks lock").clear();
        Ok(())
    }
}
