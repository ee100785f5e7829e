use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::shared::api::listing::{apply_listing, matches_filter, ListParams};
use crate::shared::error::StoreError;

/// Mock-mode store, selected when no MongoDB DSN is configured. Enforces the
/// same unique-mail contract as the real collection index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().expect("users lock");
        let duplicate = users
            .values()
            .any(|other| other.id != user.id && other.mail == user.mail);
        if duplicate {
            return Err(StoreError::Duplicate { field: "mail" });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().expect("users lock").get(&id).cloned())
    }

    async fn find_by_mail(&self, mail: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .expect("users lock")
            .values()
            .find(|user| user.mail == mail)
            .cloned())
    }

    async fn list(&self, params: ListParams) -> Result<Vec<User>, StoreError> {
        let serialized: Vec<Value> = self
            .users
            .read()
            .expect("users lock")
            .values()
            .map(|user| serde_json::to_value(user).expect("user serializes"))
            .collect();
        apply_listing(serialized, &params)
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(|e| StoreError::Backend(e.to_string())))
            .collect()
    }

    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError> {
        let users = self.users.read().expect("users lock");
        let count = match filter {
            None => users.len(),
            Some(filter) => users
                .values()
                .filter(|user| {
                    let value = serde_json::to_value(user).expect("user serializes");
                    matches_filter(&value, &filter)
                })
                .count(),
        };
        Ok(count as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.write().expect("users lock").remove(&id).is_some())
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.users.write().expect("users lock").clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_enforces_unique_mail() {
        let repo = InMemoryUserRepository::new();
        let a = User::new("A", "B", "a@b.com", "s", false);
        let b = User::new("C", "D", "a@b.com", "s", false);
        repo.save(&a).await.unwrap();
        let err = repo.save(&b).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "mail" }));
    }

    #[tokio::test]
    async fn save_is_an_upsert_by_id() {
        let repo = InMemoryUserRepository::new();
        let mut user = User::new("A", "B", "a@b.com", "s", false);
        repo.save(&user).await.unwrap();
        user.first_name = "Z".to_string();
        repo.save(&user).await.unwrap();
        assert_eq!(repo.count(None).await.unwrap(), 1);
        assert_eq!(
            repo.find_by_id(user.id).await.unwrap().unwrap().first_name,
            "Z"
        );
    }
}
