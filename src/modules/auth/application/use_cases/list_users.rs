use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::incoming::use_cases::list_users::ListUsersUseCase;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::shared::api::listing::{ListQuery, SortOrder};
use crate::shared::error::ApiError;

pub const DEFAULT_SORT: [(&str, SortOrder); 2] = [
    ("last_name", SortOrder::Ascending),
    ("first_name", SortOrder::Ascending),
];

pub struct ListUsers {
    users: Arc<dyn UserRepository>,
}

impl ListUsers {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl ListUsersUseCase for ListUsers {
    async fn execute(&self, query: ListQuery) -> Result<Vec<User>, ApiError> {
        let params = query.into_params(&DEFAULT_SORT)?;
        self.users.list(params).await.map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::adapter::outgoing::user_repository_memory::InMemoryUserRepository;

    #[tokio::test]
    async fn listing_sorts_by_last_then_first_name() {
        let users = Arc::new(InMemoryUserRepository::new());
        users
            .save(&User::new("Zoe", "Aa", "z@a.com", "s", false))
            .await
            .unwrap();
        users
            .save(&User::new("Ann", "Bb", "a@b.com", "s", false))
            .await
            .unwrap();
        let listed = ListUsers::new(users)
            .execute(ListQuery::default())
            .await
            .unwrap();
        let names: Vec<_> = listed.iter().map(|u| u.last_name.as_str()).collect();
        assert_eq!(names, vec!["Aa", "Bb"]);
    }
}
