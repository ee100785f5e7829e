use std::sync::Arc;

use crate::modules::auth::application::ports::incoming::use_cases::{
    count_users::CountUsersUseCase, create_user::CreateUserUseCase,
    delete_user::DeleteUserUseCase, fetch_user::FetchUserUseCase, list_users::ListUsersUseCase,
    update_user::UpdateUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    secret_hasher::SecretHasher, user_repository::UserRepository,
};
use crate::modules::auth::application::use_cases::{
    count_users::CountUsers, create_user::CreateUser, delete_user::DeleteUser,
    fetch_user::FetchUser, list_users::ListUsers, update_user::UpdateUser,
};

/// The user management use cases, composed once and shared by the routes.
#[derive(Clone)]
pub struct UserOperations {
    pub create: Arc<dyn CreateUserUseCase>,
    pub fetch: Arc<dyn FetchUserUseCase>,
    pub update: Arc<dyn UpdateUserUseCase>,
    pub delete: Arc<dyn DeleteUserUseCase>,
    pub list: Arc<dyn ListUsersUseCase>,
    pub count: Arc<dyn CountUsersUseCase>,
}

impl UserOperations {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self {
            create: Arc::new(CreateUser::new(users.clone(), hasher.clone())),
            fetch: Arc::new(FetchUser::new(users.clone())),
            update: Arc::new(UpdateUser::new(users.clone(), hasher)),
            delete: Arc::new(DeleteUser::new(users.clone())),
            list: Arc::new(ListUsers::new(users.clone())),
            count: Arc::new(CountUsers::new(users)),
        }
    }
}
