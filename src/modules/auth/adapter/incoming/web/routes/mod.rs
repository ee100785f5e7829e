pub mod count_users;
pub mod create_user;
pub mod delete_user;
pub mod fetch_user;
pub mod list_users;
pub mod login;
pub mod update_user;
