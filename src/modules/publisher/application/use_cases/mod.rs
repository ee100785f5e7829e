pub mod count_tasks;
pub mod fetch_task;
pub mod launch_publish;
pub mod list_tasks;
pub mod publisher_callback;
pub mod revoke_callback;
pub mod revoke_publish;
