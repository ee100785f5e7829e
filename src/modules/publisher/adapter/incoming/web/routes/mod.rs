pub mod count_tasks;
pub mod get_task;
pub mod get_task_head;
pub mod launch_task;
pub mod list_tasks;
pub mod list_tasks_head;
pub mod publisher_callback;
pub mod queues;
pub mod revoke_callback;
pub mod revoke_task;
