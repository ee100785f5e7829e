pub mod count_profiles;
pub mod count_tasks;
pub mod create_profile;
pub mod delete_profile;
pub mod get_profile;
pub mod get_task;
pub mod get_task_head;
pub mod launch_task;
pub mod list_profiles;
pub mod list_tasks;
pub mod list_tasks_head;
pub mod profile_encoders;
pub mod queues;
pub mod revoke_task;
pub mod transform_callback;
