pub mod add_environment;
pub mod count_environments;
pub mod destroy_environment;
pub mod get_environment;
pub mod get_environment_head;
pub mod list_environments;
pub mod list_environments_head;

use crate::modules::auth::application::services::authenticator::AccessRule;

pub(crate) const ADMIN_RULES: [AccessRule; 2] =
    [AccessRule::AllowRoot, AccessRule::Role("admin_platform")];
