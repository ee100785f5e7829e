pub mod publisher_unit_count;
pub mod publisher_unit_destroy;
pub mod publisher_unit_ensure;
pub mod publisher_unit_get;
pub mod publisher_unit_list;
pub mod publisher_unit_remove_service;
pub mod transform_unit_count;
pub mod transform_unit_destroy;
pub mod transform_unit_ensure;
pub mod transform_unit_get;
pub mod transform_unit_list;
pub mod transform_unit_remove_service;

use serde::Deserialize;

use crate::modules::auth::application::services::authenticator::AccessRule;

pub(crate) const READ_RULES: [AccessRule; 2] = [AccessRule::AllowRoot, AccessRule::AllowAny];
pub(crate) const ADMIN_RULES: [AccessRule; 2] =
    [AccessRule::AllowRoot, AccessRule::Role("admin_platform")];

#[derive(Debug, Deserialize)]
pub struct EnsureUnitsRequest {
    pub num_units: u32,
}
