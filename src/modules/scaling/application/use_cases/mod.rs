pub mod add_environment;
pub mod destroy_environment;
pub mod destroy_unit;
pub mod ensure_units;
pub mod fetch_environment;
pub mod fetch_unit;
pub mod list_environments;
pub mod list_units;
