use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::scaling::application::domain::entities::{EnvironmentSpec, Unit};
use crate::shared::error::ApiError;

/// Cluster port: environment and unit lifecycle of the worker fleets.
/// All calls may block on the underlying tooling and are bounded by the
/// configured external timeout.
#[async_trait]
pub trait ClusterAdapter: Send + Sync {
    /// Known environment names and the default one.
    async fn environments(&self) -> Result<(Vec<String>, String), ApiError>;
    async fn environment_status(&self, environment: &str) -> Result<Value, ApiError>;
    async fn add_environment(&self, spec: &EnvironmentSpec) -> Result<(), ApiError>;
    async fn destroy_environment(&self, environment: &str) -> Result<(), ApiError>;

    async fn list_units(
        &self,
        environment: &str,
        service: &str,
    ) -> Result<BTreeMap<u32, Unit>, ApiError>;
    async fn ensure_num_units(
        &self,
        environment: &str,
        service: &str,
        num_units: u32,
    ) -> Result<(), ApiError>;
    async fn destroy_unit(
        &self,
        environment: &str,
        service: &str,
        number: u32,
        terminate: bool,
    ) -> Result<(), ApiError>;
    /// Ask the cluster to retry a unit stuck in an error state.
    async fn resolve_unit(
        &self,
        environment: &str,
        service: &str,
        number: u32,
    ) -> Result<(), ApiError>;
}
