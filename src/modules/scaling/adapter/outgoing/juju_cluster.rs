use std::collections::BTreeMap;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::modules::scaling::application::domain::entities::{
    EnvironmentSpec, Unit, UnitState,
};
use crate::modules::scaling::application::ports::outgoing::cluster_adapter::ClusterAdapter;
use crate::shared::error::ApiError;

/// Cluster adapter driving the juju CLI. Every invocation is bounded by the
/// configured timeout and failures surface as retriable errors; the
/// environments file is the single registry of deployable targets.
pub struct JujuClusterAdapter {
    environments_file: String,
    charms_repository: String,
    charms_release: String,
    timeout: Duration,
}

impl JujuClusterAdapter {
    pub fn new(
        environments_file: &str,
        charms_repository: &str,
        charms_release: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            environments_file: environments_file.to_string(),
            charms_repository: charms_repository.to_string(),
            charms_release: charms_release.to_string(),
            timeout,
        }
    }

    async fn juju(&self, args: &[&str]) -> Result<String, ApiError> {
        debug!(?args, "juju");
        // juju resolves $JUJU_HOME/environments.yaml.
        let juju_home = std::path::Path::new(&self.environments_file)
            .parent()
            .map(|parent| parent.to_path_buf())
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let output: Output = tokio::time::timeout(
            self.timeout,
            Command::new("juju").args(args).env("JUJU_HOME", juju_home).output(),
        )
        .await
        .map_err(|_| ApiError::transient("juju invocation timed out."))?
        .map_err(|e| ApiError::transient(format!("Cannot run juju: {e}")))?;
        if !output.status.success() {
            return Err(ApiError::transient(format!(
                "juju {} failed: {}",
                args.first().unwrap_or(&""),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn read_environments_file(&self) -> Result<Value, ApiError> {
        let raw = tokio::fs::read_to_string(&self.environments_file)
            .await
            .map_err(|e| {
                ApiError::internal(format!(
                    "Cannot read environments file {}: {e}",
                    self.environments_file
                ))
            })?;
        serde_yaml::from_str(&raw)
            .map_err(|e| ApiError::internal(format!("Bad environments file: {e}")))
    }

    async fn write_environments_file(&self, document: &Value) -> Result<(), ApiError> {
        let raw = serde_yaml::to_string(document)
            .map_err(|e| ApiError::internal(format!("Cannot serialize environments: {e}")))?;
        tokio::fs::write(&self.environments_file, raw)
            .await
            .map_err(|e| ApiError::internal(format!("Cannot write environments file: {e}")))
    }

    fn parse_units(status: &Value, service: &str) -> BTreeMap<u32, Unit> {
        let mut units = BTreeMap::new();
        let Some(raw_units) = status
            .get("services")
            .and_then(|services| services.get(service))
            .and_then(|service| service.get("units"))
            .and_then(Value::as_object)
        else {
            return units;
        };
        for (name, unit) in raw_units {
            let Some(number) = name
                .rsplit_once('/')
                .and_then(|(_, number)| number.parse::<u32>().ok())
            else {
                continue;
            };
            let state = unit
                .get("agent-state")
                .and_then(Value::as_str)
                .map(UnitState::from_agent_state)
                .unwrap_or(UnitState::Unknown);
            let public_address = unit
                .get("public-address")
                .and_then(Value::as_str)
                .map(str::to_string);
            units.insert(
                number,
                Unit {
                    number,
                    state,
                    public_address,
                },
            );
        }
        units
    }
}

#[async_trait]
impl ClusterAdapter for JujuClusterAdapter {
    async fn environments(&self) -> Result<(Vec<String>, String), ApiError> {
        let document = self.read_environments_file().await?;
        let names = document
            .get("environments")
            .and_then(Value::as_object)
            .map(|environments| environments.keys().cloned().collect())
            .unwrap_or_default();
        let default = document
            .get("default")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok((names, default))
    }

    async fn environment_status(&self, environment: &str) -> Result<Value, ApiError> {
        let raw = self
            .juju(&["status", "--environment", environment, "--format", "json"])
            .await?;
        serde_json::from_str(&raw)
            .map_err(|e| ApiError::transient(format!("Unreadable juju status: {e}")))
    }

    async fn add_environment(&self, spec: &EnvironmentSpec) -> Result<(), ApiError> {
        let mut document = self.read_environments_file().await?;
        let environments = document
            .as_object_mut()
            .and_then(|root| {
                root.entry("environments")
                    .or_insert_with(|| Value::Object(Default::default()))
                    .as_object_mut()
            })
            .ok_or_else(|| ApiError::internal("Bad environments file layout."))?;
        if environments.contains_key(&spec.name) {
            return Err(ApiError::invalid(format!(
                "Environment {} already exists.",
                spec.name
            )));
        }
        environments.insert(
            spec.name.clone(),
            serde_json::json!({
                "type": spec.kind,
                "region": spec.region,
                "access-key": spec.access_key,
                "secret-key": spec.secret_key,
                "control-bucket": spec.control_bucket,
                "default-series": self.charms_release,
            }),
        );
        self.write_environments_file(&document).await?;
        self.juju(&["bootstrap", "--environment", &spec.name])
            .await?;
        Ok(())
    }

    async fn destroy_environment(&self, environment: &str) -> Result<(), ApiError> {
        self.juju(&["destroy-environment", "--environment", environment, "--yes"])
            .await?;
        let mut document = self.read_environments_file().await?;
        if let Some(environments) = document
            .get_mut("environments")
            .and_then(Value::as_object_mut)
        {
            environments.remove(environment);
        }
        self.write_environments_file(&document).await
    }

    async fn list_units(
        &self,
        environment: &str,
        service: &str,
    ) -> Result<BTreeMap<u32, Unit>, ApiError> {
        let status = self.environment_status(environment).await?;
        Ok(Self::parse_units(&status, service))
    }

    async fn ensure_num_units(
        &self,
        environment: &str,
        service: &str,
        num_units: u32,
    ) -> Result<(), ApiError> {
        let units = self.list_units(environment, service).await?;
        let observed = units.len() as u32;
        if observed == num_units {
            return Ok(());
        }
        if observed == 0 && num_units > 0 {
            let count = num_units.to_string();
            self.juju(&[
                "deploy",
                "--environment",
                environment,
                "--repository",
                &self.charms_repository,
                "--num-units",
                &count,
                &format!("local:{}/{}", self.charms_release, service),
                service,
            ])
            .await?;
            return Ok(());
        }
        if observed < num_units {
            let count = (num_units - observed).to_string();
            self.juju(&[
                "add-unit",
                "--environment",
                environment,
                "--num-units",
                &count,
                service,
            ])
            .await?;
            return Ok(());
        }
        // Too many units: remove the highest numbers first.
        for number in units.keys().rev().take((observed - num_units) as usize) {
            if let Err(error) = self.destroy_unit(environment, service, *number, true).await {
                warn!(environment, service, number, %error, "destroy-unit failed");
            }
        }
        Ok(())
    }

    async fn destroy_unit(
        &self,
        environment: &str,
        service: &str,
        number: u32,
        _terminate: bool,
    ) -> Result<(), ApiError> {
        self.juju(&[
            "destroy-unit",
            "--environment",
            environment,
            &format!("{service}/{number}"),
        ])
        .await
        .map(|_| ())
    }

    async fn resolve_unit(
        &self,
        environment: &str,
        service: &str,
        number: u32,
    ) -> Result<(), ApiError> {
        self.juju(&[
            "resolved",
            "--environment",
            environment,
            "--retry",
            &format!("{service}/{number}"),
        ])
        .await
        .map(|_| ())
    }
}
