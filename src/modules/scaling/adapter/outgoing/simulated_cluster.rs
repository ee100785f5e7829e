use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::modules::scaling::application::domain::entities::{EnvironmentSpec, Unit, UnitState};
use crate::modules::scaling::application::ports::outgoing::cluster_adapter::ClusterAdapter;
use crate::shared::error::ApiError;

/// Mock-mode cluster: an in-memory fleet whose units start instantly.
/// Tests use it to observe the commands the capacity controller issues.
pub struct SimulatedCluster {
    default_environment: String,
    environments: RwLock<Vec<String>>,
    units: RwLock<HashMap<(String, String), BTreeMap<u32, Unit>>>,
    ensure_calls: RwLock<Vec<(String, String, u32)>>,
    resolve_calls: RwLock<Vec<(String, String, u32)>>,
}

impl SimulatedCluster {
    pub fn new(default_environment: &str) -> Self {
        Self {
            default_environment: default_environment.to_string(),
            environments: RwLock::new(vec![default_environment.to_string()]),
            units: RwLock::new(HashMap::new()),
            ensure_calls: RwLock::new(Vec::new()),
            resolve_calls: RwLock::new(Vec::new()),
        }
    }

    pub fn ensure_calls(&self) -> Vec<(String, String, u32)> {
        self.ensure_calls.read().expect("calls lock").clone()
    }

    pub fn resolve_calls(&self) -> Vec<(String, String, u32)> {
        self.resolve_calls.read().expect("calls lock").clone()
    }

    pub fn set_unit_state(&self, environment: &str, service: &str, number: u32, state: UnitState) {
        let mut units = self.units.write().expect("units lock");
        if let Some(unit) = units
            .get_mut(&(environment.to_string(), service.to_string()))
            .and_then(|fleet| fleet.get_mut(&number))
        {
            unit.state = state;
        }
    }

    fn known(&self, environment: &str) -> Result<(), ApiError> {
        if self
            .environments
            .read()
            .expect("environments lock")
            .iter()
            .any(|name| name == environment)
        {
            Ok(())
        } else {
            Err(ApiError::not_found(format!(
                "No environment with name {environment}."
            )))
        }
    }
}

#[async_trait]
impl ClusterAdapter for SimulatedCluster {
    async fn environments(&self) -> Result<(Vec<String>, String), ApiError> {
        Ok((
            self.environments.read().expect("environments lock").clone(),
            self.default_environment.clone(),
        ))
    }

    async fn environment_status(&self, environment: &str) -> Result<Value, ApiError> {
        self.known(environment)?;
        let units = self.units.read().expect("units lock");
        let services: Vec<&String> = units
            .keys()
            .filter(|(env, _)| env == environment)
            .map(|(_, service)| service)
            .collect();
        Ok(json!({"name": environment, "services": services}))
    }

    async fn add_environment(&self, spec: &EnvironmentSpec) -> Result<(), ApiError> {
        let mut environments = self.environments.write().expect("environments lock");
        if environments.iter().any(|name| name == &spec.name) {
            return Err(ApiError::invalid(format!(
                "Environment {} already exists.",
                spec.name
            )));
        }
        environments.push(spec.name.clone());
        Ok(())
    }

    async fn destroy_environment(&self, environment: &str) -> Result<(), ApiError> {
        self.known(environment)?;
        if environment == self.default_environment {
            return Err(ApiError::invalid(
                "The default environment cannot be destroyed.",
            ));
        }
        self.environments
            .write()
            .expect("environments lock")
            .retain(|name| name != environment);
        self.units
            .write()
            .expect("units lock")
            .retain(|(env, _), _| env != environment);
        Ok(())
    }

    async fn list_units(
        &self,
        environment: &str,
        service: &str,
    ) -> Result<BTreeMap<u32, Unit>, ApiError> {
        self.known(environment)?;
        Ok(self
            .units
            .read()
            .expect("units lock")
            .get(&(environment.to_string(), service.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn ensure_num_units(
        &self,
        environment: &str,
        service: &str,
        num_units: u32,
    ) -> Result<(), ApiError> {
        self.known(environment)?;
        self.ensure_calls.write().expect("calls lock").push((
            environment.to_string(),
            service.to_string(),
            num_units,
        ));
        let mut units = self.units.write().expect("units lock");
        let fleet = units
            .entry((environment.to_string(), service.to_string()))
            .or_default();
        while (fleet.len() as u32) < num_units {
            let number = fleet.keys().max().map(|n| n + 1).unwrap_or(0);
            fleet.insert(
                number,
                Unit {
                    number,
                    state: UnitState::Started,
                    public_address: Some(format!("{service}-{number}.local")),
                },
            );
        }
        while (fleet.len() as u32) > num_units {
            let number = *fleet.keys().next_back().expect("fleet not empty");
            fleet.remove(&number);
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
        self.known(environment)?;
        let mut units = self.units.write().expect("units lock");
        let removed = units
            .get_mut(&(environment.to_string(), service.to_string()))
            .and_then(|fleet| fleet.remove(&number));
        if removed.is_none() {
            return Err(ApiError::not_found(format!(
                "Unit {service}/{number} not found in environment {environment}."
            )));
        }
        Ok(())
    }

    async fn resolve_unit(
        &self,
        environment: &str,
        service: &str,
        number: u32,
    ) -> Result<(), ApiError> {
        self.known(environment)?;
        self.resolve_calls.write().expect("calls lock").push((
            environment.to_string(),
            service.to_string(),
            number,
        ));
        self.set_unit_state(environment, service, number, UnitState::Started);
        Ok(())
    }
}
