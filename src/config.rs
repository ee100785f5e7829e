// src/config.rs
use std::collections::HashMap;
use std::env;

use crate::shared::error::ApiError;

/// Runtime configuration, read from `ORCHESTRA_*` environment variables
/// (a `.env` file is honoured through dotenvy). Every option has an explicit
/// default; mock mode is selected by an empty `mongo_admin_connection`.
#[derive(Debug, Clone)]
pub struct OrchestraConfig {
    /// Address the HTTP server binds to, e.g. `0.0.0.0:5000`.
    pub bind: String,
    /// Public base URL of this API, prepended to worker callback paths.
    pub api_url: String,
    pub mongo_admin_connection: String,
    pub rabbit_connection: String,
    pub root_secret: String,
    pub node_secret: String,

    // Shared storage (glusterfs mount).
    pub storage_address: String,
    pub storage_mountpoint: String,
    pub storage_path: String,

    // Mail notifications; disabled when `email_server` is empty.
    pub email_server: String,
    pub email_tls: bool,
    pub email_address: String,
    pub email_username: String,
    pub email_password: String,

    // Cluster adapter inputs.
    pub charms_release: String,
    pub charms_repository: String,
    pub juju_config_file: String,
    pub transform_service: String,
    pub publisher_service: String,

    pub transform_queues: Vec<String>,
    pub publisher_queues: Vec<String>,

    // Control loops.
    pub time_speedup: f64,
    pub checks_per_hour: u32,
    pub statistics_path: String,
    pub events_file: String,
    pub task_stall_seconds: u64,
    pub max_output_media_assets: usize,

    /// Timeout applied to every external call (store, queue, cluster, storage).
    pub external_timeout_seconds: u64,

    /// Default tracing filter when RUST_LOG is absent.
    pub log_level: String,
}

impl OrchestraConfig {
    pub fn from_env() -> Self {
        Self {
            bind: var("ORCHESTRA_BIND", "0.0.0.0:5000"),
            api_url: var("ORCHESTRA_API_URL", "http://127.0.0.1:5000"),
            mongo_admin_connection: var("ORCHESTRA_MONGO_ADMIN_CONNECTION", ""),
            rabbit_connection: var("ORCHESTRA_RABBIT_CONNECTION", ""),
            root_secret: var("ORCHESTRA_ROOT_SECRET", ""),
            node_secret: var("ORCHESTRA_NODE_SECRET", ""),
            storage_address: var("ORCHESTRA_STORAGE_ADDRESS", ""),
            storage_mountpoint: var("ORCHESTRA_STORAGE_MOUNTPOINT", "medias_volume"),
            storage_path: var("ORCHESTRA_STORAGE_PATH", "/mnt/storage"),
            email_server: var("ORCHESTRA_EMAIL_SERVER", ""),
            email_tls: var("ORCHESTRA_EMAIL_TLS", "false") == "true",
            email_address: var("ORCHESTRA_EMAIL_ADDRESS", ""),
            email_username: var("ORCHESTRA_EMAIL_USERNAME", ""),
            email_password: var("ORCHESTRA_EMAIL_PASSWORD", ""),
            charms_release: var("ORCHESTRA_CHARMS_RELEASE", "trusty"),
            charms_repository: var("ORCHESTRA_CHARMS_REPOSITORY", "charms"),
            juju_config_file: var("ORCHESTRA_JUJU_CONFIG_FILE", "juju/environments.yaml"),
            transform_service: var("ORCHESTRA_TRANSFORM_SERVICE", "oscied-transform"),
            publisher_service: var("ORCHESTRA_PUBLISHER_SERVICE", "oscied-publisher"),
            transform_queues: list(&var("ORCHESTRA_TRANSFORM_QUEUES", "transform")),
            publisher_queues: list(&var("ORCHESTRA_PUBLISHER_QUEUES", "publisher")),
            time_speedup: var("ORCHESTRA_TIME_SPEEDUP", "1").parse().unwrap_or(1.0),
            checks_per_hour: var("ORCHESTRA_CHECKS_PER_HOUR", "12").parse().unwrap_or(12),
            statistics_path: var("ORCHESTRA_STATISTICS_PATH", "statistics"),
            events_file: var("ORCHESTRA_EVENTS_FILE", ""),
            task_stall_seconds: var("ORCHESTRA_TASK_STALL_SECONDS", "60")
                .parse()
                .unwrap_or(60),
            max_output_media_assets: var("ORCHESTRA_MAX_OUTPUT_MEDIA_ASSETS", "15")
                .parse()
                .unwrap_or(15),
            external_timeout_seconds: var("ORCHESTRA_EXTERNAL_TIMEOUT_SECONDS", "10")
                .parse()
                .unwrap_or(10),
            log_level: var("ORCHESTRA_LOG_LEVEL", "info"),
        }
    }

    /// Without a store DSN the orchestrator runs fully in memory.
    pub fn is_mock(&self) -> bool {
        self.mongo_admin_connection.is_empty()
    }

    pub fn external_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.external_timeout_seconds)
    }

    /// Parse the per-environment capacity schedules from `events_file`, a
    /// JSON document `{environment: {hour: {service: units}}}`.
    pub fn load_events(&self) -> Result<HashMap<String, EnvironmentEvents>, ApiError> {
        if self.events_file.is_empty() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.events_file)
            .map_err(|e| ApiError::internal(format!("Cannot read events file: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| ApiError::internal(format!("Cannot parse events file: {e}")))
    }
}

/// Raw per-environment schedule: hour-of-day (as string key) to service to
/// desired unit count.
pub type EnvironmentEvents = HashMap<String, HashMap<String, u32>>;

fn var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_lists_split_on_commas() {
        assert_eq!(list("transform, transform_amazon"), vec![
            "transform".to_string(),
            "transform_amazon".to_string()
        ]);
        assert!(list("").is_empty());
    }

    #[test]
    fn empty_mongo_dsn_selects_mock_mode() {
        let mut config = OrchestraConfig::from_env();
        config.mongo_admin_connection = String::new();
        assert!(config.is_mock());
        config.mongo_admin_connection = "mongodb://localhost".to_string();
        assert!(!config.is_mock());
    }
}
