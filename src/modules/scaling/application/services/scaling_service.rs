use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::modules::scaling::application::ports::outgoing::cluster_adapter::ClusterAdapter;

/// Shared context of the fleet operations: the cluster handle, the deployed
/// service names, and one mutex per environment so manual scaling and the
/// capacity loops never interleave.
pub struct ScalingService {
    cluster: Arc<dyn ClusterAdapter>,
    transform_service: String,
    publisher_service: String,
    locks: std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ScalingService {
    pub fn new(
        cluster: Arc<dyn ClusterAdapter>,
        transform_service: &str,
        publisher_service: &str,
    ) -> Self {
        Self {
            cluster,
            transform_service: transform_service.to_string(),
            publisher_service: publisher_service.to_string(),
            locks: std::sync::Mutex::new(HashMap::new()),
        }
    }

    pub fn cluster(&self) -> Arc<dyn ClusterAdapter> {
        self.cluster.clone()
    }

    pub fn service_name(&self, kind: ServiceKind) -> &str {
        match kind {
            ServiceKind::Transform => &self.transform_service,
            ServiceKind::Publisher => &self.publisher_service,
        }
    }

    /// The reconciliation mutex of an environment; held for every mutation.
    pub fn environment_lock(&self, environment: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .expect("locks mutex")
            .entry(environment.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
