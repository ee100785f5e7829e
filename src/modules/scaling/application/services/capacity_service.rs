use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::modules::scaling::application::domain::entities::UnitState;
use crate::modules::scaling::application::domain::events_table::EventsTable;
use crate::modules::scaling::application::ports::outgoing::cluster_adapter::ClusterAdapter;
use crate::shared::error::ApiError;

/// What a reconciliation tick decided to do, for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityAction {
    Ensured { service: String, num_units: u32 },
    Resolved { service: String, number: u32 },
}

/// Reconciles one environment against its event table: desired counts come
/// from the table, observed counts from the cluster, and units stuck in an
/// error state get a single retry hint until they leave that state. The
/// per-environment mutex is shared with the manual unit endpoints so only
/// one reconciliation is in flight at a time.
pub struct CapacityController {
    environment: String,
    events: EventsTable,
    /// (event-table key, cluster service name) per managed service.
    services: Vec<(String, String)>,
    cluster: Arc<dyn ClusterAdapter>,
    lock: Arc<Mutex<()>>,
    reported_errors: HashSet<(String, u32)>,
}

impl CapacityController {
    pub fn new(
        environment: &str,
        events: EventsTable,
        services: Vec<(String, String)>,
        cluster: Arc<dyn ClusterAdapter>,
        lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            environment: environment.to_string(),
            events,
            services,
            cluster,
            lock,
            reported_errors: HashSet::new(),
        }
    }

    /// One reconciliation pass at the given simulated hour. A service that
    /// fails to reconcile is logged and does not prevent the others.
    pub async fn tick(&mut self, hour: u8) -> Vec<CapacityAction> {
        let lock = self.lock.clone();
        let _guard = lock.lock().await;
        let Some(event) = self.events.lookup(hour).cloned() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        for (key, service) in self.services.clone() {
            let Some(planned) = event.get(&key).copied() else {
                continue;
            };
            if let Err(error) = self
                .reconcile_service(&service, planned, &mut actions)
                .await
            {
                warn!(
                    environment = %self.environment,
                    service,
                    %error,
                    "Communication error, retrying next tick"
                );
            }
        }
        actions
    }

    async fn reconcile_service(
        &mut self,
        service: &str,
        planned: u32,
        actions: &mut Vec<CapacityAction>,
    ) -> Result<(), ApiError> {
        let units = self.cluster.list_units(&self.environment, service).await?;
        if units.len() as u32 != planned {
            info!(
                environment = %self.environment,
                service,
                planned,
                observed = units.len(),
                "Ensure units"
            );
            self.cluster
                .ensure_num_units(&self.environment, service, planned)
                .await?;
            actions.push(CapacityAction::Ensured {
                service: service.to_string(),
                num_units: planned,
            });
        }
        for (number, unit) in &units {
            let key = (service.to_string(), *number);
            if unit.state == UnitState::Error {
                if self.reported_errors.insert(key) {
                    warn!(
                        environment = %self.environment,
                        service,
                        number,
                        "Unit in error state, sending resolve hint"
                    );
                    self.cluster
                        .resolve_unit(&self.environment, service, *number)
                        .await?;
                    actions.push(CapacityAction::Resolved {
                        service: service.to_string(),
                        number: *number,
                    });
                } else {
                    warn!(
                        environment = %self.environment,
                        service,
                        number,
                        "Unit still in error state"
                    );
                }
            } else {
                self.reported_errors.remove(&key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    use crate::modules::scaling::adapter::outgoing::simulated_cluster::SimulatedCluster;

    fn events() -> EventsTable {
        let mut entries = BTreeMap::new();
        entries.insert(
            0,
            HashMap::from([
                ("transform".to_string(), 0),
                ("publisher".to_string(), 0),
            ]),
        );
        entries.insert(8, HashMap::from([("transform".to_string(), 3)]));
        EventsTable::new(entries).unwrap()
    }

    fn controller(cluster: Arc<SimulatedCluster>) -> CapacityController {
        CapacityController::new(
            "default",
            events(),
            vec![
                ("transform".to_string(), "oscied-transform".to_string()),
                ("publisher".to_string(), "oscied-publisher".to_string()),
            ],
            cluster,
            Arc::new(Mutex::new(())),
        )
    }

    #[tokio::test]
    async fn converges_in_one_tick_and_stays_quiet() {
        let cluster = Arc::new(SimulatedCluster::new("default"));
        let mut controller = controller(cluster.clone());

        let actions = controller.tick(9).await;
        assert_eq!(
            actions,
            vec![CapacityAction::Ensured {
                service: "oscied-transform".to_string(),
                num_units: 3
            }]
        );

        // The fleet reports 3 started units now: two more ticks, no commands.
        for _ in 0..2 {
            assert!(controller.tick(9).await.is_empty());
        }
        assert_eq!(cluster.ensure_calls().len(), 1);
    }

    #[tokio::test]
    async fn scales_down_when_the_table_says_zero() {
        let cluster = Arc::new(SimulatedCluster::new("default"));
        let mut controller = controller(cluster.clone());
        controller.tick(9).await;
        let actions = controller.tick(2).await;
        assert!(actions.contains(&CapacityAction::Ensured {
            service: "oscied-transform".to_string(),
            num_units: 0
        }));
    }

    #[tokio::test]
    async fn error_units_get_a_single_resolve_hint() {
        let cluster = Arc::new(SimulatedCluster::new("default"));
        let mut controller = controller(cluster.clone());
        controller.tick(9).await;

        // Simulate the resolve hint not healing the unit.
        cluster.set_unit_state("default", "oscied-transform", 1, UnitState::Error);
        let actions = controller.tick(9).await;
        assert!(actions.contains(&CapacityAction::Resolved {
            service: "oscied-transform".to_string(),
            number: 1
        }));
        cluster.set_unit_state("default", "oscied-transform", 1, UnitState::Error);
        let actions = controller.tick(9).await;
        assert!(!actions
            .iter()
            .any(|action| matches!(action, CapacityAction::Resolved { .. })));

        // Once healed, a relapse is reported again.
        cluster.set_unit_state("default", "oscied-transform", 1, UnitState::Started);
        controller.tick(9).await;
        cluster.set_unit_state("default", "oscied-transform", 1, UnitState::Error);
        let actions = controller.tick(9).await;
        assert!(actions.contains(&CapacityAction::Resolved {
            service: "oscied-transform".to_string(),
            number: 1
        }));
    }
}
