use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::modules::scaling::application::domain::events_table::EventsTable;
use crate::modules::scaling::application::services::capacity_service::CapacityController;
use crate::modules::scaling::application::services::janitor::Janitor;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::modules::scaling::application::services::statistics::ServiceStatistics;
use crate::modules::transform::application::ports::incoming::use_cases::revoke_transform::RevokeTransformUseCase;
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::clock::SimulatedClock;

/// Everything the three control loops of one environment need.
pub struct EnvironmentLoops {
    pub environment: String,
    pub events: EventsTable,
    pub clock: SimulatedClock,
    pub checks_per_hour: u32,
    pub scaling: Arc<ScalingService>,
    pub revoke_transform: Arc<dyn RevokeTransformUseCase>,
    pub medias: Arc<MediaService>,
    pub transform_tasks: Arc<dyn TransformTaskRepository>,
    pub publisher_tasks: Arc<dyn PublisherTaskRepository>,
    pub statistics_path: PathBuf,
    pub statistics_maxlen: usize,
    pub task_stall: Duration,
    pub max_output_media_assets: usize,
}

/// Spawn the capacity, observer and janitor loops of one environment. Each
/// loop sleeps one tick between passes and survives communication errors.
pub fn spawn_environment_loops(deps: EnvironmentLoops) -> Vec<JoinHandle<()>> {
    let interval = deps.clock.tick_interval(deps.checks_per_hour);
    info!(
        environment = %deps.environment,
        interval_seconds = interval.as_secs_f64(),
        "Starting control loops"
    );
    vec![
        spawn_capacity_loop(&deps, interval),
        spawn_observer_loop(&deps, interval),
        spawn_janitor_loop(&deps, interval),
    ]
}

fn managed_services(scaling: &ScalingService) -> Vec<(String, String)> {
    [ServiceKind::Transform, ServiceKind::Publisher]
        .iter()
        .map(|kind| {
            (
                kind.key().to_string(),
                scaling.service_name(*kind).to_string(),
            )
        })
        .collect()
}

fn spawn_capacity_loop(deps: &EnvironmentLoops, interval: Duration) -> JoinHandle<()> {
    let mut controller = CapacityController::new(
        &deps.environment,
        deps.events.clone(),
        managed_services(&deps.scaling),
        deps.scaling.cluster(),
        deps.scaling.environment_lock(&deps.environment),
    );
    let clock = deps.clock.clone();
    tokio::spawn(async move {
        loop {
            let actions = controller.tick(clock.hour()).await;
            if !actions.is_empty() {
                info!(?actions, "Capacity reconciliation");
            }
            tokio::time::sleep(interval).await;
        }
    })
}

fn spawn_observer_loop(deps: &EnvironmentLoops, interval: Duration) -> JoinHandle<()> {
    let environment = deps.environment.clone();
    let events = deps.events.clone();
    let clock = deps.clock.clone();
    let cluster = deps.scaling.cluster();
    let transform_tasks = deps.transform_tasks.clone();
    let publisher_tasks = deps.publisher_tasks.clone();
    let statistics_path = deps.statistics_path.clone();
    let maxlen = deps.statistics_maxlen;
    let services = managed_services(&deps.scaling);

    tokio::spawn(async move {
        let mut statistics: Vec<(String, String, ServiceStatistics)> = services
            .into_iter()
            .map(|(key, service)| {
                let path = ServiceStatistics::file_path(&statistics_path, &environment, &key);
                let stats = ServiceStatistics::read_or_default(&path, &environment, &key, maxlen);
                (key, service, stats)
            })
            .collect();
        loop {
            let now = clock.now_string();
            let hour = clock.hour();
            for (key, service, stats) in &mut statistics {
                let planned = events.desired(hour, key);
                let units = match cluster.list_units(&environment, service).await {
                    Ok(units) => units,
                    Err(error) => {
                        warn!(environment = %environment, service = %service, %error,
                              "Communication error, skipping sample");
                        continue;
                    }
                };
                let mut tasks = BTreeMap::new();
                let statuses = [
                    ("pending", "PENDING"),
                    ("progress", "PROGRESS"),
                    ("success", "SUCCESS"),
                ];
                for (bucket, status) in statuses {
                    let filter = Some(json!({"status": status}));
                    let count = if *key == "transform" {
                        transform_tasks.count(filter).await
                    } else {
                        publisher_tasks.count(filter).await
                    };
                    match count {
                        Ok(count) => {
                            tasks.insert(bucket.to_string(), count as u32);
                        }
                        Err(error) => {
                            warn!(%error, "Cannot count tasks");
                        }
                    }
                }
                stats.update(&now, planned, &units, &tasks);
                let path = ServiceStatistics::file_path(&statistics_path, &environment, key);
                if let Err(error) = stats.write(&path) {
                    warn!(?path, %error, "Cannot persist statistics");
                }
            }
            tokio::time::sleep(interval).await;
        }
    })
}

fn spawn_janitor_loop(deps: &EnvironmentLoops, interval: Duration) -> JoinHandle<()> {
    let mut janitor = Janitor::new(
        deps.revoke_transform.clone(),
        deps.medias.clone(),
        deps.transform_tasks.clone(),
        deps.task_stall,
        deps.max_output_media_assets,
    );
    tokio::spawn(async move {
        loop {
            match janitor.tick().await {
                Ok(report) => {
                    if !report.revoked_tasks.is_empty()
                        || report.orphans_deleted > 0
                        || report.outputs_trimmed > 0
                    {
                        info!(?report, "Janitor pass");
                    }
                }
                Err(error) => warn!(%error, "Janitor pass failed"),
            }
            tokio::time::sleep(interval).await;
        }
    })
}
