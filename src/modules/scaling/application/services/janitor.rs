use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::transform::application::ports::incoming::use_cases::revoke_transform::{
    RevokeTransformCommand, RevokeTransformUseCase,
};
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::api::listing::{ListParams, SortOrder};
use crate::shared::clock::DATETIME_FORMAT;
use crate::shared::error::ApiError;

/// What one janitor pass cleaned up.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JanitorReport {
    pub revoked_tasks: Vec<String>,
    pub orphans_deleted: u32,
    pub outputs_trimmed: u32,
}

/// Background cleanup of the task/media population: revokes PROGRESS tasks
/// whose eta stopped moving, deletes PENDING output medias whose launch
/// never produced a task (the bus refused the job), and bounds the number
/// of derived READY medias kept on the shared storage.
pub struct Janitor {
    revoke_transform: Arc<dyn RevokeTransformUseCase>,
    medias: Arc<MediaService>,
    tasks: Arc<dyn TransformTaskRepository>,
    stall: Duration,
    max_output_media_assets: usize,
    progress_seen: HashMap<String, (Instant, Option<Value>)>,
}

impl Janitor {
    pub fn new(
        revoke_transform: Arc<dyn RevokeTransformUseCase>,
        medias: Arc<MediaService>,
        tasks: Arc<dyn TransformTaskRepository>,
        stall: Duration,
        max_output_media_assets: usize,
    ) -> Self {
        Self {
            revoke_transform,
            medias,
            tasks,
            stall,
            max_output_media_assets,
            progress_seen: HashMap::new(),
        }
    }

    pub async fn tick(&mut self) -> Result<JanitorReport, ApiError> {
        let mut report = JanitorReport::default();
        self.revoke_stalled_tasks(&mut report).await?;
        self.delete_orphan_pending_medias(&mut report).await?;
        self.trim_output_medias(&mut report).await?;
        Ok(report)
    }

    /// A PROGRESS task whose `eta_time` has not changed for the stall window
    /// is considered dead and revoked (output media deleted with it).
    async fn revoke_stalled_tasks(&mut self, report: &mut JanitorReport) -> Result<(), ApiError> {
        let params = ListParams {
            filter: Some(json!({"status": "PROGRESS"})),
            ..ListParams::default()
        };
        let tasks = self.tasks.list(params).await.map_err(ApiError::from)?;
        let live_ids: Vec<&String> = tasks.iter().map(|task| &task.id).collect();
        self.progress_seen
            .retain(|id, _| live_ids.iter().any(|live| *live == id));
        for task in &tasks {
            let eta = task.statistic.get("eta_time").cloned();
            let frozen_since = match self.progress_seen.get(&task.id) {
                Some((first_seen, previous)) if *previous == eta => Some(first_seen.elapsed()),
                _ => None,
            };
            match frozen_since {
                Some(elapsed) if elapsed >= self.stall => {
                    warn!(
                        task = %task.id,
                        "PROGRESS task has not updated its eta_time, revoking"
                    );
                    self.revoke_transform
                        .execute(RevokeTransformCommand {
                            task_id: task.id.clone(),
                            terminate: true,
                            remove: false,
                            delete_media: true,
                        })
                        .await?;
                    self.progress_seen.remove(&task.id);
                    report.revoked_tasks.push(task.id.clone());
                }
                Some(_) => {}
                None => {
                    self.progress_seen
                        .insert(task.id.clone(), (Instant::now(), eta));
                }
            }
        }
        Ok(())
    }

    /// PENDING medias without any task pointing at them are leftovers of a
    /// failed enqueue; after a grace period they are removed.
    async fn delete_orphan_pending_medias(
        &mut self,
        report: &mut JanitorReport,
    ) -> Result<(), ApiError> {
        let params = ListParams {
            filter: Some(json!({"status": "PENDING"})),
            ..ListParams::default()
        };
        let views = self
            .medias
            .list_medias_raw(params)
            .await?;
        for media in views {
            let owning_task = self
                .tasks
                .find_one(json!({"media_out_id": media.id.to_string()}))
                .await
                .map_err(ApiError::from)?;
            if owning_task.is_some() {
                continue;
            }
            if !self.is_past_grace(media.metadata.get("add_date")) {
                continue;
            }
            info!(media = %media.id, "Deleting orphan PENDING media");
            self.medias.delete_media(media).await?;
            report.orphans_deleted += 1;
        }
        Ok(())
    }

    /// Keep at most `max_output_media_assets` derived READY medias, deleting
    /// the oldest first.
    async fn trim_output_medias(&mut self, report: &mut JanitorReport) -> Result<(), ApiError> {
        let params = ListParams {
            filter: Some(json!({"status": "READY", "parent_id": {"$ne": null}})),
            sort: vec![("metadata.add_date".to_string(), SortOrder::Ascending)],
            ..ListParams::default()
        };
        let outputs = self.medias.list_medias_raw(params).await?;
        let excess = outputs.len().saturating_sub(self.max_output_media_assets);
        for media in outputs.into_iter().take(excess) {
            info!(media = %media.id, title = ?media.title(), "Trimming output media");
            self.medias.delete_media(media).await?;
            report.outputs_trimmed += 1;
        }
        Ok(())
    }

    fn is_past_grace(&self, add_date: Option<&Value>) -> bool {
        let Some(add_date) = add_date.and_then(Value::as_str) else {
            return true;
        };
        match NaiveDateTime::parse_from_str(add_date, DATETIME_FORMAT) {
            Ok(added) => {
                let age = chrono::Utc::now().naive_utc() - added;
                age.num_seconds() >= self.stall.as_secs() as i64
            }
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    use crate::modules::media::application::domain::entities::{Media, MediaStatus};
    use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::{
        ProgressUpdate, TransformCallbackCommand,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::TransformFixture;

    fn titled(title: &str) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("title".to_string(), json!(title));
        metadata
    }

    fn janitor(builder: &TestAppStateBuilder, stall: Duration, max_outputs: usize) -> Janitor {
        Janitor::new(
            builder.transform.revoke.clone(),
            builder.media_store(),
            builder.transform_tasks.clone(),
            stall,
            max_outputs,
        )
    }

    async fn progress(builder: &TestAppStateBuilder, task_id: &str, eta: i64) {
        builder
            .transform
            .callback
            .execute(TransformCallbackCommand {
                task_id: task_id.to_string(),
                status: "PROGRESS".to_string(),
                progress: ProgressUpdate {
                    eta_time: Some(json!(eta)),
                    ..ProgressUpdate::default()
                },
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stalled_progress_tasks_are_revoked_on_the_second_pass() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;
        progress(&builder, &task.id, 100).await;

        // First pass records the eta, second pass sees it frozen.
        let mut janitor = janitor(&builder, Duration::ZERO, 100);
        let report = janitor.tick().await.unwrap();
        assert!(report.revoked_tasks.is_empty());
        let report = janitor.tick().await.unwrap();
        assert_eq!(report.revoked_tasks, vec![task.id.clone()]);

        let task = builder
            .transform_tasks
            .find_by_id(&task.id)
            .await
            .unwrap()
            .unwrap();
        assert!(task.revoked);
    }

    #[tokio::test]
    async fn progressing_tasks_are_left_alone() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        let task = fixture.launch(&builder).await;

        let mut janitor = janitor(&builder, Duration::ZERO, 100);
        for eta in [100, 90, 80] {
            progress(&builder, &task.id, eta).await;
            let report = janitor.tick().await.unwrap();
            assert!(report.revoked_tasks.is_empty());
        }
    }

    #[tokio::test]
    async fn orphan_pending_medias_are_deleted() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        // A PENDING media nobody launched a task for (failed enqueue leftover).
        let mut orphan = Media::new(
            fixture.user.id,
            Some(fixture.media_in.id),
            "uri://orphan",
            "orphan.mp4",
            titled("Orphan"),
            MediaStatus::Pending,
        );
        builder.media_store().save_media(&mut orphan).await.unwrap();

        let mut janitor = janitor(&builder, Duration::ZERO, 100);
        let report = janitor.tick().await.unwrap();
        assert_eq!(report.orphans_deleted, 1);
        let media = builder.media_store().get_media(orphan.id).await.unwrap();
        assert_eq!(media.status, MediaStatus::Deleted);
    }

    #[tokio::test]
    async fn output_medias_are_capped_to_the_configured_maximum() {
        let builder = TestAppStateBuilder::default();
        let fixture = TransformFixture::seed(&builder).await;
        for i in 0..3 {
            let mut output = Media::new(
                fixture.user.id,
                Some(fixture.media_in.id),
                &format!("uri://output-{i}"),
                &format!("output-{i}.mp4"),
                titled(&format!("Output {i}")),
                MediaStatus::Ready,
            );
            output.add_metadata("add_date", json!(format!("2013-09-1{i} 10:00")), true);
            builder.media_store().save_media(&mut output).await.unwrap();
        }

        let mut janitor = janitor(&builder, Duration::ZERO, 1);
        let report = janitor.tick().await.unwrap();
        assert_eq!(report.outputs_trimmed, 2);
        // The newest output survives, the source media is untouched.
        let ready = builder
            .media_store()
            .count_medias(Some(json!({"status": "READY"})))
            .await
            .unwrap();
        assert_eq!(ready, 2);
    }
}
