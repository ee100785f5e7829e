use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::dispatch::application::ports::outgoing::job_queue::{JobPayload, JobQueue};
use crate::shared::error::ApiError;

/// Mock-mode queue: fabricates task identifiers without a broker, and lets
/// tests inspect what would have been enqueued or force submission failures.
#[derive(Default)]
pub struct MockJobQueue {
    submissions: RwLock<Vec<(String, String, JobPayload)>>,
    revocations: RwLock<Vec<(String, bool)>>,
    fail_submissions: AtomicBool,
}

impl MockJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_submissions(&self, fail: bool) {
        self.fail_submissions.store(fail, Ordering::SeqCst);
    }

    /// (task_id, queue, payload) triples, in submission order.
    pub fn submissions(&self) -> Vec<(String, String, JobPayload)> {
        self.submissions.read().expect("submissions lock").clone()
    }

    pub fn revocations(&self) -> Vec<(String, bool)> {
        self.revocations.read().expect("revocations lock").clone()
    }
}

#[async_trait]
impl JobQueue for MockJobQueue {
    async fn submit(&self, queue: &str, payload: &JobPayload) -> Result<String, ApiError> {
        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(ApiError::transient("No task identifier returned."));
        }
        let task_id = Uuid::new_v4().to_string();
        self.submissions.write().expect("submissions lock").push((
            task_id.clone(),
            queue.to_string(),
            payload.clone(),
        ));
        Ok(task_id)
    }

    async fn revoke(&self, task_id: &str, terminate: bool) -> Result<(), ApiError> {
        self.revocations
            .write()
            .expect("revocations lock")
            .push((task_id.to_string(), terminate));
        Ok(())
    }
}
