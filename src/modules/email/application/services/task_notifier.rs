use std::sync::Arc;

use tracing::{debug, warn};

use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;

/// What kind of task a notification is about; only the mail wording differs.
#[derive(Debug, Clone, Copy)]
pub enum TaskKind {
    Transformation,
    Publication,
}

impl TaskKind {
    fn label(&self) -> &'static str {
        match self {
            TaskKind::Transformation => "Transformation",
            TaskKind::Publication => "Publication",
        }
    }
}

/// Sends task completion mails when the task asked for them. A notifier
/// without a sender (mail not configured) is a quiet no-op, and delivery
/// failures never fail the task transition that triggered them.
pub struct TaskNotifier {
    sender: Option<Arc<dyn EmailSender>>,
}

impl TaskNotifier {
    pub fn new(sender: Option<Arc<dyn EmailSender>>) -> Self {
        Self { sender }
    }

    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub async fn notify(&self, to: &str, kind: TaskKind, task_id: &str, status: &str) {
        let Some(sender) = &self.sender else {
            debug!("E-mail delivery is disabled in configuration.");
            return;
        };
        let subject = format!("OSCIED - {} task {} {}", kind.label(), task_id, status);
        let body = format!(
            "Your {} task {} finished with status {}.\n",
            kind.label().to_lowercase(),
            task_id,
            status
        );
        if let Err(error) = sender.send_email(to, &subject, &body).await {
            warn!(%task_id, to, %error, "Task notification mail failed");
        }
    }
}
