use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;
use crate::shared::error::ApiError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_response| ())
            .map_err(|e| e.to_string())
    }
}

/// SMTP mail sender. STARTTLS is opt-in, matching deployments that run the
/// mail relay on the local network.
pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_address: String,
}

impl SmtpEmailSender {
    pub fn new(
        server: &str,
        tls: bool,
        username: &str,
        password: &str,
        from_address: &str,
    ) -> Result<Self, ApiError> {
        let credentials = Credentials::new(username.to_string(), password.to_string());
        let builder = if tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)
                .map_err(|e| ApiError::internal(format!("Bad SMTP server {server}: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(server)
        };
        let transport = builder.credentials(credentials).build();
        Ok(Self {
            mailer: Box::new(transport),
            from_address: from_address.to_string(),
        })
    }

    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_address: &str) -> Self {
        Self {
            mailer,
            from_address: from_address.to_string(),
        }
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let email = Message::builder()
            .from(self.from_address.parse().map_err(|e| format!("{e:?}"))?)
            .to(to.parse().map_err(|e| format!("{e:?}"))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| e.to_string())?;
        self.mailer.send(email).await
    }
}
