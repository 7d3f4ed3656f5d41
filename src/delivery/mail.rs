//! Outbound bouquet mail and pluggable transports

use crate::io::configuration::{DEFAULT_MAIL_TEXT, MAIL_SUBJECT};
use crate::io::error::{BouquetError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File attached to a bouquet mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Attachment filename
    pub filename: String,
    /// Attachment bytes
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// A fully addressed bouquet mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    /// `From` header, `"Name <address>"` or a bare address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain text body
    pub text: String,
    /// Rendered bouquet
    pub attachment: Attachment,
}

impl Envelope {
    /// Address a bouquet mail
    ///
    /// The sender name, when present, labels the configured from address; an
    /// empty message is replaced by a default line.
    pub fn bouquet(
        from_address: &str,
        sender_name: Option<&str>,
        recipient: &str,
        message: &str,
        attachment: Attachment,
    ) -> Self {
        let from = sender_name.map_or_else(
            || from_address.to_string(),
            |name| format!("{name} <{from_address}>"),
        );
        let text = if message.trim().is_empty() {
            DEFAULT_MAIL_TEXT.to_string()
        } else {
            message.to_string()
        };

        Self {
            from,
            to: recipient.to_string(),
            subject: MAIL_SUBJECT.to_string(),
            text,
            attachment,
        }
    }
}

/// Delivers bouquet mail
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `envelope`
    ///
    /// # Errors
    ///
    /// Returns an external service error if delivery fails
    async fn send(&self, envelope: &Envelope) -> Result<()>;
}

/// Transport used when no mail delivery is configured; logs and succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTransport;

#[async_trait]
impl MailTransport for DisabledTransport {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        warn!(to = %envelope.to, "mail delivery not configured, skipping send");
        Ok(())
    }
}

/// Writes each mail into a directory as `<attachment>.json` plus the attachment
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    dir: PathBuf,
}

impl OutboxTransport {
    /// Create a transport writing into `dir`, created on first send
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl MailTransport for OutboxTransport {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(outbox_error(self.dir.clone(), "create outbox"))?;

        let attachment_path = self.dir.join(&envelope.attachment.filename);
        tokio::fs::write(&attachment_path, &envelope.attachment.content)
            .await
            .map_err(outbox_error(attachment_path.clone(), "write attachment"))?;

        let meta_path = self
            .dir
            .join(format!("{}.json", envelope.attachment.filename));
        let meta = serde_json::to_vec_pretty(envelope)
            .map_err(|e| crate::io::error::service_error("outbox", &e))?;
        tokio::fs::write(&meta_path, meta)
            .await
            .map_err(outbox_error(meta_path.clone(), "write envelope"))?;

        info!(to = %envelope.to, path = %meta_path.display(), "bouquet mail queued in outbox");
        Ok(())
    }
}

/// Transport picked from settings: the outbox when a directory is configured,
/// otherwise mail is skipped
#[derive(Debug, Clone)]
pub enum ConfiguredTransport {
    /// Queue mail into a directory
    Outbox(OutboxTransport),
    /// Log and skip every send
    Disabled(DisabledTransport),
}

impl ConfiguredTransport {
    /// Select the transport for an optional outbox directory
    pub fn from_outbox(dir: Option<&Path>) -> Self {
        dir.map_or(Self::Disabled(DisabledTransport), |dir| {
            Self::Outbox(OutboxTransport::new(dir))
        })
    }

    /// Whether sends actually leave the process
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Outbox(_))
    }
}

#[async_trait]
impl MailTransport for ConfiguredTransport {
    async fn send(&self, envelope: &Envelope) -> Result<()> {
        match self {
            Self::Outbox(transport) => transport.send(envelope).await,
            Self::Disabled(transport) => transport.send(envelope).await,
        }
    }
}

fn outbox_error(
    path: PathBuf,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> BouquetError {
    move |source| BouquetError::FileSystem {
        path,
        operation,
        source,
    }
}
