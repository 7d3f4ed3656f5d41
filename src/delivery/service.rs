//! Send and generate flows tying the delivery collaborators together

use crate::compose::encode::EncodedImage;
use crate::delivery::ai::BouquetImageGenerator;
use crate::delivery::artifact::ArtifactStore;
use crate::delivery::handoff::HandoffStore;
use crate::delivery::mail::{Attachment, Envelope, MailTransport};
use crate::delivery::prompt::image_prompt;
use crate::delivery::rate_limit::{Clock, RateLimiter, SystemClock};
use crate::delivery::validation::SendRequest;
use crate::io::error::Result;
use crate::selection::LabeledItem;
use std::path::PathBuf;
use tracing::info;

/// What a successful send produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Artifact filename, also used as the attachment name
    pub filename: String,
    /// Where the artifact was written
    pub path: PathBuf,
}

/// Rate-limited bouquet delivery
pub struct DeliveryService<T, C = SystemClock> {
    limiter: RateLimiter<C>,
    artifacts: ArtifactStore,
    transport: T,
    mail_from: String,
    handoff: HandoffStore,
}

impl<T: MailTransport> DeliveryService<T, SystemClock> {
    /// Create a service with the default rate limit on the system clock
    pub fn new(transport: T, artifacts: ArtifactStore, mail_from: impl Into<String>) -> Self {
        Self::with_limiter(transport, artifacts, mail_from, RateLimiter::new())
    }
}

impl<T: MailTransport, C: Clock> DeliveryService<T, C> {
    /// Create a service with a custom rate limiter
    pub fn with_limiter(
        transport: T,
        artifacts: ArtifactStore,
        mail_from: impl Into<String>,
        limiter: RateLimiter<C>,
    ) -> Self {
        Self {
            limiter,
            artifacts,
            transport,
            mail_from: mail_from.into(),
            handoff: HandoffStore::new(),
        }
    }

    /// Validate, persist and mail a bouquet
    ///
    /// On success the sent image is held for `session` until
    /// [`Self::take_handoff`] collects it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `client_key` is over its rate limit
    /// - The request fails validation
    /// - The artifact cannot be written
    /// - The transport fails to deliver
    pub async fn send_bouquet(
        &mut self,
        client_key: &str,
        session: &str,
        request: &SendRequest,
    ) -> Result<SendReceipt> {
        self.limiter.enforce(client_key)?;
        let validated = request.validate()?;

        let stored = self.artifacts.store(&validated.image)?;
        let envelope = Envelope::bouquet(
            &self.mail_from,
            validated.sender_name.as_deref(),
            &validated.recipient,
            &validated.message,
            Attachment {
                filename: stored.filename.clone(),
                content: validated.image.bytes().to_vec(),
            },
        );
        self.transport.send(&envelope).await?;

        info!(filename = %stored.filename, "bouquet sent");
        self.handoff.put(session, validated.image);
        Ok(SendReceipt {
            filename: stored.filename,
            path: stored.path,
        })
    }

    /// Ask a generative model for a bouquet image of `items`
    ///
    /// # Errors
    ///
    /// Returns an error if the client is over its rate limit, `items` is
    /// empty, or the generator fails or returns an unsupported image
    pub async fn generate_bouquet(
        &mut self,
        client_key: &str,
        generator: &(impl BouquetImageGenerator + ?Sized),
        items: &[LabeledItem],
    ) -> Result<EncodedImage> {
        self.limiter.enforce(client_key)?;
        let prompt = image_prompt(items)?;
        generator.generate(&prompt).await?.into_encoded()
    }

    /// Collect the bouquet last sent from `session`, at most once
    pub fn take_handoff(&mut self, session: &str) -> Option<EncodedImage> {
        self.handoff.take(session)
    }

    /// Mail transport in use
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}
