//! Send request validation with field-level issues

use crate::compose::encode::EncodedImage;
use crate::io::configuration::{MAX_MESSAGE_CHARS, MAX_SENDER_NAME_CHARS};
use crate::io::error::{BouquetError, FieldIssue, Result};
use serde::Deserialize;

/// A bouquet delivery request as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    /// Recipient email address
    pub receiver_email: String,
    /// Optional name shown as the sender
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Greeting text, may be empty
    #[serde(default)]
    pub message: String,
    /// Rendered bouquet as a base64 `data:` URL
    pub image_data: String,
}

/// A send request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSend {
    /// Recipient email address, trimmed
    pub recipient: String,
    /// Sender name, absent when blank
    pub sender_name: Option<String>,
    /// Greeting text
    pub message: String,
    /// Decoded bouquet image
    pub image: EncodedImage,
}

impl SendRequest {
    /// Check every field, collecting all issues before failing
    ///
    /// # Errors
    ///
    /// Returns [`BouquetError::Validation`] listing each rejected field
    pub fn validate(&self) -> Result<ValidatedSend> {
        let mut issues = Vec::new();

        let recipient = self.receiver_email.trim();
        if !is_valid_email(recipient) {
            issues.push(FieldIssue::new(
                "receiver_email",
                "Must be valid abc@xyz.com format",
            ));
        }

        let sender_name = self
            .sender_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        if sender_name.is_some_and(|name| name.chars().count() > MAX_SENDER_NAME_CHARS) {
            issues.push(FieldIssue::new(
                "sender_name",
                format!("Sender name must be {MAX_SENDER_NAME_CHARS} characters or less"),
            ));
        }

        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            issues.push(FieldIssue::new(
                "message",
                format!("Message must be {MAX_MESSAGE_CHARS} characters or less"),
            ));
        }

        let image = match EncodedImage::from_data_url(&self.image_data) {
            Ok(image) => Some(image),
            Err(BouquetError::Validation {
                issues: image_issues,
            }) => {
                issues.extend(image_issues);
                None
            }
            Err(other) => return Err(other),
        };

        match image {
            Some(image) if issues.is_empty() => Ok(ValidatedSend {
                recipient: recipient.to_string(),
                sender_name: sender_name.map(str::to_string),
                message: self.message.clone(),
                image,
            }),
            _ => Err(BouquetError::Validation { issues }),
        }
    }
}

/// Whether `address` looks like `local@domain.tld`
///
/// Local part: ASCII letters, digits and `._%+-`. Domain: letters, digits,
/// `.` and `-`, ending in a dot and an alphabetic label of two or more letters.
pub fn is_valid_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));

    // TLD is everything after the last dot
    let domain_ok = domain.rsplit_once('.').is_some_and(|(host, tld)| {
        !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && tld.len() >= 2
            && tld.chars().all(|c| c.is_ascii_alphabetic())
    });

    local_ok && domain_ok
}
