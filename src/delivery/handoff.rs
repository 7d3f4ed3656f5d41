//! One-shot handoff of the last sent bouquet, keyed by session

use crate::compose::encode::EncodedImage;
use std::collections::HashMap;

/// Holds each session's most recently sent bouquet until it is taken
///
/// Owned by the caller and passed along explicitly; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct HandoffStore {
    slots: HashMap<String, EncodedImage>,
}

impl HandoffStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `image` for `session`, replacing anything held before
    pub fn put(&mut self, session: &str, image: EncodedImage) {
        self.slots.insert(session.to_string(), image);
    }

    /// Take the bouquet held for `session`, leaving nothing behind
    pub fn take(&mut self, session: &str) -> Option<EncodedImage> {
        self.slots.remove(session)
    }

    /// Number of sessions with a pending bouquet
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no session has a pending bouquet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
