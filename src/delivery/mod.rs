//! Delivery collaborators: limits, validation, persistence, mail and AI services

/// Optional generative services
pub mod ai;
/// Persisted bouquet images
pub mod artifact;
/// Gemini HTTP client
pub mod gemini;
/// Per-session handoff of the last sent bouquet
pub mod handoff;
/// Mail envelopes and transports
pub mod mail;
/// Image generation prompts
pub mod prompt;
/// Rolling-window rate limiting
pub mod rate_limit;
/// Send and generate flows
pub mod service;
/// Send request validation
pub mod validation;

pub use service::{DeliveryService, SendReceipt};
