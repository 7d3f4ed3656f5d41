//! Input/output, configuration and error handling

/// Command-line interface
pub mod cli;
/// Constants and environment-driven settings
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Sprite decoding and image file output
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress bars for render runs
pub mod progress;
