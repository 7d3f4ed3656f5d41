//! Virtual bouquet builder: seeded layout, raster composition and delivery
//!
//! Selected flowers and props are expanded into individual heads, placed in a
//! clustered dome by a deterministic seeded generator, and composited over a
//! vector-drawn wrap, stems and ribbon. The finished image can be mailed with
//! rate limiting, validation and on-disk persistence.

#![forbid(unsafe_code)]

/// Raster composition of placed heads over the vector bouquet scene
pub mod compose;
/// Rate-limited sending, persistence and optional generative services
pub mod delivery;
/// Input/output operations, configuration and error handling
pub mod io;
/// Deterministic head placement from a selection and a seed
pub mod layout;
/// Chosen items with quantities and the asset catalog
pub mod selection;

pub use io::error::{BouquetError, Result};
