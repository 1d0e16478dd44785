//! Collect translatable catalog strings into a Qt marker header.
//!
//! Score template names, the instrument catalog and the score orders all
//! carry user visible strings that need translation. This crate walks the
//! three sources and writes one `QT_TRANSLATE_NOOP` marker per string to a
//! generated header, tracing progress on stdout as it goes.

pub mod error;
pub mod generate;
pub mod instruments;
pub mod marker;
pub mod orders;
pub mod templates;
mod xml;

// Re-export main types for convenience
pub use error::{CatalogError, Result};
pub use generate::{run, GenerateConfig};
pub use marker::MarkerWriter;
