//! ad-core: shared identifiers, resource names, errors, and configuration.
//!
//! This crate is the foundational dependency for the other ad-* crates. It
//! owns the `"<collection>/<id>"` naming convention, the error taxonomy every
//! resource operation reports through, and the JSON configuration model.

pub mod config;
pub mod error;
pub mod ids;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
