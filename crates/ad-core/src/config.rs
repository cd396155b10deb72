//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! pagination, preview, and logging sections. Every section defaults sensibly
//! so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Page size used when a list request asks for zero or fewer items.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound on the number of items in one page.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Default preview bounding box edge, in pixels.
pub const DEFAULT_PREVIEW_BOUND: u32 = 200;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub preview: PreviewConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::invalid_argument(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.store.default_page_size == 0 {
            warnings.push(format!(
                "store.default_page_size is 0; {DEFAULT_PAGE_SIZE} will be used"
            ));
        }
        if self.store.max_page_size == 0 {
            warnings.push(format!(
                "store.max_page_size is 0; {MAX_PAGE_SIZE} will be used"
            ));
        }
        let limits = self.store.limits();
        if self.store.default_page_size > limits.max_page_size {
            warnings.push(format!(
                "store.default_page_size ({}) exceeds store.max_page_size ({}); it will be capped",
                self.store.default_page_size, limits.max_page_size
            ));
        }

        if self.preview.max_width == 0 || self.preview.max_height == 0 {
            warnings.push(format!(
                "preview bounds must be positive; {DEFAULT_PREVIEW_BOUND}x{DEFAULT_PREVIEW_BOUND} will be used"
            ));
        } else if self.preview.max_width != self.preview.max_height {
            warnings.push(format!(
                "preview box {}x{} is not square; previews of near-square images may exceed the minor bound",
                self.preview.max_width, self.preview.max_height
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Pagination settings shared by every resource store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    /// Effective limits with zero values replaced by the built-in defaults
    /// and the default page size capped at the maximum.
    pub fn limits(&self) -> StoreConfig {
        let max_page_size = if self.max_page_size == 0 {
            MAX_PAGE_SIZE
        } else {
            self.max_page_size
        };
        let default_page_size = if self.default_page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.default_page_size
        };
        StoreConfig {
            default_page_size: default_page_size.min(max_page_size),
            max_page_size,
        }
    }
}

/// Preview thumbnail bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_PREVIEW_BOUND,
            max_height: DEFAULT_PREVIEW_BOUND,
        }
    }
}

impl PreviewConfig {
    /// Effective bounds with zero values replaced by the default.
    pub fn bounds(&self) -> (u32, u32) {
        if self.max_width == 0 || self.max_height == 0 {
            (DEFAULT_PREVIEW_BOUND, DEFAULT_PREVIEW_BOUND)
        } else {
            (self.max_width, self.max_height)
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "apidemo=info,ad_services=info,ad_store=info,ad_preview=info".into(),
        }
    }
}
