//! ad-services: event and image resource services.
//!
//! Each service validates inbound requests, then delegates to its own
//! [`ResourceStore`](ad_store::ResourceStore). The image service also runs the
//! [`PreviewGenerator`](ad_preview::PreviewGenerator) before insertion, so a
//! failed preview never leaves a partial entry behind.

pub mod events;
pub mod images;

use ad_core::config::Config;

pub use ad_store::{ListPage, PageRequest};
pub use events::{Event, EventService, NewEvent};
pub use images::{Download, Image, ImageService, NewImage};

/// Both resource services, built from one configuration.
pub struct Services {
    pub events: EventService,
    pub images: ImageService,
}

impl Services {
    /// Build every service from `config`.
    pub fn from_config(config: &Config) -> Self {
        for warning in config.validate() {
            tracing::warn!("Config warning: {warning}");
        }

        Self {
            events: EventService::new(config),
            images: ImageService::new(config),
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
