//! ad-preview: MIME sniffing and bounded-size image previews.
//!
//! [`PreviewGenerator`] decodes JPEG, PNG, or GIF input, scales it with a
//! Catmull-Rom kernel so the dominant axis meets the configured bound, and
//! re-encodes the result as PNG.

pub mod mime;
pub mod preview;

pub use mime::{detect_mime_type, is_supported_mime_type, SUPPORTED_MIME_TYPES};
pub use preview::{preview_dimensions, Preview, PreviewGenerator, PREVIEW_MIME_TYPE};
