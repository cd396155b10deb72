//! Content sniffing for uploaded image data.

use image::ImageFormat;

/// MIME type reported for data whose format is not recognized.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// MIME types accepted for image uploads.
pub const SUPPORTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Detect the MIME type of `data` from its leading magic bytes.
pub fn detect_mime_type(data: &[u8]) -> &'static str {
    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(format) => format.to_mime_type(),
        Err(_) => UNKNOWN_MIME_TYPE,
    }
}

/// Whether `mime_type` is one of [`SUPPORTED_MIME_TYPES`].
pub fn is_supported_mime_type(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type)
}
