//! Thumbnail generation.
//!
//! The preview keeps the source aspect ratio: the larger source axis is
//! scaled to the bound on that same axis and the other axis follows. With a
//! non-square bounding box this can overshoot the minor bound (a 210x200
//! source in a 300x200 box becomes 300x286); a square box never does.

use std::io::Cursor;

use ad_core::config::PreviewConfig;
use ad_core::{Error, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use serde::Serialize;

/// MIME type of every generated preview.
pub const PREVIEW_MIME_TYPE: &str = "image/png";

/// Derived thumbnail of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// PNG-encoded preview bytes.
    pub data: Bytes,
    /// Always [`PREVIEW_MIME_TYPE`].
    pub mime_type: String,
    /// Preview width in pixels.
    pub width: u32,
    /// Preview height in pixels.
    pub height: u32,
}

/// Compute preview dimensions for a `width` x `height` source.
///
/// If the source is wider than tall, the width becomes `max_width` and the
/// height is scaled proportionally; otherwise the height becomes `max_height`.
/// The scaled axis is rounded to the nearest pixel and never drops below 1.
pub fn preview_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width > height {
        (max_width, scale_axis(height, max_width, width))
    } else {
        (scale_axis(width, max_height, height), max_height)
    }
}

fn scale_axis(minor: u32, bound: u32, major: u32) -> u32 {
    let major = u64::from(major.max(1));
    let scaled = (u64::from(minor) * u64::from(bound) + major / 2) / major;
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

/// Produces bounded-size PNG previews from encoded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewGenerator {
    max_width: u32,
    max_height: u32,
}

impl Default for PreviewGenerator {
    fn default() -> Self {
        Self::from_config(&PreviewConfig::default())
    }
}

impl PreviewGenerator {
    /// Create a generator with an explicit bounding box. Zero bounds fall
    /// back to the default box.
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self::from_config(&PreviewConfig {
            max_width,
            max_height,
        })
    }

    /// Create a generator from the preview section of the configuration.
    pub fn from_config(config: &PreviewConfig) -> Self {
        let (max_width, max_height) = config.bounds();
        Self {
            max_width,
            max_height,
        }
    }

    /// The bounding box as `(max_width, max_height)`.
    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }

    /// Decode `data`, scale it into the bounding box, and encode it as PNG.
    ///
    /// The input format is detected from the data. Unrecognized, truncated,
    /// or corrupt input fails with [`Error::Internal`].
    pub fn generate(&self, data: &[u8]) -> Result<Preview> {
        let img = image::load_from_memory(data)
            .map_err(|e| Error::internal(format!("failed to decode image: {e}")))?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::internal("failed to decode image: empty image"));
        }

        let (target_width, target_height) =
            preview_dimensions(width, height, self.max_width, self.max_height);

        let resized = img.resize_exact(target_width, target_height, FilterType::CatmullRom);
        let rgba = DynamicImage::ImageRgba8(resized.to_rgba8());

        let mut buf = Cursor::new(Vec::new());
        rgba.write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| Error::internal(format!("failed to encode preview: {e}")))?;

        tracing::debug!(
            width,
            height,
            target_width,
            target_height,
            "Generated image preview"
        );

        Ok(Preview {
            data: Bytes::from(buf.into_inner()),
            mime_type: PREVIEW_MIME_TYPE.to_string(),
            width: target_width,
            height: target_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use image::codecs::gif::GifEncoder;
    use image::{Frame, ImageBuffer, Rgb, Rgba};
    use proptest::prelude::*;

    fn gradient(width: u32, height: u32) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        })
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(gradient(width, height))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let rgb = ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 64]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    fn gif(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut buf);
            encoder.encode_frame(Frame::new(gradient(width, height))).unwrap();
        }
        buf
    }

    fn decoded_dimensions(preview: &Preview) -> (u32, u32) {
        let img = image::load_from_memory_with_format(&preview.data, ImageFormat::Png).unwrap();
        img.dimensions()
    }

    #[test]
    fn landscape_dimensions() {
        assert_eq!(preview_dimensions(400, 300, 200, 200), (200, 150));
        assert_eq!(preview_dimensions(1920, 1080, 200, 200), (200, 113));
    }

    #[test]
    fn portrait_dimensions() {
        assert_eq!(preview_dimensions(300, 400, 200, 200), (150, 200));
    }

    #[test]
    fn square_dimensions() {
        assert_eq!(preview_dimensions(64, 64, 200, 200), (200, 200));
    }

    #[test]
    fn extreme_aspect_ratio_keeps_one_pixel() {
        assert_eq!(preview_dimensions(1000, 1, 200, 200), (200, 1));
        assert_eq!(preview_dimensions(1, 5000, 200, 200), (1, 200));
    }

    #[test]
    fn non_square_box_can_exceed_minor_bound() {
        assert_eq!(preview_dimensions(210, 200, 300, 200), (300, 286));
    }

    #[test]
    fn generates_png_from_png() {
        let preview = PreviewGenerator::default().generate(&png(400, 300)).unwrap();
        assert_eq!(preview.mime_type, "image/png");
        assert_eq!((preview.width, preview.height), (200, 150));
        assert_eq!(decoded_dimensions(&preview), (200, 150));
    }

    #[test]
    fn generates_from_jpeg() {
        let preview = PreviewGenerator::default().generate(&jpeg(120, 240)).unwrap();
        assert_eq!(decoded_dimensions(&preview), (100, 200));
    }

    #[test]
    fn generates_from_gif() {
        let preview = PreviewGenerator::default().generate(&gif(50, 25)).unwrap();
        assert_eq!(decoded_dimensions(&preview), (200, 100));
    }

    #[test]
    fn small_images_are_upscaled() {
        let preview = PreviewGenerator::default().generate(&png(10, 10)).unwrap();
        assert_eq!(decoded_dimensions(&preview), (200, 200));
    }

    #[test]
    fn custom_bounds() {
        let preview = PreviewGenerator::new(64, 64).generate(&png(256, 128)).unwrap();
        assert_eq!(decoded_dimensions(&preview), (64, 32));
    }

    #[test]
    fn zero_bounds_use_default() {
        assert_eq!(PreviewGenerator::new(0, 0).bounds(), (200, 200));
    }

    #[test]
    fn garbage_is_internal_error() {
        assert_matches!(
            PreviewGenerator::default().generate(b"definitely not an image"),
            Err(Error::Internal(msg)) if msg.starts_with("failed to decode image")
        );
    }

    #[test]
    fn truncated_png_is_internal_error() {
        let data = png(300, 300);
        let truncated = &data[..data.len() / 2];
        assert_matches!(
            PreviewGenerator::default().generate(truncated),
            Err(Error::Internal(_))
        );
    }

    proptest! {
        #[test]
        fn dominant_axis_meets_bound(w in 1u32..5000, h in 1u32..5000, bound in 1u32..1000) {
            let (pw, ph) = preview_dimensions(w, h, bound, bound);
            prop_assert_eq!(pw.max(ph), bound);

            let expected_minor =
                ((f64::from(w.min(h)) * f64::from(bound)) / f64::from(w.max(h))).round().max(1.0) as u32;
            prop_assert_eq!(pw.min(ph), expected_minor);
            prop_assert!(pw <= bound && ph <= bound);
        }
    }
}
