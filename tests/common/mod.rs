//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wraps a fully-constructed [`Services`]
//! bundle, plus in-memory image fixtures encoded with the `image` crate.

#![allow(dead_code)]

use std::io::Cursor;
use std::time::Duration;

use ad_core::config::Config;
use ad_services::{Event, Image, NewEvent, NewImage, Services};
use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, ImageBuffer, ImageFormat, Rgb, Rgba};

/// Test harness wrapping both resource services.
pub struct TestHarness {
    pub services: Services,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            services: Services::from_config(&config),
        }
    }

    /// Create the sample event used by the demo client.
    pub fn create_classify_event(&self) -> Event {
        self.services
            .events
            .create(classify_event())
            .expect("failed to create event")
    }

    /// Create `count` numbered events, returned oldest first.
    pub fn create_events(&self, count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| {
                self.services
                    .events
                    .create(NewEvent::new(
                        format!("users/{i}"),
                        "animal-classifier",
                        "classify",
                        Duration::from_millis(i as u64),
                    ))
                    .expect("failed to create event")
            })
            .collect()
    }

    /// Upload a PNG of the given size.
    pub fn create_png_image(&self, filename: &str, width: u32, height: u32) -> Image {
        self.services
            .images
            .create(NewImage::new(filename, png(width, height)))
            .expect("failed to create image")
    }
}

/// The event recorded by the demo client.
pub fn classify_event() -> NewEvent {
    NewEvent::new(
        "users/anonymous",
        "animal-classifier",
        "classify",
        Duration::from_millis(1500),
    )
}

fn gradient(width: u32, height: u32) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
    })
}

/// PNG-encoded gradient.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(gradient(width, height))
        .write_to(&mut buf, ImageFormat::Png)
        .expect("failed to encode png");
    buf.into_inner()
}

/// JPEG-encoded gradient.
pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let rgb = ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 90]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .expect("failed to encode jpeg");
    buf.into_inner()
}

/// Single-frame GIF-encoded gradient.
pub fn gif(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .encode_frame(Frame::new(gradient(width, height)))
            .expect("failed to encode gif");
    }
    buf
}

/// Dimensions of PNG-encoded bytes.
pub fn png_dimensions(data: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory_with_format(data, ImageFormat::Png)
        .expect("preview is not a png");
    (img.width(), img.height())
}
