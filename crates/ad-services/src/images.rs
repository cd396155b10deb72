//! Image resources with previews generated at upload time.

use ad_core::config::Config;
use ad_core::{Collection, Error, ResourceName, Result};
use ad_preview::{detect_mime_type, is_supported_mime_type, Preview, PreviewGenerator};
use ad_store::{ListPage, PageRequest, ResourceStore};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata of an uploaded image. The original bytes are only returned by
/// [`ImageService::download`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// `images/<id>`.
    pub name: ResourceName,
    pub filename: String,
    /// MIME type detected from the uploaded data.
    pub mime_type: String,
    pub size_bytes: u64,
    pub create_time: DateTime<Utc>,
    pub preview: Preview,
}

/// Fields supplied when uploading an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewImage {
    pub filename: String,
    pub data: Bytes,
}

impl NewImage {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Original image data returned by [`ImageService::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub data: Bytes,
    pub mime_type: String,
}

/// Create/Get/List/Delete/Download over the `images` collection.
pub struct ImageService {
    store: ResourceStore<Image, Bytes>,
    previews: PreviewGenerator,
}

impl ImageService {
    /// Create an empty image service.
    pub fn new(config: &Config) -> Self {
        Self {
            store: ResourceStore::new(Collection::IMAGES, &config.store),
            previews: PreviewGenerator::from_config(&config.preview),
        }
    }

    /// Validate an upload, generate its preview, and store it.
    ///
    /// Nothing is stored unless every step succeeds.
    pub fn create(&self, new_image: NewImage) -> Result<Image> {
        if new_image.filename.is_empty() {
            return Err(Error::invalid_argument("filename is required"));
        }
        if new_image.data.is_empty() {
            return Err(Error::invalid_argument("data is required"));
        }

        let mime_type = detect_mime_type(&new_image.data);
        if !is_supported_mime_type(mime_type) {
            tracing::warn!(
                filename = %new_image.filename,
                mime_type,
                "Rejected image upload with unsupported type"
            );
            return Err(Error::invalid_argument(format!(
                "unsupported image type: {mime_type}"
            )));
        }

        let preview = self.previews.generate(&new_image.data).map_err(|e| {
            tracing::warn!(filename = %new_image.filename, error = %e, "Preview generation failed");
            let detail = match e {
                Error::Internal(message) => message,
                other => other.to_string(),
            };
            Error::internal(format!("failed to generate preview: {detail}"))
        })?;

        let NewImage { filename, data } = new_image;
        let size_bytes = data.len() as u64;
        let image = self.store.insert_with(data, |name, create_time| Image {
            name: name.clone(),
            filename,
            mime_type: mime_type.to_string(),
            size_bytes,
            create_time,
            preview,
        });

        tracing::info!(
            name = %image.name,
            mime_type = %image.mime_type,
            size_bytes,
            "Created image"
        );
        Ok(image)
    }

    /// Fetch image metadata by name.
    pub fn get(&self, name: &str) -> Result<Image> {
        self.store.get(name)
    }

    /// List images, newest first.
    pub fn list(&self, request: &PageRequest) -> ListPage<Image> {
        self.store.list(request)
    }

    /// Delete an image together with its preview and original data.
    pub fn delete(&self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        tracing::info!(name, "Deleted image");
        Ok(())
    }

    /// Return the original uploaded bytes and their detected MIME type.
    pub fn download(&self, name: &str) -> Result<Download> {
        let (image, data) = self.store.get_with_attachment(name)?;
        Ok(Download {
            data,
            mime_type: image.mime_type,
        })
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no images are stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
