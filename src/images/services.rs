use anyhow::Context;
use bytes::Bytes;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::storage::StorageClient;

/// A file received from the client, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub body: Bytes,
    pub content_type: String,
}

impl ImageFile {
    pub fn new(body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}

/// Stores the file under a fresh key and returns where it can be fetched.
pub async fn upload_image(storage: &dyn StorageClient, file: ImageFile) -> AppResult<StoredImage> {
    if file.body.is_empty() {
        return Err(AppError::Validation("image file is empty".into()));
    }

    let ext = ext_from_mime(&file.content_type).unwrap_or("bin");
    let key = format!("boards/{}.{}", Uuid::new_v4(), ext);
    storage
        .put_object(&key, file.body, &file.content_type)
        .await
        .with_context(|| format!("put_object {}", key))
        .map_err(|e| {
            error!(error = %e, "image upload failed");
            AppError::UploadFailure(format!("{:#}", e))
        })?;

    let url = storage.object_url(&key);
    debug!(%key, %url, "image uploaded");
    Ok(StoredImage { key, url })
}

/// Best-effort removal of an object that will not be referenced.
pub async fn discard_image(storage: &dyn StorageClient, image: &StoredImage) {
    if let Err(e) = storage.delete_object(&image.key).await {
        error!(error = %e, key = %image.key, "failed to discard orphaned image");
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}
