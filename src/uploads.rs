//! Multipart image intake and disk storage.
//!
//! Uploaded banner/product/payment images are written beneath the public
//! directory and served statically; the stored URL is the request's own
//! scheme+host joined with the relative storage path. The base URL is
//! threaded explicitly via the [`BaseUrl`] extractor instead of being
//! stashed on the request.

use axum::{
    async_trait,
    extract::{multipart::Multipart, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::errors::ServiceError;

/// Maximum accepted image size: 1 MiB.
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

const ALLOWED_MIME: [&str; 3] = ["image/jpg", "image/jpeg", "image/png"];

/// Scheme+host of the incoming request (`X-Forwarded-Proto` aware), used to
/// build absolute URLs for stored files.
#[derive(Debug, Clone)]
pub struct BaseUrl(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BaseUrl
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let proto = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ServiceError::BadRequest("Missing Host header".to_string()))?;

        Ok(BaseUrl(format!("{proto}://{host}")))
    }
}

/// A validated image pulled out of a multipart body.
#[derive(Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Collected multipart form: at most one image (under `file_field`) plus any
/// plain text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub image: Option<ImageUpload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn require_image(self) -> Result<(ImageUpload, HashMap<String, String>), ServiceError> {
        match self.image {
            Some(image) => Ok((image, self.fields)),
            None => Err(ServiceError::BadRequest("Image file is required".to_string())),
        }
    }

    pub fn field(&self, name: &str) -> Result<&str, ServiceError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ServiceError::BadRequest(format!("Missing field '{name}'")))
    }
}

/// Drains a multipart body, accepting only jpg/jpeg/png up to 1 MiB for the
/// image field and collecting every other part as text.
pub async fn read_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<UploadForm, ServiceError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            let content_type = field.content_type().unwrap_or_default().to_string();
            if !ALLOWED_MIME.contains(&content_type.as_str()) {
                return Err(ServiceError::BadRequest(
                    "Only image files are allowed!".to_string(),
                ));
            }

            let filename = field
                .file_name()
                .map(sanitize_filename)
                .unwrap_or_else(|| "upload".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServiceError::BadRequest(e.to_string()))?;

            if bytes.len() > MAX_IMAGE_BYTES {
                return Err(ServiceError::BadRequest(
                    "Image exceeds the 1 MiB upload limit".to_string(),
                ));
            }

            form.image = Some(ImageUpload {
                filename,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ServiceError::BadRequest(e.to_string()))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Writes the image under `{public_dir}/{subdir}` and returns the relative
/// path used in stored URLs (`public/{subdir}/{name}`).
pub async fn store_image(
    public_dir: &str,
    subdir: &str,
    upload: &ImageUpload,
) -> Result<String, ServiceError> {
    let dir = Path::new(public_dir).join(subdir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| anyhow::anyhow!("creating upload directory: {e}"))?;

    let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), upload.filename);
    let path = dir.join(&stored_name);
    tokio::fs::write(&path, &upload.bytes)
        .await
        .map_err(|e| anyhow::anyhow!("writing upload: {e}"))?;

    Ok(format!("public/{subdir}/{stored_name}"))
}

/// Removes the stored file a URL points at. Best-effort: a missing file is
/// not an error.
pub async fn remove_stored(url: &str) {
    let Some(idx) = url.find("/public/") else {
        return;
    };
    let relative = &url[idx + 1..];

    if let Err(e) = tokio::fs::remove_file(relative).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = relative, "failed to remove stored file: {e}");
        }
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
