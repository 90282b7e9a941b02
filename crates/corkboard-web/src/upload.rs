//! Image upload validation and storage.
//!
//! One optional file per submission, form field "image". Both the declared
//! MIME type and the lowercased extension must match the allow-list; the
//! accepted bytes land in `<public>/uploads/` under a timestamped name.

use std::path::Path;

use chrono::Utc;
use tokio::fs;
use tracing::debug;

use corkboard_core::{Error, Result};

/// Hard cap on an uploaded file's size.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Form field name carrying the file; also the filename prefix.
pub const UPLOAD_FIELD: &str = "image";

/// Directory under the public root where accepted files are written.
pub const UPLOADS_DIR: &str = "uploads";

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// An accepted, written upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Generated filename, e.g. `image-1700000000000.png`.
    pub filename: String,
    /// URL-encoded relative link, e.g. `/uploads/image-1700000000000.png`.
    pub link: String,
}

/// Validate the declared MIME type and the lowercased file extension
/// against the image allow-list, returning the extension on success.
pub fn validate_image(original_filename: &str, content_type: &str) -> Result<String> {
    let ext = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) && ALLOWED_MIME_TYPES.contains(&content_type) {
        return Ok(ext);
    }
    Err(Error::InvalidInput(
        "File upload only supports images (jpeg, jpg, png, gif)".to_string(),
    ))
}

/// Build the generated filename: `<field>-<epoch-millis>.<ext>`.
///
/// Two uploads within the same millisecond under the same field name
/// overwrite each other silently (known, unmitigated edge case).
pub fn upload_filename(field: &str, ext: &str, epoch_ms: i64) -> String {
    format!("{}-{}.{}", field, epoch_ms, ext)
}

/// Validate and write one uploaded file under the public root.
///
/// Rejects oversized files before any validation or write; rejects
/// disallowed types without writing anything.
pub async fn store_upload(
    public_dir: &Path,
    original_filename: &str,
    content_type: &str,
    data: &[u8],
) -> Result<StoredUpload> {
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(Error::InvalidInput(format!(
            "File exceeds maximum size of {} bytes",
            MAX_UPLOAD_BYTES
        )));
    }

    let ext = validate_image(original_filename, content_type)?;
    let filename = upload_filename(UPLOAD_FIELD, &ext, Utc::now().timestamp_millis());

    let dir = public_dir.join(UPLOADS_DIR);
    fs::create_dir_all(&dir).await?;
    let path = dir.join(&filename);
    fs::write(&path, data).await?;

    debug!(
        subsystem = "web",
        component = "upload",
        op = "store",
        path = %path.display(),
        size = data.len(),
        content_type,
        "Upload stored"
    );

    let link = format!("/{}/{}", UPLOADS_DIR, urlencoding::encode(&filename));
    Ok(StoredUpload { filename, link })
}
