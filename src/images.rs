use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported image type '{0}' (expected png, jpg or jpeg)")]
    UnsupportedType(String),
    #[error("Failed to store image: {0}")]
    IoError(#[from] std::io::Error),
}

const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Store an uploaded image for a record. The file is copied into
/// `image_dir` under a name derived from the serial number, so a later
/// upload for the same serial overwrites the earlier one. Returns the
/// stored path string that goes on the record's image field.
pub fn attach(image_dir: &Path, serial_no: &str, source: &Path) -> Result<String, ImageError> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ImageError::UnsupportedType(ext));
    }

    fs::create_dir_all(image_dir)?;
    let dest = image_dir.join(format!("sno_{serial_no}.{ext}"));
    fs::copy(source, &dest)?;

    Ok(dest.to_string_lossy().to_string())
}
