// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Screenshot loading and transit encoding.
//!
//! Uploads are validated (file type, size cap) before any decode work.
//! Decoded screenshots are re-encoded as PNG and wrapped in a base64
//! data URL, the representation the identity generator salts and the
//! backend stores.

use crate::error::DrizzError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io::Cursor;
use std::path::Path;

/// Upload size cap, matching the backend's limit.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

/// A decoded screenshot ready for display and transit.
#[derive(Debug)]
pub struct LoadedScreenshot {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels for the display texture.
    pub pixels: Vec<u8>,
    /// `data:image/png;base64,...` transit representation.
    pub encoded: String,
}

/// Reject wrong file types and oversized files before any decode or
/// network call.
pub fn validate_upload(path: &Path) -> Result<(), DrizzError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DrizzError::Validation(format!(
            "unsupported image type {:?} (expected one of {:?})",
            extension, ALLOWED_EXTENSIONS
        )));
    }

    let size = std::fs::metadata(path)
        .map_err(|e| DrizzError::Validation(format!("cannot stat {}: {}", path.display(), e)))?
        .len();
    if size > MAX_UPLOAD_BYTES {
        return Err(DrizzError::Validation(format!(
            "file too large ({} bytes, limit {} bytes)",
            size, MAX_UPLOAD_BYTES
        )));
    }
    Ok(())
}

/// Load a screenshot from disk: validate, decode, re-encode for transit.
pub fn load_screenshot(path: &Path) -> Result<LoadedScreenshot, DrizzError> {
    validate_upload(path)?;

    let bytes = std::fs::read(path)
        .map_err(|e| DrizzError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| DrizzError::Decode(format!("cannot decode {}: {}", path.display(), e)))?;

    let width = image.width();
    let height = image.height();
    let rgba = image.to_rgba8();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| DrizzError::Decode(format!("PNG re-encode failed: {}", e)))?;
    let encoded = format!("data:image/png;base64,{}", BASE64.encode(&png));

    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("screenshot")
        .to_string();

    log::info!("Loaded screenshot {} ({}x{})", filename, width, height);

    Ok(LoadedScreenshot {
        filename,
        width,
        height,
        pixels: rgba.into_raw(),
        encoded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let err = validate_upload(&PathBuf::from("dump.json")).unwrap_err();
        assert!(matches!(err, DrizzError::Validation(_)));

        let err = validate_upload(&PathBuf::from("noextension")).unwrap_err();
        assert!(matches!(err, DrizzError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_missing_file() {
        // Allowed extension but nonexistent path still fails validation.
        let err = validate_upload(&PathBuf::from("/nonexistent/shot.png")).unwrap_err();
        assert!(matches!(err, DrizzError::Validation(_)));
    }

    #[test]
    fn test_load_screenshot_roundtrip() {
        // Encode a tiny PNG, load it back through the full pipeline.
        let dir = std::env::temp_dir().join("drizz-screenshot-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shot.png");

        let img = image::RgbaImage::from_pixel(100, 50, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let loaded = load_screenshot(&path).unwrap();
        assert_eq!(loaded.width, 100);
        assert_eq!(loaded.height, 50);
        assert_eq!(loaded.pixels.len(), 100 * 50 * 4);
        assert!(loaded.encoded.starts_with("data:image/png;base64,"));
        assert_eq!(loaded.filename, "shot.png");
    }

    #[test]
    fn test_load_screenshot_decode_failure() {
        let dir = std::env::temp_dir().join("drizz-screenshot-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not-an-image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_screenshot(&path).unwrap_err();
        assert!(matches!(err, DrizzError::Decode(_)));
    }
}
