//! QR code rendering for passport links.

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use url::Url;

/// Smallest edge of a rendered code, in pixels.
const MIN_SIZE: u32 = 256;

/// Errors that can occur while producing a QR image.
#[derive(Debug)]
pub enum QrError {
    /// Target is not an absolute http(s) URL.
    InvalidTarget(String),
    /// Data does not fit in a QR code.
    Encode(qrcode::types::QrError),
    /// PNG encoding failed.
    Image(image::ImageError),
}

impl std::fmt::Display for QrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QrError::InvalidTarget(t) => write!(f, "Invalid target: {}", t),
            QrError::Encode(e) => write!(f, "Failed to encode QR code: {}", e),
            QrError::Image(e) => write!(f, "Failed to write PNG: {}", e),
        }
    }
}

impl std::error::Error for QrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QrError::Encode(e) => Some(e),
            QrError::Image(e) => Some(e),
            QrError::InvalidTarget(_) => None,
        }
    }
}

/// Checks that `target` is an absolute `http` or `https` URL.
pub fn validate_target(target: &str) -> Result<Url, QrError> {
    match Url::parse(target) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(QrError::InvalidTarget(target.to_string())),
    }
}

/// Encodes `target` exactly as given once it passes validation.
pub fn encode(target: &str) -> Result<QrCode, QrError> {
    validate_target(target)?;
    QrCode::new(target.as_bytes()).map_err(QrError::Encode)
}

/// Renders `target` as a black-on-white PNG QR code.
pub fn render_png(target: &str) -> Result<Vec<u8>, QrError> {
    let code = encode(target)?;
    let pixels = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_SIZE, MIN_SIZE)
        .build();

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(QrError::Image)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_validate_target() {
        assert!(validate_target("http://localhost:8000/dpp/1").is_ok());
        assert!(validate_target("https://dpp.example.com/dpp/1").is_ok());

        assert!(validate_target("").is_err());
        assert!(validate_target("ftp://example.com/file").is_err());
        assert!(validate_target("javascript:alert(1)").is_err());
        assert!(validate_target("/dpp/1").is_err());
        // A prefix match alone is not enough
        assert!(validate_target("httpfoo").is_err());
    }

    #[test]
    fn test_encode_keeps_target_verbatim() {
        for target in ["http://x", "http://Example.COM/dpp/1", "http://x/a b"] {
            let code = encode(target).unwrap();
            let expected = QrCode::new(target.as_bytes()).unwrap();
            assert_eq!(code.to_colors(), expected.to_colors(), "{}", target);
        }

        // The normalized form would be a different code
        let code = encode("http://x").unwrap();
        let normalized = QrCode::new(b"http://x/").unwrap();
        assert_ne!(code.to_colors(), normalized.to_colors());
    }

    #[test]
    fn test_render_png() {
        let bytes = render_png("http://localhost:8000/dpp/1").unwrap();

        assert!(bytes.starts_with(PNG_MAGIC));
        let img = image::load_from_memory(&bytes).unwrap();
        assert!(img.width() >= MIN_SIZE);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn test_render_rejects_invalid_target() {
        let result = render_png("mailto:someone@example.com");
        assert!(matches!(result, Err(QrError::InvalidTarget(_))));
    }
}
