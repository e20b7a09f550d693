//! Upload handling for product photos
//!
//! Reads the photo from disk and checks it is a JPEG or PNG before it is
//! handed to the analysis service.

use crate::{Error, Result};
use image::ImageFormat;
use std::path::Path;

/// Formats accepted for upload.
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// Sniff the encoding of `bytes`, rejecting anything other than JPEG or PNG.
pub fn check_format(bytes: &[u8]) -> Result<ImageFormat> {
    if bytes.is_empty() {
        return Err(Error::UnsupportedImage("image is empty".to_string()));
    }

    let format = image::guess_format(bytes).map_err(|_| {
        Error::UnsupportedImage(format!(
            "unrecognized image data (first bytes: {:02X?})",
            &bytes[..bytes.len().min(4)]
        ))
    })?;

    if SUPPORTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(Error::UnsupportedImage(format!(
            "{:?} images are not supported, use JPEG or PNG",
            format
        )))
    }
}

/// Read a photo from disk and validate its format.
pub async fn load_upload(path: &Path) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path).await?;
    let format = check_format(&bytes)?;
    tracing::debug!(
        "Loaded {:?} image {} ({} bytes)",
        format,
        path.display(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert_eq!(check_format(&JPEG_HEADER).unwrap(), ImageFormat::Jpeg);
        assert_eq!(check_format(&PNG_HEADER).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_rejects_webp() {
        let webp = [
            0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50,
        ];
        let err = check_format(&webp).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage(ref msg) if msg.contains("WebP")));
    }

    #[test]
    fn test_rejects_unknown_and_empty() {
        assert!(matches!(
            check_format(&[0x00, 0x01, 0x02, 0x03]),
            Err(Error::UnsupportedImage(_))
        ));
        assert!(matches!(check_format(&[]), Err(Error::UnsupportedImage(_))));
    }

    #[tokio::test]
    async fn test_load_upload_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&PNG_HEADER).unwrap();

        let bytes = load_upload(file.path()).await.unwrap();
        assert_eq!(bytes, PNG_HEADER);
    }

    #[tokio::test]
    async fn test_load_upload_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_upload(&dir.path().join("nope.jpg")).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
