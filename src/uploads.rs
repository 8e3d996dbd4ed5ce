//! Proof-document storage for pending-material resolutions.
//!
//! Files are buffered fully in memory by the multipart extractor and written
//! in one call. The stored name is a fresh UUID token plus the original
//! extension, so uploads never collide and never leak the client filename.

use crate::errors::ServiceError;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Writes `data` under `upload_dir` and returns the stored relative path.
pub async fn store_proof_document(
    upload_dir: &str,
    original_filename: &str,
    data: &[u8],
) -> Result<String, ServiceError> {
    let token = Uuid::new_v4().simple().to_string();
    let stored_name = match extension_of(original_filename) {
        Some(ext) => format!("{}.{}", token, ext),
        None => token,
    };

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| ServiceError::FileError(format!("creating upload dir: {}", e)))?;

    let path: PathBuf = Path::new(upload_dir).join(&stored_name);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ServiceError::FileError(format!("writing {}: {}", path.display(), e)))?;

    info!(file = %path.display(), bytes = data.len(), "Stored proof document");
    Ok(path.to_string_lossy().into_owned())
}

/// Extension of the client-supplied filename, if it has a sane one.
/// Rejects path separators so a hostile filename cannot steer the target.
fn extension_of(original_filename: &str) -> Option<&str> {
    let name = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_filename);
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_extracted_from_plain_name() {
        assert_eq!(extension_of("bill_scan.pdf"), Some("pdf"));
        assert_eq!(extension_of("photo.JPG"), Some("JPG"));
    }

    #[test]
    fn extension_ignores_leading_path_components() {
        assert_eq!(extension_of("../../etc/passwd.txt"), Some("txt"));
        assert_eq!(extension_of("C:\\docs\\scan.png"), Some("png"));
    }

    #[test]
    fn no_extension_yields_none() {
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("weird.%00"), None);
    }

    #[tokio::test]
    async fn stored_file_lands_under_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();

        let path = store_proof_document(base, "bill.pdf", b"pdf-bytes")
            .await
            .unwrap();
        assert!(path.starts_with(base));
        assert!(path.ends_with(".pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"pdf-bytes");
    }

    #[tokio::test]
    async fn two_uploads_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();

        let a = store_proof_document(base, "bill.pdf", b"a").await.unwrap();
        let b = store_proof_document(base, "bill.pdf", b"b").await.unwrap();
        assert_ne!(a, b);
    }
}
