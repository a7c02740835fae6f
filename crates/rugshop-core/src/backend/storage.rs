//! Blob naming on upload and cleanup after a product is deleted.

use tracing::{info, warn};

use super::{BackendError, BackendResult, BlobStore, DocumentStore};

/// Folder every product image is stored under.
pub const UPLOAD_PREFIX: &str = "products";
pub const DEFAULT_UPLOAD_EXTENSION: &str = "jpg";

/// Object path for an uploaded file: `products/{ms}-{hex}.{ext}`.
///
/// The extension is whatever follows the last dot of `file_name`, falling
/// back to `jpg` when there is none.
pub fn upload_object_path(file_name: &str, timestamp_ms: i64, nonce: u64) -> String {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => DEFAULT_UPLOAD_EXTENSION,
    };
    format!("{}/{}-{:x}.{}", UPLOAD_PREFIX, timestamp_ms, nonce, ext)
}

/// Object path inside a download URL such as
/// `https://host/v0/b/bucket/o/products%2Fa.jpg?alt=media&token=...`.
///
/// The URL is percent-decoded first; the path is the text between `/o/` and
/// the next `?`.
pub fn storage_path_from_url(url: &str) -> Option<String> {
    let decoded = urlencoding::decode(url).ok()?;
    let start = decoded.find("/o/")? + "/o/".len();
    let rest = &decoded[start..];
    let end = rest.find('?')?;
    let path = &rest[..end];
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// What happened to each image of a deleted product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Object paths removed from the blob store.
    pub deleted: Vec<String>,
    /// URLs no object path could be read from.
    pub unparseable: Vec<String>,
    /// Object paths whose deletion failed, with the error text.
    pub failed: Vec<(String, String)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.unparseable.is_empty() && self.failed.is_empty()
    }
}

/// Remove the blobs behind `images`. Failures are logged and recorded,
/// never returned.
pub fn delete_product_images<B>(images: &[String], blobs: &B) -> CleanupReport
where
    B: BlobStore + ?Sized,
{
    let mut report = CleanupReport::default();
    if images.is_empty() {
        info!("no images to delete");
        return report;
    }

    for url in images {
        let Some(path) = storage_path_from_url(url) else {
            warn!(url = %url, "could not parse storage path from url");
            report.unparseable.push(url.clone());
            continue;
        };

        match blobs.delete(&path) {
            Ok(()) => {
                info!(path = %path, "deleted product image");
                report.deleted.push(path);
            }
            Err(e) => {
                warn!(path = %path, error = %e, "failed deleting product image");
                report.failed.push((path, e.to_string()));
            }
        }
    }

    report
}

/// Delete a product document, then clean up its images.
///
/// # Errors
///
/// * `BackendError::NotFound` - no document with `id`
/// * Any error from the document store itself
pub fn delete_product<D, B>(id: &str, documents: &D, blobs: &B) -> BackendResult<CleanupReport>
where
    D: DocumentStore + ?Sized,
    B: BlobStore + ?Sized,
{
    let product = documents
        .get(id)?
        .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
    documents.delete(id)?;
    Ok(delete_product_images(&product.images, blobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{MemoryBlobStore, MemoryDocumentStore};
    use crate::catalog::Product;

    const URL: &str = "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o/products%2F1700000000000-ab12.jpg?alt=media&token=t";

    #[test]
    fn test_upload_object_path() {
        assert_eq!(
            upload_object_path("rug.webp", 1_700_000_000_000, 0xab12),
            "products/1700000000000-ab12.webp"
        );
        assert_eq!(upload_object_path("photo.final.JPG", 5, 255), "products/5-ff.JPG");
        assert_eq!(upload_object_path("scan", 5, 1), "products/5-1.jpg");
        assert_eq!(upload_object_path("scan.", 5, 1), "products/5-1.jpg");
    }

    #[test]
    fn test_storage_path_from_url() {
        assert_eq!(
            storage_path_from_url(URL).as_deref(),
            Some("products/1700000000000-ab12.jpg")
        );
        assert_eq!(storage_path_from_url("https://cdn.example.com/a.jpg"), None);
        assert_eq!(storage_path_from_url("https://host/o/products%2Fa.jpg"), None);
        assert_eq!(storage_path_from_url("https://host/o/?alt=media"), None);
    }

    #[test]
    fn test_delete_product_images_skips_and_records() {
        let blobs = MemoryBlobStore::default();
        let kept = blobs
            .upload("products/1-a.jpg", "image/jpeg", vec![1, 2, 3])
            .unwrap();

        let images = vec![
            kept,
            "not a storage url".to_string(),
            "https://host/o/products%2Fmissing.jpg?alt=media".to_string(),
        ];
        let report = delete_product_images(&images, &blobs);

        assert_eq!(report.deleted, vec!["products/1-a.jpg".to_string()]);
        assert_eq!(report.unparseable, vec!["not a storage url".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "products/missing.jpg");
        assert!(!report.is_clean());
        assert!(blobs.is_empty());
    }

    #[test]
    fn test_delete_product_images_empty() {
        let report = delete_product_images(&[], &MemoryBlobStore::default());
        assert!(report.is_clean());
        assert!(report.deleted.is_empty());
    }

    #[test]
    fn test_delete_product_removes_document_and_blobs() {
        let documents = MemoryDocumentStore::default();
        let blobs = MemoryBlobStore::default();
        let url = blobs.upload("products/2-b.jpg", "image/jpeg", vec![0]).unwrap();
        let id = documents
            .create(Product {
                images: vec![url],
                ..Product::default()
            })
            .unwrap();

        let report = delete_product(&id, &documents, &blobs).unwrap();
        assert_eq!(report.deleted, vec!["products/2-b.jpg".to_string()]);
        assert!(documents.get(&id).unwrap().is_none());
        assert!(blobs.is_empty());

        assert!(matches!(
            delete_product(&id, &documents, &blobs),
            Err(BackendError::NotFound(_))
        ));
    }
}
