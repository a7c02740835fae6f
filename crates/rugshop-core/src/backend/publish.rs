//! Saving a new product: picked files are compressed as they are added to the
//! form, then uploaded in order and referenced from one new document.

use chrono::Utc;
use tracing::info;

use super::{upload_object_path, BackendError, BackendResult, BlobStore, DocumentStore};
use crate::admin::{merge_selection, AuthorizationPolicy, Identity, ProductDraft};
use crate::catalog::Product;
use crate::compress::{compress_batch, CompressedImage, CompressionSettings, SourceImage};
use crate::config::DEFAULT_MAX_IMAGES;

/// Compress newly picked files and append them to the current selection.
///
/// The whole pick is rejected if any file fails, leaving the selection as it
/// was; the caller shows the error and keeps `existing`.
pub fn compress_picked(
    existing: &[CompressedImage],
    picked: Vec<SourceImage>,
    settings: &CompressionSettings,
    max_images: usize,
) -> BackendResult<Vec<CompressedImage>> {
    let (compressed, failures) = compress_batch(picked, settings).into_parts();
    if let Some(failure) = failures.into_iter().next() {
        return Err(BackendError::Compression {
            file: failure.source_name,
            source: failure.error,
        });
    }
    Ok(merge_selection(existing.to_vec(), compressed, max_images))
}

/// Writes new products through the configured collaborators.
pub struct Publisher<'a> {
    policy: &'a dyn AuthorizationPolicy,
    documents: &'a dyn DocumentStore,
    blobs: &'a dyn BlobStore,
    max_images: usize,
}

impl<'a> Publisher<'a> {
    pub fn new(
        policy: &'a dyn AuthorizationPolicy,
        documents: &'a dyn DocumentStore,
        blobs: &'a dyn BlobStore,
    ) -> Self {
        Self {
            policy,
            documents,
            blobs,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }

    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    /// Validate `draft`, upload `images` in order and create the document.
    ///
    /// `next_nonce` supplies the random part of each object name.
    ///
    /// # Errors
    ///
    /// * `BackendError::Validation` - the draft failed a form check,
    ///   including the admin check
    /// * Upload or document store errors, as returned by the collaborators
    pub fn publish(
        &self,
        identity: Option<&Identity>,
        draft: &ProductDraft,
        images: &[CompressedImage],
        next_nonce: &mut dyn FnMut() -> u64,
    ) -> BackendResult<Product> {
        let authorized = identity.is_some_and(|identity| self.policy.is_authorized(identity));
        let record = draft.validate(authorized, images.len(), self.max_images)?;

        let mut urls = Vec::with_capacity(images.len());
        for image in images {
            let path = upload_object_path(&image.name, Utc::now().timestamp_millis(), next_nonce());
            let url = self
                .blobs
                .upload(&path, &image.mime_type, image.bytes.clone())?;
            urls.push(url);
        }

        let mut product = record.into_product(String::new(), urls, Utc::now().timestamp());
        product.id = self.documents.create(product.clone())?;

        info!(
            id = %product.id,
            product_id = %product.product_id,
            images = product.images.len(),
            "product published"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{DraftError, SingleAdminPolicy};
    use crate::backend::memory::{MemoryBlobStore, MemoryDocumentStore};
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(name: &str) -> SourceImage {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 24, Rgba([90, 60, 30, 255])))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        SourceImage::new(name, "image/png", out.into_inner())
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            product_id: "7654321".into(),
            title: "Kazak".into(),
            category: "Runner Rugs".into(),
            price: "450".into(),
            ..ProductDraft::default()
        }
    }

    fn counter() -> impl FnMut() -> u64 {
        let mut n = 0;
        move || {
            n += 1;
            n
        }
    }

    #[test]
    fn test_compress_picked_appends_and_caps() {
        let settings = CompressionSettings::default();
        let first = compress_picked(&[], vec![png("a.png"), png("b.png")], &settings, 3).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name, "a.jpg");

        let second = compress_picked(&first, vec![png("c.png"), png("d.png")], &settings, 3).unwrap();
        let names: Vec<_> = second.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_compress_picked_rejects_whole_pick() {
        let broken = SourceImage::new("broken.png", "image/png", vec![0, 1, 2, 3]);
        let err = compress_picked(&[], vec![png("a.png"), broken], &CompressionSettings::default(), 7)
            .unwrap_err();
        match err {
            BackendError::Compression { file, .. } => assert_eq!(file, "broken.png"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_publish_uploads_in_order_and_sets_cover() {
        let policy = SingleAdminPolicy::new("owner@example.com");
        let documents = MemoryDocumentStore::default();
        let blobs = MemoryBlobStore::default();
        let admin = Identity::with_email("u1", "owner@example.com");

        let images =
            compress_picked(&[], vec![png("front.png"), png("back.png")], &CompressionSettings::default(), 7)
                .unwrap();
        let mut nonce = counter();

        let product = Publisher::new(&policy, &documents, &blobs)
            .publish(Some(&admin), &draft(), &images, &mut nonce)
            .unwrap();

        assert_eq!(product.images.len(), 2);
        assert_eq!(product.cover_url, product.images[0]);
        assert!(product.images[0].contains("-1.jpg"));
        assert!(product.images[1].contains("-2.jpg"));
        assert!(product.created_at.is_some());
        assert_eq!(blobs.len(), 2);

        let stored = documents.get(&product.id).unwrap().unwrap();
        assert_eq!(stored, product);
    }

    #[test]
    fn test_publish_rejects_before_uploading() {
        let policy = SingleAdminPolicy::new("owner@example.com");
        let documents = MemoryDocumentStore::default();
        let blobs = MemoryBlobStore::default();
        let guest = Identity::with_email("u2", "guest@example.com");
        let images = compress_picked(&[], vec![png("a.png")], &CompressionSettings::default(), 7).unwrap();
        let publisher = Publisher::new(&policy, &documents, &blobs);
        let mut nonce = counter();

        let err = publisher
            .publish(Some(&guest), &draft(), &images, &mut nonce)
            .unwrap_err();
        assert!(matches!(err, BackendError::Validation(DraftError::NotAuthorized)));

        let err = publisher
            .publish(None, &draft(), &images, &mut nonce)
            .unwrap_err();
        assert!(matches!(err, BackendError::Validation(DraftError::NotAuthorized)));

        let admin = Identity::with_email("u1", "owner@example.com");
        let err = publisher
            .publish(Some(&admin), &draft(), &[], &mut nonce)
            .unwrap_err();
        assert!(matches!(err, BackendError::Validation(DraftError::ImageCount { .. })));

        assert!(blobs.is_empty());
        assert!(documents.list().unwrap().is_empty());
    }

    #[test]
    fn test_publish_honours_max_images() {
        let policy = |_: &Identity| true;
        let documents = MemoryDocumentStore::default();
        let blobs = MemoryBlobStore::default();
        let images =
            compress_picked(&[], vec![png("a.png"), png("b.png")], &CompressionSettings::default(), 7)
                .unwrap();
        let anyone = Identity::with_email("u9", "x@y.z");

        let err = Publisher::new(&policy, &documents, &blobs)
            .with_max_images(1)
            .publish(Some(&anyone), &draft(), &images, &mut counter())
            .unwrap_err();
        assert!(matches!(err, BackendError::Validation(DraftError::ImageCount { count: 2, max: 1 })));
    }
}
