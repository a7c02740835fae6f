//! Collaborators the storefront talks to: authentication, the product
//! document store and the image blob store.
//!
//! Only the interfaces and the orchestration around them live here. Hosts
//! plug in real clients; [`memory`] provides in-process stand-ins.

pub mod memory;
mod publish;
mod storage;

use std::fmt;

use thiserror::Error;

use crate::admin::{DraftError, Identity};
use crate::catalog::Product;
use crate::compress::CompressError;

pub use publish::{compress_picked, Publisher};
pub use storage::{
    delete_product, delete_product_images, storage_path_from_url, upload_object_path,
    CleanupReport, DEFAULT_UPLOAD_EXTENSION, UPLOAD_PREFIX,
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Not signed in or not allowed")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Validation(#[from] DraftError),

    #[error("Image processing failed for {file}: {source}")]
    Compression {
        file: String,
        #[source]
        source: CompressError,
    },
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Sign-in provider.
pub trait AuthGateway: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> BackendResult<Identity>;

    fn sign_out(&self) -> BackendResult<()>;

    fn current_user(&self) -> Option<Identity>;
}

/// Callback receiving the full product list after every change.
pub type ProductListener = Box<dyn Fn(&[Product]) + Send + Sync>;

/// Product documents. Ids are assigned by the store.
pub trait DocumentStore: Send + Sync {
    /// Store a new record and return its id. The record's own `id` is ignored.
    fn create(&self, product: Product) -> BackendResult<String>;

    fn list(&self) -> BackendResult<Vec<Product>>;

    fn get(&self, id: &str) -> BackendResult<Option<Product>>;

    fn delete(&self, id: &str) -> BackendResult<()>;

    /// Call `listener` now and after every change until the returned
    /// subscription is dropped.
    fn watch(&self, listener: ProductListener) -> Subscription;
}

/// Binary objects addressed by path.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path` and return a public download URL.
    fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> BackendResult<String>;

    fn delete(&self, path: &str) -> BackendResult<()>;
}

/// Live listener registration; dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Subscription with nothing to release.
    pub fn detached() -> Self {
        Self { unsubscribe: None }
    }

    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
