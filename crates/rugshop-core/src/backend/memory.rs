//! In-process collaborators for tests, previews and local development.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{
    AuthGateway, BackendError, BackendResult, BlobStore, DocumentStore, ProductListener,
    Subscription,
};
use crate::admin::Identity;
use crate::catalog::Product;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// E-mail/password accounts held in memory.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    accounts: HashMap<String, String>,
    current: Mutex<Option<Identity>>,
}

impl MemoryAuth {
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts
            .insert(email.trim().to_lowercase(), password.to_string());
        self
    }
}

impl AuthGateway for MemoryAuth {
    fn sign_in(&self, email: &str, password: &str) -> BackendResult<Identity> {
        let key = email.trim().to_lowercase();
        match self.accounts.get(&key) {
            Some(expected) if expected == password => {
                let identity = Identity::with_email(format!("uid-{}", key), email.trim());
                *lock(&self.current) = Some(identity.clone());
                Ok(identity)
            }
            _ => Err(BackendError::Unauthorized),
        }
    }

    fn sign_out(&self) -> BackendResult<()> {
        *lock(&self.current) = None;
        Ok(())
    }

    fn current_user(&self) -> Option<Identity> {
        lock(&self.current).clone()
    }
}

type SharedListener = Arc<dyn Fn(&[Product]) + Send + Sync>;
type Listeners = Arc<Mutex<HashMap<u64, SharedListener>>>;

/// Product documents in insertion order, with live listeners.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<Vec<Product>>,
    next_id: AtomicU64,
    next_listener: AtomicU64,
    listeners: Listeners,
}

impl MemoryDocumentStore {
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Listeners run with no lock held, so they may unsubscribe, watch or
    /// write back into the store.
    fn notify(&self) {
        let snapshot = lock(&self.documents).clone();
        let listeners: Vec<SharedListener> = lock(&self.listeners).values().cloned().collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn create(&self, mut product: Product) -> BackendResult<String> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        product.id = id.clone();
        lock(&self.documents).push(product);
        self.notify();
        Ok(id)
    }

    fn list(&self) -> BackendResult<Vec<Product>> {
        Ok(lock(&self.documents).clone())
    }

    fn get(&self, id: &str) -> BackendResult<Option<Product>> {
        Ok(lock(&self.documents).iter().find(|p| p.id == id).cloned())
    }

    fn delete(&self, id: &str) -> BackendResult<()> {
        {
            let mut documents = lock(&self.documents);
            let index = documents
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
            documents.remove(index);
        }
        self.notify();
        Ok(())
    }

    fn watch(&self, listener: ProductListener) -> Subscription {
        let snapshot = lock(&self.documents).clone();
        listener(&snapshot);

        let key = self.next_listener.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).insert(key, Arc::from(listener));

        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            lock(&listeners).remove(&key);
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
}

/// Blob store returning download URLs in the `/o/{encoded path}?alt=media`
/// shape the cleanup hook parses.
#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    objects: Mutex<BTreeMap<String, StoredObject>>,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("https://storage.local/v0/b/rugshop")
    }
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.objects).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.objects).is_empty()
    }

    pub fn paths(&self) -> Vec<String> {
        lock(&self.objects).keys().cloned().collect()
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        lock(&self.objects).get(path).map(|o| o.content_type.clone())
    }

    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        lock(&self.objects).get(path).map(|o| o.bytes.clone())
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> BackendResult<String> {
        if path.is_empty() {
            return Err(BackendError::Storage("empty object path".to_string()));
        }
        lock(&self.objects).insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(format!(
            "{}/o/{}?alt=media",
            self.base_url,
            urlencoding::encode(path)
        ))
    }

    fn delete(&self, path: &str) -> BackendResult<()> {
        lock(&self.objects)
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| BackendError::NotFound(path.to_string()))
    }
}
