//! Secret Storage Capability
//!
//! The core never persists anything itself. Embedders hand in a `SecretStore`
//! (keychain, encrypted file, HSM...) and the helpers here read and write
//! private keys through it.

use std::collections::HashMap;
use std::sync::RwLock;

use zeroize::Zeroizing;

use crate::crypto::SECRET_KEY_LEN;
use crate::error::StoreError;

/// Opaque blob storage for secrets
pub trait SecretStore: Send + Sync {
    /// Fetch a blob, `None` if nothing is stored under `name`
    fn get(&self, name: &str) -> Result<Option<Zeroizing<Vec<u8>>>, StoreError>;

    /// Store a blob, replacing any previous value
    fn put(&self, name: &str, secret: &[u8]) -> Result<(), StoreError>;
}

/// In-process store, wiped on drop
#[derive(Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, Zeroizing<Vec<u8>>>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.secrets
            .read()
            .map(|s| s.len())
            .map_err(|_| StoreError::Backend("lock poisoned".into()))
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, name: &str) -> Result<Option<Zeroizing<Vec<u8>>>, StoreError> {
        let secrets = self
            .secrets
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        Ok(secrets.get(name).cloned())
    }

    fn put(&self, name: &str, secret: &[u8]) -> Result<(), StoreError> {
        let mut secrets = self
            .secrets
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        secrets.insert(name.to_string(), Zeroizing::new(secret.to_vec()));
        Ok(())
    }
}

impl std::fmt::Debug for MemorySecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySecretStore")
            .field("entries", &self.len().map_err(|_| "[POISONED]"))
            .finish()
    }
}

/// Persist a raw private key under `name`
pub fn store_private_key(
    store: &dyn SecretStore,
    name: &str,
    private_key: &[u8; SECRET_KEY_LEN],
) -> Result<(), StoreError> {
    store.put(name, private_key)
}

/// Load a raw private key stored with `store_private_key`
pub fn load_private_key(
    store: &dyn SecretStore,
    name: &str,
) -> Result<Option<Zeroizing<[u8; SECRET_KEY_LEN]>>, StoreError> {
    let Some(blob) = store.get(name)? else {
        return Ok(None);
    };

    if blob.len() != SECRET_KEY_LEN {
        return Err(StoreError::Corrupt {
            name: name.to_string(),
            reason: format!("expected {} bytes, found {}", SECRET_KEY_LEN, blob.len()),
        });
    }

    let mut key = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    key.copy_from_slice(&blob);
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemorySecretStore::new();
        assert!(store.is_empty().unwrap());
        assert!(load_private_key(&store, "main").unwrap().is_none());

        store_private_key(&store, "main", &[7u8; 32]).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(*load_private_key(&store, "main").unwrap().unwrap(), [7u8; 32]);

        // overwrite
        store_private_key(&store, "main", &[8u8; 32]).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(*load_private_key(&store, "main").unwrap().unwrap(), [8u8; 32]);
    }

    #[test]
    fn test_corrupt_blob() {
        let store = MemorySecretStore::new();
        store.put("short", &[1, 2, 3]).unwrap();

        assert_eq!(
            load_private_key(&store, "short").unwrap_err(),
            StoreError::Corrupt {
                name: "short".into(),
                reason: "expected 32 bytes, found 3".into(),
            }
        );
    }

    #[test]
    fn test_debug_hides_contents() {
        let store = MemorySecretStore::new();
        store.put("k", b"secret").unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("entries: Ok(1)"));
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = std::sync::Arc::new(MemorySecretStore::new());
        let writer = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.secrets.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Backend(_))));
        assert!(store.is_empty().is_err());
        assert!(matches!(store.get("k"), Err(StoreError::Backend(_))));
        assert!(format!("{:?}", store).contains("[POISONED]"));
    }
}
