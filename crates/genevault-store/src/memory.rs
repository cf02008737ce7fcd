//! In-memory implementation of the LedgerStore trait.
//!
//! Same semantics as SQLite but keeps everything in memory with no
//! persistence. Handy for tests and for hosts that snapshot state themselves.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use genevault_core::{DataReference, PermissionKey, Principal};

use crate::error::{Result, StoreError};
use crate::traits::{InitResult, LedgerStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Administrative owner, fixed on first init.
    admin: Option<Principal>,

    /// AccessRecord: owner -> latest reference.
    records: BTreeMap<Principal, DataReference>,

    /// PermissionSet: (owner, reader) -> granted.
    permissions: HashMap<PermissionKey, bool>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    fn admin(&self) -> Result<Option<Principal>> {
        Ok(self.read()?.admin)
    }

    fn init_admin(&self, admin: &Principal) -> Result<InitResult> {
        let mut inner = self.write()?;
        match inner.admin {
            Some(existing) => Ok(InitResult::AlreadyInitialized { existing }),
            None => {
                inner.admin = Some(*admin);
                Ok(InitResult::Initialized)
            }
        }
    }

    fn get_reference(&self, owner: &Principal) -> Result<Option<DataReference>> {
        Ok(self.read()?.records.get(owner).cloned())
    }

    fn put_reference(&self, owner: &Principal, reference: &DataReference) -> Result<()> {
        self.write()?.records.insert(*owner, reference.clone());
        Ok(())
    }

    fn owners(&self) -> Result<Vec<Principal>> {
        Ok(self.read()?.records.keys().copied().collect())
    }

    fn is_granted(&self, key: &PermissionKey) -> Result<bool> {
        Ok(self.read()?.permissions.get(key).copied().unwrap_or(false))
    }

    fn set_permission(&self, key: &PermissionKey, granted: bool) -> Result<()> {
        self.write()?.permissions.insert(*key, granted);
        Ok(())
    }

    fn granted_readers(&self, owner: &Principal) -> Result<Vec<Principal>> {
        let inner = self.read()?;
        let mut readers: Vec<Principal> = inner
            .permissions
            .iter()
            .filter(|(key, granted)| **granted && &key.owner == owner)
            .map(|(key, _)| key.reader)
            .collect();
        readers.sort();
        Ok(readers)
    }
}
