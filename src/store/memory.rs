use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;

use super::{check_quota, SlotStore};

/// In-process slot store. Nothing survives a restart.
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    quota_bytes: usize,
}

impl MemoryStore {
    pub fn new(quota_bytes: usize) -> Self {
        MemoryStore {
            slots: Mutex::new(HashMap::new()),
            quota_bytes,
        }
    }
}

impl SlotStore for MemoryStore {
    fn slot_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map.get(key).cloned())
    }

    fn slot_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_quota(key, value, self.quota_bytes)?;
        let mut map = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn slot_delete(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(key);
        Ok(())
    }
}
