use log::{debug, warn};
use serde_json::Value;

use crate::error::StoreError;
use crate::models::post::Post;

pub mod memory;
pub mod sqlite;

/// Persistent key-value area. The whole post list is written to a single
/// slot as JSON text.
/// Implementations: `SqliteStore` (rusqlite/r2d2) and `MemoryStore`.
pub trait SlotStore: Send + Sync {
    fn slot_get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn slot_set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn slot_delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Reject writes whose key + value would not fit in `limit` bytes.
/// A limit of 0 disables the check.
pub(crate) fn check_quota(key: &str, value: &str, limit: usize) -> Result<(), StoreError> {
    let size = key.len() + value.len();
    if limit > 0 && size > limit {
        return Err(StoreError::QuotaExceeded { size, limit });
    }
    Ok(())
}

/// Serialize the post list (newest first) in its persisted layout.
pub fn serialize(posts: &[Post]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(posts)?)
}

/// Decode persisted text. Anything that is not a JSON array yields an empty
/// list; array entries that do not decode as a post are skipped.
pub fn deserialize(text: &str) -> Vec<Post> {
    let entries = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("Stored post list is not an array, starting empty");
            return vec![];
        }
        Err(e) => {
            warn!("Stored post list is not valid JSON ({}), starting empty", e);
            return vec![];
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match serde_json::from_value::<Post>(entry) {
            Ok(post) => Some(post),
            Err(e) => {
                warn!("Skipping stored post #{}: {}", idx, e);
                None
            }
        })
        .collect()
}

pub fn save(store: &dyn SlotStore, key: &str, posts: &[Post]) -> Result<(), StoreError> {
    let text = serialize(posts)?;
    store.slot_set(key, &text)?;
    debug!("Saved {} post(s) to slot '{}' ({} bytes)", posts.len(), key, text.len());
    Ok(())
}

pub fn load(store: &dyn SlotStore, key: &str) -> Vec<Post> {
    match store.slot_get(key) {
        Ok(Some(text)) => deserialize(&text),
        Ok(None) => vec![],
        Err(e) => {
            warn!("Could not read slot '{}': {}", key, e);
            vec![]
        }
    }
}

pub fn clear(store: &dyn SlotStore, key: &str) -> Result<(), StoreError> {
    store.slot_delete(key)
}
