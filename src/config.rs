use std::time::Duration;

use log::warn;

use crate::db::DbPool;
use crate::models::settings::Setting;

/// What "Edit" does to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// The post stays where it is; the next submit updates it and keeps its comments.
    InPlace,
    /// The post is removed immediately and re-created at the top on submit.
    Reinsert,
}

impl EditMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "in_place" => Some(EditMode::InPlace),
            "reinsert" => Some(EditMode::Reinsert),
            _ => None,
        }
    }
}

/// Runtime configuration, read once from the settings table at startup.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub site_name: String,
    pub storage_key: String,
    pub edit_mode: EditMode,
    pub max_upload_bytes: usize,
    pub slot_quota_bytes: usize,
    pub upload_read_timeout: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            site_name: "Postboard".to_string(),
            storage_key: "blogs".to_string(),
            edit_mode: EditMode::InPlace,
            max_upload_bytes: 2 * 1024 * 1024,
            slot_quota_bytes: 5 * 1024 * 1024,
            upload_read_timeout: Duration::from_secs(30),
        }
    }
}

impl BoardConfig {
    pub fn from_settings(pool: &DbPool) -> Self {
        let defaults = BoardConfig::default();

        let edit_mode_raw = Setting::get_or(pool, "edit_mode", "in_place");
        let edit_mode = EditMode::parse(&edit_mode_raw).unwrap_or_else(|| {
            warn!("Unknown edit_mode '{}', using in_place", edit_mode_raw);
            EditMode::InPlace
        });

        let storage_key = Setting::get_or(pool, "storage_key", &defaults.storage_key);
        let storage_key = if storage_key.trim().is_empty() {
            defaults.storage_key.clone()
        } else {
            storage_key
        };

        let max_upload_mb = Setting::get_i64(pool, "images_max_upload_mb").max(1) as usize;
        let quota = Setting::get_i64(pool, "slot_quota_bytes").max(0) as usize;
        let timeout_secs = Setting::get_i64(pool, "upload_read_timeout_secs");
        let upload_read_timeout = if timeout_secs > 0 {
            Duration::from_secs(timeout_secs as u64)
        } else {
            defaults.upload_read_timeout
        };

        BoardConfig {
            site_name: Setting::get_or(pool, "site_name", &defaults.site_name),
            storage_key,
            edit_mode,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            slot_quota_bytes: quota,
            upload_read_timeout,
        }
    }
}
