//! One-shot notices carried across a redirect.
//!
//! A mutation pushes its success message and gets back a token; the redirect target carries the
//! token in its query string and the landing page takes the message exactly once.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Unread notices older than this are dropped.
const FLASH_TTL_SECS: i64 = 300;

struct FlashEntry {
    message: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct FlashStore {
    entries: Arc<Mutex<HashMap<Uuid, FlashEntry>>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: &str) -> Uuid {
        let now = Utc::now();
        let token = Uuid::new_v4();
        let mut entries = self.lock();
        entries.retain(|_, e| !expired(e, now));
        entries.insert(
            token,
            FlashEntry {
                message: message.to_string(),
                created_at: now,
            },
        );
        token
    }

    /// Remove and return the notice for `token`. A second call returns `None`.
    pub fn take(&self, token: &Uuid) -> Option<String> {
        let entry = self.lock().remove(token)?;
        if expired(&entry, Utc::now()) {
            return None;
        }
        Some(entry.message)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, FlashEntry>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn expired(entry: &FlashEntry, now: DateTime<Utc>) -> bool {
    now - entry.created_at > Duration::seconds(FLASH_TTL_SECS)
}
