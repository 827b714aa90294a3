use crate::models::{ProgressChange, ProgressRecord};
use crate::storage::KeyValueStore;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

pub const STORAGE_KEY: &str = "readingProgress_v1";

const CHANGE_CAPACITY: usize = 64;

/// A failed write is logged; the in-memory record stays authoritative.
pub struct ProgressStore<S> {
    storage: S,
    record: ProgressRecord,
    last_seen: Option<String>,
    changes: broadcast::Sender<ProgressChange>,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub async fn load(storage: S) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let mut store = Self {
            storage,
            record: ProgressRecord::default(),
            last_seen: None,
            changes,
        };

        match store.storage.get(STORAGE_KEY).await {
            Ok(Some(raw)) => {
                match decode_record(&raw) {
                    Ok(record) => store.record = record,
                    Err(err) => error!("failed to parse stored progress, starting empty: {err}"),
                }
                store.last_seen = Some(raw);
            }
            Ok(None) => debug!("no stored progress yet"),
            Err(err) => error!("failed to read stored progress, starting empty: {err}"),
        }

        store
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn is_done(&self, date_key: &str) -> bool {
        self.record.is_done(date_key)
    }

    pub fn completed_count(&self) -> usize {
        self.record.completed_count()
    }

    pub fn completion_percentage(&self, total_days: i64) -> f64 {
        if total_days <= 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total_days as f64 * 100.0
    }

    pub async fn toggle_done(&mut self, date_key: &str) -> bool {
        let done = !self.record.is_done(date_key);
        self.record.0.insert(date_key.to_string(), done);
        self.commit().await;
        done
    }

    /// Last-write-wins replacement of the whole record.
    pub async fn replace_record(&mut self, record: ProgressRecord) {
        self.record = record;
        self.commit().await;
    }

    pub fn apply_external_change(&mut self, change: &ProgressChange) -> bool {
        if change.key != STORAGE_KEY {
            return false;
        }
        match decode_record(&change.new_value) {
            Ok(record) => {
                self.record = record;
                self.last_seen = Some(change.new_value.clone());
                self.notify(change.new_value.clone());
                true
            }
            Err(err) => {
                warn!("ignoring unreadable progress change: {err}");
                false
            }
        }
    }

    pub async fn reload_if_changed(&mut self) -> bool {
        let raw = match self.storage.get(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!("failed to poll stored progress: {err}");
                return false;
            }
        };
        if self.last_seen.as_deref() == Some(raw.as_str()) {
            return false;
        }

        let change = ProgressChange {
            key: STORAGE_KEY.to_string(),
            new_value: raw,
        };
        let applied = self.apply_external_change(&change);
        if !applied {
            // Remember the bad payload so it is reported once, not every poll.
            self.last_seen = Some(change.new_value);
        }
        applied
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressChange> {
        self.changes.subscribe()
    }

    async fn commit(&mut self) {
        let payload = match serde_json::to_string(&self.record) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to serialize progress: {err}");
                return;
            }
        };

        match self.storage.set(STORAGE_KEY, &payload).await {
            Ok(()) => self.last_seen = Some(payload.clone()),
            Err(err) => warn!("failed to persist progress, keeping it in memory: {err}"),
        }

        self.notify(payload);
    }

    fn notify(&self, new_value: String) {
        // Sending only fails when nobody is subscribed.
        let _ = self.changes.send(ProgressChange {
            key: STORAGE_KEY.to_string(),
            new_value,
        });
    }
}

fn decode_record(raw: &str) -> Result<ProgressRecord, serde_json::Error> {
    let values: BTreeMap<String, Value> = serde_json::from_str(raw)?;
    let flags = values
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Bool(done) => Some((key, done)),
            other => {
                debug!("dropping non-boolean progress flag for {key}: {other}");
                None
            }
        })
        .collect();
    Ok(ProgressRecord(flags))
}
