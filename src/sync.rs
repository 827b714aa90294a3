use crate::progress::ProgressStore;
use crate::schedule::ScheduledTask;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

pub fn watch_storage<S>(progress: Arc<Mutex<ProgressStore<S>>>, period: Duration) -> ScheduledTask
where
    S: KeyValueStore + 'static,
{
    ScheduledTask::every(period, move || {
        let progress = Arc::clone(&progress);
        async move {
            let mut store = progress.lock().await;
            if store.reload_if_changed().await {
                info!("picked up progress written elsewhere");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::STORAGE_KEY;
    use crate::storage::FileStore;

    #[tokio::test]
    async fn foreign_writes_reach_subscribers() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("reading_plan_sync_{}_{}", std::process::id(), nanos));
        let writer = FileStore::new(&dir);

        let store = ProgressStore::load(FileStore::new(&dir)).await;
        let mut changes = store.subscribe();
        let progress = Arc::new(Mutex::new(store));
        let _watcher = watch_storage(Arc::clone(&progress), Duration::from_millis(20));

        writer.set(STORAGE_KEY, r#"{"2025-07-05":true}"#).await.unwrap();
        let change = tokio::time::timeout(Duration::from_secs(2), changes.recv())
            .await
            .expect("no change observed")
            .unwrap();
        assert_eq!(change.new_value, r#"{"2025-07-05":true}"#);
        assert!(progress.lock().await.is_done("2025-07-05"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
