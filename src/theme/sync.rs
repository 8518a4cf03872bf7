//! Cross-context theme sync over a broadcast storage bus.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::{Theme, ThemeController, ThemeError, ThemeStore};

const BUS_CAPACITY: usize = 16;

/// A write seen by other contexts sharing the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub value: Option<String>,
    /// Context that performed the write.
    pub origin: u64,
}

#[derive(Debug)]
struct BusInner {
    values: Mutex<HashMap<String, String>>,
    next_origin: AtomicU64,
    tx: broadcast::Sender<StorageEvent>,
}

/// Storage shared by several browsing contexts.
#[derive(Debug, Clone)]
pub struct StorageBus {
    inner: Arc<BusInner>,
}

impl Default for StorageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self {
            inner: Arc::new(BusInner {
                values: Mutex::new(HashMap::new()),
                next_origin: AtomicU64::new(0),
                tx,
            }),
        }
    }

    /// Opens a new context with its own origin id.
    pub fn context(&self) -> SharedStore {
        let origin = self.inner.next_origin.fetch_add(1, Ordering::Relaxed);
        SharedStore {
            inner: Arc::clone(&self.inner),
            origin,
        }
    }
}

/// One context's handle on a [`StorageBus`].
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<BusInner>,
    origin: u64,
}

impl SharedStore {
    pub fn origin(&self) -> u64 {
        self.origin
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.inner.tx.subscribe()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.inner.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Deletes a key and notifies the other contexts.
    pub fn remove(&mut self, key: &str) {
        self.values().remove(key);
        self.publish(key, None);
    }

    fn publish(&self, key: &str, value: Option<String>) {
        // no receivers is fine
        let _ = self.inner.tx.send(StorageEvent {
            key: key.to_string(),
            value,
            origin: self.origin,
        });
    }
}

impl ThemeStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.values().insert(key.to_string(), value.to_string());
        self.publish(key, Some(value.to_string()));
        Ok(())
    }
}

/// Re-reads the stored theme after missed events; nothing stored falls back
/// to the system preference.
fn resync(controller: &mut ThemeController<SharedStore>) -> Theme {
    let key = controller.storage_key().to_string();
    let value = controller.store().get(&key).ok().flatten();
    controller.apply_external(&key, value.as_deref());
    controller.current()
}

/// Applies theme writes from other contexts until `token` is cancelled.
///
/// Events from the controller's own context are skipped. Returns the number
/// of events applied.
pub async fn run_theme_sync(
    controller: &mut ThemeController<SharedStore>,
    mut rx: broadcast::Receiver<StorageEvent>,
    token: CancellationToken,
) -> usize {
    let origin = controller.store().origin();
    let mut applied = 0;

    loop {
        let event = tokio::select! {
            _ = token.cancelled() => break,
            event = rx.recv() => event,
        };

        match event {
            Ok(event) if event.origin == origin => {}
            Ok(event) => {
                let value = event.value.as_deref();
                if let Some(_theme) = controller.apply_external(&event.key, value) {
                    applied += 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(theme = %_theme, from = event.origin, "theme synced");
                }
            }
            Err(broadcast::error::RecvError::Lagged(_skipped)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("theme sync lagged, {} events skipped", _skipped);
                resync(controller);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeConfig;
    use std::time::Duration;

    #[tokio::test]
    async fn test_write_reaches_other_context() {
        let bus = StorageBus::new();
        let mut tab_a = ThemeController::setup(ThemeConfig::default(), bus.context());
        let mut tab_b = ThemeController::setup(ThemeConfig::default(), bus.context());
        let rx = tab_b.store().subscribe();
        let token = CancellationToken::new();

        let sync = tokio::spawn({
            let token = token.clone();
            async move {
                let applied = run_theme_sync(&mut tab_b, rx, token).await;
                (tab_b, applied)
            }
        });

        assert_eq!(tab_a.toggle(), Theme::Dark);
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let (tab_b, applied) = sync.await.expect("join");
        assert_eq!(applied, 1);
        assert_eq!(tab_b.current(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_own_writes_are_ignored() {
        let bus = StorageBus::new();
        let mut tab = ThemeController::setup(ThemeConfig::default(), bus.context());
        let rx = tab.store().subscribe();
        tab.toggle();
        let token = CancellationToken::new();
        token.cancel();

        let applied = run_theme_sync(&mut tab, rx, token).await;
        assert_eq!(applied, 0);
        assert_eq!(tab.current(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_removed_key_falls_back_to_system() {
        let bus = StorageBus::new();
        let config = ThemeConfig {
            system_prefers_dark: true,
            ..ThemeConfig::default()
        };
        let mut writer = bus.context();
        writer.set("theme", "light").expect("set");

        let mut tab = ThemeController::setup(config, bus.context());
        assert_eq!(tab.current(), Theme::Light);
        let rx = tab.store().subscribe();

        writer.remove("theme");
        drop(writer);
        drop(bus);

        let token = CancellationToken::new();
        let sync = tokio::spawn({
            let token = token.clone();
            async move {
                let applied = run_theme_sync(&mut tab, rx, token).await;
                (tab, applied)
            }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let (tab, applied) = sync.await.expect("join");
        assert_eq!(applied, 1);
        assert_eq!(tab.current(), Theme::Dark);
    }

    #[test]
    fn test_resync_without_stored_value_uses_system() {
        let bus = StorageBus::new();
        let config = ThemeConfig {
            system_prefers_dark: true,
            ..ThemeConfig::default()
        };
        let mut tab = ThemeController::setup(config, bus.context());
        tab.apply_external("theme", Some("light"));
        assert_eq!(tab.current(), Theme::Light);

        assert_eq!(resync(&mut tab), Theme::Dark);
    }

    #[tokio::test]
    async fn test_lagged_receiver_catches_up_after_removal() {
        let bus = StorageBus::new();
        let mut writer = bus.context();
        let mut tab = ThemeController::setup(ThemeConfig::default(), bus.context());
        let rx = tab.store().subscribe();

        for _ in 0..BUS_CAPACITY + 4 {
            writer.set("theme", "dark").expect("set");
        }
        writer.remove("theme");

        let token = CancellationToken::new();
        let sync = tokio::spawn({
            let token = token.clone();
            async move {
                let applied = run_theme_sync(&mut tab, rx, token).await;
                (tab, applied)
            }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let (tab, applied) = sync.await.expect("join");
        // only the retained tail is applied
        assert_eq!(applied, BUS_CAPACITY);
        assert_eq!(tab.current(), Theme::Light);
        assert_eq!(tab.stored(), None);
    }
}
