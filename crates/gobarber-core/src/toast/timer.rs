use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::ToastStore;

/// Auto-dismiss timer for one toast.
///
/// Holding the handle keeps the timer armed. Dropping it cancels the pending
/// removal, so a toast that is already gone never gets a stale callback.
/// Must be started from inside a tokio runtime.
#[derive(Debug)]
pub struct ToastTimer {
    id: String,
    handle: JoinHandle<()>,
}

impl ToastTimer {
    pub fn start(store: ToastStore, id: &str, delay: Duration) -> Self {
        let toast_id = id.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(id = %toast_id, "Toast expired");
            store.remove_toast(&toast_id);
        });

        Self {
            id: id.to_string(),
            handle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True once the timer has fired or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ToastTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{NewToast, TOAST_DURATION};

    #[tokio::test(start_paused = true)]
    async fn test_timer_removes_toast_when_it_fires() {
        let store = ToastStore::new();
        let msg = store.add_toast(NewToast::info("hello"));
        let timer = ToastTimer::start(store.clone(), msg.id(), TOAST_DURATION);

        tokio::time::sleep(TOAST_DURATION - Duration::from_millis(1)).await;
        assert!(store.contains(msg.id()));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!store.contains(msg.id()));
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_timer_cancels_removal() {
        let store = ToastStore::new();
        let msg = store.add_toast(NewToast::info("stays"));
        let timer = ToastTimer::start(store.clone(), msg.id(), TOAST_DURATION);
        assert_eq!(timer.id(), msg.id());

        drop(timer);
        tokio::time::sleep(TOAST_DURATION * 2).await;

        assert!(store.contains(msg.id()));
    }
}
