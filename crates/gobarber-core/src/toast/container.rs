use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use super::{ToastMessage, ToastStore, ToastTimer, TOAST_DURATION};

/// Presentation lifecycle for the toasts in a `ToastStore`.
///
/// Each message is "mounted" the first time `sync` sees it, which arms its
/// expiry timer. When a message leaves the store (timer fired, dismissed, or
/// removed by anyone else) the next `sync` unmounts it and its timer is
/// dropped. Dropping the container cancels every pending timer.
pub struct ToastContainer {
    store: ToastStore,
    duration: Duration,
    mounted: HashMap<String, ToastTimer>,
}

impl ToastContainer {
    pub fn new(store: ToastStore) -> Self {
        Self::with_duration(store, TOAST_DURATION)
    }

    pub fn with_duration(store: ToastStore, duration: Duration) -> Self {
        Self {
            store,
            duration,
            mounted: HashMap::new(),
        }
    }

    pub fn store(&self) -> &ToastStore {
        &self.store
    }

    /// Reconcile mounted timers with the store. Must run inside a tokio runtime.
    pub fn sync(&mut self) {
        let messages = self.store.messages();

        self.mounted
            .retain(|id, _| messages.iter().any(|m| m.id() == id));

        for message in &messages {
            if !self.mounted.contains_key(message.id()) {
                debug!(id = %message.id(), "Toast mounted");
                let timer = ToastTimer::start(self.store.clone(), message.id(), self.duration);
                self.mounted.insert(message.id().to_string(), timer);
            }
        }
    }

    /// User dismissal: remove now and cancel the pending timer.
    pub fn dismiss(&mut self, id: &str) {
        self.store.remove_toast(id);
        if self.mounted.remove(id).is_some() {
            debug!(id, "Toast dismissed");
        }
    }

    /// Dismiss the oldest visible toast, if any.
    pub fn dismiss_oldest(&mut self) {
        if let Some(first) = self.store.messages().first() {
            self.dismiss(first.id());
        }
    }

    /// Messages to render, oldest first.
    pub fn visible(&self) -> Vec<ToastMessage> {
        self.store.messages()
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }
}
