use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastType {
    #[default]
    Info,
    Success,
    Error,
}

/// A request for a notification. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub kind: ToastType,
    pub title: String,
    pub description: Option<String>,
}

impl NewToast {
    pub fn new(kind: ToastType, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastType::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastType::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastType::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An active notification. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    id: String,
    kind: ToastType,
    title: String,
    description: Option<String>,
}

impl ToastMessage {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ToastType {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Shared, ordered collection of active toasts.
///
/// Clones share the same collection. Every mutation happens under the watch
/// channel's lock, so subscribers never observe a half-applied change.
#[derive(Clone)]
pub struct ToastStore {
    messages: Arc<watch::Sender<Vec<ToastMessage>>>,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            messages: Arc::new(tx),
        }
    }

    /// Append a new message and notify subscribers. Returns the created message.
    pub fn add_toast(&self, toast: NewToast) -> ToastMessage {
        let message = ToastMessage {
            id: Uuid::new_v4().to_string(),
            kind: toast.kind,
            title: toast.title,
            description: toast.description,
        };
        debug!(id = %message.id, kind = ?message.kind, title = %message.title, "Toast added");

        let added = message.clone();
        self.messages.send_modify(|messages| messages.push(added));
        message
    }

    /// Remove the message with `id`. Absent ids are ignored and do not notify.
    /// Returns whether a message was removed.
    pub fn remove_toast(&self, id: &str) -> bool {
        let removed = self.messages.send_if_modified(|messages| {
            let before = messages.len();
            messages.retain(|m| m.id != id);
            messages.len() != before
        });
        if removed {
            debug!(id, "Toast removed");
        }
        removed
    }

    /// Snapshot of the active messages in insertion order.
    pub fn messages(&self) -> Vec<ToastMessage> {
        self.messages.borrow().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastMessage>> {
        self.messages.subscribe()
    }
}
