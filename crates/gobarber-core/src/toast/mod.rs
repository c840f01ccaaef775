//! Transient notifications ("toasts").
//!
//! - `ToastStore`: the ordered collection of active messages
//! - `ToastTimer`: cancellable auto-dismiss timer for one message
//! - `ToastContainer`: keeps one timer per displayed message and handles
//!   user dismissal
//!
//! Every message disappears `TOAST_DURATION` after it is displayed unless the
//! user dismisses it first.

pub mod container;
pub mod store;
pub mod timer;

use std::time::Duration;

pub use container::ToastContainer;
pub use store::{NewToast, ToastMessage, ToastStore, ToastType};
pub use timer::ToastTimer;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);
