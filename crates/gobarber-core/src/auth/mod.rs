//! Authentication module for managing the user session.
//!
//! `SessionStore` owns the token/user pair. It restores it from durable
//! storage at startup, establishes it by signing in against the API and
//! clears it on sign-out. Consumers read it or subscribe to changes; only
//! `sign_in` and `sign_out` mutate it.

pub mod session;

pub use session::{Session, SessionStore, User};
