//! Durable client-side key-value storage.
//!
//! Values are plain strings under string keys, the same model as browser
//! local storage. Two backends are provided:
//! - `FileStorage`: a JSON file on disk, survives restarts
//! - `MemoryStorage`: in-process only, used by tests and ephemeral runs

pub mod local;

use anyhow::Result;

pub use local::{FileStorage, MemoryStorage};

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "@Gobarber:token";

/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "@Gobarber:user";

pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
