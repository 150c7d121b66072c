//! Durable client storage.
//!
//! String key/value semantics: the web build of the product persists to
//! browser storage, this build to one file per key under the XDG data
//! dir. Values are whole JSON documents; the store never does partial
//! updates of a stored value.

pub mod file;

pub use file::FileStorage;

use thiserror::Error;

/// Key holding the combined namespaced app record.
pub const APP_STATE_KEY: &str = "itinera_app_state";

/// Legacy flat key: profile JSON written by the pre-namespaced scheme.
/// Consumed once during migration, never written.
pub const LEGACY_PROFILE_KEY: &str = "itinera_profile";
/// Legacy flat key: chat-history JSON array.
pub const LEGACY_CHAT_KEY: &str = "itinera_chat_history";
/// Legacy flat key: plan JSON.
pub const LEGACY_PLAN_KEY: &str = "itinera_plan";

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String key/value storage.
///
/// Object-safe so the store can hold a `Box<dyn StorageBackend>`.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` if present. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// Compile-time assertion: StorageBackend must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn StorageBackend) {}
};
