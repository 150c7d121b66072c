//! One-shot, versioned hydration of the persisted record, including the
//! migration of legacy flat storage keys.
//!
//! Earlier versions of the app wrote three flat keys (profile JSON,
//! chat-history JSON array, plan JSON). Hydration merges them into the
//! namespaced combined record exactly once: a merged record carries the
//! current schema version, which short-circuits every later run. Legacy
//! keys are read here and never written anywhere.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use itinera_contract::{ChatMessage, Plan, Profile};

use crate::storage::{
    APP_STATE_KEY, LEGACY_CHAT_KEY, LEGACY_PLAN_KEY, LEGACY_PROFILE_KEY, StorageBackend,
};
use crate::store::MAX_CHAT_HISTORY;
use crate::store::state::{PersistedState, SCHEMA_VERSION};

/// Load the persisted record, running the legacy migration if the stored
/// record predates the current schema version.
///
/// Legacy values only fill fields the namespaced record does not already
/// have. Unparseable stored values are discarded with a warning -- a bad
/// record never prevents startup.
pub fn hydrate(storage: &mut dyn StorageBackend) -> PersistedState {
    let mut state: PersistedState = read_key(storage, APP_STATE_KEY).unwrap_or_default();

    if state.schema_version >= SCHEMA_VERSION {
        return state;
    }

    if state.profile.is_none() {
        state.profile = read_key::<Profile>(storage, LEGACY_PROFILE_KEY);
    }
    if state.chat_history.is_empty() {
        if let Some(history) = read_key::<Vec<ChatMessage>>(storage, LEGACY_CHAT_KEY) {
            let skip = history.len().saturating_sub(MAX_CHAT_HISTORY);
            state.chat_history = history.into_iter().skip(skip).collect();
        }
    }
    if state.plan.is_none() {
        // The legacy scheme never recorded a fetch timestamp, so a
        // migrated plan reads as stale and refreshes in the background.
        state.plan = read_key::<Plan>(storage, LEGACY_PLAN_KEY);
    }

    state.schema_version = SCHEMA_VERSION;
    write_back(storage, &state);
    debug!(version = SCHEMA_VERSION, "migrated persisted record");
    state
}

fn read_key<T: DeserializeOwned>(storage: &mut dyn StorageBackend, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(value) => value?,
        Err(e) => {
            warn!(key, error = %e, "failed to read storage key");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "discarding unparseable storage value");
            None
        }
    }
}

fn write_back(storage: &mut dyn StorageBackend, state: &PersistedState) {
    match serde_json::to_string(state) {
        Ok(raw) => {
            if let Err(e) = storage.set(APP_STATE_KEY, &raw) {
                warn!(error = %e, "failed to write migrated record (best-effort)");
            }
        }
        Err(e) => warn!(error = %e, "failed to serialize migrated record"),
    }
}
