//! The durable subset of the store's state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use itinera_contract::{ChatMessage, Plan, Profile};

/// Current version of the persisted record. Version 0/absent means the
/// legacy flat-key scheme; version 2 is the namespaced combined record.
pub const SCHEMA_VERSION: u32 = 2;

/// The durable subset of [`super::AppStore`] state, serialized to storage
/// on every mutation.
///
/// Transient sync-control fields (in-flight flags, error strings, the
/// retry cooldown) are deliberately not here; they reset to defaults on
/// process start. camelCase keys keep the record readable by the web
/// build of the product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub schema_version: u32,
    pub profile: Option<Profile>,
    pub plan: Option<Plan>,
    pub plan_fetched_at: Option<DateTime<Utc>>,
    pub chat_history: Vec<ChatMessage>,
    pub last_failed_message: Option<String>,
    pub completed_checklist_ids: BTreeSet<String>,
}
