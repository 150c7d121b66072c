//! The client synchronization store.
//!
//! [`AppStore`] is the single source of truth for the profile, the plan,
//! the chat transcript, and the transient sync-control flags. All
//! mutation goes through its declared transition methods (`&mut self`):
//! there is no ambient global state, and persistence is an explicit
//! serialize step after every durable mutation rather than a side
//! channel.
//!
//! Error handling is deliberately asymmetric: plan fetches never return
//! an error (failures land in [`AppStore::plan_error`] behind a
//! persistent retry banner), while chat sends propagate their error to
//! the caller for inline per-message retry.

mod chat;
mod checklist;
mod plan_sync;
pub mod state;

pub use chat::{ChatSendError, HISTORY_REQUEST_LIMIT, MAX_CHAT_HISTORY, MAX_MESSAGE_LENGTH};

use chrono::{DateTime, Utc};
use tracing::warn;

use itinera_contract::{Plan, Profile};

use crate::client::ApiTransport;
use crate::migrate;
use crate::storage::{APP_STATE_KEY, StorageBackend};

use state::PersistedState;

/// Process-wide client state container. See the module docs.
pub struct AppStore {
    state: PersistedState,
    transport: Box<dyn ApiTransport>,
    storage: Box<dyn StorageBackend>,

    // Transient sync-control state; reset on process start.
    is_fetching_plan: bool,
    plan_error: Option<String>,
    is_sending_chat: bool,
    chat_error: Option<String>,
    retry_available_at: Option<DateTime<Utc>>,
    last_sent_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("state", &self.state)
            .field("is_fetching_plan", &self.is_fetching_plan)
            .field("plan_error", &self.plan_error)
            .field("is_sending_chat", &self.is_sending_chat)
            .field("chat_error", &self.chat_error)
            .finish()
    }
}

impl AppStore {
    /// Build a store over the given collaborators and hydrate it from
    /// durable storage. Hydration -- including the one-shot legacy-key
    /// migration -- happens exactly once, here.
    pub fn open(transport: Box<dyn ApiTransport>, mut storage: Box<dyn StorageBackend>) -> Self {
        let state = migrate::hydrate(storage.as_mut());
        Self {
            state,
            transport,
            storage,
            is_fetching_plan: false,
            plan_error: None,
            is_sending_chat: false,
            chat_error: None,
            retry_available_at: None,
            last_sent_at: None,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn profile(&self) -> Option<&Profile> {
        self.state.profile.as_ref()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.state.plan.as_ref()
    }

    pub fn plan_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.plan_fetched_at
    }

    pub fn plan_error(&self) -> Option<&str> {
        self.plan_error.as_deref()
    }

    pub fn is_fetching_plan(&self) -> bool {
        self.is_fetching_plan
    }

    pub fn chat_error(&self) -> Option<&str> {
        self.chat_error.as_deref()
    }

    pub fn is_sending_chat(&self) -> bool {
        self.is_sending_chat
    }

    pub fn last_failed_message(&self) -> Option<&str> {
        self.state.last_failed_message.as_deref()
    }

    /// Instant after which a retry of the last failed send is allowed.
    /// Advisory: stored for the UI countdown; only
    /// [`AppStore::retry_last_failed`] enforces it.
    pub fn retry_available_at(&self) -> Option<DateTime<Utc>> {
        self.retry_available_at
    }

    // -- profile ------------------------------------------------------------

    /// Replace the stored profile wholesale. Field-level edits happen in
    /// the form layer, never here.
    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.state.profile = profile;
        self.persist();
    }

    // -- persistence --------------------------------------------------------

    /// Serialize the durable subset to storage. Best-effort: a failed
    /// write is logged and the in-memory state stays authoritative.
    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize app state");
                return;
            }
        };
        if let Err(e) = self.storage.set(APP_STATE_KEY, &raw) {
            warn!(error = %e, "failed to persist app state (best-effort)");
        }
    }
}
