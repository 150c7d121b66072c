//! Integration tests for the synchronization store: plan lifecycle,
//! chat transcript rules, retry cooldown, checklist completion, and
//! persistence across process restarts.
//!
//! All network and storage collaborators are scripted fakes from
//! `itinera-test-utils`; no test touches the real filesystem or network.

use chrono::{Duration, Utc};

use itinera_contract::{ChatRole, Language};
use itinera_core::client::ApiError;
use itinera_core::storage::APP_STATE_KEY;
use itinera_core::store::state::{PersistedState, SCHEMA_VERSION};
use itinera_core::store::{AppStore, ChatSendError, HISTORY_REQUEST_LIMIT, MAX_CHAT_HISTORY};
use itinera_test_utils::{MemoryStorage, ScriptedTransport, sample_profile, sample_wire_plan};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Build a store over fresh fakes, returning handles to both
/// collaborators for later assertions.
fn open_store() -> (AppStore, ScriptedTransport, MemoryStorage) {
    let transport = ScriptedTransport::new();
    let storage = MemoryStorage::new();
    let store = AppStore::open(Box::new(transport.clone()), Box::new(storage.clone()));
    (store, transport, storage)
}

fn open_store_with_profile() -> (AppStore, ScriptedTransport, MemoryStorage) {
    let (mut store, transport, storage) = open_store();
    store.set_profile(Some(sample_profile()));
    (store, transport, storage)
}

fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

// ---------------------------------------------------------------------------
// Plan lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plan_fetch_populates_plan_and_timestamp() {
    let (mut store, transport, storage) = open_store_with_profile();
    transport.push_plan(Ok(sample_wire_plan()));

    store.sync_plan().await;

    let plan = store.plan().expect("plan should be set");
    assert_eq!(plan.summary.total_tasks, 2);
    assert_eq!(plan.summary.total_documents, 2);
    assert!(store.plan_fetched_at().is_some());
    assert!(store.plan_error().is_none());
    assert!(!store.is_fetching_plan());

    // The outbound payload went through the mapper.
    let requests = transport.plan_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].purpose, "STUDY");
    assert_eq!(requests[0].duration_months, 6);

    // The durable record was written.
    let raw = storage.value(APP_STATE_KEY).expect("record persisted");
    assert!(raw.contains("planFetchedAt"));
}

#[tokio::test]
async fn plan_fetch_failure_keeps_previous_plan_and_sets_error() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_plan(Ok(sample_wire_plan()));
    store.sync_plan().await;
    let first_fetched_at = store.plan_fetched_at();

    transport.push_plan(Err(ApiError::Status {
        status: 502,
        message: "generator offline".to_string(),
    }));
    store.sync_plan().await;

    // The previous plan stays visible under the error banner.
    assert!(store.plan().is_some());
    assert_eq!(store.plan_error(), Some("generator offline"));
    assert_eq!(store.plan_fetched_at(), first_fetched_at);
}

#[tokio::test]
async fn plan_error_clears_when_the_next_fetch_succeeds() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_plan(Err(network_error()));
    store.sync_plan().await;
    assert!(store.plan_error().is_some());

    transport.push_plan(Ok(sample_wire_plan()));
    store.sync_plan().await;

    assert!(store.plan_error().is_none());
    assert!(store.plan().is_some());
}

#[tokio::test]
async fn sync_plan_without_profile_is_a_noop() {
    let (mut store, transport, _storage) = open_store();

    store.sync_plan().await;

    assert!(store.plan().is_none());
    assert!(store.plan_error().is_none());
    assert!(transport.plan_requests().is_empty());
}

#[tokio::test]
async fn fresh_plan_is_not_refetched_on_mount() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_plan(Ok(sample_wire_plan()));
    store.sync_plan().await;

    store.sync_plan_if_stale().await;

    assert_eq!(transport.plan_requests().len(), 1);
    assert!(!store.is_plan_stale());
}

#[tokio::test]
async fn stale_persisted_plan_triggers_background_refresh() {
    // Stage a record whose plan was fetched seven hours ago.
    let mut record = PersistedState {
        schema_version: SCHEMA_VERSION,
        profile: Some(sample_profile()),
        plan_fetched_at: Some(Utc::now() - Duration::hours(7)),
        ..Default::default()
    };
    record.plan = Some(itinera_contract::plan_to_ui(
        &sample_wire_plan(),
        Some(&sample_profile()),
    ));

    let mut storage = MemoryStorage::new();
    storage.seed(APP_STATE_KEY, &serde_json::to_string(&record).unwrap());
    let transport = ScriptedTransport::new();
    transport.push_plan(Ok(sample_wire_plan()));

    let mut store = AppStore::open(Box::new(transport.clone()), Box::new(storage));
    assert!(store.is_plan_stale());

    store.sync_plan_if_stale().await;

    assert_eq!(transport.plan_requests().len(), 1);
    assert!(!store.is_plan_stale());
}

// ---------------------------------------------------------------------------
// Chat transcript
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_send_appends_user_and_assistant_in_order() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_chat_reply("You should apply early.");

    let reply = store.send_chat("When should I apply?").await.unwrap();
    assert_eq!(reply.role, ChatRole::Assistant);

    let history = store.chat_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].content, "When should I apply?");
    assert_eq!(history[1].content, "You should apply early.");
    assert!(store.chat_error().is_none());
}

#[tokio::test]
async fn chat_request_carries_profile_and_capped_history() {
    let (mut store, transport, _storage) = open_store_with_profile();
    for i in 0..18 {
        store.append_user_message(&format!("filler {i}"));
    }
    transport.push_chat_reply("ok");

    store.send_chat("the question").await.unwrap();

    let requests = transport.chat_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.message, "the question");
    assert_eq!(
        request.profile.as_ref().map(|p| p.language.as_str()),
        Some("EN")
    );
    assert_eq!(request.history.len(), HISTORY_REQUEST_LIMIT);
    // The just-appended user message is the last context entry.
    assert_eq!(request.history.last().unwrap().content, "the question");
}

#[test]
fn transcript_caps_at_twenty_most_recent_messages() {
    let (mut store, _transport, _storage) = open_store_with_profile();
    for i in 0..25 {
        store.append_user_message(&format!("message {i}"));
    }

    let history = store.chat_history();
    assert_eq!(history.len(), MAX_CHAT_HISTORY);
    assert_eq!(history[0].content, "message 5");
    assert_eq!(history.last().unwrap().content, "message 24");
}

#[test]
fn clear_chat_is_idempotent_and_localized() {
    let (mut store, _transport, _storage) = open_store_with_profile();
    store.append_user_message("hello");

    store.clear_chat();
    let after_first: Vec<_> = store.chat_history().to_vec();
    store.clear_chat();
    let after_second: Vec<_> = store.chat_history().to_vec();

    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first[0].role, ChatRole::Assistant);
    assert!(after_first[0].content.starts_with("Hello!"));
    assert_eq!(after_first.len(), after_second.len());
    assert_eq!(after_first[0].content, after_second[0].content);
}

#[test]
fn reset_for_locale_switches_the_greeting_language() {
    let (mut store, _transport, _storage) = open_store_with_profile();

    store.reset_chat_for_locale(Language::Fr);

    let history = store.chat_history();
    assert_eq!(history.len(), 1);
    assert!(history[0].content.starts_with("Bonjour"));
}

#[test]
fn ensure_greeting_only_fills_an_empty_transcript() {
    let (mut store, _transport, _storage) = open_store_with_profile();

    store.ensure_greeting();
    assert_eq!(store.chat_history().len(), 1);

    store.ensure_greeting();
    assert_eq!(store.chat_history().len(), 1, "greeting must not duplicate");
}

// ---------------------------------------------------------------------------
// Send guards, failure, and retry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_and_oversized_messages_are_rejected_locally() {
    let (mut store, transport, _storage) = open_store_with_profile();

    let empty = store.send_chat("   ").await;
    assert!(matches!(empty, Err(ChatSendError::EmptyMessage)));

    let oversized = "x".repeat(501);
    let too_long = store.send_chat(&oversized).await;
    assert!(matches!(too_long, Err(ChatSendError::TooLong)));

    assert!(store.chat_history().is_empty(), "guards must not append");
    assert!(transport.chat_requests().is_empty());
}

#[tokio::test]
async fn rapid_second_send_is_rejected() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_chat_reply("first reply");

    store.send_chat("first").await.unwrap();
    let second = store.send_chat("second").await;

    assert!(matches!(second, Err(ChatSendError::TooFast)));
    assert_eq!(transport.chat_requests().len(), 1);
}

#[tokio::test]
async fn failed_send_records_message_and_arms_cooldown() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_chat(Err(network_error()));

    let before = Utc::now();
    let result = store.send_chat("did it arrive?").await;

    assert!(matches!(result, Err(ChatSendError::Api(_))));
    assert_eq!(store.last_failed_message(), Some("did it arrive?"));
    assert_eq!(store.chat_error(), Some("network error: connection refused"));

    let available_at = store.retry_available_at().expect("cooldown armed");
    let delta = available_at - before;
    assert!(delta >= Duration::milliseconds(1000));
    assert!(delta < Duration::milliseconds(2000));

    // The user message was appended before the failure; no reply follows.
    let history = store.chat_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, ChatRole::User);
}

#[tokio::test]
async fn retry_during_cooldown_is_rejected_without_side_effects() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_chat(Err(network_error()));
    let _ = store.send_chat("flaky").await;
    let transcript_len = store.chat_history().len();

    let retry = store.retry_last_failed().await;

    assert!(matches!(retry, Err(ChatSendError::CooldownActive)));
    assert_eq!(store.chat_history().len(), transcript_len);
    assert_eq!(store.last_failed_message(), Some("flaky"));
    assert_eq!(transport.chat_requests().len(), 1);
}

#[tokio::test]
async fn retry_after_cooldown_resends_and_resolves_the_failure() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_chat(Err(network_error()));
    let _ = store.send_chat("flaky").await;

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    transport.push_chat_reply("made it");
    store.retry_last_failed().await.unwrap();

    assert!(store.last_failed_message().is_none());
    assert!(store.retry_available_at().is_none());
    assert!(store.chat_error().is_none());
    // Original failed attempt + retried attempt + reply.
    assert_eq!(store.chat_history().len(), 3);
    assert_eq!(transport.chat_requests().len(), 2);
}

#[tokio::test]
async fn retry_with_nothing_to_retry_is_rejected() {
    let (mut store, _transport, _storage) = open_store_with_profile();
    let result = store.retry_last_failed().await;
    assert!(matches!(result, Err(ChatSendError::NothingToRetry)));
}

#[tokio::test]
async fn unrelated_assistant_append_keeps_the_failed_marker() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_chat(Err(network_error()));
    let _ = store.send_chat("flaky").await;

    store.append_assistant_message("unrelated broadcast");

    assert_eq!(store.last_failed_message(), Some("flaky"));

    store.resolve_failed_send();
    assert!(store.last_failed_message().is_none());
}

// ---------------------------------------------------------------------------
// Checklist completion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn checklist_toggle_flips_membership() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_plan(Ok(sample_wire_plan()));
    store.sync_plan().await;

    store.toggle_checklist_item("task-a");
    assert!(store.is_checklist_item_completed("task-a"));
    assert!(store.completed_ids_in_plan().contains("task-a"));

    store.toggle_checklist_item("task-a");
    assert!(!store.is_checklist_item_completed("task-a"));
    assert!(store.completed_ids_in_plan().is_empty());
}

#[tokio::test]
async fn orphaned_completion_ids_are_filtered_at_read_time() {
    let (mut store, transport, _storage) = open_store_with_profile();
    transport.push_plan(Ok(sample_wire_plan()));
    store.sync_plan().await;

    // Toggling an id no plan item carries must not fail, and must not
    // leak into the rendered completion set.
    store.toggle_checklist_item("ghost-item");
    assert!(store.is_checklist_item_completed("ghost-item"));
    assert!(!store.completed_ids_in_plan().contains("ghost-item"));

    // It stays in the raw set, so a plan that regains the item also
    // regains the completion.
    assert!(store.completed_checklist_ids().contains("ghost-item"));
}

// ---------------------------------------------------------------------------
// Persistence across restarts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn durable_state_survives_a_restart_and_transient_state_does_not() {
    let transport = ScriptedTransport::new();
    let storage = MemoryStorage::new();
    {
        let mut store = AppStore::open(Box::new(transport.clone()), Box::new(storage.clone()));
        store.set_profile(Some(sample_profile()));
        transport.push_plan(Ok(sample_wire_plan()));
        store.sync_plan().await;
        transport.push_chat(Err(network_error()));
        let _ = store.send_chat("will fail").await;
        store.toggle_checklist_item("task-b");
    }

    let store = AppStore::open(Box::new(transport), Box::new(storage));

    // Durable subset survived.
    assert!(store.profile().is_some());
    assert!(store.plan().is_some());
    assert_eq!(store.chat_history().len(), 1);
    assert_eq!(store.last_failed_message(), Some("will fail"));
    assert!(store.is_checklist_item_completed("task-b"));

    // Transient sync-control fields reset on process start.
    assert!(store.chat_error().is_none());
    assert!(store.retry_available_at().is_none());
    assert!(!store.is_fetching_plan());
    assert!(!store.is_sending_chat());
}
