//! Shared test helpers: an in-memory storage backend, a scripted API
//! transport, and fixture data used across the workspace's tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use itinera_contract::{
    ChatReply, ChatRequest, Profile, WireChecklistItem, WireDocumentCategory, WireDocumentItem,
    WirePlan, WireProfile, WireRiskItem, WireSummary, WireTimelineItem,
};
use itinera_core::client::{ApiError, ApiTransport};
use itinera_core::storage::{StorageBackend, StorageError};

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-memory [`StorageBackend`].
///
/// Clones share the same underlying map, so a test can keep one handle
/// for assertions after moving another into the store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. to stage a legacy record before
    /// hydration.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Read a stored value directly, bypassing the trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ScriptedInner {
    plan_responses: VecDeque<Result<WirePlan, ApiError>>,
    chat_responses: VecDeque<Result<ChatReply, ApiError>>,
    plan_requests: Vec<WireProfile>,
    chat_requests: Vec<ChatRequest>,
}

/// Scripted [`ApiTransport`]: responses are queued up front, requests are
/// recorded for assertions.
///
/// Clones share the same queues, so a test can keep one handle after
/// boxing another into the store. An unscripted call fails with a
/// network error rather than panicking inside the store.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<ScriptedInner>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_plan(&self, response: Result<WirePlan, ApiError>) {
        self.inner.lock().unwrap().plan_responses.push_back(response);
    }

    pub fn push_chat(&self, response: Result<ChatReply, ApiError>) {
        self.inner.lock().unwrap().chat_responses.push_back(response);
    }

    /// Convenience: queue a successful chat reply.
    pub fn push_chat_reply(&self, response: &str) {
        self.push_chat(Ok(ChatReply {
            response: response.to_string(),
        }));
    }

    /// Profile payloads received by `fetch_plan`, in order.
    pub fn plan_requests(&self) -> Vec<WireProfile> {
        self.inner.lock().unwrap().plan_requests.clone()
    }

    /// Chat requests received by `send_chat`, in order.
    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.inner.lock().unwrap().chat_requests.clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn fetch_plan(&self, profile: &WireProfile) -> Result<WirePlan, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.plan_requests.push(profile.clone());
        inner
            .plan_responses
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted plan response".to_string())))
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.chat_requests.push(request.clone());
        inner
            .chat_responses
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted chat response".to_string())))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A representative onboarding profile.
pub fn sample_profile() -> Profile {
    Profile {
        origin_country: "cm".to_string(),
        destination_country: "fr".to_string(),
        purpose: "study".to_string(),
        departure_date: "2025-06-01".to_string(),
        duration: "6".to_string(),
        passport_expiry: "2026-12-01".to_string(),
        has_sponsor: true,
        funds_level: "high".to_string(),
        language: "en".to_string(),
        notes: Some("Test profile".to_string()),
    }
}

/// A small but fully populated wire plan.
pub fn sample_wire_plan() -> WirePlan {
    WirePlan {
        summary: Some(WireSummary {
            title: "Student visa plan".to_string(),
            key_advice: vec!["Apply early".to_string()],
            assumptions: Vec::new(),
            confidence: Some(0.5),
        }),
        timeline: vec![
            WireTimelineItem {
                when: "Week 1".to_string(),
                actions: vec!["Gather documents".to_string()],
                priority: "HIGH".to_string(),
            },
            WireTimelineItem {
                when: "Week 2-3".to_string(),
                actions: vec!["Book appointment".to_string()],
                priority: "MEDIUM".to_string(),
            },
        ],
        checklist: vec![
            WireChecklistItem {
                id: "task-a".to_string(),
                title: "Task A".to_string(),
                priority: "HIGH".to_string(),
                ..Default::default()
            },
            WireChecklistItem {
                id: "task-b".to_string(),
                title: "Task B".to_string(),
                priority: "LOW".to_string(),
                ..Default::default()
            },
        ],
        documents: vec![WireDocumentCategory {
            category: "Identity".to_string(),
            items: vec![
                WireDocumentItem {
                    name: "Passport".to_string(),
                    why: "Required for any application".to_string(),
                    priority: "HIGH".to_string(),
                    common_mistakes: vec!["Less than 6 months validity".to_string()],
                },
                WireDocumentItem {
                    name: "Photo".to_string(),
                    why: "Identification".to_string(),
                    priority: "MEDIUM".to_string(),
                    common_mistakes: Vec::new(),
                },
            ],
        }],
        risks: vec![WireRiskItem {
            id: "r1".to_string(),
            risk: "Processing delay".to_string(),
            why_it_matters: "May miss the departure date".to_string(),
            mitigation: vec!["Apply 8-10 weeks ahead".to_string()],
            severity: "LOW".to_string(),
        }],
        sources: Vec::new(),
        generated_at: Some("2025-01-01".to_string()),
    }
}
