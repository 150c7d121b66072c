//! Chat transcript operations: appends, reset, send, and retry.

use chrono::{Duration, Local, Utc};
use thiserror::Error;
use tracing::debug;

use itinera_contract::{
    ChatMessage, ChatRequest, HistoryEntry, Language, profile_to_wire,
};

use crate::client::ApiError;

use super::AppStore;

/// Longest transcript kept in the store.
pub const MAX_CHAT_HISTORY: usize = 20;

/// Trailing slice of the transcript sent to the backend as context.
pub const HISTORY_REQUEST_LIMIT: usize = 12;

/// Longest message the store will send.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Minimum spacing between two outbound sends.
const MIN_SEND_INTERVAL_MS: i64 = 800;

/// Cooldown armed after a failed send before a retry is allowed.
const RETRY_COOLDOWN_MS: i64 = 1000;

/// Assistant greeting opening a fresh conversation.
const GREETING_EN: &str = "Hello! I'm your itinera assistant. I can help answer questions about your visa application, required documents, and travel planning. How can I help you today?";
const GREETING_FR: &str = "Bonjour ! Je suis votre assistant itinera. Je peux répondre sur votre demande de visa, les documents requis et la planification du voyage. Comment puis-je vous aider aujourd'hui ?";

/// Errors returned by [`AppStore::send_chat`] and
/// [`AppStore::retry_last_failed`].
///
/// Only the `Api` variant represents a send that actually went out and
/// failed; the others are local guards that leave the transcript
/// untouched.
#[derive(Debug, Error)]
pub enum ChatSendError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("message exceeds {MAX_MESSAGE_LENGTH} characters")]
    TooLong,

    #[error("messages are being sent too quickly")]
    TooFast,

    #[error("a send is already in flight")]
    SendInFlight,

    #[error("retry not available yet")]
    CooldownActive,

    #[error("nothing to retry")]
    NothingToRetry,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AppStore {
    /// The transcript, oldest first.
    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.state.chat_history
    }

    /// Append a user message with a wall-clock display stamp. Clears any
    /// existing chat error. The transcript is capped to the most recent
    /// [`MAX_CHAT_HISTORY`] messages.
    pub fn append_user_message(&mut self, content: &str) -> ChatMessage {
        let message = ChatMessage::user(content, display_timestamp());
        self.push_message(message.clone());
        message
    }

    /// Append an assistant message. Same shape as the user append.
    ///
    /// Retry bookkeeping is owned by [`AppStore::resolve_failed_send`];
    /// an unrelated assistant append leaves the failed-send marker alone.
    pub fn append_assistant_message(&mut self, content: &str) -> ChatMessage {
        let message = ChatMessage::assistant(content, display_timestamp());
        self.push_message(message.clone());
        message
    }

    fn push_message(&mut self, message: ChatMessage) {
        self.state.chat_history.push(message);
        let len = self.state.chat_history.len();
        if len > MAX_CHAT_HISTORY {
            self.state.chat_history.drain(..len - MAX_CHAT_HISTORY);
        }
        self.chat_error = None;
        self.persist();
    }

    /// Ensure a fresh conversation opens with the localized greeting.
    /// No-op when the transcript already has messages; does not touch
    /// the failed-send marker.
    pub fn ensure_greeting(&mut self) {
        if self.state.chat_history.is_empty() {
            let language = self.profile_language();
            self.state.chat_history =
                vec![ChatMessage::assistant(greeting(language), display_timestamp())];
            self.persist();
        }
    }

    /// Reset the conversation to a single greeting in the profile's
    /// language. Idempotent.
    pub fn clear_chat(&mut self) {
        let language = self.profile_language();
        self.reset_chat_for_locale(language);
    }

    /// Reset the conversation to a single greeting in an explicit
    /// language -- used when the user switches UI language.
    pub fn reset_chat_for_locale(&mut self, language: Language) {
        self.state.chat_history = vec![ChatMessage::assistant(
            greeting(language),
            display_timestamp(),
        )];
        self.state.last_failed_message = None;
        self.chat_error = None;
        self.retry_available_at = None;
        self.persist();
    }

    /// Send one chat message and append the assistant's reply.
    ///
    /// Local guards (empty, too long, too fast, send in flight) reject
    /// without touching the transcript. A send that goes out appends the
    /// user message first; on failure the message text is recorded for
    /// retry, a one-second cooldown is armed, and the error propagates to
    /// the caller -- unlike plan sync, chat errors are the caller's to
    /// handle.
    pub async fn send_chat(&mut self, message: &str) -> Result<ChatMessage, ChatSendError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatSendError::EmptyMessage);
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ChatSendError::TooLong);
        }
        if self.is_sending_chat {
            return Err(ChatSendError::SendInFlight);
        }
        let now = Utc::now();
        if let Some(last) = self.last_sent_at {
            if now - last < Duration::milliseconds(MIN_SEND_INTERVAL_MS) {
                return Err(ChatSendError::TooFast);
            }
        }

        self.append_user_message(message);
        self.is_sending_chat = true;
        self.last_sent_at = Some(now);

        let request = self.build_chat_request(message);
        let result = self.transport.send_chat(&request).await;
        self.is_sending_chat = false;

        match result {
            Ok(reply) => {
                let appended = self.append_assistant_message(&reply.response);
                self.resolve_failed_send();
                Ok(appended)
            }
            Err(e) => {
                debug!(error = %e, "chat send failed");
                self.chat_error = Some(e.to_string());
                self.state.last_failed_message = Some(message.to_string());
                self.retry_available_at =
                    Some(Utc::now() + Duration::milliseconds(RETRY_COOLDOWN_MS));
                self.persist();
                Err(ChatSendError::Api(e))
            }
        }
    }

    /// Re-send the last failed message once the cooldown has elapsed.
    pub async fn retry_last_failed(&mut self) -> Result<ChatMessage, ChatSendError> {
        let Some(failed) = self.state.last_failed_message.clone() else {
            return Err(ChatSendError::NothingToRetry);
        };
        if let Some(available_at) = self.retry_available_at {
            if Utc::now() < available_at {
                return Err(ChatSendError::CooldownActive);
            }
        }
        self.send_chat(&failed).await
    }

    /// Explicit success transition for the retry bookkeeping: forget the
    /// failed message and disarm the cooldown.
    pub fn resolve_failed_send(&mut self) {
        if self.state.last_failed_message.is_none() && self.retry_available_at.is_none() {
            return;
        }
        self.state.last_failed_message = None;
        self.retry_available_at = None;
        self.persist();
    }

    fn build_chat_request(&self, message: &str) -> ChatRequest {
        let history = &self.state.chat_history;
        let skip = history.len().saturating_sub(HISTORY_REQUEST_LIMIT);
        ChatRequest {
            message: message.to_string(),
            profile: self.state.profile.as_ref().map(profile_to_wire),
            history: history[skip..]
                .iter()
                .map(|m| HistoryEntry {
                    role: m.role,
                    content: m.content.clone(),
                })
                .collect(),
        }
    }

    fn profile_language(&self) -> Language {
        match self.state.profile.as_ref() {
            Some(profile) if profile.language.eq_ignore_ascii_case("fr") => Language::Fr,
            _ => Language::En,
        }
    }
}

fn greeting(language: Language) -> &'static str {
    match language {
        Language::En => GREETING_EN,
        Language::Fr => GREETING_FR,
    }
}

fn display_timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}
