//! The `ApiTransport` trait -- the store's interface to the backend.
//!
//! The trait is intentionally object-safe so the store can hold a
//! `Box<dyn ApiTransport>` and tests can substitute scripted fakes.

use async_trait::async_trait;

use itinera_contract::{ChatReply, ChatRequest, WirePlan, WireProfile};

use super::error::ApiError;

/// Single-shot request/response transport for the two backend endpoints.
///
/// Neither call has an intrinsic timeout or automatic retry: timeouts are
/// left to the underlying transport and retries are separate,
/// user-initiated invocations mediated by the store.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// `POST /api/plan` -- generate a plan for the given profile payload.
    async fn fetch_plan(&self, profile: &WireProfile) -> Result<WirePlan, ApiError>;

    /// `POST /api/chat` -- send one chat message with optional profile
    /// and history context.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;
}

// Compile-time assertion: ApiTransport must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn ApiTransport) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    /// A trivial transport that answers every request with fixed values,
    /// used only to prove the trait can be implemented and boxed.
    struct CannedTransport;

    #[async_trait]
    impl ApiTransport for CannedTransport {
        async fn fetch_plan(&self, _profile: &WireProfile) -> Result<WirePlan, ApiError> {
            Ok(WirePlan::default())
        }

        async fn send_chat(&self, _request: &ChatRequest) -> Result<ChatReply, ApiError> {
            Ok(ChatReply {
                response: "ok".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn canned_transport_is_usable_as_a_trait_object() {
        let transport: Box<dyn ApiTransport> = Box::new(CannedTransport);

        let request = ChatRequest {
            message: "hello".to_string(),
            profile: None,
            history: Vec::new(),
        };
        let reply = transport.send_chat(&request).await.unwrap();
        assert_eq!(reply.response, "ok");
    }
}
