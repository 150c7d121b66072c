//! isahc-backed [`ApiTransport`] adapter.

use async_trait::async_trait;
use isahc::{AsyncReadResponseExt, HttpClient, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use itinera_contract::{ChatReply, ChatRequest, WirePlan, WireProfile};

use super::error::{ApiError, extract_error_message};
use super::trait_def::ApiTransport;

/// HTTP adapter for the plan/chat API.
pub struct HttpApiClient {
    /// Base URL without a trailing slash, e.g. `http://localhost:8000`.
    base_url: String,
    client: HttpClient,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpApiClient {
    /// Build a client against `base_url` (trailing slashes are trimmed).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = HttpClient::new().map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "posting request");

        let payload =
            serde_json::to_string(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        let request = Request::post(&url)
            .header("content-type", "application/json")
            .body(payload)
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ApiError::Status {
                status,
                message: extract_error_message(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::MalformedBody(e.to_string()))
    }
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn fetch_plan(&self, profile: &WireProfile) -> Result<WirePlan, ApiError> {
        self.post_json("/api/plan", profile).await
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.post_json("/api/chat", request).await
    }
}
