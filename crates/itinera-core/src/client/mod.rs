//! Transport interface for the plan/chat HTTP API.
//!
//! [`ApiTransport`] is the seam between the store and the network: the
//! store holds a `Box<dyn ApiTransport>` and never touches HTTP itself.
//! [`HttpApiClient`] is the production adapter; tests script the trait
//! directly.

pub mod error;
pub mod http;
pub mod trait_def;

pub use error::ApiError;
pub use http::HttpApiClient;
pub use trait_def::ApiTransport;
