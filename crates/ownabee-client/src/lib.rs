//! HTTP client for the Ownabee portal API.
//!
//! [`ApiClient`] owns the bearer token and the single-retry refresh
//! protocol; [`PortalApi`] layers typed endpoint calls on top of it.

pub mod api;
pub mod api_client;
pub mod multipart;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::PortalApi;
pub use api_client::{ApiClient, AuthEventHandler, RequestOptions};
pub use transport::ReqwestTransport;
