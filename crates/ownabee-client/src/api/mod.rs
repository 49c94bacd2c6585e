//! Typed endpoint surface of the portal API.
//!
//! [`PortalApi`] is a cheap handle around the shared [`ApiClient`]; each
//! resource adds its operations in its own module. A handle can be scoped
//! to a [`CancellationToken`] so every call made through it stops once the
//! token fires.

mod auth;
mod classes;
mod institutions;
mod members;
mod parents;
mod portal;
mod portfolios;
mod shared_tablets;
mod student_codes;
mod students;
mod transfers;
mod users;

use std::sync::Arc;

use ownabee_core::error::{PortalError, Result};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::api_client::{ApiClient, RequestOptions};

#[derive(Clone)]
pub struct PortalApi {
    client: Arc<ApiClient>,
    cancel: Option<CancellationToken>,
}

impl PortalApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cancel: None,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Handle whose calls resolve to [`PortalError::Cancelled`] once
    /// `cancel` fires. A refresh cycle already under way still completes.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            client: self.client.clone(),
            cancel: Some(cancel),
        }
    }

    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        match &self.cancel {
            Some(cancel) => {
                self.client
                    .request_cancellable(endpoint, options, cancel)
                    .await
            }
            None => self.client.request(endpoint, options).await,
        }
    }
}

/// Validates an id before it is spliced into a path.
pub(crate) fn segment(id: &str) -> Result<&str> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '?', '#']) {
        return Err(PortalError::validation(format!("Invalid identifier '{}'", id)));
    }
    Ok(id)
}
