//! API transport port

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zenkai_domain::{ApiRequest, ApiResponse};

use crate::{ApplicationError, ApplicationResult};

/// Port for sending requests to the backend.
///
/// Implementations resolve `RequestTarget::Api` paths against the configured
/// base URL, attach the session cookie when `with_credentials` is set, and
/// enforce the request timeout.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Sends the request and returns whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Network` when no response was received,
    /// including timeouts. Non-success statuses are not errors at this level.
    async fn send(&self, request: ApiRequest) -> ApplicationResult<ApiResponse>;
}

/// Sends the request and turns non-success statuses into errors.
///
/// # Errors
///
/// Returns the transport error, or `Unauthorized`/`Http` built from the
/// response body with `fallback` as the message when the body is empty.
pub async fn send_ok(
    client: &dyn ApiClient,
    request: ApiRequest,
    fallback: &str,
) -> ApplicationResult<ApiResponse> {
    let method = request.method;
    let path = request.display_path();
    let response = client.send(request).await?;
    debug!(%method, %path, status = %response.status, "api response");
    if response.is_success() {
        Ok(response)
    } else {
        if method.is_mutation() {
            warn!(%method, %path, status = %response.status, "change rejected");
        }
        Err(ApplicationError::from_status(
            response.status,
            &response.text(),
            fallback,
        ))
    }
}

/// Sends the request and decodes a JSON success body.
///
/// # Errors
///
/// Same as [`send_ok`], plus `Decode` when the body has an unexpected shape.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &dyn ApiClient,
    request: ApiRequest,
    fallback: &str,
) -> ApplicationResult<T> {
    let response = send_ok(client, request, fallback).await?;
    Ok(response.json()?)
}
