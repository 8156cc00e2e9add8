//! API client implementation using reqwest.
//!
//! This adapter implements the `ApiClient` port. It keeps two reqwest
//! clients: one with a cookie jar for credentialed calls to the backend and
//! one without for anonymous calls and pre-signed storage URLs.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::debug;
use zenkai_application::{ApiClient, ApplicationError, ApplicationResult};
use zenkai_domain::{
    ApiRequest, ApiResponse, ClientConfig, HttpMethod, RequestBody, RequestTarget,
    request_timeout,
};

const USER_AGENT: &str = concat!("Zenkai/", env!("CARGO_PKG_VERSION"));

/// Cookie-session HTTP transport for the backend.
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    base_url: Url,
    session: Client,
    anonymous: Client,
    timeout_ms: u64,
}

impl ReqwestApiClient {
    /// Creates a client for `base_url` with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the timeout is zero, or
    /// the client cannot be built.
    pub fn new(base_url: &str, timeout_ms: u64) -> ApplicationResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApplicationError::Network(format!("invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApplicationError::Network(format!(
                "invalid API URL {base_url}"
            )));
        }
        let timeout = request_timeout(timeout_ms)?;
        let session = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Network(e.to_string()))?;
        let anonymous = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Network(e.to_string()))?;
        Ok(Self {
            base_url,
            session,
            anonymous,
            timeout_ms,
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &ClientConfig) -> ApplicationResult<Self> {
        Self::new(&config.api_url, config.request_timeout_ms)
    }

    /// The backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the request target to a full URL.
    ///
    /// API segments are percent-encoded one by one, so a name such as
    /// `Upper Back` or `a/b` stays a single path segment.
    fn resolve(&self, target: &RequestTarget) -> ApplicationResult<Url> {
        match target {
            RequestTarget::Api(segments) => {
                let mut url = self.base_url.clone();
                url.path_segments_mut()
                    .map_err(|()| {
                        ApplicationError::Network(format!("invalid API URL {}", self.base_url))
                    })?
                    .pop_if_empty()
                    .extend(segments);
                Ok(url)
            }
            RequestTarget::Absolute(raw) => Url::parse(raw)
                .map_err(|e| ApplicationError::Network(format!("invalid URL {raw}: {e}"))),
        }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn build_body(builder: RequestBuilder, body: RequestBody) -> ApplicationResult<RequestBuilder> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Json(value) => Ok(builder.json(&value)),
            RequestBody::Binary {
                content_type,
                bytes,
            } => Ok(builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(bytes)),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| ApplicationError::Network(format!("invalid content type: {e}")))?;
                Ok(builder.multipart(Form::new().part(file.field, part)))
            }
        }
    }

    /// Maps reqwest errors to the transport failure.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> ApplicationError {
        if error.is_timeout() {
            return ApplicationError::Network(format!("request timed out after {timeout_ms} ms"));
        }
        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            return ApplicationError::Network(format!("could not connect to {host}"));
        }
        ApplicationError::Network(error.to_string())
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn send(&self, request: ApiRequest) -> ApplicationResult<ApiResponse> {
        let url = self.resolve(&request.target)?;
        let path = request.display_path();
        let client = if request.with_credentials {
            &self.session
        } else {
            &self.anonymous
        };

        let mut builder = client.request(Self::to_reqwest_method(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = Self::build_body(builder, request.body)?;

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?
            .to_vec();

        debug!(
            method = %request.method,
            %path,
            status,
            elapsed_ms = start.elapsed().as_millis(),
            "request completed"
        );
        Ok(ApiResponse::new(status, body))
    }
}
