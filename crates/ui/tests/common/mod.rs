//! Fake backend shared by the controller tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc;
use zenkai_application::{ApiClient, ApplicationError, ApplicationResult, Clock};
use zenkai_domain::{
    ApiRequest, ApiResponse, ClientConfig, HttpMethod, Notification, RequestBody, RequestTarget,
};
use zenkai_ui::{Controller, UiUpdate};

pub const PASSWORD: &str = "kamehameha";

/// In-memory backend that keeps a session flag like the real cookie.
///
/// `/auth/me`, `/auth/login` and `/auth/logout` follow the session; other
/// routes answer from `script`, and protected ones answer 401 without a
/// session.
#[derive(Default)]
pub struct FakeBackend {
    session: Mutex<bool>,
    script: Mutex<HashMap<(HttpMethod, String), (u16, String)>>,
    unreachable: Mutex<Vec<String>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn signed_in() -> Arc<Self> {
        let backend = Self::new();
        backend.set_session(true);
        backend
    }

    pub fn set_session(&self, active: bool) {
        *self.session.lock().unwrap() = active;
    }

    pub fn has_session(&self) -> bool {
        *self.session.lock().unwrap()
    }

    pub fn on(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    pub fn on_json(&self, method: HttpMethod, path: &str, body: &serde_json::Value) {
        self.on(method, path, 200, &body.to_string());
    }

    /// Makes every request whose path starts with `prefix` fail in transport.
    pub fn break_route(&self, prefix: &str) {
        self.unreachable.lock().unwrap().push(prefix.to_string());
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.display_path() == path)
            .count()
    }

    pub fn last(&self, method: HttpMethod, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.display_path() == path)
            .cloned()
    }

    fn answer(&self, request: &ApiRequest) -> ApiResponse {
        let path = request.display_path();
        let mut session = self.session.lock().unwrap();
        match (request.method, path.as_str()) {
            (HttpMethod::Get, "/auth/me") => {
                return if *session {
                    ApiResponse::new(
                        200,
                        r#"{"email":"goku@capsule.corp","roles":["ROLE_USER","ROLE_ADMIN"]}"#,
                    )
                } else {
                    ApiResponse::new(401, "")
                };
            }
            (HttpMethod::Post, "/auth/login") => {
                let accepted = matches!(
                    &request.body,
                    RequestBody::Json(body) if body["password"] == PASSWORD
                );
                *session = accepted;
                return if accepted {
                    ApiResponse::new(200, "Login successful")
                } else {
                    ApiResponse::new(401, "Invalid email or password")
                };
            }
            (HttpMethod::Post, "/auth/logout") => {
                *session = false;
                return ApiResponse::new(200, "");
            }
            _ => {}
        }

        let is_public = path.starts_with("/api/public/")
            || path == "/api/register"
            || path == "/auth/forgot-password"
            || matches!(request.target, RequestTarget::Absolute(_));
        if !is_public && !*session {
            return ApiResponse::new(401, "");
        }

        match self.script.lock().unwrap().get(&(request.method, path)) {
            Some((status, body)) => ApiResponse::new(*status, body.as_bytes().to_vec()),
            None => ApiResponse::new(404, ""),
        }
    }
}

#[async_trait]
impl ApiClient for FakeBackend {
    async fn send(&self, request: ApiRequest) -> ApplicationResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let path = request.display_path();
        if self
            .unreachable
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            return Err(ApplicationError::Network(format!("could not connect to {path}")));
        }
        Ok(self.answer(&request))
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn noon(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
}

/// A started controller plus the updates it has emitted so far.
pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub controller: Controller,
    updates: mpsc::UnboundedReceiver<UiUpdate>,
}

impl Harness {
    pub async fn start(backend: Arc<FakeBackend>) -> Self {
        Self::with_config(backend, &ClientConfig::default()).await
    }

    pub async fn with_config(backend: Arc<FakeBackend>, config: &ClientConfig) -> Self {
        let (update_tx, updates) = mpsc::unbounded_channel();
        let client: Arc<dyn ApiClient> = backend.clone();
        let controller =
            Controller::start(client, Arc::new(FixedClock(noon(21))), config, update_tx).await;
        Self {
            backend,
            controller,
            updates,
        }
    }

    /// Drains every update emitted since the last call.
    pub fn drain(&mut self) -> Vec<UiUpdate> {
        let mut out = Vec::new();
        while let Ok(update) = self.updates.try_recv() {
            out.push(update);
        }
        out
    }

    pub fn route(&self) -> Option<String> {
        self.controller.route().map(zenkai_ui::Route::path)
    }
}

pub fn notifications(updates: &[UiUpdate]) -> Vec<Notification> {
    updates
        .iter()
        .filter_map(|u| match u {
            UiUpdate::Notify(n) => Some(n.clone()),
            _ => None,
        })
        .collect()
}

pub fn navigations(updates: &[UiUpdate]) -> Vec<String> {
    updates
        .iter()
        .filter_map(|u| match u {
            UiUpdate::Navigated { path } => Some(path.clone()),
            _ => None,
        })
        .collect()
}
