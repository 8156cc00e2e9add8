//! Hand-written port doubles shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use zenkai_domain::{ApiRequest, ApiResponse, HttpMethod, Notification};

use crate::ports::{ApiClient, Clock, Navigator, Notifier};
use crate::{ApplicationError, ApplicationResult};

type Reply = Result<ApiResponse, String>;

/// Answers requests from a route table and records every request.
///
/// Each route holds a queue of replies; the last reply repeats once the
/// queue is down to one. Unknown routes answer 404.
#[derive(Default)]
pub struct ScriptedApi {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, Ok(ApiResponse::new(status, body.as_bytes().to_vec())));
        self
    }

    pub fn on_json(self, method: HttpMethod, path: &str, body: &serde_json::Value) -> Self {
        self.on(method, path, 200, &body.to_string())
    }

    pub fn fail(self, method: HttpMethod, path: &str, message: &str) -> Self {
        self.push(method, path, Err(message.to_string()));
        self
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
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
}

#[async_trait]
impl ApiClient for ScriptedApi {
    async fn send(&self, request: ApiRequest) -> ApplicationResult<ApiResponse> {
        let key = (request.method, request.display_path());
        self.requests.lock().unwrap().push(request);
        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApplicationError::Network(message)),
            None => Ok(ApiResponse::new(404, Vec::new())),
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        Self(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
