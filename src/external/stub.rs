use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;
use url::Url;

use super::transport::Transport;
use crate::errors::DashboardError;

#[derive(Debug, Clone)]
pub enum StubResponse {
    Json(Value),
    /// Body that is not valid JSON.
    Raw(String),
    Status(u16),
    Unreachable(String),
}

/// Releases one held request when dropped or released.
pub struct StubGate {
    tx: Option<oneshot::Sender<()>>,
}

impl StubGate {
    pub fn release(mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for StubGate {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

/// In-memory `Transport` with canned per-URL responses.
///
/// Unknown URLs answer `404`. `hold` makes the next request to a URL wait
/// until the returned gate is released; the response is looked up after the
/// gate opens.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, StubResponse>>,
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<()>>>>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, response: StubResponse) -> &Self {
        self.routes.lock().insert(url.to_string(), response);
        self
    }

    pub fn respond_json(&self, url: &str, body: Value) -> &Self {
        self.respond(url, StubResponse::Json(body))
    }

    pub fn hold(&self, url: &str) -> StubGate {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .entry(url.to_string())
            .or_default()
            .push_back(rx);
        StubGate { tx: Some(tx) }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == url).count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, DashboardError> {
        let key = url.as_str().to_string();
        self.calls.lock().push(key.clone());

        let gate = self.gates.lock().get_mut(&key).and_then(VecDeque::pop_front);
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        let response = self.routes.lock().get(&key).cloned();
        match response {
            Some(StubResponse::Json(body)) => Ok(body),
            Some(StubResponse::Raw(body)) => {
                serde_json::from_str(&body).map_err(|e| DashboardError::malformed(key, e))
            }
            Some(StubResponse::Status(status)) => Err(DashboardError::BadStatus { url: key, status }),
            Some(StubResponse::Unreachable(message)) => Err(DashboardError::Network { url: key, message }),
            None => Err(DashboardError::BadStatus { url: key, status: 404 }),
        }
    }
}
