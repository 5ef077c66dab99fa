use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use crate::domain::errors::{ErrorKind, GatewayError};
use crate::domain::ports::{Backend, Clock, ErrorSink, TokenStore};
use crate::domain::request::{ApiRequest, InitDataRequest, Method};
use crate::use_cases::session::SessionGateway;

pub(crate) const NOW: u64 = 1_700_000_000;

// Build an unsigned JWT-shaped token carrying the given claims.
pub(crate) fn token_with_claims(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{claims}.signature")
}

pub(crate) fn fresh_token() -> String {
    token_with_claims(json!({"sub": "tutor-1", "exp": NOW + 3600}))
}

pub(crate) fn expired_token() -> String {
    token_with_claims(json!({"sub": "tutor-1", "exp": 100}))
}

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

// Scripted backend reply for one (method, path) pair.
#[derive(Clone)]
pub(crate) enum Reply {
    Body(String),
    Status(u16, String),
    Unreachable,
}

impl Reply {
    pub(crate) fn json(value: Value) -> Self {
        Reply::Body(value.to_string())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SentRequest {
    pub request: ApiRequest,
    pub token: String,
}

#[derive(Default)]
struct BackendLog {
    exchanges: Vec<InitDataRequest>,
    sent: Vec<SentRequest>,
}

#[derive(Clone)]
pub(crate) struct RecordingBackend {
    log: Arc<Mutex<BackendLog>>,
    exchange_reply: Arc<Mutex<Option<String>>>,
    replies: Arc<Mutex<HashMap<(Method, String), Reply>>>,
}

impl RecordingBackend {
    // Exchange fails until a token is configured.
    pub(crate) fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(BackendLog::default())),
            exchange_reply: Arc::new(Mutex::new(None)),
            replies: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub(crate) fn with_exchange_token(self, token: impl Into<String>) -> Self {
        *self.exchange_reply.lock().expect("exchange mutex poisoned") = Some(token.into());
        self
    }

    pub(crate) fn with_reply(self, method: Method, path: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .insert((method, path.to_string()), reply);
        self
    }

    pub(crate) fn exchanges(&self) -> Vec<InitDataRequest> {
        self.log.lock().expect("log mutex poisoned").exchanges.clone()
    }

    pub(crate) fn sent(&self) -> Vec<SentRequest> {
        self.log.lock().expect("log mutex poisoned").sent.clone()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn exchange(&self, payload: &InitDataRequest) -> Result<String, GatewayError> {
        self.log
            .lock()
            .expect("log mutex poisoned")
            .exchanges
            .push(payload.clone());
        // Yield so concurrent callers can interleave at the network boundary.
        tokio::task::yield_now().await;

        self.exchange_reply
            .lock()
            .expect("exchange mutex poisoned")
            .clone()
            .ok_or_else(|| GatewayError::Exchange("status 401 Unauthorized".to_string()))
    }

    async fn send(&self, request: &ApiRequest, token: &str) -> Result<String, GatewayError> {
        self.log
            .lock()
            .expect("log mutex poisoned")
            .sent
            .push(SentRequest {
                request: request.clone(),
                token: token.to_string(),
            });

        let reply = self
            .replies
            .lock()
            .expect("replies mutex poisoned")
            .get(&(request.method, request.route()))
            .cloned()
            .unwrap_or_else(|| Reply::Status(404, "not found".to_string()));

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status, body) => Err(GatewayError::Upstream { status, body }),
            Reply::Unreachable => Err(GatewayError::Transport("connection refused".to_string())),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    token: Arc<Mutex<Option<String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn empty() -> Self {
        Self {
            token: Arc::new(Mutex::new(None)),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn holding(token: impl Into<String>) -> Self {
        let store = Self::empty();
        *store.token.lock().expect("token mutex poisoned") = Some(token.into());
        store
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn current(&self) -> Option<String> {
        self.token.lock().expect("token mutex poisoned").clone()
    }
}

#[async_trait]
impl TokenStore for RecordingStore {
    async fn get(&self) -> Result<Option<String>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        Ok(self.current())
    }

    async fn set(&self, token: String) -> Result<(), String> {
        if self.failures.set {
            return Err("set failed".to_string());
        }
        *self.token.lock().expect("token mutex poisoned") = Some(token);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    reports: Arc<Mutex<Vec<(&'static str, ErrorKind, String)>>>,
}

impl RecordingSink {
    pub(crate) fn reports(&self) -> Vec<(&'static str, ErrorKind, String)> {
        self.reports.lock().expect("reports mutex poisoned").clone()
    }

    pub(crate) fn kinds(&self) -> Vec<ErrorKind> {
        self.reports().into_iter().map(|(_, kind, _)| kind).collect()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, operation: &'static str, error: &GatewayError) {
        self.reports.lock().expect("reports mutex poisoned").push((
            operation,
            error.kind(),
            error.to_string(),
        ));
    }
}

// Everything a use-case test needs to inspect after the call.
pub(crate) struct Harness {
    pub gateway: Arc<SessionGateway>,
    pub backend: RecordingBackend,
    pub store: RecordingStore,
    pub sink: RecordingSink,
}

pub(crate) fn harness(backend: RecordingBackend, store: RecordingStore) -> Harness {
    let sink = RecordingSink::default();
    let gateway = SessionGateway::new(
        Arc::new(backend.clone()),
        Arc::new(store.clone()),
        Arc::new(FixedClock(NOW)),
        Arc::new(sink.clone()),
    );
    Harness {
        gateway: Arc::new(gateway),
        backend,
        store,
        sink,
    }
}
