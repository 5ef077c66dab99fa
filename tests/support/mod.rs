// Fake backend and shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use tutor_gateway::domain::{ErrorKind, ErrorSink, GatewayError};
use tutor_gateway::interface_adapters::{BackendClient, InMemoryTokenStore, SystemClock};
use tutor_gateway::use_cases::SessionGateway;

pub const CREDENTIAL: &str = "query_id=AAHdF6IQ&user=%7B%22id%22%3A279058397%7D&hash=c501b71e";

// 2100-01-01, far enough out for any test run.
pub const FAR_FUTURE: u64 = 4_102_444_800;

pub fn token_with_exp(exp: u64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(json!({"sub": "tutor-1", "exp": exp}).to_string());
    format!("{header}.{claims}.signature")
}

// One request as seen by the fake backend.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be json")
    }
}

#[derive(Default)]
struct Script {
    replies: HashMap<(Method, String), (u16, String)>,
    log: Vec<Recorded>,
}

type SharedScript = Arc<Mutex<Script>>;

// Records every request and answers from a (method, path) script; unknown routes get 404.
#[derive(Clone)]
pub struct FakeBackend {
    pub base_url: String,
    script: SharedScript,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let script = SharedScript::default();
        let app = Router::new().fallback(handle).with_state(script.clone());

        // Bind to an ephemeral port to avoid collisions with local services.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            script,
        }
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let body = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.script
            .lock()
            .expect("script mutex poisoned")
            .replies
            .insert((method, path.to_string()), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.lock().expect("script mutex poisoned").log.clone()
    }

    // Production layout: data API under `/api`, exchange endpoint at the host root.
    pub fn client(&self) -> BackendClient {
        BackendClient::new(
            format!("{}/api", self.base_url),
            self.base_url.clone(),
            Duration::from_secs(5),
        )
        .expect("backend client")
    }
}

async fn handle(
    State(script): State<SharedScript>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let mut script = script.lock().expect("script mutex poisoned");
    script.log.push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    let (status, body) = script
        .replies
        .get(&(method, uri.path().to_string()))
        .cloned()
        .unwrap_or((404, "not found".to_string()));

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<(&'static str, ErrorKind, String)>>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<(&'static str, ErrorKind, String)> {
        self.reports.lock().expect("reports mutex poisoned").clone()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.reports().into_iter().map(|(_, kind, _)| kind).collect()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, operation: &'static str, error: &GatewayError) {
        self.reports
            .lock()
            .expect("reports mutex poisoned")
            .push((operation, error.kind(), error.to_string()));
    }
}

pub fn gateway(
    client: BackendClient,
    store: InMemoryTokenStore,
    sink: RecordingSink,
) -> Arc<SessionGateway> {
    Arc::new(SessionGateway::new(
        Arc::new(client),
        Arc::new(store),
        Arc::new(SystemClock),
        Arc::new(sink),
    ))
}
