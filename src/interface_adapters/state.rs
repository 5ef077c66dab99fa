use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::{Clock, ErrorSink, GatewayError, TokenStore};
use crate::use_cases::{
    LoginUseCase, OrdersUseCase, ProfileUseCase, ResponsesUseCase, SessionGateway,
};

// Screen operations sharing one session gateway.
#[derive(Clone)]
pub struct AppState {
    pub login: Arc<LoginUseCase>,
    pub orders: Arc<OrdersUseCase>,
    pub responses: Arc<ResponsesUseCase>,
    pub profile: Arc<ProfileUseCase>,
}

impl AppState {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self {
            login: Arc::new(LoginUseCase {
                gateway: gateway.clone(),
            }),
            orders: Arc::new(OrdersUseCase {
                gateway: gateway.clone(),
            }),
            responses: Arc::new(ResponsesUseCase {
                gateway: gateway.clone(),
            }),
            profile: Arc::new(ProfileUseCase { gateway }),
        }
    }
}

// In-memory token store; nothing survives the process.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    pub token: Arc<Mutex<Option<String>>>,
}

impl InMemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self) -> Result<Option<String>, String> {
        Ok(self.token.lock().await.clone())
    }

    async fn set(&self, token: String) -> Result<(), String> {
        *self.token.lock().await = Some(token);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

// Token persisted as a one-key TOML file. A missing file means no token.
// Writes go to a sibling temp file that is renamed over the target, so readers
// see either the old token or the new one.
#[derive(Clone)]
pub struct FileTokenStore {
    pub path: PathBuf,
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // Unique per process and write, in the target's directory so the rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_string());
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
    }
}

async fn write_synced(path: &Path, raw: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(raw.as_bytes()).await?;
    file.sync_all().await
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Result<Option<String>, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("read {}: {err}", self.path.display())),
        };
        let file: TokenFile =
            toml::from_str(&raw).map_err(|err| format!("parse {}: {err}", self.path.display()))?;
        Ok(file.token.filter(|token| !token.is_empty()))
    }

    async fn set(&self, token: String) -> Result<(), String> {
        let raw = toml::to_string(&TokenFile { token: Some(token) })
            .map_err(|err| format!("encode token file: {err}"))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| format!("create {}: {err}", parent.display()))?;
        }

        let tmp_path = self.temp_path();
        if let Err(err) = write_synced(&tmp_path, &raw).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(format!("write {}: {err}", tmp_path.display()));
        }
        if let Err(err) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(format!("replace {}: {err}", self.path.display()));
        }
        Ok(())
    }
}

// System clock adapter used by the session gateway.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

// Default error side channel: structured warning per collapsed failure.
#[derive(Clone)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, operation: &'static str, error: &GatewayError) {
        tracing::warn!(operation, kind = ?error.kind(), error = %error, "backend call failed");
    }
}
