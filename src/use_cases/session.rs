use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::domain::errors::GatewayError;
use crate::domain::ports::{Backend, Clock, ErrorSink, TokenStore};
use crate::domain::request::{ApiRequest, InitDataRequest};
use crate::use_cases::token::{TokenState, token_state};

// Role selector sent with every credential exchange.
pub const TUTOR_ROLE: &str = "Tutor";

/// Owns the session token and wraps every backend call with the refresh policy.
///
/// Every call either carries a non-expired token or never reaches the network.
/// An expired token is exchanged at most once per call; concurrent callers that
/// hit the same expired token share one exchange.
pub struct SessionGateway {
    backend: Arc<dyn Backend>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    errors: Arc<dyn ErrorSink>,
    refresh_lock: Mutex<()>,
}

impl SessionGateway {
    pub fn new(
        backend: Arc<dyn Backend>,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            backend,
            store,
            clock,
            errors,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a usable token, refreshing an expired one with the platform credential.
    /// `None` means the caller has to go through login again.
    pub async fn ensure_fresh_token(&self, platform_credential: &str) -> Option<String> {
        match self.fresh_token(platform_credential).await {
            Ok(token) => Some(token),
            Err(error) => {
                self.report("ensure_fresh_token", &error);
                None
            }
        }
    }

    /// Trade the platform credential for a new token and store it.
    pub async fn exchange(&self, platform_credential: &str) -> Result<String, GatewayError> {
        if platform_credential.trim().is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        let payload = InitDataRequest {
            init_data: platform_credential.to_string(),
            role: TUTOR_ROLE.to_string(),
        };
        let token = self.backend.exchange(&payload).await?;

        self.store
            .set(token.clone())
            .await
            .map_err(GatewayError::Storage)?;
        tracing::info!("session token refreshed");

        Ok(token)
    }

    /// Authenticated request without sentinel collapsing; returns the raw success body.
    pub async fn request(
        &self,
        platform_credential: &str,
        request: &ApiRequest,
    ) -> Result<String, GatewayError> {
        if platform_credential.trim().is_empty() {
            return Err(GatewayError::MissingCredential);
        }
        let token = self.fresh_token(platform_credential).await?;

        tracing::debug!(method = ?request.method, route = %request.route(), "sending backend request");
        self.backend.send(request, &token).await
    }

    /// Run `request` and decode its body; any failure yields `sentinel` and is
    /// reported under `operation`.
    pub async fn call<T, F>(
        &self,
        operation: &'static str,
        platform_credential: &str,
        request: ApiRequest,
        sentinel: T,
        decode: F,
    ) -> T
    where
        F: FnOnce(&str) -> Result<T, GatewayError>,
    {
        match self
            .request(platform_credential, &request)
            .await
            .and_then(|body| decode(&body))
        {
            Ok(value) => value,
            Err(error) => {
                self.report(operation, &error);
                sentinel
            }
        }
    }

    pub fn report(&self, operation: &'static str, error: &GatewayError) {
        self.errors.report(operation, error);
    }

    async fn fresh_token(&self, platform_credential: &str) -> Result<String, GatewayError> {
        let stored = self.load().await?;
        match token_state(stored.as_deref(), self.clock.now_epoch_seconds()) {
            TokenState::Missing => return Err(GatewayError::MissingToken),
            TokenState::Fresh => return stored.ok_or(GatewayError::MissingToken),
            TokenState::Expired => {}
        }

        let _refresh = self.refresh_lock.lock().await;

        // Another caller may have refreshed while this one waited for the lock.
        let current = self.load().await?;
        match token_state(current.as_deref(), self.clock.now_epoch_seconds()) {
            TokenState::Missing => Err(GatewayError::MissingToken),
            TokenState::Fresh => current.ok_or(GatewayError::MissingToken),
            TokenState::Expired => {
                tracing::info!("session token expired, exchanging platform credential");
                self.exchange(platform_credential).await
            }
        }
    }

    async fn load(&self) -> Result<Option<String>, GatewayError> {
        self.store.get().await.map_err(GatewayError::Storage)
    }
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|err| GatewayError::Decode(err.to_string()))
}
