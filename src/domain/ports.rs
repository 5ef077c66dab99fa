use async_trait::async_trait;

use crate::domain::errors::GatewayError;
use crate::domain::request::{ApiRequest, InitDataRequest};

// Port for the single persisted session token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self) -> Result<Option<String>, String>;
    async fn set(&self, token: String) -> Result<(), String>;
}

// Port for the remote backend. The gateway depends on this trait, not on reqwest.
#[async_trait]
pub trait Backend: Send + Sync {
    // Trade platform init data for a fresh session token.
    async fn exchange(&self, payload: &InitDataRequest) -> Result<String, GatewayError>;

    // Send an authenticated request and return the raw success body.
    // Non-success statuses come back as `GatewayError::Upstream`.
    async fn send(&self, request: &ApiRequest, token: &str) -> Result<String, GatewayError>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}

// Side channel for failures that the screen operations collapse into sentinels.
pub trait ErrorSink: Send + Sync {
    fn report(&self, operation: &'static str, error: &GatewayError);
}
