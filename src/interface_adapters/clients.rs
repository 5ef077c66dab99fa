use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::domain::{ApiRequest, Backend, GatewayError, InitDataRequest, Method};
use crate::interface_adapters::protocol::TokenResponse;

// The clients defined here are for reqwest clients to communicate with the backend.
// Thin wrapper around reqwest for the exchange endpoint and the data API.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    pub api_base_url: String,
    pub auth_base_url: String,
}

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid base url {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

impl BackendClient {
    pub fn new(
        api_base_url: impl Into<String>,
        auth_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientBuildError> {
        let api_base_url = normalize_base(api_base_url.into())?;
        let auth_base_url = normalize_base(auth_base_url.into())?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base_url,
            auth_base_url,
        })
    }

    // Paths are appended to the base, so a base with a path prefix like `/api` keeps it.
    // The id segment is pushed separately so `/`, `?` and `#` inside it stay escaped.
    fn endpoint(&self, request: &ApiRequest) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&format!("{}{}", self.api_base_url, request.path))
            .map_err(|err| GatewayError::InvalidInput(format!("bad request path: {err}")))?;
        if let Some(id) = &request.segment {
            url.path_segments_mut()
                .map_err(|_| GatewayError::InvalidInput("api base cannot take a path".to_string()))?
                .push(id);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

fn normalize_base(url: String) -> Result<String, ClientBuildError> {
    let trimmed = url.trim_end_matches('/').to_string();
    Url::parse(&trimmed).map_err(|source| ClientBuildError::InvalidUrl { url, source })?;
    Ok(trimmed)
}

#[async_trait]
impl Backend for BackendClient {
    async fn exchange(&self, payload: &InitDataRequest) -> Result<String, GatewayError> {
        // The exchange endpoint lives on the auth host, outside the data API prefix.
        let url = format!("{}/auth/init-data", self.auth_base_url);
        let res = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| GatewayError::Exchange(format!("transport: {err}")))?;
        let status = res.status();

        // Only a plain 200 carries a token.
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(GatewayError::Exchange(format!("status {status}: {body}")));
        }

        let data = res
            .json::<TokenResponse>()
            .await
            .map_err(|err| GatewayError::Exchange(format!("decode: {err}")))?;
        if data.token.is_empty() {
            return Err(GatewayError::Exchange("empty token in response".to_string()));
        }
        Ok(data.token)
    }

    async fn send(&self, request: &ApiRequest, token: &str) -> Result<String, GatewayError> {
        let url = self.endpoint(request)?;
        let builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
        }
        .header(AUTHORIZATION, token);

        // `json` also sets `Content-Type: application/json`.
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let res = builder
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
