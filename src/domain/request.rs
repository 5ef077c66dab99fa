use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::GatewayError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

// Transport-independent description of one authenticated backend call.
// Paths are relative to the API base URL. `segment` is a caller-supplied id
// appended after `path`; the transport percent-encodes it.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub segment: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segment: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn segment(mut self, id: impl Into<String>) -> Self {
        self.segment = Some(id.into());
        self
    }

    // Unencoded route, used for logs and lookups.
    pub fn route(&self) -> String {
        match &self.segment {
            Some(id) => format!("{}/{id}", self.path),
            None => self.path.clone(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, GatewayError> {
        let body =
            serde_json::to_value(body).map_err(|err| GatewayError::InvalidInput(err.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    // Encoded query in insertion order, empty when there are no parameters.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

/// Checks an id that becomes a single path segment.
///
/// Blank ids and the dot segments `.` and `..` cannot name a resource.
pub fn path_id(id: &str) -> Result<&str, GatewayError> {
    match id.trim() {
        "" | "." | ".." => Err(GatewayError::InvalidInput(format!("invalid id {id:?}"))),
        _ => Ok(id),
    }
}

// The serialization within this layer is a dependency leak, but it keeps the
// exchange payload next to the port that sends it.
// Payload sent to the exchange endpoint to trade platform init data for a token.
#[derive(Clone, Debug, Serialize)]
pub struct InitDataRequest {
    #[serde(rename = "initData")]
    pub init_data: String,
    pub role: String,
}
