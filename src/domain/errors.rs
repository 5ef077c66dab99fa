use thiserror::Error;

// Failure categories reported through the error side channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    ExchangeFailure,
    RequestFailure,
    DecodeFailure,
    Storage,
}

// Gateway-level errors. Callers of the screen operations only ever see sentinels;
// these reach the ErrorSink and the structured `request` path.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no session token stored")]
    MissingToken,
    #[error("platform credential is empty")]
    MissingCredential,
    #[error("token exchange failed: {0}")]
    Exchange(String),
    #[error("request transport error: {0}")]
    Transport(String),
    #[error("backend returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("response decode error: {0}")]
    Decode(String),
    #[error("token store error: {0}")]
    Storage(String),
    #[error("invalid request: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::MissingToken | GatewayError::MissingCredential => {
                ErrorKind::MissingCredential
            }
            GatewayError::Exchange(_) => ErrorKind::ExchangeFailure,
            GatewayError::Transport(_)
            | GatewayError::Upstream { .. }
            | GatewayError::InvalidInput(_) => ErrorKind::RequestFailure,
            GatewayError::Decode(_) => ErrorKind::DecodeFailure,
            GatewayError::Storage(_) => ErrorKind::Storage,
        }
    }
}
