use std::{env, path::PathBuf, time::Duration};

// Runtime settings, read from the environment (and `.env` when present).

pub const DEFAULT_API_URL: &str = "https://lessonsmy.tech/api";
pub const DEFAULT_AUTH_URL: &str = "https://lessonsmy.tech";
pub const DEFAULT_TOKEN_PATH: &str = ".tutor_session.toml";
pub const DEFAULT_TAGS_PATH: &str = "tags.txt";
pub const DEFAULT_PAGE_SIZE: u32 = 4;

pub fn api_url() -> String {
    env::var("TUTOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

pub fn auth_url() -> String {
    env::var("TUTOR_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

pub fn token_path() -> PathBuf {
    env::var("TUTOR_TOKEN_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH))
}

// Tag catalog offered when editing profile tags.
pub fn tags_path() -> PathBuf {
    env::var("TUTOR_TAGS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TAGS_PATH))
}

pub fn http_timeout() -> Duration {
    let millis = env::var("TUTOR_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10_000);
    Duration::from_millis(millis)
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub api_url: String,
    pub auth_url: String,
    pub token_path: PathBuf,
    pub tags_path: PathBuf,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_url: api_url(),
            auth_url: auth_url(),
            token_path: token_path(),
            tags_path: tags_path(),
            http_timeout: http_timeout(),
        }
    }
}
