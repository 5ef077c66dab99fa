use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Body returned by the exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// Body returned after a response is created; the id is a string or a number
// depending on the backend revision.
#[derive(Debug, Deserialize)]
pub struct ResponseCreated {
    #[serde(deserialize_with = "string_or_number")]
    pub response_id: String,
}

#[derive(Debug, Serialize)]
pub struct GreetingsBody<'a> {
    pub greetings: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MarkRespondedBody {
    pub is_responded: bool,
}

#[derive(Debug, Serialize)]
pub struct NameBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BioBody<'a> {
    pub bio: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TagsBody<'a> {
    pub tags: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct ActiveBody {
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct ReviewActivationBody<'a> {
    pub review_id: &'a str,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number response_id, got {other}"
        ))),
    }
}
