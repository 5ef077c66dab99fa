use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

// Claims may come padded or not, in either alphabet.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

// Freshness of the stored session token at the start of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenState {
    Missing,
    Fresh,
    Expired,
}

pub fn token_state(stored: Option<&str>, now: u64) -> TokenState {
    match stored {
        None => TokenState::Missing,
        Some(token) if is_expired(token, now) => TokenState::Expired,
        Some(_) => TokenState::Fresh,
    }
}

/// Returns true when the token's `exp` claim is at or before `now`.
///
/// A token without `exp` never expires. Anything that cannot be read as
/// `header.claims[.signature]` with base64 JSON claims counts as expired.
pub fn is_expired(token: &str, now: u64) -> bool {
    match expiry(token) {
        Ok(Some(exp)) => exp <= now as f64,
        Ok(None) => false,
        Err(reason) => {
            tracing::debug!(reason, "unreadable session token treated as expired");
            true
        }
    }
}

fn expiry(token: &str) -> Result<Option<f64>, &'static str> {
    let claims = token.split('.').nth(1).ok_or("missing claims segment")?;
    let bytes = decode_segment(claims).ok_or("claims are not base64")?;
    let claims: Value = serde_json::from_slice(&bytes).map_err(|_| "claims are not json")?;
    let claims = claims.as_object().ok_or("claims are not an object")?;

    match claims.get("exp") {
        None | Some(Value::Null) => Ok(None),
        Some(exp) => exp.as_f64().map(Some).ok_or("exp is not numeric"),
    }
}

// JWTs use the URL-safe alphabet; some issuers emit the standard one.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(segment)
        .or_else(|_| STANDARD_LENIENT.decode(segment))
        .ok()
}
