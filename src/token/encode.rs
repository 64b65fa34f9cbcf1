use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use serde::Serialize;

use crate::core::error::Error;
use crate::token::store::Token;

/// Advisory metadata appended to the bearer string. Clients may read it,
/// the store never does.
#[derive(Serialize)]
struct Metadata {
    exp: i64,
}

/// Renders `<uuid>.<base64url({"exp":<epoch seconds>})>`.
pub(crate) fn encode_bearer(token: &Token) -> Result<String, Error> {
    let metadata = serde_json::to_vec(&Metadata {
        exp: token.expires_at.timestamp(),
    })?;

    Ok(format!(
        "{}.{}",
        token.id.hyphenated(),
        URL_SAFE.encode(metadata)
    ))
}
