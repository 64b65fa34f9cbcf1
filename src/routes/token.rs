use axum::Extension;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::token::encode::encode_bearer;
use crate::token::store::Principal;

#[derive(Debug, Serialize)]
pub(crate) struct VerifiedPrincipal {
    pub(crate) principal: Principal,
}

pub(crate) async fn issue(
    State(state): State<AppState>,
    Extension(principal): Extension<Option<Principal>>,
) -> Result<String, Error> {
    let principal = principal.ok_or(Error::Unauthenticated)?;

    let token = state.token_controller.issue(principal).await?;

    encode_bearer(&token)
}

/// CORS headers for the preflight are added by the middleware.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub(crate) async fn verify(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<VerifiedPrincipal>, Error> {
    let principal = state.token_controller.verify(&body).await?;

    Ok(Json(VerifiedPrincipal { principal }))
}
