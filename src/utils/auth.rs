use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::core::state::AppState;
use crate::token::store::Principal;

/// Reads the remote user injected by the fronting SSO proxy and stores it as
/// an `Option<Principal>` request extension.
pub(crate) async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = remote_user(request.headers(), &state);

    request.extensions_mut().insert(principal);

    next.run(request).await
}

fn remote_user(headers: &HeaderMap, state: &AppState) -> Option<Principal> {
    let value = headers.get(&state.remote_user_header)?.to_str().ok()?;

    Principal::try_from(value.trim()).ok()
}
