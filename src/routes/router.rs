use crate::core::state::AppState;
use crate::routes::token;
use crate::utils;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info_span;

pub(crate) fn routes(state: AppState) -> Router {
    // /token
    let token_router = Router::new()
        .route("/token", get(token::issue).options(token::preflight))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    utils::cors::cors,
                ))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    utils::auth::authenticate,
                )),
        );

    Router::new()
        .merge(token_router)
        .route("/verify", post(token::verify))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                info_span!(
                    "request",
                    method = ?request.method(),
                    matched_path,
                )
            }),
        )
}
