use std::sync::Arc;

use axum::http::HeaderName;

use crate::controllers::token::TokenController;
use crate::core::clock::Clock;
use crate::core::error::ConfigError;
use crate::token::store::TokenStore;
use crate::utils::cors::CorsPolicy;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) token_controller: TokenController,
    pub(crate) cors: Arc<CorsPolicy>,
    pub(crate) remote_user_header: HeaderName,
}

impl AppState {
    pub(crate) fn new(
        clock: Arc<dyn Clock>,
        cors: CorsPolicy,
        remote_user_header: &str,
    ) -> Result<Self, ConfigError> {
        Ok(AppState {
            token_controller: TokenController::new(Arc::new(TokenStore::new()), clock),
            cors: Arc::new(cors),
            remote_user_header: HeaderName::try_from(remote_user_header)?,
        })
    }
}
