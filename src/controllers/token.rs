use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::error::Error;
use crate::token::store::{Principal, Token, TokenStore};

#[derive(Clone, Debug)]
pub(crate) struct TokenController {
    store: Arc<TokenStore>,
    clock: Arc<dyn Clock>,
}

impl TokenController {
    pub(crate) fn new(store: Arc<TokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[instrument(skip_all)]
    pub(crate) async fn issue(&self, principal: Principal) -> Result<Token, Error> {
        let token = self.store.issue(self.clock.now(), principal).await?;

        tracing::debug!(
            principal = token.principal.as_str(),
            expires_at = %token.expires_at,
            "issued token"
        );

        Ok(token)
    }

    /// Parses `id` and resolves it to the principal it was issued to.
    ///
    /// Unknown and expired identifiers are reported identically.
    #[instrument(skip_all)]
    pub(crate) async fn verify(&self, id: &str) -> Result<Principal, Error> {
        let id = Uuid::parse_str(id.trim())?;

        let token = self
            .store
            .lookup(self.clock.now(), &id)
            .await
            .ok_or(Error::InvalidOrExpiredToken)?;

        tracing::debug!(principal = token.principal.as_str(), "verified token");

        Ok(token.principal)
    }

    pub(crate) async fn sweep(&self) -> usize {
        self.store.sweep(self.clock.now()).await
    }

    pub(crate) async fn stored(&self) -> usize {
        self.store.len().await
    }
}
