use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Error;

/// Lifetime of every issued token.
pub(crate) const TOKEN_TTL_MINUTES: i64 = 30;

/// Identity of an authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub(crate) struct Principal(String);

impl Principal {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Principal {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::Unauthenticated);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Principal {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Principal::try_from(value.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub(crate) id: Uuid,
    pub(crate) expires_at: DateTime<Utc>,
    pub(crate) principal: Principal,
}

impl Token {
    fn new(issued_at: DateTime<Utc>, principal: Principal) -> Self {
        Self {
            id: Uuid::new_v4(),
            expires_at: issued_at + Duration::minutes(TOKEN_TTL_MINUTES),
            principal,
        }
    }

    /// Expiry is exclusive: a token is dead at exactly `expires_at`.
    pub(crate) fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory custody of live tokens, shared by every request for the
/// lifetime of the process.
///
/// Expiry is always re-checked on [`TokenStore::lookup`], so sweeping is only
/// there to bound memory.
#[derive(Debug, Default)]
pub(crate) struct TokenStore {
    tokens: RwLock<HashMap<Uuid, Token>>,
}

impl TokenStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sweeps expired tokens, then issues a fresh one for `principal`.
    pub(crate) async fn issue(
        &self,
        now: DateTime<Utc>,
        principal: Principal,
    ) -> Result<Token, Error> {
        let mut tokens = self.tokens.write().await;

        let swept = remove_expired(&mut tokens, now);
        if swept > 0 {
            tracing::debug!(swept, "removed expired tokens");
        }

        let token = Token::new(now, principal);

        match tokens.entry(token.id) {
            Entry::Occupied(_) => {
                tracing::error!(id = %token.id, "generated identifier is already live");
                Err(Error::IdentifierCollision)
            }
            Entry::Vacant(entry) => {
                entry.insert(token.clone());
                Ok(token)
            }
        }
    }

    /// Returns the token only if it exists and has not expired at `now`.
    pub(crate) async fn lookup(&self, now: DateTime<Utc>, id: &Uuid) -> Option<Token> {
        self.tokens
            .read()
            .await
            .get(id)
            .filter(|token| token.is_valid(now))
            .cloned()
    }

    /// Removes every token expired at `now`, returning how many were dropped.
    pub(crate) async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut tokens = self.tokens.write().await;
        remove_expired(&mut tokens, now)
    }

    /// Number of stored tokens, including expired ones not yet swept.
    pub(crate) async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

fn remove_expired(tokens: &mut HashMap<Uuid, Token>, now: DateTime<Utc>) -> usize {
    let before = tokens.len();
    tokens.retain(|_, token| token.is_valid(now));
    before - tokens.len()
}
