use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use crate::controllers::token::TokenController;

/// Periodically drops expired tokens. Lookups re-check expiry on their own,
/// so this only keeps memory bounded between issuances.
pub(crate) async fn sweep_loop(controller: TokenController, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let swept = controller.sweep().await;
        if swept > 0 {
            let remaining = controller.stored().await;
            tracing::debug!(swept, remaining, "background sweep removed expired tokens");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::mock::ManualClock;
    use crate::token::store::{Principal, TokenStore};
    use chrono::Utc;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_sweep_loop_removes_expired() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(TokenStore::new());
        let controller = TokenController::new(store.clone(), clock.clone());

        controller
            .issue(Principal::try_from("alice").unwrap())
            .await
            .unwrap();

        let handle = tokio::spawn(sweep_loop(controller, Duration::from_secs(60)));

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(store.len().await, 1);

        clock.advance(chrono::Duration::minutes(30));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.len().await, 0);

        handle.abort();
    }
}
