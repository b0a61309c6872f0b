use std::time::Duration;

use chrono::Utc;
use tracing::info;

use crate::config::NATION_EVICTION_INTERVAL_SECS;
use crate::state::AppState;

/// Periodically forgets nations that have not been touched within the idle TTL.
pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(Duration::from_secs(NATION_EVICTION_INTERVAL_SECS));

    loop {
        interval.tick().await;

        let evicted = state.evict_idle_nations(Utc::now());
        if evicted > 0 {
            info!(
                evicted,
                remaining = state.nations.len(),
                "evicted idle nations"
            );
        }
    }
}
