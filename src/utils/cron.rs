use actix_web::web::Data;
use std::time::Duration;
use tracing::info;

use crate::fetcher::SessionStore;

/// Periodically discards sessions nobody has looked at for `max_idle`.
pub async fn start_session_sweeper(store: Data<SessionStore>, max_idle: Duration, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let evicted = store.evict_idle(max_idle).await;
        if evicted > 0 {
            info!(evicted, "idle dashboard sessions discarded");
        }
    }
}
