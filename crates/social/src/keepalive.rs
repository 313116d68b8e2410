use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::client::SocialClient;

/// Pings the backend right away and then on every configured interval so a
/// sleeping host stays warm. Runs until the handle is aborted.
pub fn spawn_keepalive(client: SocialClient) -> JoinHandle<()> {
    let period = client.config().keepalive_interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match client.ping().await {
                Ok(pong) => info!(timestamp = %pong.timestamp, "backend keep-alive ping"),
                Err(err) => warn!(error = %err, "backend keep-alive ping failed"),
            }
        }
    })
}
