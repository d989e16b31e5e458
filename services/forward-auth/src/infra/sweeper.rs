use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::infra::store::MemoryStore;

/// Periodically purge expired codes and sessions from `store`.
///
/// The first sweep runs one full `every` after spawning. A zero interval is
/// bumped to one second.
pub fn spawn_sweeper(store: MemoryStore, every: Duration) -> JoinHandle<()> {
    let every = every.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let report = store.sweep_expired();
            if report.codes > 0 || report.sessions > 0 {
                debug!(
                    codes = report.codes,
                    sessions = report.sessions,
                    "swept expired entries"
                );
            }
        }
    })
}
