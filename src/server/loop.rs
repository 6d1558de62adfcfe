// Server loop module
// Accepts connections until shutdown, then drains in-flight ones

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::Config;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Serve `listener` until `shutdown` resolves.
///
/// The listener is owned by the loop and closed as soon as shutdown is
/// requested; in-flight connections then get `performance.shutdown_grace`
/// seconds to finish before this returns.
pub async fn run<F>(listener: TcpListener, config: Arc<Config>, shutdown: F)
where
    F: Future<Output = ()>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &config, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => break,
        }
    }

    drop(listener);
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(config.performance.shutdown_grace);
    if !drain_connections(&active_connections, grace).await {
        logger::log_warning(&format!(
            "Grace period of {}s elapsed with {} connection(s) still open",
            grace.as_secs(),
            active_connections.load(Ordering::SeqCst)
        ));
    }

    logger::log_shutdown_complete();
}

/// Wait until the counter reaches zero; `false` if `grace` runs out first
async fn drain_connections(active: &AtomicUsize, grace: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + grace;

    while active.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
    true
}
