//! NATS integration: connection, subscriptions and consumer tasks.
//!
//! Publishers emit slash-separated topics such as
//! `sim/run1/metrics/vehicles/120`. NATS treats `/` as an ordinary subject
//! character, so each published topic arrives as a single-token subject and
//! is handed to the dispatcher verbatim. The default `>` subscription
//! therefore receives every topic; narrower patterns can be configured.

use async_nats::Subscriber;
use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use transflow_store::Dispatcher;

use crate::error::AnalyzerError;

/// NATS client wrapper for the analyzer.
pub struct BusClient {
    client: async_nats::Client,
}

impl BusClient {
    /// Connect to a NATS server, announcing `client_id` as the client name.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Nats`] if the connection cannot be established.
    pub async fn connect(url: &str, client_id: &str) -> Result<Self, AnalyzerError> {
        info!(url, client_id, "connecting to NATS server");
        let client = async_nats::ConnectOptions::new()
            .name(client_id)
            .connect(url)
            .await
            .map_err(|e| AnalyzerError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Subscribe to one subject pattern.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Nats`] if the subscription fails.
    pub async fn subscribe(&self, pattern: &str) -> Result<Subscriber, AnalyzerError> {
        debug!(pattern, "subscribing");
        let subscriber = self
            .client
            .subscribe(pattern.to_owned())
            .await
            .map_err(|e| AnalyzerError::Nats(format!("failed to subscribe to {pattern}: {e}")))?;
        info!(pattern, "subscribed");
        Ok(subscriber)
    }
}

impl std::fmt::Debug for BusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusClient")
            .field("state", &self.client.connection_state())
            .finish()
    }
}

/// Feed every message of `subscriber` into `dispatcher` until shutdown.
///
/// Returns when `shutdown` changes (or its sender is dropped) or when the
/// subscription ends. Dispatch is synchronous, so a message that has been
/// received is always fully stored before the loop checks for shutdown.
pub async fn consume(
    mut subscriber: Subscriber,
    pattern: String,
    dispatcher: Dispatcher,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(pattern, "consumer started");
    let mut received: u64 = 0;

    loop {
        tokio::select! {
            message = subscriber.next() => {
                let Some(message) = message else {
                    warn!(pattern, "subscription closed by server");
                    break;
                };
                received = received.saturating_add(1);
                dispatcher.handle(message.subject.as_str(), &message.payload);
            }
            _ = shutdown.changed() => {
                break;
            }
        }
    }

    info!(pattern, received, "consumer stopped");
}
