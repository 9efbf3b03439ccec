//! Routing of bus messages into the registry.
//!
//! [`Dispatcher::handle`] is invoked once per received bus message. It
//! parses the topic, decodes the payload as the snapshot kind the topic's
//! domain names, stamps the topic's time step onto the snapshot, and
//! inserts it into the simulation's bundle. A message that fails to parse
//! or decode is logged and dropped; nothing a message contains can stop
//! the dispatcher.
//!
//! Dispatch never suspends and takes `&self`, so any number of consumer
//! tasks may call it concurrently.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use transflow_types::{Domain, Edge, Junction, Lane, Route, Vehicle, VehicleType};

use crate::bundle::StoredEntity;
use crate::decode::decode;
use crate::error::{DecodeError, IngestError};
use crate::registry::SimulationRegistry;
use crate::stats::IngestStats;
use crate::topic::{SimDataTopic, TopicLayout};

/// The outcome of a successfully stored message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// The parsed topic coordinates.
    pub topic: SimDataTopic,
    /// Identifier of the stored entity.
    pub entity_id: String,
    /// Length of the entity's series after the insert.
    pub series_len: usize,
}

/// Routes parsed bus messages to their typed decoder and store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SimulationRegistry>,
    layout: TopicLayout,
    stats: Arc<IngestStats>,
}

impl Dispatcher {
    /// Create a dispatcher using the default `sim`/`metrics` topic layout.
    pub fn new(registry: Arc<SimulationRegistry>) -> Self {
        Self::with_layout(registry, TopicLayout::default())
    }

    /// Create a dispatcher with a custom topic layout.
    pub fn with_layout(registry: Arc<SimulationRegistry>, layout: TopicLayout) -> Self {
        Self {
            registry,
            layout,
            stats: Arc::new(IngestStats::default()),
        }
    }

    /// The registry this dispatcher writes to.
    pub const fn registry(&self) -> &Arc<SimulationRegistry> {
        &self.registry
    }

    /// The topic layout this dispatcher parses against.
    pub const fn layout(&self) -> &TopicLayout {
        &self.layout
    }

    /// Shared ingestion counters.
    pub const fn stats(&self) -> &Arc<IngestStats> {
        &self.stats
    }

    /// Handle one bus message, logging and dropping it on failure.
    pub fn handle(&self, topic: &str, payload: &[u8]) {
        match self.try_handle(topic, payload) {
            Ok(ingested) => {
                debug!(
                    simulation_id = ingested.topic.simulation_id,
                    domain = %ingested.topic.domain,
                    entity_id = ingested.entity_id,
                    time_step = ingested.topic.time_step,
                    series_len = ingested.series_len,
                    "ingested snapshot"
                );
            }
            Err(IngestError::Topic(e)) => {
                warn!(topic = e.topic(), error = %e, "dropping message with unparseable topic");
            }
            Err(IngestError::Decode(e)) => {
                warn!(topic, error = %e, "dropping message with undecodable payload");
            }
        }
    }

    /// Handle one bus message, returning why it was dropped on failure.
    ///
    /// Nothing is stored, and no simulation is registered, unless both the
    /// topic and the payload are valid.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Topic`] if the topic does not parse, or
    /// [`IngestError::Decode`] if the payload does not decode.
    pub fn try_handle(&self, topic: &str, payload: &[u8]) -> Result<Ingested, IngestError> {
        let parsed = self.layout.parse(topic).inspect_err(|_| {
            self.stats.record_topic_rejected();
        })?;

        let stored = match parsed.domain {
            Domain::Vehicles => self.ingest::<Vehicle>(&parsed, payload),
            Domain::VehicleTypes => self.ingest::<VehicleType>(&parsed, payload),
            Domain::Edges => self.ingest::<Edge>(&parsed, payload),
            Domain::Lanes => self.ingest::<Lane>(&parsed, payload),
            Domain::Junctions => self.ingest::<Junction>(&parsed, payload),
            Domain::Routes => self.ingest::<Route>(&parsed, payload),
        };

        let (entity_id, series_len) = stored.inspect_err(|_| {
            self.stats.record_decode_rejected();
        })?;
        self.stats.record_stored();

        Ok(Ingested {
            topic: parsed,
            entity_id,
            series_len,
        })
    }

    /// Decode `payload` as `T`, stamp the topic's time step, and store it.
    fn ingest<T>(&self, topic: &SimDataTopic, payload: &[u8]) -> Result<(String, usize), DecodeError>
    where
        T: StoredEntity + DeserializeOwned,
    {
        let mut snapshot: T = decode(payload)?;
        snapshot.set_time_step(topic.time_step);

        let entity_id = snapshot.id().to_owned();
        let series_len = self
            .registry
            .get_or_create_bundle(&topic.simulation_id)
            .add(snapshot);

        Ok((entity_id, series_len))
    }
}
