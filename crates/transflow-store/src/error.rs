//! Error types for the ingestion path.
//!
//! None of these ever escape the dispatcher's `handle` entry point: a bad
//! topic or a bad payload is logged and the message dropped. They surface
//! as values only through `try_handle` and the parser itself.

use std::num::ParseIntError;

use transflow_types::Domain;

/// A bus topic did not match `<root>/<simulationId>/<metrics>/<domain>/<timeStep>`.
///
/// Carries the offending topic so it can be logged, a human-readable
/// reason, and the integer parse failure when the time step was the
/// culprit.
#[derive(Debug, thiserror::Error)]
#[error("unexpected structure of topic '{topic}': {reason}")]
pub struct TopicParseError {
    topic: String,
    reason: String,
    #[source]
    source: Option<ParseIntError>,
}

impl TopicParseError {
    /// Create an error for `topic` with a reason and no underlying cause.
    pub fn new(topic: &str, reason: impl Into<String>) -> Self {
        Self {
            topic: topic.to_owned(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create an error for `topic` caused by a failed time step parse.
    pub fn with_source(topic: &str, reason: impl Into<String>, source: ParseIntError) -> Self {
        Self {
            topic: topic.to_owned(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// The topic string that failed to parse.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Why the topic was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A payload could not be decoded as the snapshot kind its topic named.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not valid JSON or does not fit the snapshot shape.
    #[error("malformed {domain} payload: {source}")]
    Json {
        /// Domain the payload was routed to.
        domain: Domain,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The payload is valid JSON but not an object.
    #[error("{domain} payload is not a JSON object")]
    NotAnObject {
        /// Domain the payload was routed to.
        domain: Domain,
    },

    /// The payload decoded but carries no entity id.
    #[error("{domain} payload has no id")]
    MissingId {
        /// Domain the payload was routed to.
        domain: Domain,
    },
}

impl DecodeError {
    /// Domain the failed payload was routed to.
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Json { domain, .. } | Self::NotAnObject { domain } | Self::MissingId { domain } => {
                *domain
            }
        }
    }
}

/// Any reason a bus message was dropped.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The topic did not parse.
    #[error(transparent)]
    Topic(#[from] TopicParseError),

    /// The payload did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
