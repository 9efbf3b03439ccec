//! Bus topic parsing.
//!
//! The simulation harness publishes every snapshot on a topic of the form
//!
//! ```text
//! <root>/<simulationId>/<metrics>/<domain>/<timeStep>
//! ```
//!
//! with `sim` and `metrics` as the default root and marker segments, for
//! example `sim/run1/metrics/vehicles/120`. The parser turns such a topic
//! into a [`SimDataTopic`]. It never returns a partial result.

use transflow_types::Domain;

use crate::error::TopicParseError;

/// Default literal prefix of every simulation data topic.
pub const DEFAULT_ROOT: &str = "sim";

/// Default literal marker between the simulation id and the domain tag.
pub const DEFAULT_METRICS: &str = "metrics";

/// Coordinates extracted from a simulation data topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimDataTopic {
    /// The simulation run the snapshot belongs to.
    pub simulation_id: String,
    /// The entity kind of the payload.
    pub domain: Domain,
    /// The simulation time the snapshot was taken at.
    pub time_step: i64,
}

/// The literal segments a simulation data topic is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLayout {
    root: String,
    metrics: String,
}

impl Default for TopicLayout {
    fn default() -> Self {
        Self {
            root: String::from(DEFAULT_ROOT),
            metrics: String::from(DEFAULT_METRICS),
        }
    }
}

impl TopicLayout {
    /// Create a layout with custom root and metrics segments.
    pub fn new(root: impl Into<String>, metrics: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            metrics: metrics.into(),
        }
    }

    /// The literal prefix segment.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The literal marker segment.
    pub fn metrics(&self) -> &str {
        &self.metrics
    }

    /// Parse a topic against this layout.
    ///
    /// The root and metrics segments must match exactly. The domain tag is
    /// matched case-insensitively with underscores ignored, and the time
    /// step must be a base-10 integer.
    ///
    /// # Errors
    ///
    /// Returns [`TopicParseError`] if the topic does not have exactly five
    /// non-empty segments, a literal segment does not match, the domain
    /// tag is unknown, or the time step is not an integer.
    pub fn parse(&self, topic: &str) -> Result<SimDataTopic, TopicParseError> {
        let segments: Vec<&str> = topic.split('/').collect();

        let [root, simulation_id, metrics, domain_tag, time] = segments.as_slice() else {
            return Err(TopicParseError::new(
                topic,
                format!("expected 5 segments, found {}", segments.len()),
            ));
        };

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(TopicParseError::new(topic, "topic contains an empty segment"));
        }

        if *root != self.root {
            return Err(TopicParseError::new(
                topic,
                format!("expected prefix '{}', found '{root}'", self.root),
            ));
        }

        if *metrics != self.metrics {
            return Err(TopicParseError::new(
                topic,
                format!("expected marker '{}', found '{metrics}'", self.metrics),
            ));
        }

        let domain = Domain::from_tag(domain_tag).ok_or_else(|| {
            TopicParseError::new(topic, format!("unrecognized domain '{domain_tag}'"))
        })?;

        let time_step = time.parse::<i64>().map_err(|e| {
            TopicParseError::with_source(topic, format!("time step '{time}' is not an integer"), e)
        })?;

        Ok(SimDataTopic {
            simulation_id: (*simulation_id).to_owned(),
            domain,
            time_step,
        })
    }

    /// Build the topic a snapshot of `domain` at `time_step` is published on.
    ///
    /// The inverse of [`TopicLayout::parse`] for the canonical domain tag.
    pub fn topic_for(&self, simulation_id: &str, domain: Domain, time_step: i64) -> String {
        format!(
            "{}/{simulation_id}/{}/{}/{time_step}",
            self.root,
            self.metrics,
            domain.as_tag()
        )
    }
}

/// Parse a topic using the default `sim`/`metrics` layout.
///
/// # Errors
///
/// See [`TopicLayout::parse`].
pub fn parse(topic: &str) -> Result<SimDataTopic, TopicParseError> {
    TopicLayout::default().parse(topic)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn parses_valid_topic() {
        let parsed = parse("sim/run1/metrics/vehicles/120").unwrap();
        assert_eq!(parsed.simulation_id, "run1");
        assert_eq!(parsed.domain, Domain::Vehicles);
        assert_eq!(parsed.time_step, 120);
    }

    #[test]
    fn domain_tag_is_case_insensitive_and_underscore_free() {
        for tag in ["vehicle_types", "VehicleTypes", "VEHICLETYPES", "vehicleTypes"] {
            let topic = format!("sim/run1/metrics/{tag}/5");
            assert_eq!(parse(&topic).unwrap().domain, Domain::VehicleTypes, "tag {tag}");
        }
    }

    #[test]
    fn accepts_negative_time_steps() {
        assert_eq!(parse("sim/run1/metrics/edges/-3").unwrap().time_step, -3);
    }

    #[test]
    fn rejects_wrong_marker() {
        let err = parse("sim/run1/bogus/vehicles/120").unwrap_err();
        assert_eq!(err.topic(), "sim/run1/bogus/vehicles/120");
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(parse("simulation/run1/metrics/vehicles/120").is_err());
    }

    #[test]
    fn rejects_unknown_domain() {
        let err = parse("sim/run1/metrics/persons/120").unwrap_err();
        assert!(err.reason().contains("persons"), "reason: {}", err.reason());
        assert!(err.source().is_none());
    }

    #[test]
    fn rejects_non_integer_time_with_cause() {
        let err = parse("sim/run1/metrics/vehicles/12.5").unwrap_err();
        assert!(err.source().is_some());
        assert_eq!(err.topic(), "sim/run1/metrics/vehicles/12.5");
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(parse("sim/run1/metrics/vehicles").is_err());
        assert!(parse("sim/run1/metrics/vehicles/120/extra").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(parse("sim//metrics/vehicles/120").is_err());
        assert!(parse("sim/run1/metrics/vehicles/").is_err());
    }

    #[test]
    fn custom_layout() {
        let layout = TopicLayout::new("transflow", "data");
        assert_eq!(layout.parse("transflow/a/data/lanes/1").unwrap().domain, Domain::Lanes);
        assert!(layout.parse("sim/a/metrics/lanes/1").is_err());
        assert_eq!(layout.root(), "transflow");
        assert_eq!(layout.metrics(), "data");
    }

    #[test]
    fn topic_for_is_parseable() {
        let layout = TopicLayout::default();
        for domain in Domain::ALL {
            let topic = layout.topic_for("run-7", domain, 99);
            assert_eq!(
                layout.parse(&topic).unwrap(),
                SimDataTopic {
                    simulation_id: String::from("run-7"),
                    domain,
                    time_step: 99,
                }
            );
        }
    }
}
