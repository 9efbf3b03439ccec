//! Payload decoding.
//!
//! Payloads are JSON objects whose field names may arrive in any casing
//! (`vehicleTypeId`, `VehicleTypeId`, `CO2mgPerSecond`). Before handing a
//! payload to serde, every object key at every nesting level is rewritten
//! to the canonical `camelCase` spelling used by the snapshot structs.
//! Keys that match no known field are left alone and ignored by serde.
//!
//! Publishers serialize unset fields as explicit `null`, including list
//! fields and individual list elements. A `null` field is treated as
//! absent and takes its default; `null` list elements are dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use transflow_types::{
    Edge, Junction, Lane, Link, Position, Route, TimeSeriesEntity, Vehicle, VehicleType,
};

use crate::error::DecodeError;

/// Lowercased field name to canonical field name, across every snapshot
/// shape including nested ones.
static CANONICAL_KEYS: LazyLock<HashMap<String, String>> = LazyLock::new(build_canonical_keys);

/// Collect the field names of a default-valued shape.
fn field_names<T: Serialize + Default>() -> Vec<String> {
    match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map.into_iter().map(|(key, _)| key).collect(),
        _ => Vec::new(),
    }
}

fn build_canonical_keys() -> HashMap<String, String> {
    [
        field_names::<Vehicle>(),
        field_names::<VehicleType>(),
        field_names::<Edge>(),
        field_names::<Lane>(),
        field_names::<Link>(),
        field_names::<Junction>(),
        field_names::<Route>(),
        field_names::<Position>(),
    ]
    .into_iter()
    .flatten()
    .map(|key| (key.to_ascii_lowercase(), key))
    .collect()
}

/// Rewrite every object key below `value` to its canonical spelling,
/// dropping `null` fields and `null` list elements on the way.
fn canonicalize_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let entries = std::mem::take(map);
            let mut canonical = Map::with_capacity(entries.len());
            for (key, mut nested) in entries {
                if nested.is_null() {
                    continue;
                }
                canonicalize_keys(&mut nested);
                let key = CANONICAL_KEYS
                    .get(&key.to_ascii_lowercase())
                    .cloned()
                    .unwrap_or(key);
                canonical.insert(key, nested);
            }
            *map = canonical;
        }
        Value::Array(items) => {
            items.retain(|item| !item.is_null());
            items.iter_mut().for_each(canonicalize_keys);
        }
        _ => {}
    }
}

/// Decode a JSON payload into snapshot kind `T`.
///
/// Field names match case-insensitively, unknown fields are ignored and
/// missing or `null` fields take their defaults. The payload's own time
/// step is discarded, whatever its JSON type: the topic carries the
/// authoritative one and the dispatcher stamps it.
///
/// # Errors
///
/// Returns [`DecodeError`] if the payload is not a JSON object, does not
/// fit the shape of `T`, or has no `id`.
pub fn decode<T>(payload: &[u8]) -> Result<T, DecodeError>
where
    T: TimeSeriesEntity + DeserializeOwned,
{
    let domain = T::DOMAIN;
    let mut value: Value =
        serde_json::from_slice(payload).map_err(|source| DecodeError::Json { domain, source })?;

    if !value.is_object() {
        return Err(DecodeError::NotAnObject { domain });
    }

    canonicalize_keys(&mut value);
    if let Value::Object(map) = &mut value {
        map.remove("timeStep");
    }

    let snapshot: T =
        serde_json::from_value(value).map_err(|source| DecodeError::Json { domain, source })?;

    if snapshot.id().is_empty() {
        return Err(DecodeError::MissingId { domain });
    }

    Ok(snapshot)
}
