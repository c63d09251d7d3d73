use crate::types::{KillRecord, RelayError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

/// Timestamp format used by the feed for kill times.
pub const KILL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decode a raw feed body into kill records.
///
/// The envelope must be a JSON array of objects; anything else fails the
/// whole batch. Individual elements that are missing required fields are
/// dropped with a warning and do not fail the batch. The feed is loosely
/// typed, so field extraction is deliberately permissive.
pub fn decode_batch(body: &str) -> Result<Vec<KillRecord>> {
    let elements: Vec<Map<String, Value>> =
        serde_json::from_str(body).map_err(|e| RelayError::Decode(e.to_string()))?;

    let mut records = Vec::with_capacity(elements.len());
    for element in &elements {
        match decode_one(element) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("skipping malformed kill record: {} data={:?}", e, element);
            }
        }
    }

    Ok(records)
}

/// Decode a single feed element.
///
/// `killID` and `killTime` are required; `solarSystemID` and the nested
/// `zkb.totalValue` degrade to defaults when missing or malformed.
fn decode_one(element: &Map<String, Value>) -> Result<KillRecord> {
    let kill_id = element
        .get("killID")
        .ok_or_else(|| RelayError::Decode("missing killID".to_string()))
        .and_then(|v| {
            scalar_to_string(v)
                .ok_or_else(|| RelayError::Decode(format!("unconvertible killID: {v}")))
        })?;

    let kill_time = element
        .get("killTime")
        .ok_or_else(|| RelayError::Decode("missing killTime".to_string()))
        .and_then(|v| {
            scalar_to_string(v)
                .ok_or_else(|| RelayError::Decode(format!("unconvertible killTime: {v}")))
        })
        .and_then(|s| parse_kill_time(&s))?;

    let system_id = element.get("solarSystemID").and_then(scalar_to_string);

    let value = decode_value(element, &kill_id);

    Ok(KillRecord {
        kill_id,
        kill_time,
        system_id,
        value,
    })
}

fn parse_kill_time(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, KILL_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| RelayError::Decode(format!("unparsable killTime: {raw}")))
}

/// Extract the kill value from the nested `zkb` metadata object.
///
/// The sub-object is frequently absent and its `totalValue` arrives either
/// as a native number or as a numeric string; every failure mode defaults
/// to 0.0 without failing the record.
fn decode_value(element: &Map<String, Value>, kill_id: &str) -> f64 {
    let Some(meta) = element.get("zkb").and_then(Value::as_object) else {
        return 0.0;
    };
    match meta.get("totalValue") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse::<f64>().unwrap_or_else(|_| {
            warn!("unparsable totalValue for kill {}: {:?}", kill_id, s);
            0.0
        }),
        Some(other) => {
            warn!("unexpected totalValue type for kill {}: {:?}", kill_id, other);
            0.0
        }
        None => 0.0,
    }
}

/// Convert a loosely-typed scalar into its string form.
///
/// The feed serves identifiers as strings, integers, or floats depending on
/// the day; floats are truncated to their integer part (not rounded) before
/// formatting. Any other shape is rejected.
pub fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| (f.trunc() as i64).to_string())
            }
        }
        _ => None,
    }
}
