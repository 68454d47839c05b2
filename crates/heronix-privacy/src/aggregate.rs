//! Aggregate report sanitization with k-anonymity thresholding

use crate::engine::{append_metadata, Sanitizer};
use heronix_core::{Capability, DeviceIdentity};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// Counts below this threshold are collapsed to a sentinel to prevent
/// re-identification from small cohorts.
const K_ANONYMITY_THRESHOLD: i64 = 5;

const SMALL_COUNT_SENTINEL: &str = "< 5";

impl Sanitizer {
    /// Sanitize an aggregate statistics report for one device.
    ///
    /// Requires `AGGREGATE_STATISTICS`; without it the output is empty.
    /// Retains only numeric scalars (floats rounded half-away-from-zero to
    /// two decimals) and reporting-period keys; integer counts below the
    /// k-anonymity threshold become the `"< 5"` sentinel.
    pub fn sanitize_aggregate(
        &self,
        report: &Map<String, Value>,
        device: &dyn DeviceIdentity,
    ) -> Map<String, Value> {
        if !device.has_permission(Capability::AggregateStatistics) {
            debug!(
                device_id = device.device_id(),
                "aggregate withheld, device lacks AGGREGATE_STATISTICS"
            );
            return Map::new();
        }

        let mut out = Map::new();
        for (key, value) in report {
            let lower = key.to_lowercase();
            if lower.contains("period") || lower.contains("range") {
                out.insert(key.clone(), value.clone());
                continue;
            }
            if let Value::Number(n) = value {
                out.insert(key.clone(), round_number(n));
            }
        }

        // k-anonymity post-pass, covering passthrough entries too
        for value in out.values_mut() {
            if let Value::Number(n) = value {
                if is_small_count(n) {
                    *value = Value::String(SMALL_COUNT_SENTINEL.to_string());
                }
            }
        }

        append_metadata(&mut out);
        out
    }
}

fn round_number(n: &Number) -> Value {
    if n.is_i64() || n.is_u64() {
        return Value::Number(n.clone());
    }
    match n.as_f64() {
        Some(f) => {
            let rounded = (f * 100.0).round() / 100.0;
            Number::from_f64(rounded).map_or(Value::Number(n.clone()), Value::Number)
        }
        None => Value::Number(n.clone()),
    }
}

// as_i64 is None for float-typed numbers, so averages are never collapsed
fn is_small_count(n: &Number) -> bool {
    n.as_i64()
        .map(|i| i < K_ANONYMITY_THRESHOLD)
        .unwrap_or(false)
}
