//! Parser for `/tool bandwidth-test` output.
//!
//! The device prints a `key: value` block, refreshed while the test runs, so
//! a capture may hold the block several times. Lines are matched against a
//! prefix table; the last occurrence of a key wins and unknown lines are
//! skipped.

use tracing::{debug, trace};

use super::BandwidthTestResult;
use crate::parse::{extract, ParseError};

#[derive(Clone, Copy)]
enum Setter {
    /// Trimmed text after the prefix.
    Text(fn(&mut BandwidthTestResult, String)),
    /// First signed decimal after the first `:`.
    Rate(fn(&mut BandwidthTestResult, f64)),
    /// First digit run anywhere in the line.
    Count(fn(&mut BandwidthTestResult, u64)),
}

struct Field {
    prefix: &'static str,
    setter: Setter,
}

const fn field(prefix: &'static str, setter: Setter) -> Field {
    Field { prefix, setter }
}

/// Checked in order; the first matching prefix handles the line.
static FIELDS: &[Field] = &[
    field("status:", Setter::Text(|r, v| r.status = v)),
    field("duration:", Setter::Text(|r, v| r.duration = v)),
    field("tx-current:", Setter::Rate(|r, v| r.tx_current = v)),
    field("tx-10-second-average:", Setter::Rate(|r, v| r.tx_average_10s = v)),
    field("tx-total-average:", Setter::Rate(|r, v| r.tx_average_total = v)),
    field("rx-current:", Setter::Rate(|r, v| r.rx_current = v)),
    field("rx-10-second-average:", Setter::Rate(|r, v| r.rx_average_10s = v)),
    field("rx-total-average:", Setter::Rate(|r, v| r.rx_average_total = v)),
    field("lost-packets:", Setter::Count(|r, v| r.lost_packets = v)),
    field("random-data:", Setter::Text(|r, v| r.random_data_marker = v)),
    field("direction:", Setter::Text(|r, v| r.direction = v)),
    field("tx-size:", Setter::Count(|r, v| r.tx_size_bytes = v)),
    field("rx-size:", Setter::Count(|r, v| r.rx_size_bytes = v)),
    field("connection-count:", Setter::Count(|r, v| r.connection_count = v)),
    field("local-cpu-load:", Setter::Text(|r, v| r.local_cpu_load = v)),
    field("remote-cpu-load:", Setter::Text(|r, v| r.remote_cpu_load = v)),
];

/// Parse a raw bandwidth-test capture. Stops at the first field whose value
/// cannot be read.
pub fn parse(raw: &str) -> Result<BandwidthTestResult, ParseError> {
    let mut result = BandwidthTestResult::default();
    let mut matched = 0usize;

    for line in raw.lines().map(str::trim) {
        let Some(field) = FIELDS.iter().find(|f| line.starts_with(f.prefix)) else {
            if !line.is_empty() {
                trace!(line, "ignoring unrecognized bandwidth-test line");
            }
            continue;
        };
        apply(field, line, &mut result)?;
        matched += 1;
    }

    debug!(
        matched,
        status = %result.status,
        lost_packets = result.lost_packets,
        "parsed bandwidth test"
    );
    Ok(result)
}

fn apply(
    field: &Field,
    line: &str,
    result: &mut BandwidthTestResult,
) -> Result<(), ParseError> {
    let name = field.prefix.trim_end_matches(':');
    match field.setter {
        Setter::Text(set) => {
            let value = line[field.prefix.len()..].trim().to_string();
            set(result, value);
        }
        Setter::Rate(set) => set(result, extract::decimal_after_colon(name, line)?),
        Setter::Count(set) => set(result, extract::first_integer(name, line)?),
    }
    Ok(())
}
