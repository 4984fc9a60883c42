//! Pass/fail judgments derived from parsed test results.

use std::fmt;

use serde::Serialize;

use crate::bandwidth::BandwidthTestResult;
use crate::cable::CableTestReport;
use crate::config::Thresholds;

/// Binary health label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOK")]
    Nok,
}

impl Verdict {
    pub fn is_ok(self) -> bool {
        self == Verdict::Ok
    }
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok {
            Verdict::Ok
        } else {
            Verdict::Nok
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Ok => "OK",
            Verdict::Nok => "NOK",
        })
    }
}

/// Wiring judgment for a cable test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CableVerdict {
    Normal,
    /// 1-based pair positions with their reported conductor type.
    Faulty { pairs: Vec<(usize, String)> },
    /// Link was up, so the device reported no pair diagnostics.
    NoPairData,
}

impl CableVerdict {
    pub fn is_normal(&self) -> bool {
        matches!(self, CableVerdict::Normal)
    }
}

pub fn evaluate_cable(report: &CableTestReport) -> CableVerdict {
    let Some(pairs) = &report.pairs else {
        return CableVerdict::NoPairData;
    };
    let faulty: Vec<(usize, String)> = pairs
        .iter()
        .enumerate()
        .filter(|(_, pair)| !pair.is_normal())
        .map(|(i, pair)| (i + 1, pair.conductor_type.clone()))
        .collect();

    if faulty.is_empty() {
        CableVerdict::Normal
    } else {
        CableVerdict::Faulty { pairs: faulty }
    }
}

/// Per-check judgments for a bandwidth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandwidthVerdict {
    pub packet_loss: Verdict,
    pub tx_average: Verdict,
    pub rx_average: Verdict,
}

impl BandwidthVerdict {
    pub fn all_ok(&self) -> bool {
        self.packet_loss.is_ok() && self.tx_average.is_ok() && self.rx_average.is_ok()
    }
}

pub fn evaluate_bandwidth(
    result: &BandwidthTestResult,
    thresholds: &Thresholds,
) -> BandwidthVerdict {
    BandwidthVerdict {
        packet_loss: thresholds.packet_loss_ok(result.lost_packets).into(),
        tx_average: thresholds.tx_average_ok(result.tx_average_10s).into(),
        rx_average: thresholds.rx_average_ok(result.rx_average_10s).into(),
    }
}
