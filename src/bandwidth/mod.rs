//! Bandwidth test results: throughput in both directions, loss and load.

pub mod parser;
pub mod report;

pub use parser::parse;

use serde::Serialize;

use crate::config::Thresholds;

/// Parsed `/tool bandwidth-test` output. Fields missing from the capture
/// keep their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandwidthTestResult {
    pub status: String,
    pub duration: String,
    /// Rates in Mbit/s as printed by the device.
    pub tx_current: f64,
    pub tx_average_10s: f64,
    pub tx_average_total: f64,
    pub rx_current: f64,
    pub rx_average_10s: f64,
    pub rx_average_total: f64,
    pub lost_packets: u64,
    pub random_data_marker: String,
    pub direction: String,
    pub tx_size_bytes: u64,
    pub rx_size_bytes: u64,
    pub connection_count: u64,
    pub local_cpu_load: String,
    pub remote_cpu_load: String,
}

impl BandwidthTestResult {
    pub fn packet_loss_ok(&self) -> bool {
        Thresholds::default().packet_loss_ok(self.lost_packets)
    }

    pub fn tx_average_ok(&self) -> bool {
        Thresholds::default().tx_average_ok(self.tx_average_10s)
    }

    pub fn rx_average_ok(&self) -> bool {
        Thresholds::default().rx_average_ok(self.rx_average_10s)
    }
}
