//! Human-readable summaries of parsed results.

use super::BandwidthTestResult;
use crate::cable::CableTestReport;
use crate::config::Thresholds;
use crate::verdict::{evaluate_bandwidth, evaluate_cable, CableVerdict};

/// Render the bandwidth checks with the default thresholds.
pub fn render(result: &BandwidthTestResult) -> String {
    render_with(result, &Thresholds::default())
}

/// One line per check: packet loss, TX average, RX average.
pub fn render_with(result: &BandwidthTestResult, thresholds: &Thresholds) -> String {
    let verdict = evaluate_bandwidth(result, thresholds);
    format!(
        "Packet loss {} {}\nTX-Average {} {}\nRX-Average {} {}\n",
        verdict.packet_loss,
        result.lost_packets,
        verdict.tx_average,
        result.tx_average_10s,
        verdict.rx_average,
        result.rx_average_10s,
    )
}

pub fn render_cable(report: &CableTestReport) -> String {
    let link = if report.link_established {
        "established"
    } else {
        "none"
    };
    let mut summary = format!("Link {link}\n");

    if let Some(pairs) = &report.pairs {
        for (i, pair) in pairs.iter().enumerate() {
            summary.push_str(&format!(
                "pair{} {} {}m\n",
                i + 1,
                pair.conductor_type,
                pair.length_meters
            ));
        }
    }

    let wiring = match evaluate_cable(report) {
        CableVerdict::Normal => "Wiring OK".to_string(),
        CableVerdict::Faulty { pairs } => {
            let list: Vec<String> = pairs
                .iter()
                .map(|(n, kind)| format!("pair{n}={kind}"))
                .collect();
            format!("Wiring NOK ({})", list.join(", "))
        }
        CableVerdict::NoPairData => "Wiring not measured (link up)".to_string(),
    };
    summary.push_str(&wiring);
    summary.push('\n');
    summary
}
