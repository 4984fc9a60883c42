//! Port commissioning procedure: loopback wiring check, link check, then a
//! bandwidth test against the peer switch.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::commands::{bandwidth_test_command, cable_test_command};
use super::{CommandRunner, Operator};
use crate::bandwidth::{self, BandwidthTestResult};
use crate::cable::{self, CableTestReport};
use crate::config::Config;
use crate::verdict::{evaluate_bandwidth, evaluate_cable, BandwidthVerdict};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    /// Loopback cable test did not report four normal pairs.
    WiringFault {
        report: CableTestReport,
        finished_at: DateTime<Utc>,
    },
    /// Peer switch connected but the port never came up.
    NoLink {
        report: CableTestReport,
        finished_at: DateTime<Utc>,
    },
    Completed {
        cable: CableTestReport,
        bandwidth: BandwidthTestResult,
        verdict: BandwidthVerdict,
        finished_at: DateTime<Utc>,
    },
}

impl WorkflowOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, WorkflowOutcome::Completed { verdict, .. } if verdict.all_ok())
    }
}

fn cable_test(runner: &mut dyn CommandRunner, port: &str) -> Result<CableTestReport> {
    let command = cable_test_command(port)?;
    let raw = runner
        .run(&command)
        .with_context(|| format!("Failed to run cable test on {port}"))?;
    cable::parse(&raw).context("Failed to parse cable test output")
}

/// Run the full procedure. Parse and command failures abort with an error;
/// test failures end early with the matching [`WorkflowOutcome`].
pub fn run_workflow(
    runner: &mut dyn CommandRunner,
    operator: &mut dyn Operator,
    config: &Config,
) -> Result<WorkflowOutcome> {
    let port = config.device.port_to_test.as_str();
    let settle = Duration::from_secs(config.workflow.settle_secs);

    operator.instruct(&format!("Insert looped back cable in port {port}"))?;
    info!(port, "starting wiring test");
    operator.settle(settle);

    let loopback = cable_test(runner, port)?;
    let wiring = evaluate_cable(&loopback);
    if !wiring.is_normal() {
        warn!(port, ?wiring, "cable test failed, check for wiring errors");
        return Ok(WorkflowOutcome::WiringFault {
            report: loopback,
            finished_at: Utc::now(),
        });
    }
    info!(port, "wiring of cable OK");

    operator.instruct("Remove cable loop and connect the peer switch for the speed test")?;
    info!(port, "starting link check");
    operator.settle(settle);

    let linked = cable_test(runner, port)?;
    if !linked.link_established {
        warn!(port, "no link established");
        return Ok(WorkflowOutcome::NoLink {
            report: linked,
            finished_at: Utc::now(),
        });
    }
    info!(port, "link established between switches");

    let command = bandwidth_test_command(&config.bandwidth)?;
    let raw = runner
        .run(&command)
        .context("Failed to run bandwidth test")?;
    let result = bandwidth::parse(&raw).context("Failed to parse bandwidth test output")?;
    let verdict = evaluate_bandwidth(&result, &config.thresholds);
    info!(
        passed = verdict.all_ok(),
        lost_packets = result.lost_packets,
        tx_average = result.tx_average_10s,
        rx_average = result.rx_average_10s,
        "bandwidth test complete"
    );

    Ok(WorkflowOutcome::Completed {
        cable: linked,
        bandwidth: result,
        verdict,
        finished_at: Utc::now(),
    })
}
