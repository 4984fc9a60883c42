//! Device session seam: issuing commands and prompting the operator.
//!
//! Transport is out of scope for this crate; anything that can run a
//! RouterOS command and hand back its text output implements
//! [`CommandRunner`].

pub mod commands;
pub mod replay;
pub mod workflow;

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;

pub use replay::ReplayRunner;
pub use workflow::{run_workflow, WorkflowOutcome};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no capture source for command: {command}")]
    UnknownCommand { command: String },

    #[error("no {kind} capture left to replay")]
    CaptureExhausted { kind: &'static str },
}

/// Runs a device command and returns its raw output.
pub trait CommandRunner {
    fn run(&mut self, command: &str) -> Result<String>;
}

/// The person swapping cables between test phases.
pub trait Operator {
    /// Show `message` and wait for confirmation.
    fn instruct(&mut self, message: &str) -> Result<()>;

    /// Wait for the port to settle after a cabling change.
    fn settle(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Operator prompting on stderr and confirming with Enter on stdin. Stdout is
/// left to the report.
#[derive(Debug, Default)]
pub struct ConsoleOperator;

impl Operator for ConsoleOperator {
    fn instruct(&mut self, message: &str) -> Result<()> {
        eprintln!("{message} - Enter to continue, ctrl+c to cancel");
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read operator confirmation")?;
        Ok(())
    }
}

/// Operator that confirms everything immediately and never waits.
#[derive(Debug, Default)]
pub struct UnattendedOperator;

impl Operator for UnattendedOperator {
    fn instruct(&mut self, message: &str) -> Result<()> {
        tracing::info!(message, "skipping operator prompt");
        Ok(())
    }

    fn settle(&mut self, _duration: Duration) {}
}
