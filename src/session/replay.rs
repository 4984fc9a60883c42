//! [`CommandRunner`] backed by previously captured command output.

use std::collections::VecDeque;

use anyhow::Result;
use tracing::debug;

use super::{CommandRunner, SessionError};

/// Hands out captures in the order they were queued, one queue per command
/// verb.
#[derive(Debug, Default)]
pub struct ReplayRunner {
    cable_tests: VecDeque<String>,
    bandwidth_tests: VecDeque<String>,
}

impl ReplayRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cable_test(mut self, capture: impl Into<String>) -> Self {
        self.cable_tests.push_back(capture.into());
        self
    }

    pub fn with_bandwidth_test(mut self, capture: impl Into<String>) -> Self {
        self.bandwidth_tests.push_back(capture.into());
        self
    }
}

impl CommandRunner for ReplayRunner {
    fn run(&mut self, command: &str) -> Result<String> {
        let (queue, kind) = if command.contains("cable-test") {
            (&mut self.cable_tests, "cable-test")
        } else if command.contains("bandwidth-test") {
            (&mut self.bandwidth_tests, "bandwidth-test")
        } else {
            return Err(SessionError::UnknownCommand {
                command: command.to_string(),
            }
            .into());
        };

        let capture = queue
            .pop_front()
            .ok_or(SessionError::CaptureExhausted { kind })?;
        debug!(command, bytes = capture.len(), "replaying capture");
        Ok(capture)
    }
}
