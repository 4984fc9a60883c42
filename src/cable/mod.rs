//! Cable diagnostics: link state plus per-pair conductor readings.

pub mod parser;

pub use parser::parse;

use serde::Serialize;

/// Conductor type the device reports for a healthy pair.
pub const NORMAL_CONDUCTOR: &str = "normal";

/// One of the four twisted pairs inside the cable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WirePair {
    /// Free-form category from the device, e.g. `normal`, `open`, `short`.
    pub conductor_type: String,
    /// Estimated distance to the fault (or cable length) in meters.
    pub length_meters: u32,
}

impl WirePair {
    pub fn new(conductor_type: impl Into<String>, length_meters: u32) -> Self {
        Self {
            conductor_type: conductor_type.into(),
            length_meters,
        }
    }

    pub fn is_normal(&self) -> bool {
        self.conductor_type == NORMAL_CONDUCTOR
    }
}

/// Parsed cable-test output.
///
/// The device only reports per-pair diagnostics while no link is up, so
/// `pairs` is `None` whenever `link_established` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CableTestReport {
    pub link_established: bool,
    pub pairs: Option<[WirePair; 4]>,
}

impl CableTestReport {
    pub fn with_link() -> Self {
        Self {
            link_established: true,
            pairs: None,
        }
    }

    pub fn without_link(pairs: [WirePair; 4]) -> Self {
        Self {
            link_established: false,
            pairs: Some(pairs),
        }
    }

    /// Pair by 1-based position (`1..=4`).
    pub fn pair(&self, position: usize) -> Option<&WirePair> {
        let index = position.checked_sub(1)?;
        self.pairs.as_ref()?.get(index)
    }

    /// True iff pair data was captured and all four pairs are normal.
    ///
    /// A report without pair data (link up) is never considered normal; use
    /// [`crate::verdict::evaluate_cable`] to tell the two cases apart.
    pub fn is_normal(&self) -> bool {
        self.pairs
            .as_ref()
            .is_some_and(|pairs| pairs.iter().all(WirePair::is_normal))
    }
}
