//! Shared parsing primitives for device command output.

pub mod extract;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least {expected} lines, found {found}: {input:?}")]
    UnexpectedLineCount {
        expected: usize,
        found: usize,
        input: String,
    },

    #[error("malformed input ({reason}): {input:?}")]
    Malformed { reason: &'static str, input: String },

    #[error("could not parse a number for {field} from {text:?}")]
    Numeric { field: &'static str, text: String },
}

impl ParseError {
    pub(crate) fn malformed(reason: &'static str, input: impl Into<String>) -> Self {
        Self::Malformed {
            reason,
            input: input.into(),
        }
    }

    pub(crate) fn numeric(field: &'static str, text: impl Into<String>) -> Self {
        Self::Numeric {
            field,
            text: text.into(),
        }
    }

    /// Structural problem: too few lines, a missing separator or a wrong segment count.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedLineCount { .. } | Self::Malformed { .. }
        )
    }

    /// A field that should hold a number did not.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }
}
