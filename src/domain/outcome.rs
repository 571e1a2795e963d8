//! Terminal states of one estimation request.

use serde::Serialize;

use super::error::EstimateError;
use super::estimate::PriceEstimate;

/// How an estimation request ended.
///
/// `NoData` is an explicit failure signal and is never represented as a zero
/// price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceOutcome {
    /// Market price computed from fetched samples.
    Estimated(PriceEstimate),
    /// The market path failed and a reference price stood in.
    Fallback {
        estimate: PriceEstimate,
        cause: EstimateError,
    },
    /// No price could be produced.
    NoData { cause: EstimateError },
}

impl PriceOutcome {
    /// The estimate, if any.
    #[must_use]
    pub fn estimate(&self) -> Option<&PriceEstimate> {
        match self {
            Self::Estimated(estimate) | Self::Fallback { estimate, .. } => Some(estimate),
            Self::NoData { .. } => None,
        }
    }

    /// Why the market path did not produce the result, if it did not.
    #[must_use]
    pub fn cause(&self) -> Option<&EstimateError> {
        match self {
            Self::Estimated(_) => None,
            Self::Fallback { cause, .. } | Self::NoData { cause } => Some(cause),
        }
    }

    #[must_use]
    pub fn is_estimated(&self) -> bool {
        matches!(self, Self::Estimated(_))
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Short lowercase label for logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Estimated(_) => "estimated",
            Self::Fallback { .. } => "fallback",
            Self::NoData { .. } => "no_data",
        }
    }

    /// Serializable view for JSON output.
    #[must_use]
    pub fn report(&self) -> OutcomeReport<'_> {
        OutcomeReport {
            status: self.label(),
            estimate: self.estimate(),
            reason: self.cause().map(ToString::to_string),
        }
    }
}

/// Flat, serializable view of a [`PriceOutcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<&'a PriceEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
