//! Lifecycle gates: the validation that authorizes each trip transition.
//!
//! A gate takes the full operator-entered draft and either finalizes it
//! into a sealed record or reports everything still outstanding — the
//! complete list, never just the first failure, so the operator can see
//! all of it at once. Gates are pure; the lifecycle applies the transition
//! only after a gate succeeds.

pub mod complete;
pub mod depart;

use std::fmt;

/// One named field or rule failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Requirement {
    /// A checklist item with no selected value.
    #[error("{0}: not answered")]
    CheckUnanswered(String),

    /// An abnormal checklist answer with no explanation.
    #[error("{0}: add an explanation or a photo")]
    ExplanationMissing(String),

    #[error("fuel at start (L): enter a number")]
    FuelStart,

    #[error("time of departure: use a time like 7, 700, 7:00 or 1:15pm")]
    TimeDeparture,

    #[error("engine hours before, {0}: enter a number")]
    EngineBefore(String),

    #[error("fuel at end (L): enter a number")]
    FuelEnd,

    #[error("time of return: use a time like 12, 1230, 12:30 or 12:15pm")]
    TimeReturn,

    #[error("engine hours after, {0}: enter a number")]
    EngineAfter(String),
}

/// What the return gate wants re-confirmed before it lets a "No" stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Issues,
    Catch,
    Strikes,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Issues => "any issues to report",
            Self::Catch => "any fish caught",
            Self::Strikes => "any strikes to report",
        })
    }
}

/// Why a gate refused to finalize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Field validation failed; every unmet requirement is listed.
    #[error("{} unmet requirement(s)", .0.len())]
    Unmet(Vec<Requirement>),

    /// The operator answered "No" but has not been asked to confirm it yet.
    #[error("confirmation required: {0}?")]
    ConfirmationRequired(Topic),

    /// The operator reversed a "No" when asked; the section must be filled
    /// in before the trip can complete. A deliberate re-entry request, not
    /// a data error.
    #[error("answer reversed on \"{0}\"; fill in that section before completing")]
    ConfirmationAbort(Topic),
}

/// Parse an operator-entered number. Blank, non-numeric, and non-finite
/// input all count as absent.
pub(crate) fn finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_rejects_blank_and_garbage() {
        assert_eq!(finite("120"), Some(120.0));
        assert_eq!(finite(" 120.5 "), Some(120.5));
        assert_eq!(finite(""), None);
        assert_eq!(finite("abc"), None);
        assert_eq!(finite("NaN"), None);
        assert_eq!(finite("inf"), None);
    }
}
