//! Trip types: the unit of work in moana.

use std::collections::BTreeMap;
use std::fmt;

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fleet::{TripKind, Vessel};

/// An opaque reference to a stored photo blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(pub String);

/// One scheduled vessel outing, progressing Scheduled → Underway → Completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub date: Date,
    /// Planned start time, canonical `HH:MM` when it parsed at entry.
    pub start: String,
    pub planned_duration_hrs: u32,
    pub kind: TripKind,
    pub vessel: Vessel,
    pub captain: String,
    pub deckhand: String,
    pub capacity: u32,
    pub pax: u32,
    pub created_at: Timestamp,
    pub status: TripStatus,
}

/// Where a trip stands in its lifecycle.
///
/// Each phase carries exactly the records that exist at that point: the
/// in-progress draft while Scheduled, the sealed pre-departure record once
/// Underway, and both records once Completed. A trip can never hold a
/// return record without a pre-departure record, and the phase can never
/// move backwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum TripStatus {
    /// Waiting to depart; checklist entry accumulates in the draft.
    Scheduled { draft: PreDepartureDraft },

    /// Departed; the pre-departure record is sealed and immutable.
    Underway { pre: PreDepartureRecord },

    /// Returned and completed; both records are sealed.
    Completed { pre: PreDepartureRecord, ret: ReturnRecord },
}

impl Trip {
    /// True once the trip has departed: the pre-departure record and the
    /// core trip fields are locked from then on.
    #[must_use]
    pub fn locked_pre(&self) -> bool {
        !matches!(self.status, TripStatus::Scheduled { .. })
    }

    /// The validated departure time, once underway.
    #[must_use]
    pub fn actual_start(&self) -> Option<&str> {
        match &self.status {
            TripStatus::Scheduled { .. } => None,
            TripStatus::Underway { pre } | TripStatus::Completed { pre, .. } => {
                Some(&pre.time_departure)
            }
        }
    }

    #[must_use]
    pub fn phase_label(&self) -> &'static str {
        match self.status {
            TripStatus::Scheduled { .. } => "Scheduled",
            TripStatus::Underway { .. } => "Underway",
            TripStatus::Completed { .. } => "Completed",
        }
    }

    /// First eight characters of the id, for display.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

/// Operator-entered pre-departure values, raw and unvalidated.
///
/// Everything is a string as typed; the gate parses and judges. The same
/// draft backs both the full-form CLI flags and the guided sequencer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreDepartureDraft {
    /// Checklist answers by item key.
    pub checks: BTreeMap<String, String>,
    /// Explanation notes by item key.
    pub notes: BTreeMap<String, String>,
    /// Attached photos by item key.
    pub photos: BTreeMap<String, Vec<PhotoRef>>,
    pub fuel_start: String,
    pub time_departure: String,
    /// One raw reading per engine, in the vessel's engine order.
    pub engine_before: Vec<String>,
}

impl PreDepartureDraft {
    /// An empty draft with one engine-reading slot per engine.
    #[must_use]
    pub fn for_vessel(vessel: Vessel) -> Self {
        Self {
            engine_before: vec![String::new(); vessel.engines().len()],
            ..Self::default()
        }
    }
}

/// One validated checklist answer with its explanation, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckEntry {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<PhotoRef>,
}

/// The sealed pre-departure record attached when a trip departs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreDepartureRecord {
    pub checks: BTreeMap<String, CheckEntry>,
    /// Liters.
    pub fuel_start: f64,
    /// One reading per engine, in the vessel's engine order.
    pub engine_before: Vec<f64>,
    /// Canonical `HH:MM`.
    pub time_departure: String,
}

/// What kind of issue was reported on return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    FishingEquipment,
    Vessel,
    Other,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FishingEquipment => "Fishing equipment",
            Self::Vessel => "Vessel issues",
            Self::Other => "Other",
        })
    }
}

/// An issue reported during the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub kind: IssueKind,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<PhotoRef>,
}

/// Fish landed during the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchReport {
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<PhotoRef>,
}

/// A hook-up that didn't land: when, what, and how it came off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strike {
    pub time: String,
    pub species: String,
    pub notes: String,
}

/// Operator-entered return values, raw and unvalidated.
///
/// `issues` and `catch` being `None` means the operator answered "No";
/// the return gate re-confirms those answers before completing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnDraft {
    pub fuel_end: String,
    pub time_return: String,
    /// One raw reading per engine, in the vessel's engine order.
    pub engine_after: Vec<String>,
    pub issues: Option<IssueReport>,
    pub catch: Option<CatchReport>,
    pub strikes: Vec<Strike>,
}

impl ReturnDraft {
    /// An empty draft with one engine-reading slot per engine.
    #[must_use]
    pub fn for_vessel(vessel: Vessel) -> Self {
        Self {
            engine_after: vec![String::new(); vessel.engines().len()],
            ..Self::default()
        }
    }
}

/// The sealed return record attached when a trip completes.
///
/// `issues` and `catch` are `None` only when the operator explicitly
/// confirmed "No" during the completion-guard flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRecord {
    /// Liters.
    pub fuel_end: f64,
    /// Canonical `HH:MM`.
    pub time_return: String,
    /// One reading per engine, in the vessel's engine order.
    pub engine_after: Vec<f64>,
    pub issues: Option<IssueReport>,
    pub catch: Option<CatchReport>,
    pub strikes: Vec<Strike>,
}
