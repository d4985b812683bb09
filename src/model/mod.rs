//! Core data model for moana.
//!
//! Trips and their lifecycle records, the checklist catalog, and the
//! fixed fleet tables.

pub mod checklist;
mod fleet;
mod trip;

pub use fleet::{TripKind, Vessel};
pub use trip::{
    CatchReport, CheckEntry, IssueKind, IssueReport, PhotoRef, PreDepartureDraft,
    PreDepartureRecord, ReturnDraft, ReturnRecord, Strike, Trip, TripStatus,
};
