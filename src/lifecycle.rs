//! The trip lifecycle: owns trip records and applies gated transitions.
//!
//! Every mutation flows through here. A transition either fully succeeds —
//! gate passed, record sealed, status advanced — or leaves the trip and
//! the ledger untouched and reports what is still outstanding. Status only
//! ever moves Scheduled → Underway → Completed.

use jiff::Timestamp;
use jiff::civil::Date;
use uuid::Uuid;

use crate::clock;
use crate::gate::complete::{self, Confirmations};
use crate::gate::{GateError, depart};
use crate::ledger::EngineLedger;
use crate::model::{PreDepartureDraft, ReturnDraft, Trip, TripKind, TripStatus, Vessel};

/// Why a lifecycle operation was refused.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("trip not found: {0}")]
    TripNotFound(Uuid),

    #[error("pre-departure is locked; the trip has already departed")]
    PreLocked,

    #[error("trip is not underway")]
    NotUnderway,

    #[error(transparent)]
    Gate(#[from] GateError),
}

pub type Result<T> = core::result::Result<T, LifecycleError>;

/// Fields for a new trip.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub date: Date,
    /// Planned start time, normalized when parseable.
    pub start: String,
    /// Falls back to the trip kind's default when `None`.
    pub planned_duration_hrs: Option<u32>,
    pub kind: TripKind,
    pub vessel: Vessel,
    pub captain: String,
    pub deckhand: String,
    pub capacity: u32,
    pub pax: u32,
}

/// Field edits to a trip that is still Scheduled.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub date: Option<Date>,
    pub start: Option<String>,
    pub planned_duration_hrs: Option<u32>,
    pub kind: Option<TripKind>,
    pub vessel: Option<Vessel>,
    pub captain: Option<String>,
    pub deckhand: Option<String>,
    pub capacity: Option<u32>,
    pub pax: Option<u32>,
}

/// All trips plus the engine-hour ledger.
#[derive(Debug, Default)]
pub struct TripLog {
    trips: Vec<Trip>,
    ledger: EngineLedger,
}

impl TripLog {
    #[must_use]
    pub fn new(trips: Vec<Trip>, ledger: EngineLedger) -> Self {
        Self { trips, ledger }
    }

    #[must_use]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    #[must_use]
    pub fn ledger(&self) -> &EngineLedger {
        &self.ledger
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Trip>, EngineLedger) {
        (self.trips, self.ledger)
    }

    pub fn get(&self, id: Uuid) -> Result<&Trip> {
        self.trips
            .iter()
            .find(|t| t.id == id)
            .ok_or(LifecycleError::TripNotFound(id))
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Trip> {
        self.trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LifecycleError::TripNotFound(id))
    }

    /// Create a trip in Scheduled state.
    ///
    /// The start time is normalized when parseable; the planned duration
    /// falls back to the kind's default.
    pub fn create_trip(&mut self, new: NewTrip) -> &Trip {
        let trip = Trip {
            id: Uuid::new_v4(),
            date: new.date,
            start: clock::normalize(&new.start),
            planned_duration_hrs: new
                .planned_duration_hrs
                .unwrap_or_else(|| new.kind.default_hours()),
            kind: new.kind,
            vessel: new.vessel,
            captain: new.captain,
            deckhand: new.deckhand,
            capacity: new.capacity,
            pax: new.pax,
            created_at: Timestamp::now(),
            status: TripStatus::Scheduled {
                draft: PreDepartureDraft::for_vessel(new.vessel),
            },
        };
        self.trips.push(trip);
        &self.trips[self.trips.len() - 1]
    }

    /// Edit core trip fields. Refused once pre-departure is locked.
    ///
    /// Changing the kind without an explicit duration resets the duration
    /// to the kind's default; changing the vessel resizes the draft's
    /// engine-reading slots.
    pub fn edit_trip(&mut self, id: Uuid, patch: TripPatch) -> Result<&Trip> {
        let trip = self.get_mut(id)?;
        if trip.locked_pre() {
            return Err(LifecycleError::PreLocked);
        }

        if let Some(date) = patch.date {
            trip.date = date;
        }
        if let Some(start) = patch.start {
            trip.start = clock::normalize(&start);
        }
        if let Some(kind) = patch.kind {
            trip.kind = kind;
            if patch.planned_duration_hrs.is_none() {
                trip.planned_duration_hrs = kind.default_hours();
            }
        }
        if let Some(hrs) = patch.planned_duration_hrs {
            trip.planned_duration_hrs = hrs;
        }
        if let Some(vessel) = patch.vessel
            && vessel != trip.vessel
        {
            trip.vessel = vessel;
            if let TripStatus::Scheduled { draft } = &mut trip.status {
                draft.engine_before = vec![String::new(); vessel.engines().len()];
            }
        }
        if let Some(captain) = patch.captain {
            trip.captain = captain;
        }
        if let Some(deckhand) = patch.deckhand {
            trip.deckhand = deckhand;
        }
        if let Some(capacity) = patch.capacity {
            trip.capacity = capacity;
        }
        if let Some(pax) = patch.pax {
            trip.pax = pax;
        }

        Ok(&*trip)
    }

    /// Mutable access to the pre-departure draft for field-by-field entry.
    /// Refused once the trip has departed.
    pub fn draft_mut(&mut self, id: Uuid) -> Result<&mut PreDepartureDraft> {
        let trip = self.get_mut(id)?;
        match &mut trip.status {
            TripStatus::Scheduled { draft } => Ok(draft),
            _ => Err(LifecycleError::PreLocked),
        }
    }

    /// Scheduled → Underway, through the pre-departure gate.
    ///
    /// On success the draft is sealed into the trip's pre-departure record
    /// and the core fields freeze. On failure nothing changes and every
    /// unmet requirement is reported.
    pub fn submit_pre_departure(&mut self, id: Uuid) -> Result<&Trip> {
        let trip = self.get_mut(id)?;
        let TripStatus::Scheduled { draft } = &trip.status else {
            return Err(LifecycleError::PreLocked);
        };

        let pre = depart::validate(draft, trip.vessel).map_err(GateError::Unmet)?;
        trip.status = TripStatus::Underway { pre };
        Ok(&*trip)
    }

    /// Underway → Completed, through the return gate.
    ///
    /// On success the return record is sealed and each engine's
    /// after-reading merges into the ledger. On failure — including a
    /// pending or reversed Phase A confirmation — nothing changes.
    pub fn submit_return(
        &mut self,
        id: Uuid,
        draft: &ReturnDraft,
        confirmations: Confirmations,
    ) -> Result<&Trip> {
        let Self { trips, ledger } = self;
        let trip = trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LifecycleError::TripNotFound(id))?;
        let TripStatus::Underway { pre } = &trip.status else {
            return Err(LifecycleError::NotUnderway);
        };

        let ret = complete::validate(draft, confirmations, trip.vessel)?;
        let pre = pre.clone();
        for (engine, reading) in trip.vessel.engines().iter().zip(&ret.engine_after) {
            ledger.record(trip.vessel, engine, *reading);
        }
        trip.status = TripStatus::Completed { pre, ret };
        Ok(&*trip)
    }
}
