//! Pre-departure gate: the validation behind Scheduled → Underway.

use std::collections::BTreeMap;

use crate::clock;
use crate::model::checklist::CHECKLIST;
use crate::model::{CheckEntry, PreDepartureDraft, PreDepartureRecord, Vessel};

use super::{Requirement, finite};

/// Validate a pre-departure draft against the vessel's engine list.
///
/// All rules are checked and failures accumulate, in checklist order:
/// unanswered items, then fuel, departure time, engine readings, and
/// finally abnormal answers still missing an explanation. On success the
/// draft is sealed into a [`PreDepartureRecord`] with the departure time
/// normalized.
pub fn validate(
    draft: &PreDepartureDraft,
    vessel: Vessel,
) -> Result<PreDepartureRecord, Vec<Requirement>> {
    let mut unmet = Vec::new();
    let mut checks = BTreeMap::new();

    for item in &CHECKLIST {
        match draft.checks.get(item.key) {
            None => unmet.push(Requirement::CheckUnanswered(item.label.to_string())),
            Some(value) => {
                let notes = draft
                    .notes
                    .get(item.key)
                    .filter(|n| !n.trim().is_empty())
                    .cloned();
                let photos = draft.photos.get(item.key).cloned().unwrap_or_default();
                checks.insert(
                    item.key.to_string(),
                    CheckEntry {
                        value: value.clone(),
                        notes,
                        photos,
                    },
                );
            }
        }
    }

    let fuel_start = finite(&draft.fuel_start);
    if fuel_start.is_none() {
        unmet.push(Requirement::FuelStart);
    }

    let time_departure = clock::normalize(&draft.time_departure);
    if !clock::is_canonical(&time_departure) {
        unmet.push(Requirement::TimeDeparture);
    }

    let engines = vessel.engines();
    let mut engine_before = Vec::with_capacity(engines.len());
    for (i, name) in engines.iter().enumerate() {
        match draft.engine_before.get(i).and_then(|raw| finite(raw)) {
            Some(reading) => engine_before.push(reading),
            None => unmet.push(Requirement::EngineBefore((*name).to_string())),
        }
    }

    // Every abnormal answer needs notes or at least one photo.
    for item in &CHECKLIST {
        if let Some(entry) = checks.get(item.key)
            && entry.value == item.abnormal
            && entry.notes.is_none()
            && entry.photos.is_empty()
        {
            unmet.push(Requirement::ExplanationMissing(item.label.to_string()));
        }
    }

    if let (true, Some(fuel_start)) = (unmet.is_empty(), fuel_start) {
        Ok(PreDepartureRecord {
            checks,
            fuel_start,
            engine_before,
            time_departure,
        })
    } else {
        Err(unmet)
    }
}
