//! Engine-hour ledger: the highest recorded reading per (vessel, engine).
//!
//! Readings merge with a monotonic max, so backfilled trips or readings
//! arriving out of chronological order can never lower an entry. Only the
//! return gate writes here, once per completed trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Vessel;

/// The highest hour reading ever submitted for each (vessel, engine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineLedger {
    hours: BTreeMap<String, f64>,
}

impl EngineLedger {
    /// Merge a reading: stores `max(existing, reading)`, or the reading
    /// itself when the engine has no entry yet. Idempotent and
    /// order-independent across trips.
    pub fn record(&mut self, vessel: Vessel, engine: &str, reading: f64) {
        self.hours
            .entry(key(vessel, engine))
            .and_modify(|hours| *hours = hours.max(reading))
            .or_insert(reading);
    }

    /// The stored reading, or zero when the engine has never reported.
    #[must_use]
    pub fn current_hours(&self, vessel: Vessel, engine: &str) -> f64 {
        self.hours
            .get(&key(vessel, engine))
            .copied()
            .unwrap_or(0.0)
    }

    /// All entries as (vessel name, engine name, hours), in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.hours.iter().filter_map(|(k, &hours)| {
            let (vessel, engine) = k.split_once("::")?;
            Some((vessel, engine, hours))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

fn key(vessel: Vessel, engine: &str) -> String {
    format!("{}::{engine}", vessel.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_maximum_regardless_of_order() {
        let mut ledger = EngineLedger::default();
        ledger.record(Vessel::Temu, "Honda 150", 50.0);
        ledger.record(Vessel::Temu, "Honda 150", 30.0);
        assert_eq!(ledger.current_hours(Vessel::Temu, "Honda 150"), 50.0);

        let mut ledger = EngineLedger::default();
        ledger.record(Vessel::Temu, "Honda 150", 30.0);
        ledger.record(Vessel::Temu, "Honda 150", 50.0);
        assert_eq!(ledger.current_hours(Vessel::Temu, "Honda 150"), 50.0);
    }

    #[test]
    fn unknown_engine_reads_as_zero() {
        let ledger = EngineLedger::default();
        assert_eq!(ledger.current_hours(Vessel::Mahina, "Honda BF350 (Port)"), 0.0);
    }

    #[test]
    fn engines_are_tracked_per_vessel() {
        let mut ledger = EngineLedger::default();
        ledger.record(Vessel::Temu, "Honda 150", 120.0);
        ledger.record(Vessel::MissKat, "Honda 100", 340.0);

        assert_eq!(ledger.current_hours(Vessel::Temu, "Honda 150"), 120.0);
        assert_eq!(ledger.current_hours(Vessel::MissKat, "Honda 100"), 340.0);

        let entries: Vec<_> = ledger.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&("Miss Kat", "Honda 100", 340.0)));
    }
}
