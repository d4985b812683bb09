//! Guided checklist: the pre-departure fields as one-at-a-time steps.
//!
//! The sequencer is a navigation and input layer over the same draft the
//! pre-departure gate validates — there is exactly one source of truth.
//! It never authorizes a transition; submission still goes through the
//! gate, which enforces the same rules whichever entry mode filled the
//! draft.

use crate::model::checklist::CHECKLIST;
use crate::model::{PreDepartureDraft, Vessel};

/// What kind of input a step takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Binary choice between a normal and an abnormal option.
    Choice {
        normal: &'static str,
        abnormal: &'static str,
    },
    Numeric,
    Time,
}

/// Which draft field a step writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Check(&'static str),
    FuelStart,
    TimeDeparture,
    EngineBefore(usize),
}

/// One step in the guided sequence.
#[derive(Debug, Clone)]
pub struct Step {
    pub field: Field,
    pub label: String,
    pub kind: StepKind,
}

/// Outcome of recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Ok,
    /// The answer is the step's abnormal option; the gate will require
    /// notes or a photo for it before departure.
    NeedsExplanation,
}

/// An ordered walk over the pre-departure fields for one vessel.
pub struct Sequencer {
    steps: Vec<Step>,
    cursor: usize,
}

impl Sequencer {
    /// Build the step sequence for a vessel: the 13 checklist items, fuel
    /// at start, departure time, then one engine-hours step per engine.
    #[must_use]
    pub fn for_vessel(vessel: Vessel) -> Self {
        let mut steps: Vec<Step> = CHECKLIST
            .iter()
            .map(|item| Step {
                field: Field::Check(item.key),
                label: item.label.to_string(),
                kind: StepKind::Choice {
                    normal: item.normal,
                    abnormal: item.abnormal,
                },
            })
            .collect();
        steps.push(Step {
            field: Field::FuelStart,
            label: "Fuel at start (L)".to_string(),
            kind: StepKind::Numeric,
        });
        steps.push(Step {
            field: Field::TimeDeparture,
            label: "Time of departure".to_string(),
            kind: StepKind::Time,
        });
        for (i, name) in vessel.engines().iter().enumerate() {
            steps.push(Step {
                field: Field::EngineBefore(i),
                label: format!("Engine hours before — {name}"),
                kind: StepKind::Numeric,
            });
        }
        Self { steps, cursor: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_step(&self) -> &Step {
        &self.steps[self.cursor]
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Advance one step; no-op on the last step.
    pub fn next(&mut self) {
        if self.cursor + 1 < self.steps.len() {
            self.cursor += 1;
        }
    }

    /// Go back one step; no-op on the first step.
    pub fn back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Record an answer for the step at `index` into the shared draft.
    ///
    /// Never moves the cursor. Returns `None` when `index` is out of
    /// range.
    pub fn set_answer(
        &self,
        index: usize,
        draft: &mut PreDepartureDraft,
        value: &str,
    ) -> Option<Recorded> {
        let step = self.steps.get(index)?;
        match step.field {
            Field::Check(key) => {
                draft.checks.insert(key.to_string(), value.to_string());
                if let StepKind::Choice { abnormal, .. } = step.kind
                    && value == abnormal
                {
                    return Some(Recorded::NeedsExplanation);
                }
            }
            Field::FuelStart => draft.fuel_start = value.to_string(),
            Field::TimeDeparture => draft.time_departure = value.to_string(),
            Field::EngineBefore(i) => {
                if draft.engine_before.len() <= i {
                    draft.engine_before.resize(i + 1, String::new());
                }
                draft.engine_before[i] = value.to_string();
            }
        }
        Some(Recorded::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gate::depart;

    #[test]
    fn step_count_follows_the_engine_count() {
        // 13 checklist items + fuel + time + engines.
        assert_eq!(Sequencer::for_vessel(Vessel::Temu).len(), 16);
        assert_eq!(Sequencer::for_vessel(Vessel::Mahina).len(), 17);
    }

    #[test]
    fn back_at_the_first_step_is_a_no_op() {
        let mut seq = Sequencer::for_vessel(Vessel::Temu);
        seq.back();
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn next_at_the_last_step_is_a_no_op() {
        let mut seq = Sequencer::for_vessel(Vessel::Temu);
        for _ in 0..seq.len() + 5 {
            seq.next();
        }
        assert_eq!(seq.cursor(), seq.len() - 1);
    }

    #[test]
    fn set_answer_never_moves_the_cursor() {
        let seq = Sequencer::for_vessel(Vessel::Temu);
        let mut draft = PreDepartureDraft::for_vessel(Vessel::Temu);

        let outcome = seq.set_answer(0, &mut draft, "OK");
        assert_eq!(outcome, Some(Recorded::Ok));
        assert_eq!(seq.cursor(), 0);
        assert_eq!(draft.checks["lifejackets"], "OK");
    }

    #[test]
    fn abnormal_answer_flags_the_explanation_obligation() {
        let seq = Sequencer::for_vessel(Vessel::Temu);
        let mut draft = PreDepartureDraft::for_vessel(Vessel::Temu);

        let outcome = seq.set_answer(0, &mut draft, "Issue");
        assert_eq!(outcome, Some(Recorded::NeedsExplanation));
        assert_eq!(draft.checks["lifejackets"], "Issue");
    }

    #[test]
    fn out_of_range_step_records_nothing() {
        let seq = Sequencer::for_vessel(Vessel::Temu);
        let mut draft = PreDepartureDraft::for_vessel(Vessel::Temu);
        assert_eq!(seq.set_answer(99, &mut draft, "OK"), None);
        assert!(draft.checks.is_empty());
    }

    #[test]
    fn a_fully_answered_walk_passes_the_gate() {
        // The sequencer writes into the same draft the gate validates, so
        // answering every step is all it takes to depart.
        let seq = Sequencer::for_vessel(Vessel::Temu);
        let mut draft = PreDepartureDraft::for_vessel(Vessel::Temu);

        for (i, step) in seq.steps().iter().enumerate() {
            let value = match step.kind {
                StepKind::Choice { normal, .. } => normal,
                StepKind::Numeric => "120",
                StepKind::Time => "7",
            };
            seq.set_answer(i, &mut draft, value);
        }

        let record = depart::validate(&draft, Vessel::Temu).unwrap();
        assert_eq!(record.time_departure, "07:00");
    }
}
