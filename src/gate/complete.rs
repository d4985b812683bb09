//! Return gate: the validation behind Underway → Completed.
//!
//! Phase A re-confirms "No" answers on issues, catch, and strikes so that
//! safety- and catch-relevant data is not silently omitted from a record
//! about to become immutable. Phase B validates the return fields. Neither
//! phase mutates anything; the lifecycle applies the transition only after
//! both pass.

use crate::clock;
use crate::model::{ReturnDraft, ReturnRecord, Vessel};

use super::{GateError, Requirement, Topic, finite};

/// The operator's answer when asked to re-confirm a "No".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// The "No" stands.
    No,
    /// Reversed: there is something to report after all.
    Yes,
}

/// Re-asked answers for the Phase A confirmations.
///
/// `None` means the operator has not been asked yet; the gate then refuses
/// with [`GateError::ConfirmationRequired`] and the caller resubmits once
/// an answer is in hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confirmations {
    pub issues: Option<Answer>,
    pub catch: Option<Answer>,
    pub strikes: Option<Answer>,
}

/// Validate a return draft against the vessel's engine list.
///
/// Phase A runs first and blocks field validation entirely; Phase B then
/// accumulates field failures into one complete list. On success the draft
/// is sealed into a [`ReturnRecord`] with the return time normalized.
pub fn validate(
    draft: &ReturnDraft,
    confirmations: Confirmations,
    vessel: Vessel,
) -> Result<ReturnRecord, GateError> {
    confirm(draft, confirmations)?;

    let mut unmet = Vec::new();

    let time_return = clock::normalize(&draft.time_return);
    if !clock::is_canonical(&time_return) {
        unmet.push(Requirement::TimeReturn);
    }

    let fuel_end = finite(&draft.fuel_end);
    if fuel_end.is_none() {
        unmet.push(Requirement::FuelEnd);
    }

    let engines = vessel.engines();
    let mut engine_after = Vec::with_capacity(engines.len());
    for (i, name) in engines.iter().enumerate() {
        match draft.engine_after.get(i).and_then(|raw| finite(raw)) {
            Some(reading) => engine_after.push(reading),
            None => unmet.push(Requirement::EngineAfter((*name).to_string())),
        }
    }

    if let (true, Some(fuel_end)) = (unmet.is_empty(), fuel_end) {
        Ok(ReturnRecord {
            fuel_end,
            time_return,
            engine_after,
            issues: draft.issues.clone(),
            catch: draft.catch.clone(),
            strikes: draft.strikes.clone(),
        })
    } else {
        Err(GateError::Unmet(unmet))
    }
}

/// Phase A: block completion until every current "No" is re-confirmed.
///
/// The check only fires while the answer is "No" — a Yes is taken at face
/// value, as the original entry flow did. Strikes are only asked about
/// when no fish were recorded and the strike list is still empty.
fn confirm(draft: &ReturnDraft, c: Confirmations) -> Result<(), GateError> {
    if draft.issues.is_none() {
        match c.issues {
            None => return Err(GateError::ConfirmationRequired(Topic::Issues)),
            Some(Answer::Yes) => return Err(GateError::ConfirmationAbort(Topic::Issues)),
            Some(Answer::No) => {}
        }
    }

    if draft.catch.is_none() {
        match c.catch {
            None => return Err(GateError::ConfirmationRequired(Topic::Catch)),
            Some(Answer::Yes) => return Err(GateError::ConfirmationAbort(Topic::Catch)),
            Some(Answer::No) => {}
        }

        if draft.strikes.is_empty() {
            match c.strikes {
                None => return Err(GateError::ConfirmationRequired(Topic::Strikes)),
                Some(Answer::Yes) => return Err(GateError::ConfirmationAbort(Topic::Strikes)),
                Some(Answer::No) => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{CatchReport, IssueKind, IssueReport, Strike};

    fn valid_fields(vessel: Vessel) -> ReturnDraft {
        let mut draft = ReturnDraft::for_vessel(vessel);
        draft.fuel_end = "30".to_string();
        draft.time_return = "1230".to_string();
        for slot in &mut draft.engine_after {
            *slot = "125".to_string();
        }
        draft
    }

    fn all_no() -> Confirmations {
        Confirmations {
            issues: Some(Answer::No),
            catch: Some(Answer::No),
            strikes: Some(Answer::No),
        }
    }

    fn sample_issue() -> IssueReport {
        IssueReport {
            kind: IssueKind::Vessel,
            notes: "port nav light flickering".to_string(),
            photos: Vec::new(),
        }
    }

    fn sample_catch() -> CatchReport {
        CatchReport {
            species: "Tuna".to_string(),
            quantity: Some(2),
            weight_kg: Some(14.0),
            photos: Vec::new(),
        }
    }

    #[test]
    fn unasked_no_answers_demand_confirmation_in_order() {
        let draft = valid_fields(Vessel::Temu);

        let err = validate(&draft, Confirmations::default(), Vessel::Temu).unwrap_err();
        assert_eq!(err, GateError::ConfirmationRequired(Topic::Issues));

        let c = Confirmations { issues: Some(Answer::No), ..Confirmations::default() };
        let err = validate(&draft, c, Vessel::Temu).unwrap_err();
        assert_eq!(err, GateError::ConfirmationRequired(Topic::Catch));

        let c = Confirmations {
            issues: Some(Answer::No),
            catch: Some(Answer::No),
            strikes: None,
        };
        let err = validate(&draft, c, Vessel::Temu).unwrap_err();
        assert_eq!(err, GateError::ConfirmationRequired(Topic::Strikes));
    }

    #[test]
    fn reversing_the_issues_answer_aborts_the_save() {
        let draft = valid_fields(Vessel::Temu);
        let c = Confirmations { issues: Some(Answer::Yes), ..all_no() };

        let err = validate(&draft, c, Vessel::Temu).unwrap_err();
        assert_eq!(err, GateError::ConfirmationAbort(Topic::Issues));
    }

    #[test]
    fn reversing_catch_or_strikes_aborts_too() {
        let draft = valid_fields(Vessel::Temu);

        let c = Confirmations { catch: Some(Answer::Yes), ..all_no() };
        let err = validate(&draft, c, Vessel::Temu).unwrap_err();
        assert_eq!(err, GateError::ConfirmationAbort(Topic::Catch));

        let c = Confirmations { strikes: Some(Answer::Yes), ..all_no() };
        let err = validate(&draft, c, Vessel::Temu).unwrap_err();
        assert_eq!(err, GateError::ConfirmationAbort(Topic::Strikes));
    }

    #[test]
    fn reported_issues_skip_their_confirmation() {
        let mut draft = valid_fields(Vessel::Temu);
        draft.issues = Some(sample_issue());
        let c = Confirmations { catch: Some(Answer::No), strikes: Some(Answer::No), ..Confirmations::default() };

        let record = validate(&draft, c, Vessel::Temu).unwrap();
        assert!(record.issues.is_some());
    }

    #[test]
    fn a_recorded_catch_skips_the_strike_question() {
        let mut draft = valid_fields(Vessel::Temu);
        draft.catch = Some(sample_catch());
        let c = Confirmations { issues: Some(Answer::No), ..Confirmations::default() };

        let record = validate(&draft, c, Vessel::Temu).unwrap();
        assert_eq!(record.catch.as_ref().unwrap().species, "Tuna");
    }

    #[test]
    fn an_entered_strike_skips_the_strike_question() {
        let mut draft = valid_fields(Vessel::Temu);
        draft.strikes.push(Strike {
            time: "10:15".to_string(),
            species: "Wahoo".to_string(),
            notes: "threw the hook at the boat".to_string(),
        });
        let c = Confirmations {
            issues: Some(Answer::No),
            catch: Some(Answer::No),
            strikes: None,
        };

        let record = validate(&draft, c, Vessel::Temu).unwrap();
        assert_eq!(record.strikes.len(), 1);
    }

    #[test]
    fn confirmation_runs_before_field_validation() {
        let draft = ReturnDraft::for_vessel(Vessel::Temu);
        let err = validate(&draft, Confirmations::default(), Vessel::Temu).unwrap_err();
        assert!(matches!(err, GateError::ConfirmationRequired(_)));
    }

    #[test]
    fn field_failures_are_listed_completely() {
        let draft = ReturnDraft::for_vessel(Vessel::Temu);
        let err = validate(&draft, all_no(), Vessel::Temu).unwrap_err();
        assert_eq!(
            err,
            GateError::Unmet(vec![
                Requirement::TimeReturn,
                Requirement::FuelEnd,
                Requirement::EngineAfter("Honda 150".to_string()),
            ])
        );
    }

    #[test]
    fn confirmed_no_answers_seal_a_record_with_nothing_reported() {
        let draft = valid_fields(Vessel::Temu);
        let record = validate(&draft, all_no(), Vessel::Temu).unwrap();

        assert_eq!(record.time_return, "12:30");
        assert_eq!(record.fuel_end, 30.0);
        assert_eq!(record.engine_after, vec![125.0]);
        assert!(record.issues.is_none());
        assert!(record.catch.is_none());
        assert!(record.strikes.is_empty());
    }
}
