//! Output formatting for CLI display.

use crate::clock;
use crate::model::ReturnRecord;

/// Elapsed minutes since start and minutes until due (negative when
/// overdue), recomputed at render time.
///
/// A start after the current time is assumed to be yesterday, so elapsed
/// gains a day rather than going negative.
pub(super) fn elapsed_and_due(start: &str, planned_hrs: u32, now_minutes: i64) -> (i64, i64) {
    let start_m = clock::minutes_of_day(start).unwrap_or(0);
    let mut elapsed = now_minutes - start_m;
    if elapsed < 0 {
        elapsed += 1440;
    }
    let due_at = start_m + i64::from(planned_hrs) * 60;
    let mut due = due_at - now_minutes;
    if due < -1440 {
        due = -1440;
    }
    (elapsed, due)
}

/// Format a minute count as `3h 05m`, ignoring sign.
pub(super) fn format_span(minutes: i64) -> String {
    let abs = minutes.abs();
    format!("{}h {:02}m", abs / 60, abs % 60)
}

/// One-line summary of a completed trip's return record.
pub(super) fn completed_summary(ret: &ReturnRecord) -> String {
    let mut parts = Vec::new();
    if let Some(issues) = &ret.issues {
        parts.push(format!("issues: {}", issues.kind));
    }
    if let Some(catch) = &ret.catch {
        let species = if catch.species.is_empty() { "—" } else { &catch.species };
        let quantity = catch.quantity.map_or_else(|| "—".to_string(), |q| q.to_string());
        let weight = catch
            .weight_kg
            .map_or_else(|| "—".to_string(), |w| format!("{w}kg"));
        parts.push(format!("catch: {species} ×{quantity} {weight}"));
    }
    if !ret.strikes.is_empty() {
        parts.push(format!("strikes: {}", ret.strikes.len()));
    }
    if parts.is_empty() {
        "no issues/fish/strikes".to_string()
    } else {
        parts.join(" • ")
    }
}
