//! Flexible time parsing.
//!
//! Operators type times however they think of them: "7", "700", "7:00",
//! "7.00", "1:15pm". [`normalize`] turns all of these into canonical
//! 24-hour `HH:MM`. Unparseable input comes back unchanged, so callers can
//! name the field in a validation failure instead of guessing a default.
//! This module is the single source of truth for time parsing — trip
//! creation and both gates go through it.

/// Normalize a loosely formatted time string to 24-hour `HH:MM`.
///
/// Accepts a bare hour, 3–4 military-style digits, colon or dot separated
/// hours and minutes, all with an optional trailing am/pm. Whitespace and
/// case are ignored. Returns the input unchanged when it cannot be parsed.
#[must_use]
pub fn normalize(input: &str) -> String {
    let mut s: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    s.make_ascii_lowercase();

    let meridiem = if s.ends_with("am") || s.ends_with("pm") {
        Some(s.split_off(s.len() - 2))
    } else {
        None
    };
    let meridiem = meridiem.as_deref();

    let mut s = s.replacen('.', ":", 1);

    // Military style: 3-4 bare digits get a colon before the last two.
    if (3..=4).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()) {
        s.insert(s.len() - 2, ':');
    }

    if let Some((hour, minute)) = split_hhmm(&s) {
        let hour = to_24h(hour, meridiem).clamp(0, 23);
        let minute = minute.clamp(0, 59);
        return format!("{hour:02}:{minute:02}");
    }

    if (1..=2).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(hour) = s.parse::<u32>() {
            let hour = to_24h(hour, meridiem);
            return format!("{hour:02}:00");
        }
    }

    input.to_string()
}

/// True for exactly `HH:MM` with two digits on both sides — the form the
/// gates accept.
#[must_use]
pub fn is_canonical(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[2] == b':'
        && b[..2].iter().all(u8::is_ascii_digit)
        && b[3..].iter().all(u8::is_ascii_digit)
}

/// Minutes since midnight for an `H(H):MM` string, for elapsed/overdue
/// display. `None` when the string isn't a clock time.
#[must_use]
pub fn minutes_of_day(s: &str) -> Option<i64> {
    let (hour, minute) = split_hhmm(s)?;
    Some(i64::from(hour) * 60 + i64::from(minute))
}

/// Split `H(H):MM` into its numeric parts.
fn split_hhmm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    if !(1..=2).contains(&h.len()) || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((h.parse().ok()?, m.parse().ok()?))
}

/// Apply a 12-hour meridiem suffix: pm adds 12 unless the hour already is
/// 12; 12am becomes 0.
fn to_24h(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn military_digits() {
        assert_eq!(normalize("1315"), "13:15");
        assert_eq!(normalize("700"), "07:00");
    }

    #[test]
    fn bare_hour() {
        assert_eq!(normalize("7"), "07:00");
        assert_eq!(normalize("19"), "19:00");
    }

    #[test]
    fn meridiem_conversion() {
        assert_eq!(normalize("1:15pm"), "13:15");
        assert_eq!(normalize("12am"), "00:00");
        assert_eq!(normalize("12pm"), "12:00");
        assert_eq!(normalize("7pm"), "19:00");
        assert_eq!(normalize("7am"), "07:00");
    }

    #[test]
    fn meridiem_on_an_already_24h_hour_is_ignored() {
        assert_eq!(normalize("13:00pm"), "13:00");
    }

    #[test]
    fn dot_separator_and_whitespace() {
        assert_eq!(normalize("7.00"), "07:00");
        assert_eq!(normalize(" 1:15 PM "), "13:15");
        assert_eq!(normalize("7 : 30"), "07:30");
    }

    #[test]
    fn out_of_range_parts_are_clamped() {
        assert_eq!(normalize("25:00"), "23:00");
        assert_eq!(normalize("7:75"), "07:59");
    }

    #[test]
    fn unparseable_input_is_returned_unchanged() {
        assert_eq!(normalize("abc"), "abc");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("7:5"), "7:5");
        assert_eq!(normalize("12345"), "12345");
    }

    #[test]
    fn idempotent_on_everything_it_accepts() {
        for input in ["7", "700", "1315", "7.00", "1:15pm", "12am", "abc", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn canonical_form_check() {
        assert!(is_canonical("07:00"));
        assert!(is_canonical("23:59"));
        assert!(!is_canonical("7:00"));
        assert!(!is_canonical("0700"));
        assert!(!is_canonical("abc"));
    }

    #[test]
    fn minutes_since_midnight() {
        assert_eq!(minutes_of_day("07:30"), Some(450));
        assert_eq!(minutes_of_day("7:30"), Some(450));
        assert_eq!(minutes_of_day("00:00"), Some(0));
        assert_eq!(minutes_of_day("abc"), None);
    }
}
