//! The pre-departure checklist as data.
//!
//! One catalog feeds the gate, the CLI flags, and the guided sequencer, so
//! the rules about what must be answered — and which answer demands an
//! explanation — exist in exactly one place.

/// A single two-valued inspection field.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistItem {
    /// Stable key used in drafts, records, and CLI flags.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// The all-clear answer.
    pub normal: &'static str,
    /// The answer that requires notes or a photo before departure.
    pub abnormal: &'static str,
}

impl ChecklistItem {
    /// Match operator input against this item's two options, ignoring
    /// case and hyphen/space differences ("not-working" answers the
    /// bilge item).
    #[must_use]
    pub fn match_option(&self, input: &str) -> Option<&'static str> {
        let wanted = fold(input);
        [self.normal, self.abnormal]
            .into_iter()
            .find(|option| fold(option) == wanted)
    }
}

fn fold(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

/// The fixed checklist, in the order it is walked and validated.
pub const CHECKLIST: [ChecklistItem; 13] = [
    ChecklistItem { key: "lifejackets", label: "Lifejackets", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "fire-ext", label: "Fire extinguisher", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "first-aid", label: "First aid kit", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "flares", label: "Flares", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "epirb", label: "EPIRB", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "nav-lights", label: "Navigation lights", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "vhf", label: "VHF radio", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "engine-oil", label: "Engine oil level", normal: "OK", abnormal: "Low" },
    ChecklistItem { key: "fuel-filters", label: "Fuel filters", normal: "Clean", abnormal: "Dirty" },
    ChecklistItem { key: "under-cover", label: "Under-cover check", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "battery", label: "Battery terminals", normal: "OK", abnormal: "Corroded" },
    ChecklistItem { key: "props", label: "Propellers / external", normal: "OK", abnormal: "Issue" },
    ChecklistItem { key: "bilge", label: "Bilge pumps", normal: "Working", abnormal: "Not working" },
];

/// Look up a checklist item by key.
#[must_use]
pub fn item(key: &str) -> Option<&'static ChecklistItem> {
    CHECKLIST.iter().find(|i| i.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_items_with_unique_keys() {
        let mut keys: Vec<&str> = CHECKLIST.iter().map(|i| i.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 13);
    }

    #[test]
    fn match_option_ignores_case() {
        let battery = item("battery").unwrap();
        assert_eq!(battery.match_option("ok"), Some("OK"));
        assert_eq!(battery.match_option("CORRODED"), Some("Corroded"));
    }

    #[test]
    fn match_option_ignores_hyphens_and_spaces() {
        let bilge = item("bilge").unwrap();
        assert_eq!(bilge.match_option("not-working"), Some("Not working"));
        assert_eq!(bilge.match_option("Not Working"), Some("Not working"));
    }

    #[test]
    fn match_option_rejects_unknown_answers() {
        let vhf = item("vhf").unwrap();
        assert_eq!(vhf.match_option("maybe"), None);
    }

    #[test]
    fn unknown_key_yields_nothing() {
        assert!(item("anchor").is_none());
    }
}
