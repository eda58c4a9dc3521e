//! Mutual-exclusion constraint for the two player-pick slots.

use crate::models::PlayerName;

/// Two "current selection" slots A and B drawn from the roster.
///
/// The slots never simultaneously hold the same value. Setting one slot to
/// the value currently held by the other clears the other slot instead of
/// rejecting the change, so the caller can always re-select the cleared slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSelection {
    a: Option<PlayerName>,
    b: Option<PlayerName>,
}

impl PairSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of slot A.
    pub fn a(&self) -> Option<&PlayerName> {
        self.a.as_ref()
    }

    /// Current value of slot B.
    pub fn b(&self) -> Option<&PlayerName> {
        self.b.as_ref()
    }

    /// Set or clear slot A. Last writer wins: if the new value collides with
    /// slot B, slot B is cleared.
    pub fn set_a(&mut self, value: Option<PlayerName>) {
        if value.is_some() && value == self.b {
            self.b = None;
        }
        self.a = value;
    }

    /// Set or clear slot B, symmetric to [`PairSelection::set_a`].
    pub fn set_b(&mut self, value: Option<PlayerName>) {
        if value.is_some() && value == self.a {
            self.a = None;
        }
        self.b = value;
    }

    /// Candidates a picker for slot A may offer: the roster minus slot B's
    /// current value.
    pub fn candidates_a<'r>(&self, roster: &'r [PlayerName]) -> Vec<&'r PlayerName> {
        roster
            .iter()
            .filter(|name| Some(*name) != self.b.as_ref())
            .collect()
    }

    /// Candidates a picker for slot B may offer.
    pub fn candidates_b<'r>(&self, roster: &'r [PlayerName]) -> Vec<&'r PlayerName> {
        roster
            .iter()
            .filter(|name| Some(*name) != self.a.as_ref())
            .collect()
    }

    /// True when both slots are filled; the invariant guarantees they differ.
    pub fn is_complete(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    /// Reset both slots.
    pub fn clear(&mut self) {
        self.a = None;
        self.b = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_a_to_bs_value_clears_b() {
        let mut pair = PairSelection::new();
        pair.set_b(Some("Ann".into()));
        pair.set_a(Some("Ann".into()));
        assert_eq!(pair.a().map(String::as_str), Some("Ann"));
        assert_eq!(pair.b(), None);
    }

    #[test]
    fn setting_b_to_as_value_clears_a() {
        let mut pair = PairSelection::new();
        pair.set_a(Some("Bo".into()));
        pair.set_b(Some("Bo".into()));
        assert_eq!(pair.a(), None);
        assert_eq!(pair.b().map(String::as_str), Some("Bo"));
    }

    #[test]
    fn cleared_slot_can_be_reselected() {
        let mut pair = PairSelection::new();
        pair.set_a(Some("Ann".into()));
        pair.set_b(Some("Ann".into()));
        pair.set_a(Some("Bo".into()));
        assert_eq!(pair.a().map(String::as_str), Some("Bo"));
        assert_eq!(pair.b().map(String::as_str), Some("Ann"));
        assert!(pair.is_complete());
    }

    #[test]
    fn clearing_a_slot_does_not_touch_the_peer() {
        let mut pair = PairSelection::new();
        pair.set_a(Some("Ann".into()));
        pair.set_b(Some("Bo".into()));
        pair.set_a(None);
        assert_eq!(pair.a(), None);
        assert_eq!(pair.b().map(String::as_str), Some("Bo"));
    }

    #[test]
    fn candidates_exclude_the_other_slot() {
        let roster: Vec<PlayerName> = vec!["Ann".into(), "Bo".into(), "Cid".into()];
        let mut pair = PairSelection::new();
        pair.set_a(Some("Ann".into()));
        let names: Vec<&str> = pair
            .candidates_b(&roster)
            .into_iter()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["Bo", "Cid"]);
        let names: Vec<&str> = pair
            .candidates_a(&roster)
            .into_iter()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["Ann", "Bo", "Cid"]);
    }
}
