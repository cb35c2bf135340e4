use super::model::{DrawResult, Prize};
use std::collections::{HashMap, HashSet};

/// Session-scoped counters and sets.
///
/// Prize quantities here are the session-local copy: they start from the
/// loaded snapshot and only ever go down while drawing. The persisted
/// quantity is untouched until an explicit commit.
#[derive(Debug, Clone)]
pub struct DrawState {
    total_rounds: u32,
    current_round: u32,
    allow_duplicate_winners: bool,
    must_win_awarded: HashSet<i64>,
    awarded: HashSet<i64>,
    remaining: HashMap<i64, i64>,
    results: Vec<DrawResult>,
}

impl DrawState {
    /// `total_rounds <= 0` falls back to a single round.
    pub fn new(total_rounds: i64, allow_duplicate_winners: bool) -> Self {
        Self {
            total_rounds: u32::try_from(total_rounds).ok().filter(|n| *n > 0).unwrap_or(1),
            current_round: 0,
            allow_duplicate_winners,
            must_win_awarded: HashSet::new(),
            awarded: HashSet::new(),
            remaining: HashMap::new(),
            results: Vec::new(),
        }
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Non-positive (or out of range) values are ignored and the prior value is kept.
    pub fn set_total_rounds(&mut self, n: i64) {
        if let Ok(n) = u32::try_from(n) {
            if n > 0 {
                self.total_rounds = n;
            }
        }
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_complete(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    /// Rounds left counting the current one (the counter has already been
    /// advanced for the round being drawn).
    pub fn remaining_rounds(&self) -> u32 {
        if self.current_round > self.total_rounds {
            return 0;
        }
        (self.total_rounds - self.current_round).saturating_add(1)
    }

    pub(crate) fn advance_round(&mut self) {
        self.current_round += 1;
    }

    /// Consume every remaining round at once.
    pub(crate) fn finish_rounds(&mut self) {
        self.current_round = self.current_round.max(self.total_rounds);
    }

    pub fn allow_duplicate_winners(&self) -> bool {
        self.allow_duplicate_winners
    }

    pub fn set_allow_duplicate_winners(&mut self, allow: bool) {
        self.allow_duplicate_winners = allow;
    }

    pub fn has_won(&self, participant_id: i64) -> bool {
        self.awarded.contains(&participant_id)
    }

    pub fn must_win_satisfied(&self, participant_id: i64) -> bool {
        self.must_win_awarded.contains(&participant_id)
    }

    pub(crate) fn mark_must_win_awarded(&mut self, participant_id: i64) {
        self.must_win_awarded.insert(participant_id);
    }

    pub fn remaining_quantity(&self, prize_id: i64) -> i64 {
        self.remaining.get(&prize_id).copied().unwrap_or(0)
    }

    pub fn remaining_quantities(&self) -> &HashMap<i64, i64> {
        &self.remaining
    }

    /// Re-seed the session-local quantities from freshly loaded prizes.
    pub(crate) fn load_quantities(&mut self, prizes: &[Prize]) {
        self.remaining = prizes.iter().map(|p| (p.id, p.quantity.max(0))).collect();
    }

    /// Decrement the session copy and record the win. Callers only pass prizes
    /// with remaining quantity, the floor at zero keeps that true regardless.
    pub(crate) fn record_win(&mut self, result: DrawResult) {
        if let Some(q) = self.remaining.get_mut(&result.prize_id) {
            *q = (*q - 1).max(0);
        }
        self.awarded.insert(result.participant_id);
        self.results.push(result);
    }

    pub fn results(&self) -> &[DrawResult] {
        &self.results
    }

    /// Clear counters, awarded sets and results. Settings (total rounds and the
    /// duplicate flag) survive; quantities are re-seeded by the caller.
    pub fn reset(&mut self) {
        self.current_round = 0;
        self.must_win_awarded.clear();
        self.awarded.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prize(id: i64, quantity: i64) -> Prize {
        Prize {
            id,
            name: format!("Prize {id}"),
            category: "一等奖".to_string(),
            quantity,
        }
    }

    fn result(participant_id: i64, prize_id: i64) -> DrawResult {
        DrawResult {
            participant_id,
            participant_name: format!("P{participant_id}"),
            ref_code: String::new(),
            prize_id,
            prize_name: format!("Prize {prize_id}"),
            prize_category: "一等奖".to_string(),
        }
    }

    #[test]
    fn test_set_total_rounds_ignores_non_positive() {
        let mut state = DrawState::new(10, true);
        state.set_total_rounds(0);
        assert_eq!(state.total_rounds(), 10);
        state.set_total_rounds(-5);
        assert_eq!(state.total_rounds(), 10);
        state.set_total_rounds(3);
        assert_eq!(state.total_rounds(), 3);
    }

    #[test]
    fn test_new_with_invalid_total_rounds() {
        assert_eq!(DrawState::new(0, true).total_rounds(), 1);
        assert_eq!(DrawState::new(-1, true).total_rounds(), 1);
    }

    #[test]
    fn test_remaining_rounds_counts_current() {
        let mut state = DrawState::new(3, true);
        state.advance_round();
        assert_eq!(state.remaining_rounds(), 3);
        state.advance_round();
        state.advance_round();
        assert_eq!(state.remaining_rounds(), 1);
        assert!(state.is_complete());
    }

    #[test]
    fn test_remaining_rounds_at_max_total() {
        let mut state = DrawState::new(i64::from(u32::MAX), true);
        assert_eq!(state.total_rounds(), u32::MAX);
        assert_eq!(state.remaining_rounds(), u32::MAX);
        state.advance_round();
        assert_eq!(state.remaining_rounds(), u32::MAX);
        state.advance_round();
        assert_eq!(state.remaining_rounds(), u32::MAX - 1);

        state.set_total_rounds(1);
        assert_eq!(state.remaining_rounds(), 0);
    }

    #[test]
    fn test_finish_rounds_completes_session() {
        let mut state = DrawState::new(i64::from(u32::MAX), true);
        state.advance_round();
        state.finish_rounds();
        assert_eq!(state.current_round(), u32::MAX);
        assert!(state.is_complete());
        assert_eq!(state.remaining_rounds(), 1);
    }

    #[test]
    fn test_record_win_never_goes_negative() {
        let mut state = DrawState::new(5, true);
        state.load_quantities(&[prize(1, 1), prize(2, -3)]);
        assert_eq!(state.remaining_quantity(2), 0);

        state.record_win(result(7, 1));
        state.record_win(result(8, 1));
        assert_eq!(state.remaining_quantity(1), 0);
        assert!(state.has_won(7));
        assert!(state.has_won(8));
        assert_eq!(state.results().len(), 2);
    }

    #[test]
    fn test_reset_clears_session_but_keeps_settings() {
        let mut state = DrawState::new(4, false);
        state.load_quantities(&[prize(1, 2)]);
        state.advance_round();
        state.mark_must_win_awarded(7);
        state.record_win(result(7, 1));

        state.reset();
        assert_eq!(state.current_round(), 0);
        assert!(!state.has_won(7));
        assert!(!state.must_win_satisfied(7));
        assert!(state.results().is_empty());
        assert_eq!(state.total_rounds(), 4);
        assert!(!state.allow_duplicate_winners());
    }
}
