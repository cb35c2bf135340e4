use super::eligibility::Eligibility;
use super::model::{DrawResult, Snapshot};
use super::state::DrawState;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    /// Rounds remain (including before the first one).
    Idle,
    /// The round counter reached the total.
    Complete,
}

/// Outcome of a single `draw_one_round` call. Only `Winner` carries a result;
/// the other variants are the "no result" cases and are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner(DrawResult),
    /// Called after the last round; nothing was consumed.
    SessionComplete,
    /// The round was consumed but nobody was eligible.
    NoEligibleParticipants,
    /// The round was consumed but every prize is used up.
    NoPrizesLeft,
}

impl RoundOutcome {
    pub fn result(&self) -> Option<&DrawResult> {
        match self {
            RoundOutcome::Winner(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<DrawResult> {
        match self {
            RoundOutcome::Winner(r) => Some(r),
            _ => None,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            RoundOutcome::Winner(_) => "winner",
            RoundOutcome::SessionComplete => "session_complete",
            RoundOutcome::NoEligibleParticipants => "no_eligible_participants",
            RoundOutcome::NoPrizesLeft => "no_prizes_left",
        }
    }
}

/// A draw session: the loaded snapshot plus the state advanced by each round.
///
/// A session can only be built from a snapshot, so drawing before a load is
/// not representable.
#[derive(Debug, Clone)]
pub struct DrawSession {
    snapshot: Snapshot,
    state: DrawState,
}

impl DrawSession {
    pub fn new(snapshot: Snapshot, total_rounds: i64, allow_duplicate_winners: bool) -> Self {
        let mut state = DrawState::new(total_rounds, allow_duplicate_winners);
        state.load_quantities(&snapshot.prizes);
        Self { snapshot, state }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn set_total_rounds(&mut self, n: i64) {
        self.state.set_total_rounds(n);
    }

    pub fn set_allow_duplicate_winners(&mut self, allow: bool) {
        self.state.set_allow_duplicate_winners(allow);
    }

    pub fn phase(&self) -> DrawPhase {
        if self.state.is_complete() {
            DrawPhase::Complete
        } else {
            DrawPhase::Idle
        }
    }

    pub fn results(&self) -> &[DrawResult] {
        self.state.results()
    }

    /// Clear counters, awarded sets and results, then start over from a fresh snapshot.
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.state.reset();
        self.reload(snapshot);
    }

    /// Swap in a fresh snapshot and re-seed session quantities from it,
    /// keeping counters and results.
    pub fn reload(&mut self, snapshot: Snapshot) {
        self.state.load_quantities(&snapshot.prizes);
        self.snapshot = snapshot;
    }

    /// Draw one round.
    ///
    /// The round counter advances on every call made before the session is
    /// complete, whether or not a winner is found. Once remaining rounds
    /// (counting this one) are at least the number of pending must-win
    /// participants, the winner is taken from that pending set.
    pub fn draw_one_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RoundOutcome {
        if self.state.is_complete() {
            return RoundOutcome::SessionComplete;
        }
        self.state.advance_round();

        let eligible = Eligibility::compute(&self.snapshot, &self.state);
        if eligible.participants.is_empty() {
            return RoundOutcome::NoEligibleParticipants;
        }
        if eligible.prizes.is_empty() {
            return RoundOutcome::NoPrizesLeft;
        }

        let pending = eligible.must_win_pending.len();
        let prioritize = pending > 0 && self.state.remaining_rounds() as usize >= pending;

        let (winner, prize, must_win) = if prioritize {
            let Some(candidate) = eligible.must_win_pending.choose(rng) else {
                return RoundOutcome::NoEligibleParticipants;
            };
            let target = candidate
                .target_prize_id
                .and_then(|id| eligible.prizes.iter().find(|p| p.id == id));
            let prize = match target {
                Some(p) => Some(p),
                None => eligible.prizes.choose(rng),
            };
            (Some(candidate.participant), prize, true)
        } else {
            let winner = eligible.participants.choose(rng).copied();
            (winner, eligible.prizes.choose(rng), false)
        };

        let (Some(winner), Some(prize)) = (winner, prize) else {
            return RoundOutcome::NoEligibleParticipants;
        };
        let result = DrawResult::new(winner, prize);

        if must_win {
            self.state.mark_must_win_awarded(result.participant_id);
        }
        self.state.record_win(result.clone());
        RoundOutcome::Winner(result)
    }

    /// Keep drawing until the session is complete. Returns the winners drawn
    /// by this call, in round order.
    ///
    /// A round without a result leaves the candidate sets unchanged, so every
    /// later round would end the same way; the remaining rounds are consumed
    /// in one step instead of one call each.
    pub fn draw_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<DrawResult> {
        let mut drawn = Vec::new();
        loop {
            match self.draw_one_round(rng) {
                RoundOutcome::Winner(result) => drawn.push(result),
                RoundOutcome::SessionComplete => break,
                RoundOutcome::NoEligibleParticipants | RoundOutcome::NoPrizesLeft => {
                    self.state.finish_rounds();
                    break;
                }
            }
        }
        drawn
    }
}
