use super::model::{BiasEntry, Participant, Prize, Snapshot};
use super::state::DrawState;
use crate::entities::WinBias;
use std::collections::HashMap;

/// A must-win participant still owed a prize this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MustWinCandidate<'a> {
    pub participant: &'a Participant,
    pub target_prize_id: Option<i64>,
}

/// Candidate sets for one round, borrowed from the snapshot.
#[derive(Debug, Clone)]
pub struct Eligibility<'a> {
    pub participants: Vec<&'a Participant>,
    pub must_win_pending: Vec<MustWinCandidate<'a>>,
    pub prizes: Vec<&'a Prize>,
}

impl<'a> Eligibility<'a> {
    pub fn compute(snapshot: &'a Snapshot, state: &DrawState) -> Self {
        let biases = snapshot.bias_map();
        Self {
            participants: participants_with(snapshot, state, &biases),
            must_win_pending: must_win_with(snapshot, state, &biases),
            prizes: eligible_prizes(snapshot, state),
        }
    }
}

fn bias_code(biases: &HashMap<i64, &BiasEntry>, participant_id: i64) -> WinBias {
    biases
        .get(&participant_id)
        .map(|b| b.bias)
        .unwrap_or_default()
}

fn passes_repeat_filter(state: &DrawState, participant_id: i64) -> bool {
    state.allow_duplicate_winners() || !state.has_won(participant_id)
}

fn participants_with<'a>(
    snapshot: &'a Snapshot,
    state: &DrawState,
    biases: &HashMap<i64, &BiasEntry>,
) -> Vec<&'a Participant> {
    snapshot
        .participants
        .iter()
        .filter(|p| bias_code(biases, p.id) != WinBias::MustNotWin)
        .filter(|p| passes_repeat_filter(state, p.id))
        .collect()
}

fn must_win_with<'a>(
    snapshot: &'a Snapshot,
    state: &DrawState,
    biases: &HashMap<i64, &BiasEntry>,
) -> Vec<MustWinCandidate<'a>> {
    snapshot
        .participants
        .iter()
        .filter_map(|p| {
            let entry = biases.get(&p.id)?;
            if entry.bias != WinBias::MustWin {
                return None;
            }
            if !passes_repeat_filter(state, p.id) || state.must_win_satisfied(p.id) {
                return None;
            }
            Some(MustWinCandidate {
                participant: p,
                target_prize_id: entry.target_prize_id,
            })
        })
        .collect()
}

/// Participants that may win this round: not must-not-win, and not already a
/// winner when duplicates are disallowed. Snapshot order is preserved.
pub fn eligible_participants<'a>(snapshot: &'a Snapshot, state: &DrawState) -> Vec<&'a Participant> {
    participants_with(snapshot, state, &snapshot.bias_map())
}

/// Must-win participants passing the same repeat filter, minus those already
/// satisfied this session.
pub fn must_win_pending<'a>(snapshot: &'a Snapshot, state: &DrawState) -> Vec<MustWinCandidate<'a>> {
    must_win_with(snapshot, state, &snapshot.bias_map())
}

/// Prizes whose session-local quantity is still positive.
pub fn eligible_prizes<'a>(snapshot: &'a Snapshot, state: &DrawState) -> Vec<&'a Prize> {
    snapshot
        .prizes
        .iter()
        .filter(|p| state.remaining_quantity(p.id) > 0)
        .collect()
}
