use crate::entities::WinBias;
use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use utoipa::ToSchema;

/// Read-only view of a participant as seen by the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    /// 工号, 可能为空
    pub ref_code: String,
}

/// Prize as loaded from the store. `quantity` is the persisted value at load
/// time; the session keeps its own decrementing copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Prize {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BiasEntry {
    pub participant_id: i64,
    pub bias: WinBias,
    pub target_prize_id: Option<i64>,
}

/// One round's winner, flattened so it survives later edits to the store.
/// Position in the session's result list is the round number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrawResult {
    pub participant_id: i64,
    pub participant_name: String,
    pub ref_code: String,
    pub prize_id: i64,
    pub prize_name: String,
    pub prize_category: String,
}

impl DrawResult {
    pub fn new(participant: &Participant, prize: &Prize) -> Self {
        Self {
            participant_id: participant.id,
            participant_name: participant.name.clone(),
            ref_code: participant.ref_code.clone(),
            prize_id: prize.id,
            prize_name: prize.name.clone(),
            prize_category: prize.category.clone(),
        }
    }
}

/// The three lists the engine needs from the record store.
///
/// Implementations return rows in insertion order; with a seeded generator
/// that order fixes which participant a given random index lands on.
pub trait RecordStore {
    fn list_participants(&self) -> impl Future<Output = AppResult<Vec<Participant>>> + Send;
    fn list_prizes(&self) -> impl Future<Output = AppResult<Vec<Prize>>> + Send;
    fn list_bias(&self) -> impl Future<Output = AppResult<Vec<BiasEntry>>> + Send;
}

/// Everything a session reads from the record store, captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub biases: Vec<BiasEntry>,
}

impl Snapshot {
    pub async fn load<S: RecordStore>(store: &S) -> AppResult<Self> {
        Ok(Self {
            participants: store.list_participants().await?,
            prizes: store.list_prizes().await?,
            biases: store.list_bias().await?,
        })
    }

    /// Bias entries keyed by participant id. Participants without an entry are
    /// treated as `Default`; with duplicate entries the last one wins.
    pub fn bias_map(&self) -> HashMap<i64, &BiasEntry> {
        self.biases.iter().map(|b| (b.participant_id, b)).collect()
    }
}
