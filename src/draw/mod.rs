//! Draw execution core.
//!
//! Everything in this module is synchronous and free of I/O except `export`.
//! A `DrawSession` is built from a `Snapshot` of the record store and advanced
//! one round at a time with an injected random generator; the async services
//! own the session and the generator and decide when to reload.

pub mod eligibility;
pub mod engine;
pub mod export;
pub mod model;
pub mod state;

pub use eligibility::{Eligibility, MustWinCandidate};
pub use engine::{DrawPhase, DrawSession, RoundOutcome};
pub use export::{EXPORT_HEADER, export_to_path, write_results};
pub use model::{BiasEntry, DrawResult, Participant, Prize, RecordStore, Snapshot};
pub use state::DrawState;
