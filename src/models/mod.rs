pub mod common;
pub mod draw;
pub mod import;
pub mod pagination;
pub mod participant;
pub mod prize;
pub mod win_bias;

pub use common::*;
pub use draw::*;
pub use import::*;
pub use pagination::*;
pub use participant::*;
pub use prize::*;
pub use win_bias::*;
