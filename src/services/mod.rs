pub mod draw_service;
pub mod import_service;
pub mod participant_service;
pub mod prize_service;
pub mod record_store;
pub mod win_bias_service;

pub use draw_service::*;
pub use import_service::*;
pub use participant_service::*;
pub use prize_service::*;
pub use record_store::*;
pub use win_bias_service::*;
