pub mod draw;
pub mod import;
pub mod participant;
pub mod prize;
pub mod win_bias;

pub use draw::draw_config;
pub use import::import_config;
pub use participant::participant_config;
pub use prize::prize_config;
pub use win_bias::win_bias_config;
