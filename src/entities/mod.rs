pub mod participants;
pub mod prizes;
pub mod win_biases;

pub use participants as participant_entity;
pub use prizes as prize_entity;
pub use win_biases as win_bias_entity;
pub use win_biases::WinBias;
