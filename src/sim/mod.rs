/// Game state machine, scoring, and the session loop.

pub mod event;
pub mod frontend;
pub mod game;
pub mod score;
pub mod session;
