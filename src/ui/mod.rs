/// Terminal front end: crossterm rendering, key decoding, optional sound.

pub mod input;
pub mod renderer;
pub mod sound;
pub mod terminal;
