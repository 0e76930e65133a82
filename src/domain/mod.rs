/// Pure game rules: geometry, mines, proximity, the player, the field.
/// No terminal I/O lives below this module.

pub mod field;
pub mod geom;
pub mod mine;
pub mod player;
pub mod proximity;
