/// Events emitted while handling one action.
/// The front end consumes these for flash and sound.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved,
    Blocked,
    MineDefused,
    RevealToggled,
    PlayerReset,
    FieldCleared { level: u32 },
    Quit,
}
