/// Proximity bands: how close the player is to a live mine.
///
/// The table is checked in declared order, tightest band first. The last
/// entry (distance 0) is the fallback signal shown when nothing is near.

use super::geom::Position;

/// Visual attribute painted on the player's trail.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Signal {
    #[default]
    Normal,
    Bold,
    Standout,
    Blink,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Proximity {
    pub bit: u8,
    pub signal: Signal,
    pub distance: i32,
}

impl Proximity {
    /// `delta` is the per-axis absolute offset between player and mine.
    pub fn check(&self, delta: Position) -> bool {
        delta.x <= self.distance && delta.y <= self.distance
    }
}

pub const PROXIMITY_TABLE: [Proximity; 4] = [
    Proximity { bit: 1 << 1, signal: Signal::Blink, distance: 5 },
    Proximity { bit: 1 << 2, signal: Signal::Standout, distance: 10 },
    Proximity { bit: 1 << 3, signal: Signal::Bold, distance: 20 },
    Proximity { bit: 1 << 0, signal: Signal::Normal, distance: 0 },
];

pub const FALLBACK: Proximity = PROXIMITY_TABLE[PROXIMITY_TABLE.len() - 1];

/// Pick the closest band present in an OR-accumulated mask.
///
/// An empty mask yields the fallback signal. The trail does not keep the
/// last band once every live mine is out of range.
pub fn signal_for(mask: u8) -> Signal {
    PROXIMITY_TABLE
        .iter()
        .find(|p| mask & p.bit != 0)
        .map_or(FALLBACK.signal, |p| p.signal)
}
