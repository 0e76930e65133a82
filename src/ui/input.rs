/// Keyboard input: blocking reads decoded into discrete actions.
///
/// The game is turn-based, so unlike a real-time loop there is no held-key
/// tracking. One key press is one action. Raw key codes stop here; the
/// core only ever sees `Action`.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::geom::Direction;
use crate::sim::game::Action;

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_FIRE: &[KeyCode] = &[KeyCode::Char('f'), KeyCode::Char('F'), KeyCode::Char(' ')];
const KEYS_CHEAT: &[KeyCode] = &[KeyCode::Char('c'), KeyCode::Char('C')];
const KEYS_RESET: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

pub const HELP_TEXT: &str = "[wasd] move | [f]ire | [q]uit | [r]eset | [c]heat";

/// Map one key press to an action. Unbound keys are `Noop`.
pub fn decode_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Action::Quit;
    }

    let code = key.code;
    if KEYS_UP.contains(&code) {
        Action::Move(Direction::Up)
    } else if KEYS_DOWN.contains(&code) {
        Action::Move(Direction::Down)
    } else if KEYS_LEFT.contains(&code) {
        Action::Move(Direction::Left)
    } else if KEYS_RIGHT.contains(&code) {
        Action::Move(Direction::Right)
    } else if KEYS_FIRE.contains(&code) {
        Action::Fire
    } else if KEYS_CHEAT.contains(&code) {
        Action::ToggleReveal
    } else if KEYS_RESET.contains(&code) {
        Action::ResetPlayer
    } else if KEYS_QUIT.contains(&code) {
        Action::Quit
    } else {
        Action::Noop
    }
}

/// Block until a key press (or resize) arrives.
/// Release events, reported by some terminals, are skipped.
pub fn read_action() -> io::Result<Action> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(decode_key(key)),
            Event::Resize(..) => return Ok(Action::Noop),
            _ => {}
        }
    }
}

/// Block until any key press. Used by the splash and message boxes.
pub fn wait_any_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}
