/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Screen layout (rows):
///   0          outer border, `:|mines|:` title
///   1          score banner
///   2..LINES-3 field window, boxed with `|` and `-`
///   LINES-2    key help
///   LINES-1    outer border

use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::geom::Position;
use crate::domain::proximity::Signal;
use crate::sim::game::Game;
use super::input::HELP_TEXT;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    attr: Attribute,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset, attr: Attribute::Reset };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '\0', fg: Color::Magenta, attr: Attribute::Reset };

    fn new(ch: char, fg: Color, attr: Attribute) -> Self {
        Cell { ch, fg, attr }
    }

    fn plain(ch: char) -> Self {
        Cell { ch, ..Cell::BLANK }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

#[derive(Clone)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column; clipped at the edge.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, attr: Attribute) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, attr));
        }
    }

    /// Box outline with separate corner, horizontal, and vertical glyphs.
    fn draw_box(&mut self, x: usize, y: usize, w: usize, h: usize, glyphs: BoxGlyphs) {
        if w < 2 || h < 2 { return; }
        let (x1, y1) = (x + w - 1, y + h - 1);
        for cx in x + 1..x1 {
            self.set(cx, y, Cell::plain(glyphs.horizontal));
            self.set(cx, y1, Cell::plain(glyphs.horizontal));
        }
        for cy in y + 1..y1 {
            self.set(x, cy, Cell::plain(glyphs.vertical));
            self.set(x1, cy, Cell::plain(glyphs.vertical));
        }
        self.set(x, y, Cell::plain(glyphs.corners[0]));
        self.set(x1, y, Cell::plain(glyphs.corners[1]));
        self.set(x, y1, Cell::plain(glyphs.corners[2]));
        self.set(x1, y1, Cell::plain(glyphs.corners[3]));
    }

    #[cfg(test)]
    fn row_text(&self, y: usize) -> String {
        (0..self.width).map(|x| self.get(x, y).ch).collect()
    }
}

#[derive(Clone, Copy)]
struct BoxGlyphs {
    horizontal: char,
    vertical: char,
    /// top-left, top-right, bottom-left, bottom-right
    corners: [char; 4],
}

const SCREEN_BOX: BoxGlyphs = BoxGlyphs {
    horizontal: '─',
    vertical: '│',
    corners: ['┌', '┐', '└', '┘'],
};

const FIELD_BOX: BoxGlyphs = BoxGlyphs {
    horizontal: '-',
    vertical: '|',
    corners: ['+', '+', '+', '+'],
};

// ── Layout ──

const TITLE: &str = ":|mines|:";
const BANNER_ROW: usize = 1;
const FIELD_ROW: usize = 2;
const FIELD_COL: usize = 1;
/// Rows taken by everything except the field window.
pub const RESERVED_ROWS: u16 = 4;
pub const RESERVED_COLS: u16 = 2;

const PLAYER_CHAR: char = 'X';
const TRAIL_CHAR: char = 'x';
const MINE_CHAR: char = '◆';

const LOGO: &str = concat!(
    "  //| //||  ||  ||\\\\  |  ||---||",
    " // |// ||  ||  || \\\\ |  ||-||  ",
    "//      ||  ||  ||  \\\\|  ||---||",
);
const LOGO_W: usize = 32;
const LOGO_H: usize = 3;

/// Colour and attribute for a trail signal.
fn signal_style(signal: Signal) -> (Color, Attribute) {
    match signal {
        Signal::Normal => (Color::Grey, Attribute::Reset),
        Signal::Bold => (Color::White, Attribute::Bold),
        Signal::Standout => (Color::Yellow, Attribute::Reverse),
        Signal::Blink => (Color::Red, Attribute::SlowBlink),
    }
}

fn field_to_screen(p: Position) -> (usize, usize) {
    (FIELD_COL + p.x.max(0) as usize, FIELD_ROW + p.y.max(0) as usize)
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    /// Where the terminal cursor is parked after a flush.
    cursor_at: Option<(usize, usize)>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            cursor_at: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        self.sync_size()?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Pick up the terminal size; on change, force a full repaint.
    fn sync_size(&mut self) -> io::Result<()> {
        let (tw, th) = terminal::size()?;
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, Clear(ClearType::All))?;
        }
        Ok(())
    }

    pub fn render(&mut self, game: &Game) -> io::Result<()> {
        self.sync_size()?;
        self.front.clear();
        self.compose_game(game);
        self.cursor_at = Some(field_to_screen(game.field.player.pos));
        self.present()
    }

    /// Logo drawn inward from both ends, two glyphs per frame.
    pub fn splash(&mut self, frame: Duration) -> io::Result<()> {
        self.sync_size()?;
        self.front.clear();
        self.cursor_at = None;
        let logo: Vec<char> = LOGO.chars().collect();
        let ox = (self.term_w / 2).saturating_sub(LOGO_W / 2);
        let oy = (self.term_h / 3).saturating_sub(LOGO_H / 2);

        let mut j = logo.len();
        for i in 0..logo.len() / 2 {
            j -= 1;
            self.front.set(ox + i % LOGO_W, oy + i / LOGO_W, Cell::plain(logo[i]));
            self.front.set(ox + j % LOGO_W, oy + j / LOGO_W, Cell::plain(logo[j]));
            self.flush_diff()?;
            self.back = self.front.clone();
            thread::sleep(frame);
        }
        Ok(())
    }

    /// Centered three-row box over the last frame.
    pub fn message_box(&mut self, msg: &str) -> io::Result<()> {
        self.front = self.back.clone();
        self.compose_message(msg);
        self.present()
    }

    /// Reverse-video the whole screen for `hold`, then restore it.
    pub fn flash(&mut self, hold: Duration) -> io::Result<()> {
        let shown = self.back.clone();
        self.front = shown.clone();
        for cell in &mut self.front.cells {
            cell.attr = Attribute::Reverse;
        }
        self.present()?;
        thread::sleep(hold);
        self.front = shown;
        self.present()
    }

    fn present(&mut self) -> io::Result<()> {
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::Reset;
        let mut last_attr = Attribute::Reset;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, cursor::Hide, SetAttribute(Attribute::Reset))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                // Attribute::Reset also drops the colour, so re-send it after.
                if cell.attr != last_attr {
                    queue!(self.writer, SetAttribute(Attribute::Reset))?;
                    if cell.attr != Attribute::Reset {
                        queue!(self.writer, SetAttribute(cell.attr))?;
                    }
                    last_attr = cell.attr;
                    last_fg = Color::Reset;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        if let Some((cx, cy)) = self.cursor_at {
            queue!(self.writer, MoveTo(cx as u16, cy as u16), cursor::Show)?;
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, game: &Game) {
        let (w, h) = (self.front.width, self.front.height);

        self.front.draw_box(0, 0, w, h, SCREEN_BOX);
        self.front.put_str(w / 2, 0, TITLE, Color::Reset, Attribute::Reset);
        self.front.put_str(FIELD_COL, BANNER_ROW, &game.score.to_string(), Color::Reset, Attribute::Reset);
        if h >= 2 {
            self.front.put_str(FIELD_COL, h - 2, HELP_TEXT, Color::DarkGrey, Attribute::Reset);
        }

        let field = &game.field;
        self.front.draw_box(
            FIELD_COL,
            FIELD_ROW,
            field.dims.width as usize,
            field.dims.height as usize,
            FIELD_BOX,
        );

        for (&pos, &signal) in &field.trail {
            let (fg, attr) = signal_style(signal);
            let (sx, sy) = field_to_screen(pos);
            self.front.set(sx, sy, Cell::new(TRAIL_CHAR, fg, attr));
        }

        if field.revealed {
            for mine in &field.mines {
                let (sx, sy) = field_to_screen(mine.pos);
                self.front.set(sx, sy, Cell::new(MINE_CHAR, Color::DarkGrey, Attribute::Dim));
            }
        }

        let (fg, attr) = signal_style(field.player.trail);
        let (sx, sy) = field_to_screen(field.player.pos);
        self.front.set(sx, sy, Cell::new(PLAYER_CHAR, fg, attr));
    }

    fn compose_message(&mut self, msg: &str) {
        let w = msg.chars().count() + 2;
        let h = 3;
        let x = (self.front.width / 2).saturating_sub(w / 2);
        let y = (self.front.height / 2).saturating_sub(h / 2);
        for cy in y..y + h {
            for cx in x..x + w {
                self.front.set(cx, cy, Cell::BLANK);
            }
        }
        self.front.draw_box(x, y, w, h, FIELD_BOX);
        self.front.put_str(x + 1, y + 1, msg, Color::Reset, Attribute::Bold);
    }
}
