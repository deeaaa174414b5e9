use crate::frame::Frame;
use crate::projection::ScreenGrid;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;
use tracing::{debug, warn};

/// Raw-mode, alternate-screen session on stdout.
///
/// Acquired once at startup and restored on every exit path: explicitly via
/// [`Terminal::restore`], or by `Drop` if the caller unwinds.
pub struct Terminal {
    active: bool,
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut term = Self { active: true };
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, Hide) {
            term.restore();
            return Err(e);
        }
        debug!("terminal acquired");
        Ok(term)
    }

    /// Live terminal dimensions, queried on every call
    pub fn grid(&self) -> io::Result<ScreenGrid> {
        let (cols, rows) = size()?;
        Ok(ScreenGrid::new(rows, cols))
    }

    /// Clear the screen and draw `frame` in one write
    pub fn present(&self, frame: &Frame) -> io::Result<()> {
        write_frame(&mut stdout().lock(), frame)
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            return Ok(key_press(read()?));
        }
        Ok(None)
    }

    /// Leave the alternate screen and raw mode. Best effort: every step is
    /// attempted even if an earlier one fails. Safe to call more than once.
    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Err(e) = execute!(stdout(), Show, LeaveAlternateScreen) {
            warn!("failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {}", e);
        }
        debug!("terminal restored");
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Key presses only; release and repeat events are dropped
fn key_press(event: Event) -> Option<(KeyCode, KeyModifiers)> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some((key.code, key.modifiers)),
        _ => None,
    }
}

/// Encode the whole frame, then hand it to `out` as one buffer
fn write_frame<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    let mut buf = Vec::with_capacity(16 * 1024);
    encode_frame(&mut buf, frame)?;
    out.write_all(&buf)?;
    out.flush()
}

fn encode_frame<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    for (y, row) in frame.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if cell.ch == ' ' {
                continue;
            }
            queue!(out, MoveTo(x as u16, y as u16))?;

            if cell.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }

            if let Some(color) = cell.fg {
                queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
            } else {
                queue!(out, Print(cell.ch))?;
            }

            if cell.bold {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }
    }
    Ok(())
}
