//! Crossterm-backed terminal: raw mode, alternate screen, full redraw per frame.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, instrument};

use crate::application::Session;
use crate::infrastructure::traits::{EventSource, FrameSink};
use crate::infrastructure::{InfraError, InfraResult};

/// Blocking key reader on the real terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            // Resize, focus and mouse events do not change the tree
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
    }
}

/// Clears the screen and prints each frame from the top-left corner.
pub struct TerminalScreen {
    stdout: Stdout,
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    fn enter(&mut self) -> io::Result<()> {
        enter_screen(&mut self.stdout, &mut CrosstermRawMode)
    }

    fn leave(&mut self) -> io::Result<()> {
        leave_screen(&mut self.stdout, &mut CrosstermRawMode)
    }
}

/// Raw mode switch, kept apart from the screen commands.
trait RawMode {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

struct CrosstermRawMode;

impl RawMode for CrosstermRawMode {
    fn enable(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// Raw mode is off again whenever this returns an error.
fn enter_screen<W: Write, R: RawMode>(out: &mut W, raw: &mut R) -> io::Result<()> {
    raw.enable()?;
    if let Err(e) = execute!(out, EnterAlternateScreen, cursor::Hide) {
        // The screen error is the one worth reporting
        raw.disable().ok();
        return Err(e);
    }
    Ok(())
}

/// Raw mode is disabled even when the screen commands fail.
fn leave_screen<W: Write, R: RawMode>(out: &mut W, raw: &mut R) -> io::Result<()> {
    let shown = execute!(out, cursor::Show, LeaveAlternateScreen);
    let disabled = raw.disable();
    shown.and(disabled)
}

impl FrameSink for TerminalScreen {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        execute!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        // Raw mode does not translate \n into a carriage return
        for line in frame.lines() {
            write!(self.stdout, "{line}\r\n")?;
        }
        self.stdout.flush()
    }
}

/// Run `session` on the real terminal. The terminal is restored even when the loop fails.
#[instrument(level = "debug", skip_all)]
pub fn run_session(session: &mut Session) -> InfraResult<()> {
    let mut screen = TerminalScreen::new();
    screen
        .enter()
        .map_err(|e| InfraError::io("enter raw mode", e))?;
    debug!("terminal in raw mode");

    let result = session.run(&mut TerminalEvents, &mut screen);

    // Always restore terminal state, even if run() fails
    let restored = screen
        .leave()
        .map_err(|e| InfraError::io("restore terminal", e));
    debug!("terminal restored");

    result?;
    restored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeRawMode {
        enabled: bool,
    }

    impl RawMode for FakeRawMode {
        fn enable(&mut self) -> io::Result<()> {
            self.enabled = true;
            Ok(())
        }

        fn disable(&mut self) -> io::Result<()> {
            self.enabled = false;
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_enter_screen_failure_disables_raw_mode() {
        let mut raw = FakeRawMode::default();
        let result = enter_screen(&mut BrokenPipe, &mut raw);
        assert!(result.is_err());
        assert!(!raw.enabled);
    }

    #[test]
    fn test_enter_screen_keeps_raw_mode_on_success() {
        let mut raw = FakeRawMode::default();
        let mut out = Vec::new();
        enter_screen(&mut out, &mut raw).unwrap();
        assert!(raw.enabled);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_leave_screen_failure_still_disables_raw_mode() {
        let mut raw = FakeRawMode { enabled: true };
        let result = leave_screen(&mut BrokenPipe, &mut raw);
        assert!(result.is_err());
        assert!(!raw.enabled);
    }
}
