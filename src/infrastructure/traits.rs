//! I/O boundary traits for testability
//!
//! The session talks to the terminal only through these traits, so it can
//! be driven by scripted key sequences in tests.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Source of key events.
pub trait EventSource {
    /// Block until the next key event. `None` means the input is exhausted.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Destination of rendered frames.
pub trait FrameSink {
    /// Replace whatever was shown before with `frame`.
    fn draw(&mut self, frame: &str) -> io::Result<()>;
}

// ============================================================
// IN-MEMORY IMPLEMENTATIONS
// ============================================================

/// Replays a fixed list of key events.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<KeyEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Plain key presses without modifiers.
    pub fn from_codes(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::new(
            codes
                .into_iter()
                .map(|code| KeyEvent::new(code, KeyModifiers::NONE)),
        )
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Keeps every frame drawn, oldest first.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<String>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl FrameSink for RecordingSink {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }
}
