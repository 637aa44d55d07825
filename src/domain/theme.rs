//! Rendering configuration threaded into the renderer and item labels.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;

/// Which kind of value a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Group,
    Category,
    Leaf,
}

/// 24-bit color parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color must start with '#': {s}"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("color must be #RRGGBB: {s}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color: {s}"))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Color scheme and marker glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Emit ANSI styling at all
    pub color: bool,
    /// Marker in front of the node under the cursor
    pub cursor_marker: char,
    /// Marker in front of every other node
    pub blank_marker: char,
    pub group: Rgb,
    pub category: Rgb,
    pub leaf: Rgb,
    /// Bold group and category labels
    pub bold_groups: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            color: true,
            cursor_marker: '>',
            blank_marker: ' ',
            group: Rgb(0x89, 0xCF, 0xF0),
            category: Rgb(0xFF, 0x00, 0x00),
            leaf: Rgb(0xFF, 0xFF, 0xFF),
            bold_groups: true,
        }
    }
}

impl Theme {
    /// Default glyphs without any styling.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    pub fn marker(&self, is_cursor: bool) -> char {
        if is_cursor {
            self.cursor_marker
        } else {
            self.blank_marker
        }
    }

    /// Style `text` for `role`. Never changes the printed width.
    pub fn paint(&self, role: Role, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let Rgb(r, g, b) = match role {
            Role::Group => self.group,
            Role::Category => self.category,
            Role::Leaf => self.leaf,
        };
        let styled = text.truecolor(r, g, b);
        match role {
            Role::Group | Role::Category if self.bold_groups => styled.bold().to_string(),
            _ => styled.to_string(),
        }
    }
}
