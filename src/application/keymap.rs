//! Key bindings: physical keys → logical tree actions.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::KeySettings;
use crate::domain::TreeAction;

/// One physical key, parsed from specs like `q`, `up`, `ctrl+c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    /// Spec as written by the user, used in hints
    label: String,
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeySpec {
    pub fn new(label: impl Into<String>, code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            label: label.into(),
            code,
            modifiers,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Shift is ignored for character keys, the character already carries it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        event.code == self.code && modifiers == self.modifiers
    }

    fn same_key(&self, other: &KeySpec) -> bool {
        self.code == other.code && self.modifiers == other.modifiers
    }
}

impl FromStr for KeySpec {
    type Err = ApplicationError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let label = spec.trim();
        let invalid = |reason: &str| ApplicationError::KeyBinding {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        if label.is_empty() {
            return Err(invalid("empty key"));
        }

        let (modifier_part, key) = split_spec(label);

        let mut modifiers = KeyModifiers::NONE;
        for name in modifier_part.split(['+', '-']).filter(|name| !name.is_empty()) {
            modifiers |= match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid(&format!("unknown modifier `{name}`"))),
            };
        }

        let mut code =
            parse_key_code(key).ok_or_else(|| invalid(&format!("unknown key `{key}`")))?;

        // Terminals report shift+a as Char('A') and shift is ignored on characters
        if let KeyCode::Char(c) = code {
            if modifiers.contains(KeyModifiers::SHIFT) {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(shifted), None) => {
                        code = KeyCode::Char(shifted);
                        modifiers.remove(KeyModifiers::SHIFT);
                    }
                    _ => return Err(invalid(&format!("cannot shift `{c}`"))),
                }
            }
        }
        Ok(Self::new(label, code, modifiers))
    }
}

/// Split at the last separator before the final character, so `ctrl++` and
/// `ctrl+-` keep `+` and `-` as the key.
fn split_spec(label: &str) -> (&str, &str) {
    let Some(last) = label.chars().last() else {
        return ("", label);
    };
    let body = &label[..label.len() - last.len_utf8()];
    match body.rfind(['+', '-']) {
        Some(pos) => (&label[..pos], &label[pos + 1..]),
        None => ("", label),
    }
}

fn parse_key_code(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    let lowered = key.to_ascii_lowercase();
    let code = match lowered.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "insert" => KeyCode::Insert,
        other => {
            let number = other.strip_prefix('f')?.parse::<u8>().ok()?;
            if !(1..=12).contains(&number) {
                return None;
            }
            KeyCode::F(number)
        }
    };
    Some(code)
}

/// Ordered bindings; a physical key maps to at most one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(KeySpec, TreeAction)>,
}

impl Default for KeyMap {
    /// Arrows and vim keys; `enter` quits.
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let bindings = vec![
            (KeySpec::new("up", KeyCode::Up, none), TreeAction::Up),
            (KeySpec::new("k", KeyCode::Char('k'), none), TreeAction::Up),
            (KeySpec::new("down", KeyCode::Down, none), TreeAction::Down),
            (KeySpec::new("j", KeyCode::Char('j'), none), TreeAction::Down),
            (KeySpec::new("left", KeyCode::Left, none), TreeAction::Back),
            (KeySpec::new("h", KeyCode::Char('h'), none), TreeAction::Back),
            (KeySpec::new("backspace", KeyCode::Backspace, none), TreeAction::Back),
            (KeySpec::new("delete", KeyCode::Delete, none), TreeAction::Back),
            (KeySpec::new("right", KeyCode::Right, none), TreeAction::Activate),
            (KeySpec::new("l", KeyCode::Char('l'), none), TreeAction::Activate),
            (KeySpec::new("q", KeyCode::Char('q'), none), TreeAction::Quit),
            (
                KeySpec::new("ctrl+c", KeyCode::Char('c'), KeyModifiers::CONTROL),
                TreeAction::Quit,
            ),
            (KeySpec::new("enter", KeyCode::Enter, none), TreeAction::Quit),
        ];
        Self { bindings }
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Parse every configured key. Fails on unknown keys, on a key bound to
    /// two different actions, and when no quit key is left.
    #[instrument(level = "debug")]
    pub fn from_settings(keys: &KeySettings) -> ApplicationResult<Self> {
        let mut keymap = Self::empty();
        let groups = [
            (&keys.up, TreeAction::Up),
            (&keys.down, TreeAction::Down),
            (&keys.back, TreeAction::Back),
            (&keys.activate, TreeAction::Activate),
            (&keys.quit, TreeAction::Quit),
        ];
        for (specs, action) in groups {
            for spec in specs {
                keymap.bind(spec.parse()?, action)?;
            }
        }
        if keymap.quit_keys().is_empty() {
            return Err(ApplicationError::Config {
                message: "at least one quit key is required".to_string(),
            });
        }
        Ok(keymap)
    }

    pub fn bind(&mut self, spec: KeySpec, action: TreeAction) -> ApplicationResult<()> {
        if let Some((existing, bound)) = self.bindings.iter().find(|(s, _)| s.same_key(&spec)) {
            if *bound == action {
                return Ok(());
            }
            return Err(ApplicationError::KeyBinding {
                spec: spec.label.clone(),
                reason: format!("`{}` is already bound to {}", existing.label, bound),
            });
        }
        self.bindings.push((spec, action));
        Ok(())
    }

    /// Action for a key press. Releases, repeats and unbound keys yield None.
    pub fn resolve(&self, event: &KeyEvent) -> Option<TreeAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        self.bindings
            .iter()
            .find(|(spec, _)| spec.matches(event))
            .map(|(_, action)| *action)
    }

    /// Labels of the quit keys, in binding order.
    pub fn quit_keys(&self) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(_, action)| *action == TreeAction::Quit)
            .map(|(spec, _)| spec.label.clone())
            .collect()
    }
}
