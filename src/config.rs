//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/clitree/clitree.toml`
//! 3. Explicit config: `--config <file>`
//! 4. Environment variables: `CLITREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use unicode_width::UnicodeWidthChar;

use crate::application::ApplicationError;
use crate::domain::{Rgb, Theme};

const ENV_PREFIX: &str = "CLITREE";
const KEY_LISTS: [&str; 5] = ["keys.up", "keys.down", "keys.back", "keys.activate", "keys.quit"];

/// Colors and glyphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeSettings {
    /// Emit ANSI colors
    pub color: bool,
    /// Marker of the node under the cursor
    pub cursor_marker: char,
    /// Marker of every other node
    pub blank_marker: char,
    /// Top-level group color (#RRGGBB)
    pub group_color: String,
    /// Category color (#RRGGBB)
    pub category_color: String,
    /// Leaf value color (#RRGGBB)
    pub leaf_color: String,
    /// Bold group and category labels
    pub bold_groups: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            color: theme.color,
            cursor_marker: theme.cursor_marker,
            blank_marker: theme.blank_marker,
            group_color: theme.group.to_string(),
            category_color: theme.category.to_string(),
            leaf_color: theme.leaf.to_string(),
            bold_groups: theme.bold_groups,
        }
    }
}

impl ThemeSettings {
    /// Validate and convert into the renderer's theme.
    ///
    /// Markers must be one column wide, otherwise rows stop lining up.
    pub fn to_theme(&self) -> Result<Theme, ApplicationError> {
        for (name, marker) in [
            ("cursor_marker", self.cursor_marker),
            ("blank_marker", self.blank_marker),
        ] {
            if marker.width() != Some(1) {
                return Err(ApplicationError::Config {
                    message: format!("theme.{name} must be one column wide: {marker:?}"),
                });
            }
        }
        let color = |name: &str, value: &str| {
            value.parse::<Rgb>().map_err(|reason| ApplicationError::Config {
                message: format!("theme.{name}: {reason}"),
            })
        };
        Ok(Theme {
            color: self.color,
            cursor_marker: self.cursor_marker,
            blank_marker: self.blank_marker,
            group: color("group_color", &self.group_color)?,
            category: color("category_color", &self.category_color)?,
            leaf: color("leaf_color", &self.leaf_color)?,
            bold_groups: self.bold_groups,
        })
    }
}

/// Key specs per logical action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeySettings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub back: Vec<String>,
    pub activate: Vec<String>,
    /// `enter` quits by default; move it to `activate` for the conventional behavior
    pub quit: Vec<String>,
}

impl Default for KeySettings {
    fn default() -> Self {
        let keys = |specs: &[&str]| specs.iter().map(|s| s.to_string()).collect();
        Self {
            up: keys(&["up", "k"]),
            down: keys(&["down", "j"]),
            back: keys(&["left", "h", "backspace", "delete"]),
            activate: keys(&["right", "l"]),
            quit: keys(&["q", "ctrl+c", "enter"]),
        }
    }
}

/// Raw theme for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawThemeSettings {
    pub color: Option<bool>,
    pub cursor_marker: Option<char>,
    pub blank_marker: Option<char>,
    pub group_color: Option<String>,
    pub category_color: Option<String>,
    pub leaf_color: Option<String>,
    pub bold_groups: Option<bool>,
}

/// Raw key lists for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawKeySettings {
    pub up: Option<Vec<String>>,
    pub down: Option<Vec<String>>,
    pub back: Option<Vec<String>>,
    pub activate: Option<Vec<String>>,
    pub quit: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub theme: RawThemeSettings,
    pub keys: RawKeySettings,
}

/// Unified configuration for clitree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeSettings,
    pub keys: KeySettings,
}

/// Get the XDG config directory for clitree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "clitree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("clitree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value. Key lists replace, they never union:
    /// a union could not take `enter` away from quit.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let theme = &overlay.theme;
        let keys = &overlay.keys;
        Self {
            theme: ThemeSettings {
                color: theme.color.unwrap_or(self.theme.color),
                cursor_marker: theme.cursor_marker.unwrap_or(self.theme.cursor_marker),
                blank_marker: theme.blank_marker.unwrap_or(self.theme.blank_marker),
                group_color: theme
                    .group_color
                    .clone()
                    .unwrap_or_else(|| self.theme.group_color.clone()),
                category_color: theme
                    .category_color
                    .clone()
                    .unwrap_or_else(|| self.theme.category_color.clone()),
                leaf_color: theme
                    .leaf_color
                    .clone()
                    .unwrap_or_else(|| self.theme.leaf_color.clone()),
                bold_groups: theme.bold_groups.unwrap_or(self.theme.bold_groups),
            },
            keys: KeySettings {
                up: keys.up.clone().unwrap_or_else(|| self.keys.up.clone()),
                down: keys.down.clone().unwrap_or_else(|| self.keys.down.clone()),
                back: keys.back.clone().unwrap_or_else(|| self.keys.back.clone()),
                activate: keys
                    .activate
                    .clone()
                    .unwrap_or_else(|| self.keys.activate.clone()),
                quit: keys.quit.clone().unwrap_or_else(|| self.keys.quit.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/clitree/clitree.toml`
    /// 3. Explicit config file (must exist)
    /// 4. Environment variables: `CLITREE_*` prefix
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(
            global_config_path().as_deref(),
            explicit,
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Load from explicit layer sources. `global` is skipped when missing,
    /// `explicit` must exist.
    #[instrument(level = "debug", skip(env))]
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!(path = %path.display(), "loading explicit config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    /// Apply CLITREE_* environment variables as explicit overrides.
    ///
    /// `CLITREE_THEME__COLOR=false`, `CLITREE_KEYS__QUIT=q,esc`.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let mut env = env
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for key in KEY_LISTS {
            env = env.with_list_parse_key(key);
        }
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("theme.color") {
            settings.theme.color = val;
        }
        if let Ok(val) = config.get_bool("theme.bold_groups") {
            settings.theme.bold_groups = val;
        }
        if let Ok(val) = config.get_string("theme.cursor_marker") {
            settings.theme.cursor_marker = single_char("theme.cursor_marker", &val)?;
        }
        if let Ok(val) = config.get_string("theme.blank_marker") {
            settings.theme.blank_marker = single_char("theme.blank_marker", &val)?;
        }
        if let Ok(val) = config.get_string("theme.group_color") {
            settings.theme.group_color = val;
        }
        if let Ok(val) = config.get_string("theme.category_color") {
            settings.theme.category_color = val;
        }
        if let Ok(val) = config.get_string("theme.leaf_color") {
            settings.theme.leaf_color = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("keys.up") {
            settings.keys.up = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("keys.down") {
            settings.keys.down = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("keys.back") {
            settings.keys.back = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("keys.activate") {
            settings.keys.activate = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("keys.quit") {
            settings.keys.quit = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# clitree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/clitree/clitree.toml
#   Explicit: clitree --config <file>
#   Env:      CLITREE_* environment variables, e.g. CLITREE_THEME__COLOR=false
#
# Each layer replaces what it specifies; key lists are replaced, not merged.

[theme]
# color = true
# cursor_marker = ">"
# blank_marker = " "
# group_color = "#89CFF0"
# category_color = "#FF0000"
# leaf_color = "#FFFFFF"
# bold_groups = true

[keys]
# Key specs: single characters, named keys (up, down, left, right, enter,
# esc, backspace, delete, tab, space, home, end, pageup, pagedown, f1-f12)
# and modifiers joined with '+' (ctrl+c, alt+x).
# up = ["up", "k"]
# down = ["down", "j"]
# back = ["left", "h", "backspace", "delete"]
# activate = ["right", "l"]
#
# enter quits by default. To make it activate instead:
#   activate = ["right", "l", "enter"]
#   quit = ["q", "ctrl+c"]
# quit = ["q", "ctrl+c", "enter"]
"##
        .to_string()
    }
}

fn single_char(key: &str, value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("{key} must be a single character: {value:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
