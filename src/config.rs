use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "snack-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Fixed board size in cells.
pub const BOARD: GridSize = GridSize {
    width: 30,
    height: 20,
};

/// Tick interval a fresh game starts with.
pub const DEFAULT_SPEED_MS: u64 = 200;

/// Lower bound for the tick interval.
pub const MIN_SPEED_MS: u64 = 50;

/// Tick interval reduction applied by each pizza.
pub const PIZZA_SPEED_STEP_MS: u64 = 100;

/// How long a mushroom keeps the controls reversed.
pub const REVERSED_CONTROLS_MS: u64 = 3000;

/// Number of food items kept on the board.
pub const ACTIVE_FOOD_TARGET: usize = 3;

/// Frame pacing of the render loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub cherry: Color,
    pub mushroom: Color,
    pub pizza: Color,
    pub rotten_tomato: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub hud_alert: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    cherry: Color::Red,
    mushroom: Color::Rgb(150, 90, 40),
    pizza: Color::Yellow,
    rotten_tomato: Color::Magenta,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    hud_alert: Color::LightMagenta,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▓";
pub const GLYPH_CHERRY: &str = "●";
pub const GLYPH_MUSHROOM: &str = "♠";
pub const GLYPH_PIZZA: &str = "◆";
pub const GLYPH_ROTTEN_TOMATO: &str = "✖";

/// Gameplay tunables that may be overridden from a JSON settings file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub initial_speed_ms: u64,
    pub pizza_speed_step_ms: u64,
    pub reversed_controls_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_speed_ms: DEFAULT_SPEED_MS,
            pizza_speed_step_ms: PIZZA_SPEED_STEP_MS,
            reversed_controls_ms: REVERSED_CONTROLS_MS,
        }
    }
}

impl GameSettings {
    /// Loads settings from `explicit`, or from the user config directory.
    ///
    /// A missing file in the user config directory yields the defaults; a
    /// missing file given explicitly is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => match settings_path() {
                Some(path) if path.exists() => Self::load_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads and validates one settings file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(self) -> Result<(), ConfigError> {
        if self.initial_speed_ms < MIN_SPEED_MS {
            return Err(ConfigError::Invalid(format!(
                "initial_speed_ms must be at least {MIN_SPEED_MS}, got {}",
                self.initial_speed_ms
            )));
        }
        if self.reversed_controls_ms == 0 {
            return Err(ConfigError::Invalid(
                "reversed_controls_ms must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn reversed_controls_duration(self) -> Duration {
        Duration::from_millis(self.reversed_controls_ms)
    }
}

/// Returns the platform-correct settings file path, if a config dir exists.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

/// Returns true when the settings file simply does not exist.
#[must_use]
pub fn is_missing_file(error: &ConfigError) -> bool {
    matches!(error, ConfigError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
}
