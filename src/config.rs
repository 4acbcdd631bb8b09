use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "snake-arcade";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_FILE_NAME: &str = "snake-arcade.log";

/// Base tick interval in milliseconds (10 ticks per second).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum dominant-axis displacement, in swipe units, before a swipe resolves.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 20.0;

/// Swipe units covered by one terminal column during a mouse drag.
pub const SWIPE_UNITS_PER_COLUMN: f64 = 10.0;

/// Swipe units covered by one terminal row during a mouse drag.
///
/// Terminal cells are roughly twice as tall as they are wide.
pub const SWIPE_UNITS_PER_ROW: f64 = 20.0;

/// Terminal columns used to draw one grid tile, so tiles look square.
pub const TILE_COLUMNS: u16 = 2;

/// Rows reserved below the play area for the HUD and on-screen controls.
pub const HUD_HEIGHT: u16 = 3;

/// Rows and columns taken by the play-area border.
pub const BORDER_THICKNESS: u16 = 2;

/// Frames the play area shakes for after a game over.
pub const SHAKE_FRAMES: u8 = 8;

/// Redraw cadence of the main loop when no tick is due.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub play_bg: Color,
    pub grid_dot: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub hud_muted: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_disabled: Color,
    pub overlay_title: Color,
}

/// Dark slate board with an emerald snake and red food.
pub const THEME: Theme = Theme {
    play_bg: Color::Rgb(17, 24, 39),
    grid_dot: Color::Rgb(31, 41, 55),
    snake_head: Color::Rgb(110, 231, 183),
    snake_body: Color::Rgb(52, 211, 153),
    food: Color::Rgb(239, 68, 68),
    border_fg: Color::Rgb(75, 85, 99),
    hud_text: Color::White,
    hud_accent: Color::Rgb(52, 211, 153),
    hud_muted: Color::DarkGray,
    button_fg: Color::White,
    button_bg: Color::Rgb(55, 65, 81),
    button_disabled: Color::Rgb(75, 85, 99),
    overlay_title: Color::Rgb(239, 68, 68),
};

/// Errors that make a session impossible to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("grid {width}x{height} leaves no room for food")]
    GridTooSmall { width: u16, height: u16 },
    #[error("terminal area {columns}x{rows} is too small to hold a grid")]
    ViewportTooSmall { columns: u16, rows: u16 },
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
    #[error("swipe threshold must be positive, got {0}")]
    InvalidSwipeThreshold(f64),
    #[error("failed to read settings file {}: {source}", .path.display())]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {}: {source}", .path.display())]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Optional overrides read from the JSON settings file.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid_width: Option<u16>,
    pub grid_height: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub swipe_threshold: Option<f64>,
    pub sound: Option<bool>,
    pub mouse: Option<bool>,
}

/// Fully resolved runtime options.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixed grid size; `None` derives the grid from the terminal viewport.
    pub grid: Option<(u16, u16)>,
    pub tick_interval_ms: u64,
    pub swipe_threshold: f64,
    pub sound: bool,
    pub mouse: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            sound: true,
            mouse: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Applies file settings on top of the defaults.
    #[must_use]
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let (Some(width), Some(height)) = (settings.grid_width, settings.grid_height) {
            self.grid = Some((width, height));
        }
        if let Some(ms) = settings.tick_interval_ms {
            self.tick_interval_ms = ms;
        }
        if let Some(threshold) = settings.swipe_threshold {
            self.swipe_threshold = threshold;
        }
        if let Some(sound) = settings.sound {
            self.sound = sound;
        }
        if let Some(mouse) = settings.mouse {
            self.mouse = mouse;
        }
        self
    }

    /// Rejects values no session can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.swipe_threshold.is_nan() || self.swipe_threshold <= 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(self.swipe_threshold));
        }
        if let Some((width, height)) = self.grid {
            crate::grid::GridSize::new(width, height)?;
        }
        Ok(())
    }
}

/// Returns the platform-correct default settings file path.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// A missing file yields defaults only when `required` is false, so an
/// explicitly requested file that does not exist is still reported.
pub fn load_settings(path: &Path, required: bool) -> Result<Settings, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::ReadSettings {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::ParseSettings {
        path: path.to_path_buf(),
        source,
    })
}
