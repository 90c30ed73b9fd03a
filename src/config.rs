// src/config.rs

//! Configuration structures for the canvas controller.
//!
//! Deserializable from a configuration file (TOML, JSON, ...), with defaults
//! matching the production deployment: 10 surface pixels per grid cell, a
//! 2 px drag threshold, and the neutral border tone used for the pending-edit
//! highlight.

use crate::color::Rgb;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Global default configuration.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Complete configuration for one canvas view.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Appearance-related settings.
    pub appearance: AppearanceConfig,
    /// Behavior-related settings.
    pub behavior: BehaviorConfig,
}

/// Visual settings of the drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Edge length of one grid cell in surface pixels.
    pub cell_size_px: u32,
    /// Neutral tone of the 1 px pending-edit border.
    pub pending_border: Rgb,
    /// Surface color behind the grid (visible only before the first decode).
    pub background: Rgb,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            cell_size_px: 10,
            pending_border: Rgb(0x55, 0x55, 0x55),
            background: Rgb(0x52, 0x52, 0x52),
        }
    }
}

/// Interaction behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Pointer displacement (Euclidean, in screen px) above which a press
    /// becomes a pan instead of a click.
    pub drag_threshold_px: f64,
    /// Step of the external zoom slider.
    pub zoom_slider_step: f64,
    /// Grid-state poll interval for spectator views. The timer itself is
    /// caller-owned; this is only the advertised default.
    pub spectate_refresh_secs: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            drag_threshold_px: 2.0,
            zoom_slider_step: 0.01,
            spectate_refresh_secs: 5,
        }
    }
}
