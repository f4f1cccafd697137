//! Display and asset settings
//!
//! Supplied by the host page at mount time. Nothing here is persisted; a
//! page reload starts from defaults again.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Sprite image locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpritePaths {
    pub player: String,
    pub coin: String,
    pub enemy: String,
}

impl Default for SpritePaths {
    fn default() -> Self {
        Self {
            player: "assets/sprites/player.svg".to_string(),
            coin: "assets/sprites/coin.svg".to_string(),
            enemy: "assets/sprites/enemy.svg".to_string(),
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Device pixel ratio cap (sharper than 2x costs fill rate for no gain)
    pub max_device_pixel_ratio: f64,
    /// Widest the canvas is laid out, in CSS pixels
    pub max_css_width: f64,
    /// Sprite images; any that fail to load are drawn as shapes
    pub sprites: SpritePaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_device_pixel_ratio: 2.0,
            max_css_width: 960.0,
            sprites: SpritePaths::default(),
        }
    }
}

/// Everything the host may pass when mounting a game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub settings: Settings,
    pub tuning: Tuning,
}

impl GameOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse options, falling back to defaults on malformed input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed game options: {}", e);
                Self::default()
            }),
        }
    }
}
