//! Gameplay tuning
//!
//! Every physics and scoring constant the simulation step uses. Values are
//! per tick at 60 Hz and assume the logical 800x450 world.

use serde::{Deserialize, Serialize};

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Horizontal movement ===
    /// Velocity gained per tick while a direction is held
    pub accel: f32,
    /// Horizontal speed cap
    pub max_vx: f32,
    /// Velocity multiplier per tick with no direction held
    pub friction: f32,
    /// Horizontal speed below this snaps to zero when coasting
    pub stop_epsilon: f32,

    // === Vertical movement ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_vy: f32,
    /// Depth below a platform's underside that still counts as a landing
    pub land_band: f32,

    // === Enemies ===
    /// Top penetration under this while descending is a stomp
    pub stomp_depth: f32,
    /// Bounce after a stomp, as a fraction of `jump_vy`
    pub stomp_bounce: f32,
    /// Invulnerability after taking damage (ms)
    pub invulnerable_ms: f64,
    /// Horizontal knockback on damage
    pub knockback: f32,
    /// Knockback never pushes the player closer than this to a world edge
    pub knockback_margin: f32,

    // === Coins ===
    /// Added to the coin radius for the pickup distance
    pub pickup_margin: f32,

    // === Scoring ===
    pub coin_score: u32,
    pub stomp_score: u32,

    // === Lives ===
    pub starting_lives: u32,
    /// How far below the world the player may fall before losing a life
    pub fall_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        // Pixel scale the movement values are expressed in
        let scale = 2.0;
        Self {
            accel: 0.7 * scale,
            max_vx: 3.0 * scale,
            friction: 0.8,
            stop_epsilon: 0.05,

            gravity: 0.5 * scale,
            jump_vy: -10.0 * scale,
            land_band: 16.0,

            stomp_depth: 12.0,
            stomp_bounce: 0.7,
            invulnerable_ms: 1500.0,
            knockback: 40.0,
            knockback_margin: 20.0,

            pickup_margin: 8.0,

            coin_score: 100,
            stomp_score: 200,

            starting_lives: 3,
            fall_margin: 50.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Upward velocity after bouncing off an enemy
    pub fn stomp_vy(&self) -> f32 {
        self.jump_vy * self.stomp_bounce
    }
}
