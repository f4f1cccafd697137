//! Game state and core simulation types
//!
//! Plain data: the world, the player and the level entities. Behaviour lives
//! in [`super::tick`]; the only methods here are accessors and resets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level;
use crate::consts::*;
use crate::tuning::Tuning;

/// Run status as reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Created, not yet started
    #[serde(rename = "ready")]
    Ready,
    /// Active gameplay
    #[serde(rename = "running")]
    Running,
    /// Frozen by the player
    #[serde(rename = "paused")]
    Paused,
    /// Out of lives; only a full reset leaves this state
    #[serde(rename = "game over")]
    GameOver,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Ready => "ready",
            RunStatus::Running => "running",
            RunStatus::Paused => "paused",
            RunStatus::GameOver => "game over",
        }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// World dimensions and run state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Top of the ground strip
    pub ground_y: f32,
    pub status: RunStatus,
    /// Simulation frozen; implies `Paused` or `GameOver`
    pub paused: bool,
    /// Host timestamp (ms) of the last full reset
    pub start_time_ms: f64,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ground_y: height - GROUND_OFFSET,
            status: RunStatus::Ready,
            paused: false,
            start_time_ms: 0.0,
        }
    }

    /// Whole seconds since the last full reset
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        ((now_ms - self.start_time_ms) / 1000.0).floor().max(0.0) as u64
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Top edge before the last integration, for one-way platforms
    pub prev_y: f32,
    pub on_ground: bool,
    pub facing: Facing,
    /// Host timestamp (ms) until which enemy contact is ignored
    pub invulnerable_until_ms: f64,
    pub lives: u32,
    pub score: u32,
    pub coins: u32,
}

impl Player {
    pub fn new(spawn: Vec2, lives: u32) -> Self {
        Self {
            pos: spawn,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            prev_y: spawn.y,
            on_ground: false,
            facing: Facing::Right,
            invulnerable_until_ms: 0.0,
            lives,
            score: 0,
            coins: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Contact is ignored up to and including the end of the window
    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        now_ms <= self.invulnerable_until_ms
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
}

impl Coin {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            taken: false,
        }
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity per tick
    pub vx: f32,
    /// Patrol band
    pub left: f32,
    pub right: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move one tick, turning around once outside the patrol band
    pub fn patrol(&mut self) {
        self.pos.x += self.vx;
        if self.pos.x < self.left || self.pos.x + self.size.x > self.right {
            self.vx = -self.vx;
        }
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub world: World,
    pub player: Player,
    /// Static for the session
    pub platforms: Vec<Rect>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
}

impl GameState {
    /// Create the level in the `Ready` state
    pub fn new(tuning: &Tuning) -> Self {
        let world = World::new(LOGICAL_WIDTH, LOGICAL_HEIGHT);
        let ground_y = world.ground_y;
        let player = Player::new(Self::spawn_point(&world), tuning.starting_lives);
        Self {
            world,
            player,
            platforms: level::platforms(ground_y),
            coins: level::coins(ground_y),
            enemies: level::enemies(ground_y),
        }
    }

    pub fn spawn_point(world: &World) -> Vec2 {
        Vec2::new(SPAWN_X, world.ground_y - SPAWN_ABOVE_GROUND)
    }

    /// Respawn after a fall: position and motion only
    pub fn partial_reset(&mut self) {
        let spawn = Self::spawn_point(&self.world);
        let p = &mut self.player;
        p.pos = spawn;
        p.prev_y = spawn.y;
        p.vel = Vec2::ZERO;
        p.on_ground = false;
        p.facing = Facing::Right;
        self.world.status = RunStatus::Running;
    }

    /// Restart the run: lives, score, coins and the clock as well
    pub fn full_reset(&mut self, tuning: &Tuning, now_ms: f64) {
        self.partial_reset();
        let p = &mut self.player;
        p.lives = tuning.starting_lives;
        p.score = 0;
        p.coins = 0;
        p.invulnerable_until_ms = 0.0;
        for coin in &mut self.coins {
            coin.taken = false;
        }
        self.world.start_time_ms = now_ms;
        self.world.paused = false;
        self.world.status = RunStatus::Running;
    }

    /// Take a life; returns true when that was the last one
    pub fn lose_life(&mut self) -> bool {
        self.player.lives = self.player.lives.saturating_sub(1);
        if self.player.lives == 0 {
            self.world.status = RunStatus::GameOver;
            self.world.paused = true;
            log::info!("Game over with score {}", self.player.score);
            true
        } else {
            false
        }
    }

    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| !c.taken).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.full_reset(&tuning, 0.0);
        state
    }

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(&Tuning::default());
        assert_eq!(state.world.status, RunStatus::Ready);
        assert!(!state.world.paused);
        assert!(state.world.ground_y < state.world.height);
        assert_eq!(state.world.ground_y, 410.0);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.coins_remaining(), 4);
    }

    #[test]
    fn test_full_reset_restores_everything() {
        let tuning = Tuning::default();
        let mut state = started();
        state.player.pos = Vec2::new(500.0, 20.0);
        state.player.vel = Vec2::new(4.0, -7.0);
        state.player.facing = Facing::Left;
        state.player.lives = 0;
        state.player.score = 1200;
        state.player.coins = 3;
        for coin in &mut state.coins {
            coin.taken = true;
        }
        state.world.status = RunStatus::GameOver;
        state.world.paused = true;

        state.full_reset(&tuning, 5_000.0);

        assert_eq!(state.player.pos, Vec2::new(60.0, 378.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.coins, 0);
        assert!(state.coins.iter().all(|c| !c.taken));
        assert_eq!(state.world.status, RunStatus::Running);
        assert!(!state.world.paused);
        assert_eq!(state.world.start_time_ms, 5_000.0);
    }

    #[test]
    fn test_partial_reset_keeps_progress() {
        let mut state = started();
        state.player.pos = Vec2::new(300.0, 600.0);
        state.player.vel = Vec2::new(-3.0, 12.0);
        state.player.on_ground = true;
        state.player.facing = Facing::Left;
        state.player.lives = 2;
        state.player.score = 300;
        state.player.coins = 1;
        state.coins[0].taken = true;

        state.partial_reset();

        assert_eq!(state.player.pos, GameState::spawn_point(&state.world));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.on_ground);
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.score, 300);
        assert_eq!(state.player.coins, 1);
        assert!(state.coins[0].taken);
    }

    #[test]
    fn test_lose_last_life_ends_game() {
        let mut state = started();
        state.player.lives = 2;
        assert!(!state.lose_life());
        assert_eq!(state.world.status, RunStatus::Running);
        assert!(state.lose_life());
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.world.status, RunStatus::GameOver);
        assert!(state.world.paused);
        // Never wraps below zero
        state.lose_life();
        assert_eq!(state.player.lives, 0);
    }

    #[test]
    fn test_enemy_turns_outside_patrol() {
        let mut e = Enemy {
            pos: Vec2::new(96.0, 0.0),
            size: Vec2::new(16.0, 16.0),
            vx: 3.0,
            left: 0.0,
            right: 112.0,
        };
        e.patrol();
        assert_eq!(e.pos.x, 99.0);
        assert_eq!(e.vx, -3.0);
        e.patrol();
        assert_eq!(e.pos.x, 96.0);
        assert_eq!(e.vx, -3.0);
    }

    #[test]
    fn test_elapsed_secs_floors() {
        let mut world = World::new(800.0, 450.0);
        world.start_time_ms = 1_000.0;
        assert_eq!(world.elapsed_secs(1_999.0), 0);
        assert_eq!(world.elapsed_secs(2_000.0), 1);
        assert_eq!(world.elapsed_secs(500.0), 0);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(RunStatus::GameOver.as_str(), "game over");
        assert_eq!(
            serde_json::to_string(&RunStatus::GameOver).unwrap(),
            "\"game over\""
        );
        assert_eq!(serde_json::to_string(&RunStatus::Ready).unwrap(), "\"ready\"");
    }
}
