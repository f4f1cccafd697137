//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per `tick` call, no wall-clock reads
//! - Fixed level layout, stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{Coin, Enemy, Facing, GameState, Player, RunStatus, World};
pub use tick::tick;
