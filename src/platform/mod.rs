//! Platform layer
//!
//! Browser mount and teardown: the animation-frame loop, keyboard, resize
//! and focus events, and the status callback to the host page. Native
//! builds have no platform layer; they drive [`crate::FrameDriver`]
//! directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{GameHandle, start_game};
