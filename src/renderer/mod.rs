//! Rendering module
//!
//! Frames are composed into a backend-independent draw list
//! ([`scene::compose`]) and executed by the Canvas 2D backend in the browser.

pub mod colors;
pub mod scene;
pub mod sprites;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, compose};
pub use sprites::{LoadState, SpriteAvailability, SpriteKind};
pub use viewport::Viewport;
