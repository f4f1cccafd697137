//! Sprite images
//!
//! Loading is fire-and-forget: each image reports its own [`LoadState`] and
//! the scene falls back to shapes for anything not `Ready`. A failed load is
//! logged and otherwise ignored.

/// The three sprite slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Coin,
    Enemy,
}

impl SpriteKind {
    pub fn name(self) -> &'static str {
        match self {
            SpriteKind::Player => "player",
            SpriteKind::Coin => "coin",
            SpriteKind::Enemy => "enemy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// Which sprites can be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteAvailability {
    pub player: bool,
    pub coin: bool,
    pub enemy: bool,
}

impl SpriteAvailability {
    /// Nothing loaded: pure shape rendering
    pub const NONE: Self = Self {
        player: false,
        coin: false,
        enemy: false,
    };

    pub const ALL: Self = Self {
        player: true,
        coin: true,
        enemy: true,
    };

    pub fn from_states(player: LoadState, coin: LoadState, enemy: LoadState) -> Self {
        Self {
            player: player == LoadState::Ready,
            coin: coin == LoadState::Ready,
            enemy: enemy == LoadState::Ready,
        }
    }

    pub fn has(&self, kind: SpriteKind) -> bool {
        match kind {
            SpriteKind::Player => self.player,
            SpriteKind::Coin => self.coin,
            SpriteKind::Enemy => self.enemy,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::SpriteSheet;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::{LoadState, SpriteAvailability, SpriteKind};
    use crate::settings::SpritePaths;

    struct Slot {
        image: HtmlImageElement,
        state: Rc<Cell<LoadState>>,
    }

    impl Slot {
        /// Start decoding `src`; the returned slot flips to Ready or Failed later
        fn load(kind: SpriteKind, src: &str) -> Option<Self> {
            let image = match HtmlImageElement::new() {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("Cannot create image for {} sprite: {:?}", kind.name(), e);
                    return None;
                }
            };
            image.set_src(src);

            let state = Rc::new(Cell::new(LoadState::Pending));
            let pending = state.clone();
            let decode = image.decode();
            let src = src.to_string();
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(decode).await {
                    Ok(_) => {
                        log::info!("Loaded {} sprite from {}", kind.name(), src);
                        pending.set(LoadState::Ready);
                    }
                    Err(e) => {
                        log::warn!(
                            "Falling back to shapes for {} sprite ({}): {}",
                            kind.name(),
                            src,
                            describe(&e)
                        );
                        pending.set(LoadState::Failed);
                    }
                }
            });

            Some(Self { image, state })
        }

        fn ready(&self) -> Option<&HtmlImageElement> {
            (self.state.get() == LoadState::Ready).then_some(&self.image)
        }
    }

    fn describe(e: &JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{:?}", e))
    }

    /// Player, coin and enemy images
    pub struct SpriteSheet {
        player: Option<Slot>,
        coin: Option<Slot>,
        enemy: Option<Slot>,
    }

    impl SpriteSheet {
        /// Kick off loading all three sprites; returns immediately
        pub fn load(paths: &SpritePaths) -> Self {
            Self {
                player: Slot::load(SpriteKind::Player, &paths.player),
                coin: Slot::load(SpriteKind::Coin, &paths.coin),
                enemy: Slot::load(SpriteKind::Enemy, &paths.enemy),
            }
        }

        pub fn image(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
            let slot = match kind {
                SpriteKind::Player => &self.player,
                SpriteKind::Coin => &self.coin,
                SpriteKind::Enemy => &self.enemy,
            };
            slot.as_ref().and_then(Slot::ready)
        }

        pub fn availability(&self) -> SpriteAvailability {
            // A slot whose image could not even be created counts as failed
            let state = |slot: &Option<Slot>| {
                slot.as_ref()
                    .map_or(LoadState::Failed, |s| s.state.get())
            };
            SpriteAvailability::from_states(
                state(&self.player),
                state(&self.coin),
                state(&self.enemy),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ready_counts() {
        let a = SpriteAvailability::from_states(
            LoadState::Ready,
            LoadState::Pending,
            LoadState::Failed,
        );
        assert!(a.has(SpriteKind::Player));
        assert!(!a.has(SpriteKind::Coin));
        assert!(!a.has(SpriteKind::Enemy));
    }

    #[test]
    fn test_constants() {
        for kind in [SpriteKind::Player, SpriteKind::Coin, SpriteKind::Enemy] {
            assert!(SpriteAvailability::ALL.has(kind));
            assert!(!SpriteAvailability::NONE.has(kind));
        }
        assert_eq!(SpriteAvailability::default(), SpriteAvailability::NONE);
    }
}
