//! Scene composition
//!
//! Turns a [`GameState`] into a flat list of draw commands in logical
//! coordinates (800x450). Backends only execute the list, so the whole
//! look of a frame is testable without a browser.

use glam::Vec2;

use super::colors::{self, Color};
use super::sprites::{SpriteAvailability, SpriteKind};
use crate::sim::{Facing, GameState, Rect, RunStatus};

/// Alpha applied to the player while invulnerable
pub const INVULNERABLE_ALPHA: f32 = 0.6;
/// Height of the grass cap, platform underside and ground dashes
const TRIM: f32 = 4.0;
const BACKDROP_HEIGHT: f32 = 100.0;
const DASH_PERIOD: f32 = 16.0;
const DASH_WIDTH: f32 = 12.0;
const HAT_HEIGHT: f32 = 6.0;
const EYE: f32 = 4.0;

const TITLE_FONT_PX: f32 = 24.0;
const HINT_FONT_PX: f32 = 14.0;
pub const RESTART_HINT: &str = "Press R to Restart";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill `rect` with a top-to-bottom gradient
    VerticalGradient { rect: Rect, top: Color, bottom: Color },
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    /// Draw a loaded image into `rect`, flipped horizontally if `mirrored`
    Sprite { kind: SpriteKind, rect: Rect, mirrored: bool },
    /// Global alpha for everything that follows
    Alpha(f32),
    /// `pos` is the text baseline origin
    Text { text: &'static str, pos: Vec2, size_px: f32, color: Color },
}

/// Build the draw list for one frame
pub fn compose(state: &GameState, sprites: SpriteAvailability, now_ms: f64) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(64);
    backdrop(&mut cmds, state);
    platforms(&mut cmds, state);
    ground(&mut cmds, state);
    coins(&mut cmds, state, sprites);
    enemies(&mut cmds, state, sprites);
    player(&mut cmds, state, sprites, now_ms);
    if state.world.paused {
        overlay(&mut cmds, state);
    }
    cmds
}

fn fill(cmds: &mut Vec<DrawCmd>, x: f32, y: f32, w: f32, h: f32, color: Color) {
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(x, y, w, h),
        color,
    });
}

fn backdrop(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let w = &state.world;
    cmds.push(DrawCmd::VerticalGradient {
        rect: Rect::new(0.0, 0.0, w.width, w.height),
        top: colors::SKY_TOP,
        bottom: colors::SKY_BOTTOM,
    });
    fill(
        cmds,
        0.0,
        w.ground_y - BACKDROP_HEIGHT,
        w.width,
        BACKDROP_HEIGHT,
        colors::BACKDROP_BAND,
    );
}

fn platforms(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    for p in &state.platforms {
        fill(cmds, p.x, p.y, p.w, p.h, colors::PLATFORM);
        fill(cmds, p.x, p.bottom() - TRIM, p.w, TRIM, colors::PLATFORM_UNDERSIDE);
        fill(cmds, p.x, p.y - TRIM, p.w, TRIM, colors::GRASS);
    }
}

fn ground(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let w = &state.world;
    fill(cmds, 0.0, w.ground_y, w.width, w.height - w.ground_y, colors::GROUND);
    let mut x = 0.0;
    while x < w.width {
        fill(cmds, x, w.ground_y - TRIM, DASH_WIDTH, TRIM, colors::GROUND_DASH);
        x += DASH_PERIOD;
    }
}

fn coins(cmds: &mut Vec<DrawCmd>, state: &GameState, sprites: SpriteAvailability) {
    for c in state.coins.iter().filter(|c| !c.taken) {
        if sprites.has(SpriteKind::Coin) {
            cmds.push(DrawCmd::Sprite {
                kind: SpriteKind::Coin,
                rect: Rect::new(c.pos.x - c.radius, c.pos.y - c.radius, c.radius * 2.0, c.radius * 2.0),
                mirrored: false,
            });
        } else {
            cmds.push(DrawCmd::FillCircle {
                center: c.pos,
                radius: c.radius,
                color: colors::COIN,
            });
            fill(
                cmds,
                c.pos.x - 1.0,
                c.pos.y - c.radius + 2.0,
                2.0,
                c.radius * 2.0 - 4.0,
                colors::COIN_GLINT,
            );
        }
    }
}

fn enemies(cmds: &mut Vec<DrawCmd>, state: &GameState, sprites: SpriteAvailability) {
    for e in &state.enemies {
        let r = e.rect();
        if sprites.has(SpriteKind::Enemy) {
            cmds.push(DrawCmd::Sprite {
                kind: SpriteKind::Enemy,
                rect: r,
                mirrored: false,
            });
        } else {
            fill(cmds, r.x, r.y, r.w, r.h, colors::ENEMY);
            fill(cmds, r.x + 3.0, r.y + 4.0, EYE, EYE, colors::EYE);
            fill(cmds, r.right() - 7.0, r.y + 4.0, EYE, EYE, colors::EYE);
        }
    }
}

fn player(cmds: &mut Vec<DrawCmd>, state: &GameState, sprites: SpriteAvailability, now_ms: f64) {
    let p = &state.player;
    // Snap to whole logical pixels
    let x = p.pos.x.floor();
    let y = p.pos.y.floor();
    let (w, h) = (p.size.x, p.size.y);

    let flicker = now_ms < p.invulnerable_until_ms;
    if flicker {
        cmds.push(DrawCmd::Alpha(INVULNERABLE_ALPHA));
    }

    if sprites.has(SpriteKind::Player) {
        cmds.push(DrawCmd::Sprite {
            kind: SpriteKind::Player,
            rect: Rect::new(x, y, w, h),
            mirrored: p.facing == Facing::Left,
        });
    } else {
        fill(cmds, x, y, w, h, colors::PLAYER);
        fill(cmds, x, y - HAT_HEIGHT, w, HAT_HEIGHT, colors::PLAYER_HAT);
        let eye_x = match p.facing {
            Facing::Right => x + w - 6.0,
            Facing::Left => x + 2.0,
        };
        fill(cmds, eye_x, y + 6.0, EYE, EYE, colors::EYE);
    }

    if flicker {
        cmds.push(DrawCmd::Alpha(1.0));
    }
}

fn overlay(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let w = &state.world;
    fill(cmds, 0.0, 0.0, w.width, w.height, colors::OVERLAY);
    let title = match w.status {
        RunStatus::GameOver => "Game Over",
        _ => "Paused",
    };
    cmds.push(DrawCmd::Text {
        text: title,
        pos: Vec2::new(w.width / 2.0 - 70.0, w.height / 2.0 - 10.0),
        size_px: TITLE_FONT_PX,
        color: colors::OVERLAY_TEXT,
    });
    cmds.push(DrawCmd::Text {
        text: RESTART_HINT,
        pos: Vec2::new(w.width / 2.0 - 80.0, w.height / 2.0 + 16.0),
        size_px: HINT_FONT_PX,
        color: colors::OVERLAY_TEXT,
    });
}
