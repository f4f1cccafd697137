//! The fixed level layout
//!
//! All positions are relative to the ground line so the layout follows the
//! world height.

use glam::Vec2;

use super::collision::Rect;
use super::state::{Coin, Enemy};

/// Coin radius for every coin in the level
pub const COIN_RADIUS: f32 = 6.0;

pub fn platforms(ground_y: f32) -> Vec<Rect> {
    vec![
        Rect::new(120.0, ground_y - 80.0, 120.0, 12.0),
        Rect::new(320.0, ground_y - 140.0, 100.0, 12.0),
        Rect::new(520.0, ground_y - 200.0, 150.0, 12.0),
        Rect::new(680.0, ground_y - 90.0, 100.0, 12.0),
    ]
}

/// One coin floating above each platform
pub fn coins(ground_y: f32) -> Vec<Coin> {
    [
        (150.0, ground_y - 96.0),
        (360.0, ground_y - 156.0),
        (560.0, ground_y - 216.0),
        (710.0, ground_y - 106.0),
    ]
    .into_iter()
    .map(|(x, y)| Coin::new(Vec2::new(x, y), COIN_RADIUS))
    .collect()
}

/// One enemy patrolling the high platform, one on the ground
pub fn enemies(ground_y: f32) -> Vec<Enemy> {
    let scale = 2.0;
    vec![
        Enemy {
            pos: Vec2::new(520.0, ground_y - 212.0),
            size: Vec2::new(16.0, 16.0),
            vx: 1.2 * scale,
            left: 520.0,
            right: 660.0,
        },
        Enemy {
            pos: Vec2::new(260.0, ground_y - 24.0),
            size: Vec2::new(18.0, 18.0),
            vx: 1.5 * scale,
            left: 220.0,
            right: 400.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 410.0;

    #[test]
    fn test_coins_sit_above_platforms() {
        let platforms = platforms(GROUND);
        for coin in coins(GROUND) {
            let over = platforms
                .iter()
                .any(|p| coin.pos.x >= p.x && coin.pos.x <= p.right() && coin.pos.y < p.y);
            assert!(over, "coin at {:?} has no platform below it", coin.pos);
        }
    }

    #[test]
    fn test_enemies_start_inside_patrol() {
        for e in enemies(GROUND) {
            assert!(e.pos.x >= e.left);
            assert!(e.pos.x + e.size.x <= e.right);
        }
    }

    #[test]
    fn test_everything_above_ground() {
        for p in platforms(GROUND) {
            assert!(p.bottom() < GROUND);
        }
        for e in enemies(GROUND) {
            assert!(e.pos.y + e.size.y <= GROUND);
        }
    }
}
