//! Palette for the shape renderer

/// Linear RGBA, each channel 0..=1
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

pub const SKY_TOP: Color = rgb(0x0b, 0x10, 0x20);
pub const SKY_BOTTOM: Color = rgb(0x0e, 0x1a, 0x2f);
pub const BACKDROP_BAND: Color = rgb(0x1a, 0x2a, 0x4a);

pub const GROUND: Color = rgb(0x2a, 0x7b, 0x3f);
pub const GROUND_DASH: Color = rgb(0x1f, 0x5c, 0x2f);

pub const PLATFORM: Color = rgb(0x8c, 0x4a, 0x12);
pub const PLATFORM_UNDERSIDE: Color = rgb(0x6e, 0x38, 0x0e);
pub const GRASS: Color = rgb(0x3a, 0xa8, 0x4b);

pub const COIN: Color = rgb(0xf6, 0xc9, 0x45);
pub const COIN_GLINT: Color = rgb(0xff, 0xf5, 0xb0);

pub const ENEMY: Color = rgb(0xd6, 0x45, 0x45);
pub const EYE: Color = rgb(0xff, 0xff, 0xff);

pub const PLAYER: Color = rgb(0xff, 0x3b, 0x30);
pub const PLAYER_HAT: Color = rgb(0xb2, 0x1d, 0x18);

pub const OVERLAY: Color = rgba(0, 0, 0, 0.35);
pub const OVERLAY_TEXT: Color = rgb(0xff, 0xff, 0xff);

/// CSS `rgba()` string for canvas fill styles
pub fn css(color: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_round_trips_bytes() {
        assert_eq!(css(PLAYER), "rgba(255,59,48,1)");
        assert_eq!(css(SKY_TOP), "rgba(11,16,32,1)");
        assert_eq!(css(OVERLAY), "rgba(0,0,0,0.35)");
    }

    #[test]
    fn test_css_clamps() {
        assert_eq!(css([2.0, -1.0, 0.5, 3.0]), "rgba(255,0,128,1)");
    }
}
