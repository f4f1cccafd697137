//! Drawing surface sizing
//!
//! The canvas fills its parent up to a maximum CSS width, keeps the 16:9
//! logical aspect, and is backed by `floor(css * dpr)` physical pixels.

use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Layout size in CSS pixels
    pub css_width: f64,
    pub css_height: f64,
    /// Backing store size in device pixels
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Effective (capped) device pixel ratio
    pub dpr: f64,
}

impl Viewport {
    /// Size the surface for a parent `parent_width` CSS pixels wide.
    /// `host_dpr` of zero, negative or NaN counts as 1.
    pub fn fit(parent_width: f64, host_dpr: f64, settings: &Settings) -> Self {
        let dpr = if host_dpr.is_finite() && host_dpr > 0.0 {
            host_dpr
        } else {
            1.0
        }
        .min(settings.max_device_pixel_ratio);

        let css_width = parent_width.max(0.0).min(settings.max_css_width);
        let css_height = css_width * LOGICAL_HEIGHT as f64 / LOGICAL_WIDTH as f64;

        Self {
            css_width,
            css_height,
            pixel_width: (css_width * dpr).floor() as u32,
            pixel_height: (css_height * dpr).floor() as u32,
            dpr,
        }
    }

    /// Logical-to-device scale per axis
    pub fn scale(&self) -> (f64, f64) {
        (
            self.pixel_width as f64 / LOGICAL_WIDTH as f64,
            self.pixel_height as f64 / LOGICAL_HEIGHT as f64,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_width == 0 || self.pixel_height == 0
    }
}
