//! Canvas 2D backend
//!
//! Executes [`DrawCmd`] lists on a `CanvasRenderingContext2d`, scaled from
//! logical coordinates to the backing store with smoothing off.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::colors::css;
use super::scene::{self, DrawCmd};
use super::sprites::SpriteSheet;
use super::viewport::Viewport;
use crate::driver::Presenter;
use crate::settings::Settings;
use crate::sim::GameState;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    settings: Settings,
    viewport: Viewport,
    sprites: SpriteSheet,
    /// Last draw failed; repeats are not logged
    draw_failed: bool,
}

impl CanvasRenderer {
    /// Acquire the 2D context, size the surface and start loading sprites
    pub fn new(canvas: HtmlCanvasElement, settings: Settings) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        ctx.set_image_smoothing_enabled(false);

        let sprites = SpriteSheet::load(&settings.sprites);
        let mut renderer = Self {
            canvas,
            ctx,
            viewport: Viewport::fit(0.0, 1.0, &settings),
            settings,
            sprites,
            draw_failed: false,
        };
        renderer.resize();
        Ok(renderer)
    }

    /// Refit the surface to the parent element. Never touches game state.
    pub fn resize(&mut self) {
        let parent_width = self
            .canvas
            .parent_element()
            .map(|p| p.get_bounding_client_rect().width())
            .unwrap_or_else(|| self.canvas.client_width() as f64);
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        let viewport = Viewport::fit(parent_width, dpr, &self.settings);
        let style = self.canvas.style();
        for (name, px) in [("width", viewport.css_width), ("height", viewport.css_height)] {
            if let Err(e) = style.set_property(name, &format!("{}px", px)) {
                log::debug!("Setting canvas {} failed: {:?}", name, e);
            }
        }
        self.canvas.set_width(viewport.pixel_width);
        self.canvas.set_height(viewport.pixel_height);
        // Resizing the backing store resets context state
        self.ctx.set_image_smoothing_enabled(false);

        if viewport != self.viewport {
            log::debug!(
                "Surface {}x{} px (css {}x{}, dpr {})",
                viewport.pixel_width,
                viewport.pixel_height,
                viewport.css_width,
                viewport.css_height,
                viewport.dpr
            );
        }
        self.viewport = viewport;
    }

    fn draw(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (sx, sy) = self.viewport.scale();

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.clear_rect(
            0.0,
            0.0,
            self.viewport.pixel_width as f64,
            self.viewport.pixel_height as f64,
        );
        ctx.scale(sx, sy)?;
        ctx.set_global_alpha(1.0);

        for cmd in cmds {
            match cmd {
                DrawCmd::VerticalGradient { rect, top, bottom } => {
                    let r = rect;
                    let gradient = ctx.create_linear_gradient(
                        0.0,
                        r.y as f64,
                        0.0,
                        r.bottom() as f64,
                    );
                    gradient.add_color_stop(0.0, &css(*top))?;
                    gradient.add_color_stop(1.0, &css(*bottom))?;
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
                }
                DrawCmd::FillRect { rect: r, color } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
                }
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.fill();
                }
                DrawCmd::Sprite {
                    kind,
                    rect: r,
                    mirrored,
                } => {
                    // Availability was checked at compose time; a sprite that
                    // vanished since then is simply skipped this frame
                    let Some(image) = self.sprites.image(*kind) else {
                        continue;
                    };
                    if *mirrored {
                        ctx.save();
                        ctx.translate(r.right() as f64, r.y as f64)?;
                        ctx.scale(-1.0, 1.0)?;
                        let drawn = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            image, 0.0, 0.0, r.w as f64, r.h as f64,
                        );
                        ctx.restore();
                        drawn?;
                    } else {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            image, r.x as f64, r.y as f64, r.w as f64, r.h as f64,
                        )?;
                    }
                }
                DrawCmd::Alpha(alpha) => ctx.set_global_alpha(*alpha as f64),
                DrawCmd::Text {
                    text,
                    pos,
                    size_px,
                    color,
                } => {
                    ctx.set_fill_style_str(&css(*color));
                    ctx.set_font(&format!("{}px monospace", size_px));
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}

impl Presenter for CanvasRenderer {
    fn present(&mut self, state: &GameState, now_ms: f64) {
        if self.viewport.is_empty() {
            return;
        }
        let cmds = scene::compose(state, self.sprites.availability(), now_ms);
        match self.draw(&cmds) {
            Ok(()) => self.draw_failed = false,
            Err(e) if !self.draw_failed => {
                log::error!("Canvas draw failed: {:?}", e);
                self.draw_failed = true;
            }
            Err(_) => {}
        }
    }
}
