//! Pixel Platformer entry point
//!
//! In the browser this mounts a game on `#canvas` and mirrors status
//! snapshots into the `#hud-*` elements. Natively it plays a short scripted
//! session headlessly and logs each snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use pixel_platformer::platform::{GameHandle, start_game};
    use pixel_platformer::snapshot::Snapshot;

    thread_local! {
        /// Keeps the auto-mounted game alive for the page's lifetime
        static GAME: RefCell<Option<GameHandle>> = const { RefCell::new(None) };
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn update_hud(document: &Document, snapshot: &Snapshot) {
        set_text(document, "hud-score", &snapshot.score.to_string());
        set_text(document, "hud-coins", &snapshot.coins.to_string());
        set_text(document, "hud-lives", &snapshot.lives.to_string());
        set_text(document, "hud-time", &format!("{}s", snapshot.time));
        set_text(document, "hud-status", snapshot.status.as_str());
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Pixel Platformer starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Library-only embedding: the host calls startGame itself
        let Some(canvas) = document.get_element_by_id("canvas") else {
            log::info!("No #canvas element, waiting for startGame()");
            return Ok(());
        };
        let canvas: HtmlCanvasElement = canvas.dyn_into()?;

        if let Some(loading) = document.get_element_by_id("loading") {
            if let Err(e) = loading.set_attribute("class", "hidden") {
                log::debug!("Hiding #loading failed: {:?}", e);
            }
        }

        let hud_document = document.clone();
        let on_state_change = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let json = js_sys::JSON::stringify(&value)
                .ok()
                .and_then(|s| s.as_string());
            match json.as_deref().map(serde_json::from_str::<Snapshot>) {
                Some(Ok(snapshot)) => update_hud(&hud_document, &snapshot),
                Some(Err(e)) => log::warn!("Unreadable snapshot: {}", e),
                None => {}
            }
        });
        let callback: js_sys::Function = on_state_change.as_ref().clone().unchecked_into();
        // Lives as long as the page
        on_state_change.forget();

        let handle = start_game(canvas, Some(callback), JsValue::UNDEFINED)?;
        GAME.with(|game| *game.borrow_mut() = Some(handle));

        log::info!("Pixel Platformer running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pixel Platformer (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

/// Scripted headless session: walk right, jump, pause, reset
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pixel_platformer::consts::TICK_MS;
    use pixel_platformer::driver::NullPresenter;
    use pixel_platformer::{FrameDriver, Key, Tuning};

    /// (frame, key, pressed)
    const SCRIPT: &[(u32, Key, bool)] = &[
        (10, Key::Right, true),
        (40, Key::Jump, true),
        (46, Key::Jump, false),
        (90, Key::Right, false),
        (120, Key::Pause, true),
        (121, Key::Pause, false),
        (180, Key::Pause, true),
        (181, Key::Pause, false),
        (240, Key::Reset, true),
        (241, Key::Reset, false),
    ];
    const FRAMES: u32 = 300;

    pub fn run() {
        let mut driver = FrameDriver::new(Tuning::default());
        let mut presenter = NullPresenter;

        if let Some(snapshot) = driver.frame(0.0, &mut presenter) {
            log_snapshot(0, &snapshot);
        }
        driver.start(0.0);

        for frame in 1..=FRAMES {
            for &(at, key, down) in SCRIPT {
                if at == frame {
                    if down {
                        driver.latch_mut().key_down(key);
                    } else {
                        driver.latch_mut().key_up(key);
                    }
                }
            }
            let now = frame as f64 * TICK_MS;
            if let Some(snapshot) = driver.frame(now, &mut presenter) {
                log_snapshot(frame, &snapshot);
            }
        }

        let p = &driver.state().player;
        log::info!(
            "Finished at ({:.1}, {:.1}) with {} coins left",
            p.pos.x,
            p.pos.y,
            driver.state().coins_remaining()
        );
    }

    fn log_snapshot(frame: u32, snapshot: &pixel_platformer::Snapshot) {
        match snapshot.to_json() {
            Ok(json) => log::info!("frame {:>3}: {}", frame, json),
            Err(e) => log::error!("frame {:>3}: snapshot encoding failed: {}", frame, e),
        }
    }
}
