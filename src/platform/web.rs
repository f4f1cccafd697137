//! Browser runtime
//!
//! [`start_game`] mounts a session on a canvas and returns a [`GameHandle`].
//! The session owns its driver, renderer and listeners; nothing is global,
//! so a page can mount several games. [`GameHandle::destroy`] cancels the
//! pending frame and removes every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, Window};

use crate::driver::FrameDriver;
use crate::renderer::CanvasRenderer;
use crate::settings::GameOptions;
use crate::snapshot::Snapshot;

/// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("Removing {} listener failed: {:?}", self.event, e);
        }
    }
}

struct Session {
    driver: FrameDriver,
    renderer: CanvasRenderer,
}

struct Runtime {
    window: Window,
    session: RefCell<Session>,
    on_state_change: Option<js_sys::Function>,
    frame_callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    frame_id: Cell<Option<i32>>,
    listeners: RefCell<Vec<Listener>>,
    destroyed: Cell<bool>,
}

impl Runtime {
    fn schedule(&self) {
        if self.destroyed.get() {
            return;
        }
        let callback = self.frame_callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => self.frame_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn on_frame(&self, now_ms: f64) {
        self.frame_id.set(None);
        if self.destroyed.get() {
            return;
        }

        let snapshot = {
            let mut session = self.session.borrow_mut();
            let Session { driver, renderer } = &mut *session;
            driver.frame(now_ms, renderer)
        };

        // The callback may destroy the game; no borrows are held here
        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }
        self.schedule();
    }

    fn notify(&self, snapshot: &Snapshot) {
        let Some(callback) = &self.on_state_change else {
            return;
        };
        let value = match snapshot
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|json| js_sys::JSON::parse(&json))
        {
            Ok(value) => value,
            Err(e) => {
                log::error!("Cannot encode status snapshot: {:?}", e);
                return;
            }
        };
        if let Err(e) = callback.call1(&JsValue::NULL, &value) {
            log::warn!("State change callback threw: {:?}", e);
        }
    }

    fn teardown(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::debug!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        self.listeners.borrow_mut().clear();
        // Breaks the runtime <-> frame closure cycle
        self.frame_callback.borrow_mut().take();
        log::info!("Game destroyed");
    }
}

/// Handle returned to the host page
#[wasm_bindgen]
pub struct GameHandle {
    runtime: Rc<Runtime>,
}

#[wasm_bindgen]
impl GameHandle {
    /// Stop the loop and remove all listeners. Safe to call more than once.
    pub fn destroy(&self) {
        self.runtime.teardown();
    }

    /// Whether [`GameHandle::destroy`] has run
    #[wasm_bindgen(getter)]
    pub fn destroyed(&self) -> bool {
        self.runtime.destroyed.get()
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.runtime.teardown();
    }
}

fn options_from_js(options: &JsValue) -> GameOptions {
    if options.is_undefined() || options.is_null() {
        return GameOptions::default();
    }
    let json = js_sys::JSON::stringify(options)
        .ok()
        .and_then(|s| s.as_string());
    GameOptions::from_json_or_default(json.as_deref())
}

/// Mount a game on `canvas`.
///
/// `on_state_change` receives `{score, coins, lives, time, status}` whenever
/// any of those change. `options` may carry `settings` and `tuning` objects;
/// anything missing or malformed falls back to defaults.
#[wasm_bindgen(js_name = startGame)]
pub fn start_game(
    canvas: HtmlCanvasElement,
    on_state_change: Option<js_sys::Function>,
    options: JsValue,
) -> Result<GameHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let GameOptions { settings, tuning } = options_from_js(&options);

    let renderer = CanvasRenderer::new(canvas, settings)?;
    let mut driver = FrameDriver::new(tuning);
    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
    driver.start(now);

    let runtime = Rc::new(Runtime {
        window: window.clone(),
        session: RefCell::new(Session { driver, renderer }),
        on_state_change,
        frame_callback: RefCell::new(None),
        frame_id: Cell::new(None),
        listeners: RefCell::new(Vec::new()),
        destroyed: Cell::new(false),
    });

    let target: &EventTarget = window.as_ref();
    let listeners = vec![
        key_listener(target, &runtime, "keydown", true)?,
        key_listener(target, &runtime, "keyup", false)?,
        {
            let runtime = runtime.clone();
            Listener::add(target, "resize", move |_| {
                runtime.session.borrow_mut().renderer.resize();
            })?
        },
        {
            // Key-ups that happen while unfocused never arrive
            let runtime = runtime.clone();
            Listener::add(target, "blur", move |_| {
                runtime.session.borrow_mut().driver.latch_mut().clear();
            })?
        },
    ];
    *runtime.listeners.borrow_mut() = listeners;

    {
        let frame_runtime = runtime.clone();
        *runtime.frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(
            move |now_ms: f64| frame_runtime.on_frame(now_ms),
        ));
    }
    runtime.schedule();

    log::info!("Game mounted");
    Ok(GameHandle { runtime })
}

fn key_listener(
    target: &EventTarget,
    runtime: &Rc<Runtime>,
    event: &'static str,
    down: bool,
) -> Result<Listener, JsValue> {
    let runtime = runtime.clone();
    Listener::add(target, event, move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        runtime
            .session
            .borrow_mut()
            .driver
            .latch_mut()
            .handle_code(&event.code(), down);
    })
}
