// web/ - Browser bindings (wasm32 only)
//
// Thin shells over the platform-independent core: each binding owns its
// browser resources through RAII handles (gloo listeners, frames, timers)
// so dropping or unmounting it releases everything.

mod background;
mod canvas;
mod card;
mod contact;

pub use background::CosmicBackground;
pub use canvas::CanvasSurface;
pub use card::SkillCardTilt;
pub use contact::ContactFormBinding;

use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::prelude::*;

use crate::lifecycle::FrameScheduler;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Already initialised when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Debug);
    log::debug!("cosmic-engine {} ready", env!("CARGO_PKG_VERSION"));
}

/// requestAnimationFrame; dropping the AnimationFrame cancels it
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFrames;

impl FrameScheduler for BrowserFrames {
    type Handle = AnimationFrame;

    fn schedule(&self, callback: Box<dyn FnOnce(f64)>) -> AnimationFrame {
        request_animation_frame(callback)
    }
}

/// Current viewport size in CSS pixels; (0, 0) when unknown
pub(crate) fn viewport(window: &web_sys::Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

pub(crate) fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
