// background.rs - Mountable cosmic background
//
// The page owns the DOM for stars, dust and the other tween-driven entities
// and positions them from the f32 buffer each frame. The engine paints the
// two canvas layers itself (nebula, constellation).

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};

use super::{BrowserFrames, CanvasSurface, js_error, viewport};
use crate::config::EngineConfig;
use crate::field::Field;
use crate::lifecycle::{FrameSession, Scope};
use crate::parallax::ParallaxTracker;
use crate::render::{Surface, draw_nebula};
use crate::scene::{AmbientScene, STRIDE};
use crate::sim::{Constellation, RenderLoop};

struct Mounted {
    field: Field,
    scene: AmbientScene,
    started_ms: Option<f64>,
    scope: Scope,
}

#[wasm_bindgen]
#[derive(Default)]
pub struct CosmicBackground {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl CosmicBackground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh field and acquire every browser resource
    ///
    /// Only malformed config is an error; missing canvases or window just
    /// leave the corresponding layers blank.
    pub fn mount(
        &mut self,
        nebula_canvas: HtmlCanvasElement,
        constellation_canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<(), JsValue> {
        self.unmount();

        let config = match config_json.as_deref() {
            Some(json) => EngineConfig::from_json(json).map_err(js_error)?,
            None => EngineConfig::default(),
        };
        let mut rng = fastrand::Rng::with_seed((js_sys::Math::random() * u64::MAX as f64) as u64);
        let field = Field::generate(&config, &mut rng);
        let tracker = ParallaxTracker::new();
        let scene = AmbientScene::new(&field, tracker.reader());
        let mut scope = Scope::new("cosmic background");

        let Some(window) = web_sys::window() else {
            log::warn!("no window; background stays static");
            self.mounted = Some(Mounted { field, scene, started_ms: None, scope });
            return Ok(());
        };
        let (w, h) = viewport(&window);

        let nebula = match CanvasSurface::acquire(nebula_canvas) {
            Ok(mut surface) => {
                surface.set_size(w, h);
                draw_nebula(&mut surface, &field.nebula);
                Some(Rc::new(RefCell::new(surface)))
            }
            Err(e) => {
                log::warn!("nebula layer disabled: {}", e);
                None
            }
        };

        let session = match CanvasSurface::acquire(constellation_canvas) {
            Ok(mut surface) => {
                surface.set_size(w, h);
                let points = Constellation::generate(&config.constellation, w, h, &mut rng);
                let session = Rc::new(FrameSession::new(RenderLoop::new(surface, points), BrowserFrames));
                session.start();
                let stopper = Rc::clone(&session);
                scope.defer(move || stopper.stop());
                Some(session)
            }
            Err(e) => {
                log::warn!("constellation layer disabled: {}", e);
                None
            }
        };

        let clouds = field.nebula.clone();
        let resize_window = window.clone();
        scope.hold(EventListener::new(&window, "resize", move |_: &Event| {
            let (w, h) = viewport(&resize_window);
            if let Some(nebula) = &nebula {
                let mut surface = nebula.borrow_mut();
                surface.set_size(w, h);
                draw_nebula(&mut *surface, &clouds);
            }
            if let Some(session) = &session {
                session.resize(w, h);
            }
        }));

        let mut tracker = tracker;
        let pointer_window = window.clone();
        scope.hold(EventListener::new(&window, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (w, h) = viewport(&pointer_window);
            tracker.pointer_moved(event.client_x() as f32, event.client_y() as f32, w as f32, h as f32);
        }));

        log::debug!("background mounted at {}x{} with {} resources", w, h, scope.len());
        self.mounted = Some(Mounted { field, scene, started_ms: None, scope });
        Ok(())
    }

    /// Release every resource; safe to call repeatedly
    pub fn unmount(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.scene.cancel();
            mounted.scope.teardown();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Evaluate all tween entities at a requestAnimationFrame timestamp
    pub fn frame(&mut self, time_ms: f64) {
        let Some(mounted) = &mut self.mounted else { return };
        let start = *mounted.started_ms.get_or_insert(time_ms);
        mounted.scene.frame(((time_ms - start) / 1000.0) as f32);
    }

    pub fn output_ptr(&self) -> *const f32 {
        self.mounted.as_ref().map_or(std::ptr::null(), |m| m.scene.encoder().ptr())
    }

    pub fn output_len(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.scene.encoder().len())
    }

    pub fn entity_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.scene.len())
    }

    pub fn stride(&self) -> usize {
        STRIDE
    }

    /// Kind code per output slot
    pub fn kinds(&self) -> Vec<u8> {
        self.mounted.as_ref().map_or_else(Vec::new, |m| m.scene.kinds())
    }

    /// The generated field, for building the entity DOM
    pub fn field_json(&self) -> Result<String, JsValue> {
        match &self.mounted {
            Some(m) => serde_json::to_string(&m.field).map_err(js_error),
            None => Ok("null".into()),
        }
    }
}
