// card.rs - Hover tilt binding for one skill card element

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent};

use super::js_error;
use crate::card::{CardRect, CardTilt, HoverParticle, HoverState, SkillCard, Tilt, hover_particles};

struct CardState {
    card: SkillCard,
    tilt: CardTilt,
    particles: Vec<HoverParticle>,
}

#[wasm_bindgen]
pub struct SkillCardTilt {
    element: HtmlElement,
    state: Rc<RefCell<CardState>>,
    hover_started: Rc<Cell<Option<f64>>>,
    listeners: Vec<EventListener>,
}

fn apply(element: &HtmlElement, tilt: Tilt) {
    if let Err(e) = element.style().set_property("transform", &tilt.css_transform()) {
        log::warn!("card transform not applied: {:?}", e);
    }
}

#[wasm_bindgen]
impl SkillCardTilt {
    /// Attach to `element`; `card_json` is a tagged SkillCard
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, card_json: &str) -> Result<SkillCardTilt, JsValue> {
        let card: SkillCard = serde_json::from_str(card_json).map_err(js_error)?;
        let state = Rc::new(RefCell::new(CardState { card, tilt: CardTilt::new(), particles: Vec::new() }));
        let hover_started = Rc::new(Cell::new(None));
        let mut listeners = Vec::with_capacity(3);

        let (s, started) = (Rc::clone(&state), Rc::clone(&hover_started));
        listeners.push(EventListener::new(&element, "mouseenter", move |event: &Event| {
            let mut guard = s.borrow_mut();
            let s = &mut *guard;
            s.tilt.pointer_enter();
            s.particles = hover_particles(&s.card, s.tilt.state());
            started.set(Some(event.time_stamp()));
        }));

        let (s, el) = (Rc::clone(&state), element.clone());
        listeners.push(EventListener::new(&element, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let r = el.get_bounding_client_rect();
            let rect = CardRect { left: r.left() as f32, top: r.top() as f32, width: r.width() as f32, height: r.height() as f32 };
            let tilt = s.borrow_mut().tilt.pointer_move(event.client_x() as f32, event.client_y() as f32, rect);
            apply(&el, tilt);
        }));

        let (s, el, started) = (Rc::clone(&state), element.clone(), Rc::clone(&hover_started));
        listeners.push(EventListener::new(&element, "mouseleave", move |_: &Event| {
            let mut s = s.borrow_mut();
            let tilt = s.tilt.pointer_leave();
            s.particles.clear();
            started.set(None);
            apply(&el, tilt);
        }));

        Ok(Self { element, state, hover_started, listeners })
    }

    pub fn is_hovered(&self) -> bool {
        self.state.borrow().tilt.state() == HoverState::Hovered
    }

    /// (x, y, opacity, scale) per hover particle at an event timestamp; empty unless emitting
    pub fn particles(&self, time_ms: f64) -> Vec<f32> {
        let Some(started) = self.hover_started.get() else {
            return Vec::new();
        };
        let t = ((time_ms - started) / 1000.0).max(0.0) as f32;
        self.state
            .borrow()
            .particles
            .iter()
            .flat_map(|p| {
                let (x, y, o, scale) = p.sample(t);
                [x, y, o, scale]
            })
            .collect()
    }

    /// Remove the listeners and flatten the card
    pub fn detach(&mut self) {
        let tilt = {
            let mut s = self.state.borrow_mut();
            s.particles.clear();
            s.tilt.pointer_leave()
        };
        apply(&self.element, tilt);
        self.listeners.clear();
        self.hover_started.set(None);
    }
}
