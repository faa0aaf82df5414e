// contact.rs - Contact form binding
//
// Owns the Escape listener and the two submission timers. Dropping the
// binding (or closing the modal) cancels whatever is still pending.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, KeyboardEvent};

use crate::contact::{CLOSE_DELAY_MS, ContactForm, FormEvent, FormField, SUBMIT_DELAY_MS, Submission};

#[derive(Default)]
struct Timers {
    submit: Option<Timeout>,
    close: Option<Timeout>,
}

#[wasm_bindgen(js_name = ContactForm)]
pub struct ContactFormBinding {
    form: Rc<RefCell<ContactForm>>,
    timers: Rc<RefCell<Timers>>,
    on_change: js_sys::Function,
    _escape: Option<EventListener>,
}

fn notify(on_change: &js_sys::Function) {
    if let Err(e) = on_change.call0(&JsValue::NULL) {
        log::warn!("contact form callback threw: {:?}", e);
    }
}

#[wasm_bindgen(js_class = ContactForm)]
impl ContactFormBinding {
    /// `on_change` runs after every state change the page did not cause itself
    #[wasm_bindgen(constructor)]
    pub fn new(on_change: js_sys::Function) -> ContactFormBinding {
        let form = Rc::new(RefCell::new(ContactForm::new()));
        let timers = Rc::new(RefCell::new(Timers::default()));

        let escape = web_sys::window().map(|window| {
            let (form, cb) = (Rc::clone(&form), on_change.clone());
            EventListener::new(&window, "keydown", move |event: &Event| {
                let is_escape = event.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Escape");
                if is_escape && form.borrow_mut().escape() {
                    notify(&cb);
                }
            })
        });

        Self { form, timers, on_change, _escape: escape }
    }

    /// Edit a field by name; unknown names are ignored
    pub fn set(&mut self, field: &str, value: String) {
        match FormField::parse(field) {
            Some(field) => self.form.borrow_mut().set(field, value),
            None => log::warn!("unknown contact field {:?}", field),
        }
    }

    pub fn value(&self, field: &str) -> String {
        FormField::parse(field).map(|f| self.form.borrow().data().get(f).to_owned()).unwrap_or_default()
    }

    /// `{field: message}` for every current error
    pub fn errors_json(&self) -> String {
        self.form.borrow().errors().to_json().to_string()
    }

    /// Validate and start the simulated send
    pub fn submit(&mut self) -> bool {
        if !self.form.borrow_mut().submit() {
            return false;
        }

        let (form, timers, cb) = (Rc::clone(&self.form), Rc::downgrade(&self.timers), self.on_change.clone());
        let submit = Timeout::new(SUBMIT_DELAY_MS as u32, move || {
            if form.borrow_mut().advance(SUBMIT_DELAY_MS) != Some(FormEvent::Submitted) {
                return;
            }
            notify(&cb);

            let (form, cb2) = (Rc::clone(&form), cb.clone());
            let close = Timeout::new(CLOSE_DELAY_MS as u32, move || {
                if form.borrow_mut().advance(CLOSE_DELAY_MS) == Some(FormEvent::Closed) {
                    notify(&cb2);
                }
            });
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().close = Some(close);
            }
        });
        self.timers.borrow_mut().submit = Some(submit);
        true
    }

    /// "editing" | "submitting" | "succeeded" | "closed"
    pub fn state(&self) -> String {
        match self.form.borrow().state() {
            Submission::Editing => "editing",
            Submission::Submitting { .. } => "submitting",
            Submission::Succeeded { .. } => "succeeded",
            Submission::Closed => "closed",
        }
        .into()
    }

    pub fn close(&mut self) {
        if self.form.borrow_mut().escape() {
            *self.timers.borrow_mut() = Timers::default();
        }
    }
}
