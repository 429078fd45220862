//! RAII DOM event subscriptions
//!
//! Subscribing returns a value; dropping it removes the listener. Holding
//! the subscriptions in the scene handle means every teardown path,
//! early return included, releases them.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::EventTarget;

/// A live event subscription
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl EventListener {
    /// Subscribe `handler` to `event` on `target`
    pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure: Some(closure),
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref());
        }
    }
}
