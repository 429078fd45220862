//! Animation-frame scheduling with explicit cancellation
//!
//! One outstanding requestAnimationFrame callback at a time. Cancel (or
//! drop) guarantees no tick fires after teardown.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

struct Inner {
    window: Window,
    handle: Cell<Option<i32>>,
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Inner {
    fn request_next(&self) {
        if let Some(closure) = self.closure.borrow().as_ref() {
            match self
                .window
                .request_animation_frame(closure.as_ref().unchecked_ref())
            {
                Ok(handle) => self.handle.set(Some(handle)),
                Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
            }
        }
    }
}

/// A running animation-frame loop
///
/// `tick` receives the DOMHighResTimeStamp in milliseconds and is
/// rescheduled after each invocation until the loop is canceled. The
/// callback holds only a weak reference back to the loop, so dropping the
/// handle is enough to stop the chain.
pub struct FrameLoop {
    inner: Rc<Inner>,
}

impl FrameLoop {
    pub fn start<F>(mut tick: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let inner = Rc::new(Inner {
            window,
            handle: Cell::new(None),
            closure: RefCell::new(None),
        });

        let weak: Weak<Inner> = Rc::downgrade(&inner);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            tick(time);
            if let Some(inner) = weak.upgrade() {
                inner.request_next();
            }
        });

        *inner.closure.borrow_mut() = Some(closure);
        inner.request_next();
        Ok(Self { inner })
    }

    /// Cancel the pending frame and drop the callback. Idempotent.
    pub fn cancel(&self) {
        if let Some(handle) = self.inner.handle.take() {
            let _ = self.inner.window.cancel_animation_frame(handle);
        }
        self.inner.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
