use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use shared::Scheduler;
use wasm_bindgen::{prelude::Closure, JsCast};

use crate::window;

/// [`Scheduler`] over `requestAnimationFrame`.
///
/// A single installed callback serves every request. Clones share the callback and the
/// request bookkeeping.
#[derive(Clone, Default)]
pub struct AnimationFrames {
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    requested: Rc<Cell<Option<i32>>>,
}

impl AnimationFrames {
    pub fn install(&self, callback: Closure<dyn FnMut()>) {
        self.callback.replace(Some(callback));
    }

    pub fn is_installed(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Drops the callback. Must not be called from within it.
    pub fn uninstall(&self) {
        self.callback.take();
    }

    /// Claims the request whose callback is firing. `None` if it was cancelled.
    pub fn fired(&self) -> Option<i32> {
        self.requested.take()
    }
}

impl Scheduler for AnimationFrames {
    type Handle = i32;

    fn request_tick(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;

        match window().request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.requested.set(Some(handle));
                Some(handle)
            }
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_tick(&mut self, handle: i32) {
        if self.requested.get() == Some(handle) {
            self.requested.set(None);
        }

        if let Err(err) = window().cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle, err);
        }
    }
}
