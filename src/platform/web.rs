//! Browser callback handles
//!
//! Both loops stop when their handle is dropped, so a screen that owns a loop
//! cancels it simply by letting go of it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::{QuizError, Result};

type FrameClosure = Closure<dyn FnMut(f64)>;

/// requestAnimationFrame loop that re-registers itself every frame
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl AnimationLoop {
    /// Start calling `frame(timestamp_ms)` once per display refresh
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| QuizError::Platform("no window".into()))?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let next_handle = handle.clone();
        let next_closure = closure.clone();
        let next_window = window.clone();
        *closure.borrow_mut() = Some(Closure::new(move |time: f64| {
            frame(time);
            // Cancelled while running: don't schedule again
            if next_handle.get().is_none() {
                return;
            }
            if let Some(cb) = next_closure.borrow().as_ref() {
                match next_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => next_handle.set(Some(id)),
                    Err(e) => {
                        log::error!("requestAnimationFrame failed: {:?}", e);
                        next_handle.set(None);
                    }
                }
            }
        }));

        let id = {
            let borrowed = closure.borrow();
            let cb = borrowed
                .as_ref()
                .ok_or_else(|| QuizError::Platform("frame callback missing".into()))?;
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| QuizError::Platform(format!("{e:?}")))?
        };
        handle.set(Some(id));

        Ok(Self { handle, closure })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Break the closure's reference cycle back to itself
        self.closure.borrow_mut().take();
    }
}

/// setInterval timer
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, tick: impl FnMut() + 'static) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| QuizError::Platform("no window".into()))?;
        let closure: Closure<dyn FnMut()> = Closure::new(tick);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| QuizError::Platform(format!("{e:?}")))?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
