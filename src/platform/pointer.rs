//! Exclusive pointer capture (pointer lock) with vendor fallbacks

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent};

// JS binding for pointer lock; prefixed APIs are treated as equivalent
#[wasm_bindgen(inline_js = "
    export function request_pointer_lock(id) {
        const el = document.getElementById(id);
        if (!el) {
            return false;
        }
        const request = el.requestPointerLock
            || el.mozRequestPointerLock
            || el.webkitRequestPointerLock;
        if (!request) {
            return false;
        }
        try {
            const result = request.call(el);
            if (result && result.catch) {
                result.catch((e) => console.warn('Pointer lock denied:', e));
            }
        } catch (e) {
            console.warn('Pointer lock request failed:', e);
            return false;
        }
        return true;
    }

    export function pointer_lock_active(id) {
        const el = document.getElementById(id);
        return el !== null && (
            document.pointerLockElement === el
            || document.mozPointerLockElement === el
            || document.webkitPointerLockElement === el
        );
    }
")]
extern "C" {
    fn request_pointer_lock(id: &str) -> bool;
    fn pointer_lock_active(id: &str) -> bool;
}

/// Capture-state change notifications across engines
pub const LOCK_CHANGE_EVENTS: [&str; 3] = [
    "pointerlockchange",
    "mozpointerlockchange",
    "webkitpointerlockchange",
];

/// Capture request failures across engines
pub const LOCK_ERROR_EVENTS: [&str; 3] = [
    "pointerlockerror",
    "mozpointerlockerror",
    "webkitpointerlockerror",
];

/// Ask the browser to capture the pointer on element `id`
pub fn request_capture(id: &str) {
    if !request_pointer_lock(id) {
        log::warn!("Pointer lock unavailable on #{}", id);
    }
}

/// Whether element `id` currently holds the pointer lock
pub fn is_captured(id: &str) -> bool {
    pointer_lock_active(id)
}

/// `mousemove` listener subscribed only while the pointer is captured
pub struct MotionListener {
    document: Document,
    closure: Closure<dyn FnMut(MouseEvent)>,
    attached: Cell<bool>,
}

impl MotionListener {
    pub fn new(document: Document, handler: impl FnMut(MouseEvent) + 'static) -> Self {
        Self {
            document,
            closure: Closure::<dyn FnMut(MouseEvent)>::new(handler),
            attached: Cell::new(false),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Subscribe or unsubscribe; repeated calls with the same value are no-ops
    pub fn set_attached(&self, attach: bool) {
        if attach == self.attached.get() {
            return;
        }
        let callback = self.closure.as_ref().unchecked_ref();
        let result = if attach {
            self.document
                .add_event_listener_with_callback("mousemove", callback)
        } else {
            self.document
                .remove_event_listener_with_callback("mousemove", callback)
        };
        match result {
            Ok(()) => self.attached.set(attach),
            Err(e) => log::warn!("Failed to update mousemove listener: {:?}", e),
        }
    }
}
