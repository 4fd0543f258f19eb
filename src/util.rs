// Browser helpers shared by the components

use chrono::{DateTime, Local, Utc};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Fire-and-forget `setTimeout`. Returns the handle when the window exists.
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref::<js_sys::Function>(),
        ms.min(i32::MAX as u32) as i32,
    )
    .ok()
}

pub fn clear_timeout(handle: Option<i32>) {
    if let (Some(win), Some(h)) = (web_sys::window(), handle) {
        win.clear_timeout_with_handle(h);
    }
}

pub fn format_discovered_at(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(t) => t.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string(),
        None => String::new(),
    }
}
