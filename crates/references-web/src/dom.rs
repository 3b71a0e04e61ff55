use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, cast to `T`. Missing or mistyped elements yield `None`.
pub(crate) fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn set_text(element: Option<&Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

pub(crate) fn set_style(element: &HtmlElement, style: &[(&str, &str)]) -> Result<(), JsValue> {
    let css = element.style();
    for (property, value) in style {
        css.set_property(property, value)?;
    }
    Ok(())
}

pub(crate) fn focus(element: &HtmlElement) {
    if let Err(err) = element.focus() {
        log::debug!("focus failed: {err:?}");
    }
}

/// Attach a listener for the lifetime of the page.
pub(crate) fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Human-readable text for a JS exception or rejection value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
