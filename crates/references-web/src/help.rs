use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent};

use references_core::{HelpEvent, HelpModal, ModalAttrs};

use crate::dom::listen;

fn apply(modal: &Element, attrs: ModalAttrs) {
    let result = if attrs.open {
        modal.set_attribute("open", "")
    } else {
        modal.remove_attribute("open")
    }
    .and_then(|()| modal.set_attribute("aria-hidden", attrs.aria_hidden));
    if let Err(err) = result {
        log::warn!("help modal update failed: {err:?}");
    }
}

/// Wire `#help-modal` with its optional `#help-button` trigger and
/// `.modal-close` control. Pages without a help modal are left alone.
pub(crate) fn wire(doc: &Document) -> Result<(), JsValue> {
    let Some(modal) = doc.get_element_by_id("help-modal") else {
        return Ok(());
    };
    let state = Rc::new(RefCell::new(HelpModal::new()));

    let dispatch = {
        let state = Rc::clone(&state);
        let modal = modal.clone();
        move |event: HelpEvent| {
            if let Some(attrs) = state.borrow_mut().handle(&event) {
                apply(&modal, attrs);
            }
        }
    };

    if let Some(trigger) = doc.get_element_by_id("help-button") {
        let on_trigger = dispatch.clone();
        listen(&trigger, "click", move |_| on_trigger(HelpEvent::TriggerClick))?;
    }

    if let Some(close) = modal.query_selector(".modal-close")? {
        let on_close = dispatch.clone();
        listen(&close, "click", move |_| on_close(HelpEvent::CloseClick))?;
    }

    let on_modal = dispatch.clone();
    let backdrop = modal.clone();
    listen(&modal, "click", move |event| {
        let on_backdrop = event
            .target()
            .is_some_and(|target| js_sys::Object::is(&target, &backdrop));
        on_modal(HelpEvent::ModalClick { on_backdrop });
    })?;

    listen(doc, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            dispatch(HelpEvent::Key(key.key()));
        }
    })
}
