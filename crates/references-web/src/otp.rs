use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Node};

use references_core::input::otp::{
    CONTAINER_CLASS, CONTAINER_STYLE, SUBMIT_CLASS, SUBMIT_LABEL, SUBMIT_STYLE,
};
use references_core::{build_input_spec, word_length_from_masked, OtpInput};

use crate::dom::{by_id, focus, set_style};

/// The letter cells on the page together with their model.
pub struct OtpView {
    pub(crate) model: OtpInput,
    pub(crate) cells: Vec<HtmlInputElement>,
    /// Hidden `#guess-input` mirroring the typed guess.
    pub(crate) hidden: HtmlInputElement,
    pub(crate) button: HtmlButtonElement,
}

impl OtpView {
    /// Replace `#word-display` with one input per letter and rebuild
    /// `#guess-container` around a hidden input and a submit button.
    ///
    /// Returns `None` when the page has no word display.
    pub fn mount(doc: &Document, game_container: &Element) -> Result<Option<Self>, JsValue> {
        let Some(word_display) = by_id::<HtmlElement>(doc, "word-display") else {
            return Ok(None);
        };
        let masked = word_display.text_content().unwrap_or_default();
        let word_length = word_length_from_masked(&masked);
        word_display.style().set_property("display", "none")?;

        let container: HtmlElement = doc.create_element("div")?.dyn_into()?;
        container.set_class_name(CONTAINER_CLASS);
        set_style(&container, CONTAINER_STYLE)?;

        let hidden: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
        hidden.set_type("hidden");
        hidden.set_id("guess-input");
        hidden.set_name("guess");

        let mut cells = Vec::with_capacity(word_length);
        for spec in build_input_spec(word_length) {
            let cell: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
            cell.set_type("text");
            cell.set_max_length(spec.max_length as i32);
            cell.set_class_name(spec.class_name);
            cell.set_attribute("data-index", &spec.index.to_string())?;
            set_style(&cell, spec.style)?;
            container.append_child(&cell)?;
            cells.push(cell);
        }

        let guess_container = match doc.get_element_by_id("guess-container") {
            Some(existing) => existing,
            None => {
                let created = doc.create_element("div")?;
                created.set_id("guess-container");
                let results: Option<Node> = doc.get_element_by_id("game-results").map(Into::into);
                game_container.insert_before(&created, results.as_ref())?;
                created
            }
        };

        let button: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
        button.set_text_content(Some(SUBMIT_LABEL));
        button.set_class_name(SUBMIT_CLASS);
        button.set_id("guess-button");
        set_style(&button, SUBMIT_STYLE)?;

        if let Some(parent) = word_display.parent_node() {
            let display_node: &Node = &word_display;
            parent.insert_before(&container, Some(display_node))?;
        }

        guess_container.set_inner_html("");
        guess_container.append_child(&hidden)?;
        guess_container.append_child(&button)?;

        log::info!("built {word_length} letter cells");
        Ok(Some(Self {
            model: OtpInput::new(word_length),
            cells,
            hidden,
            button,
        }))
    }

    pub fn model(&self) -> &OtpInput {
        &self.model
    }

    pub fn cells(&self) -> &[HtmlInputElement] {
        &self.cells
    }

    /// Copy the model into the DOM: every cell's text and the hidden value.
    pub fn sync(&self) {
        for (cell, value) in self.cells.iter().zip(self.model.cells()) {
            if cell.value() != *value {
                cell.set_value(value);
            }
        }
        self.hidden.set_value(&self.model.value());
    }

    pub fn focus_cell(&self, index: usize) {
        if let Some(cell) = self.cells.get(index) {
            focus(cell);
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.button.set_disabled(!enabled);
        for cell in &self.cells {
            cell.set_disabled(!enabled);
        }
    }

    /// Empty every cell and focus the first.
    pub fn reset(&mut self) {
        self.model.clear();
        self.sync();
        self.focus_cell(0);
    }
}
