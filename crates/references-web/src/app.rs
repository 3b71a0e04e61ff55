use std::cell::RefCell;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, Document, Element, HtmlButtonElement, HtmlInputElement, KeyboardEvent};

use references_core::flow::controller::{CHECKING_MESSAGE, HINT_LOADING_MESSAGE};
use references_core::{
    ClientConfig, ClientError, FormBody, GameController, GameId, GuessOutcome, GuessResponse,
    HintOutcome, HintResponse, KeyOutcome, OtpKey, Rng,
};

use crate::dom::{by_id, focus, listen, set_text};
use crate::http::post_form;
use crate::otp::OtpView;
use crate::storage::LocalStore;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Run `f` against the live app. Returns `None` before boot, or when the app
/// is already borrowed further up the stack.
pub(crate) fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::warn!("app is busy; event dropped");
            return None;
        };
        slot.as_mut().map(f)
    })
}

/// A `.hint-box[data-category]` on the page.
struct HintBoxView {
    category: String,
    element: Element,
    content: Option<Element>,
}

/// How the player types a guess.
enum GuessInput {
    Otp(OtpView),
    /// Page without a word display: one text field and its button.
    Plain {
        input: HtmlInputElement,
        button: HtmlButtonElement,
    },
    Missing,
}

/// Elements the client writes into.
struct Page {
    guesses_left: Option<Element>,
    hints_used: Option<Element>,
    results: Option<Element>,
    hint_boxes: Vec<HintBoxView>,
}

/// Browser-side state: the controller plus the DOM it drives.
pub struct App {
    controller: GameController<LocalStore>,
    page: Page,
    input: GuessInput,
}

/// Read the page, load progress and wire every listener.
pub(crate) fn boot(config: ClientConfig) -> Result<(), JsValue> {
    let doc = crate::dom::document()?;
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
    let Some(app) = App::from_page(&doc, config, Rng::new(seed))? else {
        log::error!("Fatal: game-container element not found.");
        return Ok(());
    };

    let listeners = app.wire_listeners();
    APP.with(|cell| *cell.borrow_mut() = Some(app));
    listeners?;

    with_app(|app| {
        if let GuessInput::Otp(view) = &app.input {
            view.focus_cell(0);
        }
    });
    crate::help::wire(&doc)?;
    Ok(())
}

/// Register every `.hint-box[data-category]`; a box whose category was
/// revealed before shows its stored hint. The position in the returned list
/// is the box's index in the controller.
fn collect_hint_boxes(
    doc: &Document,
    controller: &mut GameController<LocalStore>,
) -> Result<Vec<HintBoxView>, JsValue> {
    let nodes = doc.query_selector_all(".hint-box")?;
    let mut boxes = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(category) = element.get_attribute("data-category").filter(|c| !c.is_empty()) else {
            continue;
        };
        let content = element.query_selector(".hint-content")?;
        controller.register_hint_box(&category);
        if let (Some(stored), Some(content)) = (controller.stored_hint(&category), &content) {
            content.set_text_content(Some(stored));
            element.class_list().add_1("hint-revealed")?;
        }
        boxes.push(HintBoxView {
            category,
            element,
            content,
        });
    }
    Ok(boxes)
}

impl App {
    /// Load progress for the page's game and build its inputs, without
    /// attaching listeners. `None` when the page has no `#game-container`.
    fn from_page(doc: &Document, config: ClientConfig, rng: Rng) -> Result<Option<Self>, JsValue> {
        let Some(game_container) = doc.get_element_by_id("game-container") else {
            return Ok(None);
        };
        let game_id = GameId::new(game_container.get_attribute("data-game-id").unwrap_or_default());
        let mut controller = GameController::new(config, LocalStore::open(), game_id, rng);

        let hint_boxes = collect_hint_boxes(doc, &mut controller)?;
        let page = Page {
            guesses_left: doc.get_element_by_id("guesses-left"),
            hints_used: doc.get_element_by_id("hints-used"),
            results: doc.get_element_by_id("game-results"),
            hint_boxes,
        };

        let input = match OtpView::mount(doc, &game_container)? {
            Some(view) => GuessInput::Otp(view),
            None => match (
                by_id::<HtmlInputElement>(doc, "guess-input"),
                by_id::<HtmlButtonElement>(doc, "guess-button"),
            ) {
                (Some(input), Some(button)) => GuessInput::Plain { input, button },
                _ => {
                    log::warn!("no guess input found on the page");
                    GuessInput::Missing
                }
            },
        };

        let app = App {
            controller,
            page,
            input,
        };
        app.render_counters();
        Ok(Some(app))
    }

    /// Clear this game's stored progress.
    pub fn clear_state(&self) {
        self.controller.clear_state();
    }

    fn render_counters(&self) {
        let counters = self.controller.counters();
        set_text(self.page.guesses_left.as_ref(), &counters.guesses_left.to_string());
        set_text(self.page.hints_used.as_ref(), &counters.hints_used.to_string());
    }

    fn show_result(&self, message: &str) {
        set_text(self.page.results.as_ref(), message);
    }

    fn wire_listeners(&self) -> Result<(), JsValue> {
        for (index, hint_box) in self.page.hint_boxes.iter().enumerate() {
            listen(&hint_box.element, "click", move |_| request_hint(index))?;
        }
        match &self.input {
            GuessInput::Otp(view) => wire_otp(view),
            GuessInput::Plain { input, button } => wire_plain(input, button),
            GuessInput::Missing => Ok(()),
        }
    }

    fn set_inputs_enabled(&self, enabled: bool) {
        match &self.input {
            GuessInput::Otp(view) => view.set_enabled(enabled),
            GuessInput::Plain { input, button } => {
                input.set_disabled(!enabled);
                button.set_disabled(!enabled);
            }
            GuessInput::Missing => {}
        }
    }

    fn reset_inputs(&mut self) {
        match &mut self.input {
            GuessInput::Otp(view) => view.reset(),
            GuessInput::Plain { input, .. } => {
                input.set_value("");
                focus(input);
            }
            GuessInput::Missing => {}
        }
    }

    // -- Guesses --

    fn begin_guess(&mut self, guess: &str) -> Option<(String, FormBody)> {
        match self.controller.begin_guess(guess) {
            Ok(body) => {
                self.set_inputs_enabled(false);
                self.show_result(CHECKING_MESSAGE);
                Some((self.controller.config().guess_endpoint.clone(), body))
            }
            Err(rejected) => {
                if let Some(message) = rejected.user_message() {
                    self.show_result(&message);
                }
                None
            }
        }
    }

    fn finish_guess(&mut self, guess: &str, result: Result<GuessResponse, ClientError>) {
        let outcome = self.controller.finish_guess(guess, result);
        self.render_counters();
        match outcome {
            GuessOutcome::Redirect(redirect) => {
                self.show_result("");
                let url = redirect.to_url(self.controller.config());
                let navigated = web_sys::window()
                    .ok_or_else(|| JsValue::from_str("no window"))
                    .and_then(|window| window.location().set_href(&url));
                if let Err(err) = navigated {
                    log::error!("redirect to {url} failed: {err:?}");
                }
            }
            GuessOutcome::Settled {
                message,
                reset_inputs,
            } => {
                self.show_result(&message);
                if reset_inputs {
                    self.set_inputs_enabled(true);
                    self.reset_inputs();
                }
            }
        }
    }

    /// The OTP guess, or a validation message when cells are empty.
    fn otp_submission(&mut self) -> Option<String> {
        let GuessInput::Otp(view) = &self.input else {
            return None;
        };
        match view.model.submission() {
            Ok(guess) => {
                view.hidden.set_value(&guess);
                Some(guess)
            }
            Err(rejected) => {
                if let Some(message) = rejected.user_message() {
                    self.show_result(&message);
                }
                None
            }
        }
    }

    // -- OTP cells --

    fn on_cell_input(&mut self, index: usize) {
        let GuessInput::Otp(view) = &mut self.input else {
            return;
        };
        let Some(raw) = view.cells.get(index).map(|cell| cell.value()) else {
            return;
        };
        let next = view.model.on_input(index, &raw);
        view.sync();
        if let Some(next) = next {
            view.focus_cell(next);
        }
    }

    fn on_cell_key(&mut self, index: usize, key: OtpKey) -> KeyOutcome {
        let GuessInput::Otp(view) = &mut self.input else {
            return KeyOutcome::Ignored;
        };
        let outcome = view.model.on_key(index, key);
        if let KeyOutcome::Focus(next) = outcome {
            view.focus_cell(next);
        }
        outcome
    }

    fn on_cell_paste(&mut self, text: &str) {
        let GuessInput::Otp(view) = &mut self.input else {
            return;
        };
        if let Some(next) = view.model.on_paste(text) {
            view.sync();
            view.focus_cell(next);
        }
    }

    // -- Hints --

    fn begin_hint(&mut self, index: usize) -> Option<(String, String, FormBody)> {
        let body = self.controller.begin_hint(index)?;
        let hint_box = self.page.hint_boxes.get(index)?;
        if let Err(err) = hint_box.element.class_list().add_1("hint-loading") {
            log::warn!("could not mark hint loading: {err:?}");
        }
        set_text(hint_box.content.as_ref(), HINT_LOADING_MESSAGE);
        Some((
            hint_box.category.clone(),
            self.controller.config().hint_endpoint.clone(),
            body,
        ))
    }

    fn finish_hint(&mut self, index: usize, result: Result<HintResponse, ClientError>) {
        let outcome = self.controller.finish_hint(index, result);
        let Some(hint_box) = self.page.hint_boxes.get(index) else {
            return;
        };
        let classes = hint_box.element.class_list();
        let _ = classes.remove_1("hint-loading");
        match outcome {
            HintOutcome::Revealed { hint } => {
                set_text(hint_box.content.as_ref(), &hint);
                let _ = classes.add_1("hint-revealed");
                self.render_counters();
            }
            HintOutcome::Failed { message } => {
                set_text(hint_box.content.as_ref(), "");
                self.show_result(&message);
            }
        }
    }
}

/// Send `guess` if the controller accepts it.
fn submit_guess(guess: String) {
    let Some((url, body)) = with_app(|app| app.begin_guess(&guess)).flatten() else {
        return;
    };
    spawn_local(async move {
        let result = post_form::<GuessResponse>(&url, &body).await;
        with_app(|app| app.finish_guess(&guess, result));
    });
}

fn submit_otp() {
    if let Some(guess) = with_app(App::otp_submission).flatten() {
        submit_guess(guess);
    }
}

fn request_hint(index: usize) {
    let Some((category, url, body)) = with_app(|app| app.begin_hint(index)).flatten() else {
        return;
    };
    log::debug!("requesting hint {category}");
    spawn_local(async move {
        let result = post_form::<HintResponse>(&url, &body).await;
        with_app(|app| app.finish_hint(index, result));
    });
}

fn wire_otp(view: &OtpView) -> Result<(), JsValue> {
    for (index, cell) in view.cells.iter().enumerate() {
        listen(cell, "input", move |_| {
            with_app(|app| app.on_cell_input(index));
        })?;

        listen(cell, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let key = OtpKey::from_key(&key);
            if key == OtpKey::Enter {
                event.prevent_default();
            }
            if with_app(|app| app.on_cell_key(index, key)) == Some(KeyOutcome::Submit) {
                submit_otp();
            }
        })?;

        listen(cell, "paste", move |event| {
            event.prevent_default();
            let text = event
                .dyn_ref::<ClipboardEvent>()
                .and_then(ClipboardEvent::clipboard_data)
                .and_then(|data| data.get_data("text").ok())
                .unwrap_or_default();
            with_app(|app| app.on_cell_paste(&text));
        })?;
    }

    listen(&view.button, "click", |event| {
        event.prevent_default();
        submit_otp();
    })
}

fn wire_plain(input: &HtmlInputElement, button: &HtmlButtonElement) -> Result<(), JsValue> {
    let field = input.clone();
    listen(button, "click", move |event| {
        event.prevent_default();
        submit_guess(field.value().trim().to_string());
    })?;

    let field = input.clone();
    listen(input, "keypress", move |event| {
        let is_enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Enter");
        if is_enter {
            event.prevent_default();
            submit_guess(field.value().trim().to_string());
        }
    })
}
