/// Input the help overlay reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpEvent {
    /// The help button was clicked.
    TriggerClick,
    /// The modal's close control was clicked.
    CloseClick,
    /// A click landed inside the modal. `on_backdrop` is true when the target
    /// was the modal element itself rather than its content.
    ModalClick { on_backdrop: bool },
    /// A key was pressed anywhere on the page.
    Key(String),
}

/// Attributes to write on the modal element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalAttrs {
    /// Whether the `open` attribute is present.
    pub open: bool,
    /// Value of `aria-hidden`.
    pub aria_hidden: &'static str,
}

/// Open/closed state of the help overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpModal {
    open: bool,
}

impl HelpModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply an event. Returns the attributes to write, or `None` when the
    /// event does not concern the modal. Opening an open modal (or closing a
    /// closed one) still returns attributes; writing them again is harmless.
    pub fn handle(&mut self, event: &HelpEvent) -> Option<ModalAttrs> {
        let open = match event {
            HelpEvent::TriggerClick => true,
            HelpEvent::CloseClick => false,
            HelpEvent::ModalClick { on_backdrop: true } => false,
            HelpEvent::Key(key) if key == "Escape" => false,
            _ => return None,
        };
        self.open = open;
        Some(self.attrs())
    }

    pub fn attrs(&self) -> ModalAttrs {
        ModalAttrs {
            open: self.open,
            aria_hidden: if self.open { "false" } else { "true" },
        }
    }
}
