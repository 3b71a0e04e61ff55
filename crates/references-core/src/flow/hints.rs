/// State of a single hint box on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintBoxState {
    /// Not requested yet. Clicking requests it.
    Hidden,
    /// Request in flight. Clicks are ignored.
    Loading,
    /// Hint shown. Clicks are ignored.
    Revealed,
}

/// Result of a finished hint request, as the page should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// Show `hint` in the box.
    Revealed { hint: String },
    /// Empty the box and show `message` in the results area.
    Failed { message: String },
}

/// Tracks every hint box on the page, in registration order.
///
/// Boxes are addressed by index, so two boxes sharing a category load and
/// reveal independently.
#[derive(Debug, Clone, Default)]
pub struct HintBoard {
    boxes: Vec<(String, HintBoxState)>,
}

impl HintBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a box and return its index. `revealed` marks one restored
    /// from storage.
    pub fn register(&mut self, category: &str, revealed: bool) -> usize {
        let state = if revealed {
            HintBoxState::Revealed
        } else {
            HintBoxState::Hidden
        };
        self.boxes.push((category.to_string(), state));
        self.boxes.len() - 1
    }

    pub fn category(&self, index: usize) -> Option<&str> {
        self.boxes.get(index).map(|(category, _)| category.as_str())
    }

    /// Unknown indexes read as `Hidden`.
    pub fn state(&self, index: usize) -> HintBoxState {
        self.boxes
            .get(index)
            .map(|(_, state)| *state)
            .unwrap_or(HintBoxState::Hidden)
    }

    fn set(&mut self, index: usize, state: HintBoxState) {
        if let Some(slot) = self.boxes.get_mut(index) {
            slot.1 = state;
        }
    }

    /// Start a request for box `index`. Returns false, changing nothing, when
    /// the box is unknown, loading or revealed.
    pub fn begin(&mut self, index: usize) -> bool {
        match self.boxes.get(index) {
            Some((_, HintBoxState::Hidden)) => {
                self.set(index, HintBoxState::Loading);
                true
            }
            _ => false,
        }
    }

    pub fn reveal(&mut self, index: usize) {
        self.set(index, HintBoxState::Revealed);
    }

    /// Request failed; the box can be clicked again.
    pub fn reset(&mut self, index: usize) {
        if self.state(index) == HintBoxState::Loading {
            self.set(index, HintBoxState::Hidden);
        }
    }
}
