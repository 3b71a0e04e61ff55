use crate::api::error::GuessRejected;

/// Class applied to every letter cell.
pub const CELL_CLASS: &str = "otp-input";
/// Class of the row that holds the cells.
pub const CONTAINER_CLASS: &str = "otp-container";
/// Class of the generated submit button.
pub const SUBMIT_CLASS: &str = "verify-button";
/// Label of the generated submit button.
pub const SUBMIT_LABEL: &str = "Guess!";

/// Inline style of the cell row.
pub const CONTAINER_STYLE: &[(&str, &str)] = &[
    ("display", "flex"),
    ("flex-direction", "row"),
    ("justify-content", "center"),
    ("gap", "8px"),
    ("width", "100%"),
    ("margin", "25px 0"),
];

/// Inline style of one cell. Fixed width keeps long words on one row.
pub const CELL_STYLE: &[(&str, &str)] = &[
    ("width", "40px"),
    ("height", "40px"),
    ("min-width", "40px"),
    ("max-width", "40px"),
    ("border", "1px solid #CED4DA"),
    ("text-align", "center"),
    ("font-size", "1.5rem"),
    ("text-transform", "uppercase"),
    ("padding", "0"),
    ("box-sizing", "border-box"),
    ("flex", "0 0 auto"),
];

/// Inline style of the submit button.
pub const SUBMIT_STYLE: &[(&str, &str)] = &[
    ("background-color", "#28A745"),
    ("color", "white"),
    ("padding", "12px 25px"),
    ("width", "100%"),
    ("border", "none"),
    ("font-size", "1rem"),
    ("font-weight", "700"),
    ("cursor", "pointer"),
];

/// Layout of one letter cell, independent of any DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpec {
    pub index: usize,
    pub max_length: u32,
    pub class_name: &'static str,
    pub style: &'static [(&'static str, &'static str)],
}

/// Number of letters in a masked word: its non-whitespace characters.
pub fn word_length_from_masked(masked: &str) -> usize {
    masked.trim().chars().filter(|c| !c.is_whitespace()).count()
}

/// Describe the `word_length` cells to build, left to right.
pub fn build_input_spec(word_length: usize) -> Vec<CellSpec> {
    (0..word_length)
        .map(|index| CellSpec {
            index,
            max_length: 1,
            class_name: CELL_CLASS,
            style: CELL_STYLE,
        })
        .collect()
}

/// Keys the cells react to. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpKey {
    Enter,
    Backspace,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl OtpKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => OtpKey::Enter,
            "Backspace" => OtpKey::Backspace,
            "ArrowLeft" => OtpKey::ArrowLeft,
            "ArrowRight" => OtpKey::ArrowRight,
            _ => OtpKey::Other,
        }
    }
}

/// What a key press asks the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Move focus to this cell.
    Focus(usize),
    /// Every cell is filled; submit the guess.
    Submit,
    Ignored,
}

/// Contents and focus of a row of single-letter cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpInput {
    cells: Vec<String>,
    focused: usize,
}

impl OtpInput {
    pub fn new(word_length: usize) -> Self {
        Self {
            cells: vec![String::new(); word_length],
            focused: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Focused cell, or `None` when there are no cells.
    pub fn focused(&self) -> Option<usize> {
        (!self.cells.is_empty()).then_some(self.focused)
    }

    /// The guess as typed so far: every cell's content, in order.
    pub fn value(&self) -> String {
        self.cells.concat()
    }

    pub fn is_complete(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| !c.is_empty())
    }

    /// Cell `index` now holds `raw`. Stores it uppercased and, when non-empty,
    /// advances focus to the next cell. Returns the cell to focus, if any.
    pub fn on_input(&mut self, index: usize, raw: &str) -> Option<usize> {
        let slot = self.cells.get_mut(index)?;
        *slot = raw.to_uppercase();
        if slot.is_empty() {
            return None;
        }
        if index + 1 < self.cells.len() {
            self.focused = index + 1;
            return Some(self.focused);
        }
        None
    }

    /// Handle a key press in cell `index`.
    pub fn on_key(&mut self, index: usize, key: OtpKey) -> KeyOutcome {
        if index >= self.cells.len() {
            return KeyOutcome::Ignored;
        }
        let target = match key {
            OtpKey::Enter => {
                return if self.is_complete() {
                    KeyOutcome::Submit
                } else {
                    KeyOutcome::Ignored
                };
            }
            OtpKey::Backspace if self.cells[index].is_empty() && index > 0 => index - 1,
            OtpKey::ArrowLeft if index > 0 => index - 1,
            OtpKey::ArrowRight if index + 1 < self.cells.len() => index + 1,
            _ => return KeyOutcome::Ignored,
        };
        self.focused = target;
        KeyOutcome::Focus(target)
    }

    /// Distribute pasted text over the cells.
    ///
    /// Whitespace is stripped and at most `len()` characters are used. They
    /// always land from cell 0, whichever cell received the paste. Returns the
    /// cell to focus next: the first empty one, else the last.
    pub fn on_paste(&mut self, text: &str) -> Option<usize> {
        let letters: Vec<char> = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(self.cells.len())
            .collect();
        if letters.is_empty() {
            return None;
        }
        for (cell, letter) in self.cells.iter_mut().zip(letters) {
            *cell = letter.to_uppercase().collect();
        }
        let next = self
            .cells
            .iter()
            .position(String::is_empty)
            .unwrap_or(self.cells.len() - 1);
        self.focused = next;
        Some(next)
    }

    /// Empty every cell and return focus to the first.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.focused = 0;
    }

    /// The guess to submit, once every cell is filled.
    pub fn submission(&self) -> Result<String, GuessRejected> {
        if self.is_complete() {
            Ok(self.value())
        } else {
            Err(GuessRejected::Incomplete)
        }
    }
}
