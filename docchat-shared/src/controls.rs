//! Local state of the two input controls, kept free of any UI framework so
//! the submit rules can be exercised directly.

/// Draft text of the question box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerDraft {
    text: String,
}

impl ComposerDraft {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the draft with the control's current value.
    pub fn on_change(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    /// Whether [`Self::submit`] would emit anything.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Returns the trimmed draft and clears it, or `None` (leaving the draft
    /// untouched) when it is blank.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let submitted = trimmed.to_string();
        self.text.clear();
        Some(submitted)
    }
}

/// The file currently chosen in the picker, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection<F> {
    selected: Option<F>,
}

impl<F> Default for FileSelection<F> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<F> FileSelection<F> {
    #[must_use]
    pub const fn selected(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    /// Stores the picked file, or clears the selection when the dialog was
    /// cancelled.
    pub fn on_file_chosen(&mut self, file: Option<F>) {
        self.selected = file;
    }

    /// Hands out the selected file and leaves the selection empty.
    pub fn submit(&mut self) -> Option<F> {
        self.selected.take()
    }
}
