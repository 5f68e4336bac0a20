//! Local view state for the workspace (focus, diff, inspect).
//!
//! DESIGN
//! ======
//! Keeps presentation toggles out of the session list so they never enter
//! undo history or storage.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Top-level layout of the workspace stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageMode {
    /// All artifacts of the current session side by side.
    #[default]
    Grid,
    /// One artifact enlarged with the action bar visible.
    Focus,
}

/// View toggles for the artifact stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Index into the current session's artifacts.
    pub focused_artifact: Option<usize>,
    /// Comparison view of pre/post operation snapshots.
    pub diff_mode: bool,
    /// In diff mode, render the snapshot instead of the current html.
    pub show_original: bool,
    /// Element inspection inside previews.
    pub inspect_mode: bool,
}

impl UiState {
    #[must_use]
    pub fn stage_mode(&self) -> StageMode {
        if self.focused_artifact.is_some() { StageMode::Focus } else { StageMode::Grid }
    }

    pub fn focus(&mut self, index: usize) {
        if self.focused_artifact != Some(index) {
            self.show_original = false;
        }
        self.focused_artifact = Some(index);
    }

    /// Back to the grid. Leaves diff and inspect mode.
    pub fn unfocus(&mut self) {
        self.focused_artifact = None;
        self.diff_mode = false;
        self.show_original = false;
        self.inspect_mode = false;
    }

    pub fn toggle_diff(&mut self) {
        self.diff_mode = !self.diff_mode;
        if !self.diff_mode {
            self.show_original = false;
        }
    }

    /// Flip the diff side. Ignored outside diff mode.
    pub fn toggle_show_original(&mut self) {
        if self.diff_mode {
            self.show_original = !self.show_original;
        }
    }

    /// Whether previews should currently render the snapshot.
    #[must_use]
    pub fn showing_original(&self) -> bool {
        self.diff_mode && self.show_original
    }
}
