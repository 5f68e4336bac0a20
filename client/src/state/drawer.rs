//! Side drawer state: which panel is showing and what it operates on.
//!
//! DESIGN
//! ======
//! Exactly one panel can be active. Opening a panel replaces the whole
//! descriptor; closing only clears `is_open` so the outgoing panel can keep
//! rendering its content during the close transition. Panels receive their
//! payload through [`DrawerData`] instead of reading application state.

#[cfg(test)]
#[path = "drawer_test.rs"]
mod drawer_test;

/// Closed set of drawer panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerMode {
    History,
    Settings,
    Enhance,
    Layouts,
    CodeEditor,
    Import,
    Templates,
    Variations,
}

impl DrawerMode {
    /// Default drawer title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::History => "History",
            Self::Settings => "Settings",
            Self::Enhance => "AI Enhancements",
            Self::Layouts => "Layout Templates",
            Self::CodeEditor => "Direct Code Edit",
            Self::Import => "Import",
            Self::Templates => "Templates",
            Self::Variations => "Variations",
        }
    }

    /// History slides in from the left; every other panel from the right.
    #[must_use]
    pub fn slides_from_left(self) -> bool {
        self == Self::History
    }
}

/// Payload handed to the active panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DrawerData {
    #[default]
    None,
    /// Code editor contents, plus the last inspected element snippet.
    Code { html: String, selected: Option<String> },
    /// Artifact html the panel previews against (layouts).
    Artifact { html: String },
}

/// Single-owner drawer descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawerState {
    pub is_open: bool,
    pub mode: Option<DrawerMode>,
    pub title: String,
    pub data: DrawerData,
}

impl DrawerState {
    /// Open `mode` with its default title.
    pub fn open(&mut self, mode: DrawerMode, data: DrawerData) {
        self.open_titled(mode, mode.title(), data);
    }

    /// Open `mode`, replacing any panel currently showing.
    pub fn open_titled(&mut self, mode: DrawerMode, title: &str, data: DrawerData) {
        *self = Self { is_open: true, mode: Some(mode), title: title.to_owned(), data };
    }

    /// Hide the drawer, keeping mode and data for the exit transition.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Mode of the visible panel, if any.
    #[must_use]
    pub fn active(&self) -> Option<DrawerMode> {
        if self.is_open { self.mode } else { None }
    }

    #[must_use]
    pub fn is_showing(&self, mode: DrawerMode) -> bool {
        self.active() == Some(mode)
    }

    /// Attach an inspected element to an open code editor. Returns whether
    /// the payload changed.
    pub fn attach_selection(&mut self, snippet: &str) -> bool {
        if !self.is_showing(DrawerMode::CodeEditor) {
            return false;
        }
        match &mut self.data {
            DrawerData::Code { selected, .. } => {
                *selected = Some(snippet.to_owned());
                true
            }
            _ => false,
        }
    }
}
