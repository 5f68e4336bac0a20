//! Generation settings applied to every new request.
//!
//! Loaded once at startup from storage; the settings panel edits a copy and
//! every change is written straight back.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

use crate::util::persistence::{self, KeyValueStore, SETTINGS_KEY, StorageError};

/// CSS/component framework the model is asked to target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    #[default]
    Vanilla,
    Tailwind,
    ReactMui,
    Bootstrap,
    Foundation,
}

impl Framework {
    pub const ALL: [Self; 5] = [Self::Vanilla, Self::Tailwind, Self::ReactMui, Self::Bootstrap, Self::Foundation];

    /// Wire/storage identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::Tailwind => "tailwind",
            Self::ReactMui => "react-mui",
            Self::Bootstrap => "bootstrap",
            Self::Foundation => "foundation",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Vanilla => "Vanilla CSS",
            Self::Tailwind => "Tailwind CSS (CDN)",
            Self::ReactMui => "React + Material UI (CDN)",
            Self::Bootstrap => "Bootstrap 5 (CDN)",
            Self::Foundation => "Foundation 6 (CDN)",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }
}

/// Process-wide generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub framework: Framework,
    /// Free-text description of the user's data, woven into prompts.
    pub data_context: String,
    pub auto_a11y: bool,
    pub auto_charts: bool,
    pub auto_personas: bool,
    /// Runtime credential override; the build-time key is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            framework: Framework::Vanilla,
            data_context: String::new(),
            auto_a11y: false,
            auto_charts: true,
            auto_personas: true,
            api_key: None,
        }
    }
}

/// Boolean toggles exposed by the settings panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingToggle {
    A11y,
    Charts,
    Personas,
}

impl GenerationSettings {
    /// Stored settings, or defaults when missing or corrupt.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        persistence::load_json(store, SETTINGS_KEY).unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        persistence::save_json(store, SETTINGS_KEY, self)
    }

    pub fn toggle(&mut self, toggle: SettingToggle) {
        let flag = match toggle {
            SettingToggle::A11y => &mut self.auto_a11y,
            SettingToggle::Charts => &mut self.auto_charts,
            SettingToggle::Personas => &mut self.auto_personas,
        };
        *flag = !*flag;
    }

    /// Enabled auto-enhancement instructions, in prompt order.
    #[must_use]
    pub fn enhancement_directives(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.auto_a11y {
            out.push("Ensure WCAG 2.1 AA accessibility (ARIA, contrast, semantics).");
        }
        if self.auto_charts {
            out.push("Detect numeric trends and inject interactive Chart.js visualizations.");
        }
        if self.auto_personas {
            out.push("Inject realistic brand personas, user profiles and a cohesive brand identity.");
        }
        out
    }
}
