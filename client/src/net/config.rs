//! AI credential and model configuration.
//!
//! The browser bundle has no process environment, so the key is baked in at
//! build time from `DASHGEN_API_KEY`. A key saved in the settings panel wins
//! over the build-time one.

use super::generator::{GenerateError, ModelTier};

/// Build-time variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "DASHGEN_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_PRO_MODEL: &str = "gemini-3-pro-preview";
/// How long generation waits for concept names before using fallbacks.
pub const DEFAULT_STYLE_TIMEOUT_MS: u32 = 8_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub pro_model: String,
    pub style_timeout_ms: u32,
}

impl AiConfig {
    /// Resolve the credential, preferring `override_key` over the build-time
    /// key. Blank keys count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingApiKey`] when neither source has a key.
    pub fn resolve(override_key: Option<&str>) -> Result<Self, GenerateError> {
        Self::resolve_with(override_key, option_env!("DASHGEN_API_KEY"))
    }

    /// [`AiConfig::resolve`] with an explicit build-time value.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingApiKey`] when both keys are blank.
    pub fn resolve_with(override_key: Option<&str>, build_key: Option<&str>) -> Result<Self, GenerateError> {
        let api_key = [override_key, build_key]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|key| !key.is_empty())
            .ok_or_else(|| GenerateError::MissingApiKey { var: API_KEY_VAR.into() })?;
        Ok(Self::with_key(api_key))
    }

    /// Defaults around a known key.
    #[must_use]
    pub fn with_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            pro_model: DEFAULT_PRO_MODEL.to_owned(),
            style_timeout_ms: DEFAULT_STYLE_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub fn model_name(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Flash => &self.text_model,
            ModelTier::Pro => &self.pro_model,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
