//! Display settings: appearance, language and font size.
//!
//! Plain state with no link to the catalog session. The host applies these
//! values when it draws; nothing here translates strings or scales fonts.

use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: f64 = 12.0;
pub const MAX_FONT_SIZE: f64 = 30.0;
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    appearance: Appearance,
    language: Language,
    font_size: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            language: Language::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl DisplaySettings {
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn is_light_mode(&self) -> bool {
        self.appearance == Appearance::Light
    }

    pub fn set_light_mode(&mut self, light: bool) {
        self.appearance = if light {
            Appearance::Light
        } else {
            Appearance::Dark
        };
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Whole points within 12..=30. Returns the stored value. NaN is ignored.
    pub fn set_font_size(&mut self, size: f64) -> f64 {
        if !size.is_nan() {
            self.font_size = size.round().clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
        self.font_size
    }
}
