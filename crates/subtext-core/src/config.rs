use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EDGE_TOLERANCE, DEFAULT_FIT_PRECISION, DEFAULT_HANDLE_SIZE, DEFAULT_LINE_SPACING,
    DEFAULT_MAX_FONT_SIZE, DEFAULT_MIN_FONT_SIZE, DEFAULT_OCR_ENDPOINT, DEFAULT_OCR_LANGUAGE,
    DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, DEFAULT_TRANSLATION_ENDPOINT,
};
use crate::error::Result;
use crate::geometry::DisplayMode;
use crate::layout::FitParams;
use crate::model::SubtitleDisplayMode;

/// Viewer settings, stored as TOML. Every section may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
}

impl ViewerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Side of the square corner hitbox, in image pixels.
    #[serde(default = "default_handle_size")]
    pub handle_size: i32,
    /// Half-width of the band along each side that grabs the side.
    #[serde(default = "default_edge_tolerance")]
    pub edge_tolerance: i32,
}

fn default_handle_size() -> i32 {
    DEFAULT_HANDLE_SIZE
}
fn default_edge_tolerance() -> i32 {
    DEFAULT_EDGE_TOLERANCE
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            handle_size: DEFAULT_HANDLE_SIZE,
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f32,
    #[serde(default = "default_max_font_size")]
    pub max_font_size: f32,
    /// Bisection stops once the bracket is narrower than this.
    #[serde(default = "default_precision")]
    pub precision: f32,
    /// Line height as a multiple of font size, used by estimated metrics.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
}

fn default_min_font_size() -> f32 {
    DEFAULT_MIN_FONT_SIZE
}
fn default_max_font_size() -> f32 {
    DEFAULT_MAX_FONT_SIZE
}
fn default_precision() -> f32 {
    DEFAULT_FIT_PRECISION
}
fn default_line_spacing() -> f32 {
    DEFAULT_LINE_SPACING
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
            precision: DEFAULT_FIT_PRECISION,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl LayoutConfig {
    pub fn fit_params(&self) -> FitParams {
        FitParams {
            min_font_size: self.min_font_size,
            max_font_size: self.max_font_size,
            precision: self.precision,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: DisplayMode,
    #[serde(default)]
    pub subtitles: SubtitleDisplayMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Base URL of the tesseract-server instance.
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

fn default_ocr_endpoint() -> String {
    DEFAULT_OCR_ENDPOINT.to_string()
}
fn default_ocr_language() -> String {
    DEFAULT_OCR_LANGUAGE.to_string()
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ocr_endpoint(),
            language: default_ocr_language(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Base URL of the LibreTranslate instance.
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_source_language")]
    pub source: String,
    #[serde(default = "default_target_language")]
    pub target: String,
}

fn default_translation_endpoint() -> String {
    DEFAULT_TRANSLATION_ENDPOINT.to_string()
}
fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}
fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            source: default_source_language(),
            target: default_target_language(),
        }
    }
}
