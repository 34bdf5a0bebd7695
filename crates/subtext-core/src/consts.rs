/// Side length (image pixels) of the square hitbox centered on each selection corner.
pub const DEFAULT_HANDLE_SIZE: i32 = 8;

/// Distance (image pixels) from a selection side that still counts as grabbing that side.
pub const DEFAULT_EDGE_TOLERANCE: i32 = 5;

/// Side length (display pixels) of the painted corner handles.
pub const HANDLE_PAINT_SIZE: f32 = 8.0;

/// Smallest font size the text fit search will return.
pub const DEFAULT_MIN_FONT_SIZE: f32 = 1.0;

/// Upper bound of the text fit search range.
pub const DEFAULT_MAX_FONT_SIZE: f32 = 200.0;

/// The fit search stops once the bracket is narrower than this.
pub const DEFAULT_FIT_PRECISION: f32 = 0.1;

/// Line height as a multiple of the font size.
pub const DEFAULT_LINE_SPACING: f32 = 1.2;

/// Estimated advance of a Latin glyph, in ems.
pub const ESTIMATED_GLYPH_ADVANCE: f32 = 0.55;

/// Estimated advance of a space, in ems.
pub const ESTIMATED_SPACE_ADVANCE: f32 = 0.3;

/// Estimated advance of a CJK / full-width glyph, in ems.
pub const ESTIMATED_WIDE_ADVANCE: f32 = 1.0;

/// Default tesseract-server base URL.
pub const DEFAULT_OCR_ENDPOINT: &str = "http://localhost:8884";

/// Default LibreTranslate base URL.
pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "http://localhost:5000";

/// Default OCR language code.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Default translation source language code.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "el";

/// Default translation target language code.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Image file extensions recognised when building a catalog.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// OCR languages offered in the UI: (display name, tesseract code).
pub const OCR_LANGUAGES: &[(&str, &str)] = &[("English", "eng"), ("Chinese", "chs"), ("Greek", "grc")];

/// Translation languages offered in the UI: (display name, ISO code).
pub const TRANSLATION_LANGUAGES: &[(&str, &str)] = &[("English", "en"), ("Chinese", "zh"), ("Greek", "el")];
