//! Auto-fitting text layout: the largest font size whose greedy word wrap
//! fits a fixed box, with each line centered.

use std::collections::HashMap;

use crate::consts::{
    DEFAULT_FIT_PRECISION, DEFAULT_LINE_SPACING, DEFAULT_MAX_FONT_SIZE, DEFAULT_MIN_FONT_SIZE,
    ESTIMATED_GLYPH_ADVANCE, ESTIMATED_SPACE_ADVANCE, ESTIMATED_WIDE_ADVANCE,
};

/// Upper bound on bisection steps, independent of the configured precision.
const MAX_FIT_ITERATIONS: usize = 64;

/// Font metrics supplied by whatever actually draws the text.
pub trait TextMeasurer {
    /// Advance width of `text` on a single line at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Distance between consecutive baselines at `font_size`.
    fn line_height(&self, font_size: f32) -> f32;
}

/// Font-independent metrics from fixed per-glyph advances. Used headless
/// (CLI, tests) where no real font is available.
#[derive(Clone, Copy, Debug)]
pub struct EstimatedMetrics {
    pub line_spacing: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl TextMeasurer for EstimatedMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let ems: f32 = text
            .chars()
            .map(|c| {
                if c.is_whitespace() {
                    ESTIMATED_SPACE_ADVANCE
                } else if is_wide(c) {
                    ESTIMATED_WIDE_ADVANCE
                } else {
                    ESTIMATED_GLYPH_ADVANCE
                }
            })
            .sum();
        ems * font_size
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_spacing
    }
}

/// Full-width glyphs (CJK, Hangul, full-width forms). These may break
/// anywhere, without a separating space.
pub fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD)
}

/// Search range for [`fit_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub precision: f32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
            precision: DEFAULT_FIT_PRECISION,
        }
    }
}

/// One wrapped line, positioned relative to the box's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    pub font_size: f32,
    pub line_height: f32,
    pub lines: Vec<LayoutLine>,
}

impl TextLayout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Height of the whole wrapped block.
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Widest line.
    pub fn width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }
}

#[derive(Clone, Copy, Debug)]
struct Token<'a> {
    text: &'a str,
    space_before: bool,
}

/// Split one paragraph into break opportunities: whitespace-separated words,
/// with every wide glyph standing alone.
fn tokenize(paragraph: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in paragraph.split_whitespace() {
        let mut space_before = true;
        let mut run_start: Option<usize> = None;
        for (i, c) in word.char_indices() {
            if is_wide(c) {
                if let Some(start) = run_start.take() {
                    tokens.push(Token {
                        text: &word[start..i],
                        space_before,
                    });
                    space_before = false;
                }
                tokens.push(Token {
                    text: &word[i..i + c.len_utf8()],
                    space_before,
                });
                space_before = false;
            } else if run_start.is_none() {
                run_start = Some(i);
            }
        }
        if let Some(start) = run_start {
            tokens.push(Token {
                text: &word[start..],
                space_before,
            });
        }
    }
    tokens
}

/// Greedy word wrap at `font_size`. Explicit newlines always break.
/// A single token wider than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, measurer: &dyn TextMeasurer) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for token in tokenize(paragraph) {
            if line.is_empty() {
                line.push_str(token.text);
                continue;
            }
            let mut candidate = line.clone();
            if token.space_before {
                candidate.push(' ');
            }
            candidate.push_str(token.text);
            if measurer.text_width(&candidate, font_size) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(token.text);
            }
        }
        lines.push(line);
    }
    lines
}

fn fits(text: &str, box_width: f32, box_height: f32, font_size: f32, measurer: &dyn TextMeasurer) -> bool {
    let lines = wrap_text(text, box_width, font_size, measurer);
    let height = lines.len() as f32 * measurer.line_height(font_size);
    height <= box_height
        && lines
            .iter()
            .all(|l| measurer.text_width(l, font_size) <= box_width)
}

/// Largest font size in the search range at which `text` fits the box.
/// Never below `params.min_font_size`, even if nothing fits.
pub fn fit_font_size(
    text: &str,
    box_width: f32,
    box_height: f32,
    measurer: &dyn TextMeasurer,
    params: &FitParams,
) -> f32 {
    let mut lo = params.min_font_size.max(f32::MIN_POSITIVE);
    let mut hi = params.max_font_size.max(lo);
    let precision = if params.precision > 0.0 {
        params.precision
    } else {
        DEFAULT_FIT_PRECISION
    };

    if fits(text, box_width, box_height, hi, measurer) {
        return hi;
    }

    let mut iterations = 0;
    while hi - lo > precision && iterations < MAX_FIT_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if fits(text, box_width, box_height, mid, measurer) {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }
    lo
}

/// Fit `text` into a `box_width` x `box_height` box: choose the font size,
/// wrap, center the block vertically and each line horizontally.
pub fn fit_text(
    text: &str,
    box_width: f32,
    box_height: f32,
    measurer: &dyn TextMeasurer,
    params: &FitParams,
) -> TextLayout {
    if box_width <= 0.0 || box_height <= 0.0 || text.trim().is_empty() {
        return TextLayout::default();
    }

    let font_size = fit_font_size(text, box_width, box_height, measurer, params);
    let line_height = measurer.line_height(font_size);
    let wrapped = wrap_text(text, box_width, font_size, measurer);
    let top = (box_height - wrapped.len() as f32 * line_height) / 2.0;

    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measurer.text_width(&text, font_size);
            LayoutLine {
                x: (box_width - width) / 2.0,
                y: top + i as f32 * line_height,
                width,
                text,
            }
        })
        .collect();

    TextLayout {
        font_size,
        line_height,
        lines,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    box_size: (u32, u32),
    params: (u32, u32, u32),
}

/// Fitted layouts kept across repaints, keyed by text, box size and fit
/// parameters. Entries not requested during the last frame are dropped.
///
/// The cache does not know the measurer; call [`LayoutCache::clear`] when
/// font metrics change.
#[derive(Debug, Default)]
pub struct LayoutCache {
    current: HashMap<LayoutKey, TextLayout>,
    previous: HashMap<LayoutKey, TextLayout>,
    misses: usize,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`fit_text`], reusing an earlier result for the same inputs.
    pub fn fit(
        &mut self,
        text: &str,
        box_width: f32,
        box_height: f32,
        measurer: &dyn TextMeasurer,
        params: &FitParams,
    ) -> TextLayout {
        let key = LayoutKey {
            text: text.to_string(),
            box_size: (box_width.to_bits(), box_height.to_bits()),
            params: (
                params.min_font_size.to_bits(),
                params.max_font_size.to_bits(),
                params.precision.to_bits(),
            ),
        };
        if let Some(layout) = self.current.get(&key) {
            return layout.clone();
        }
        let layout = match self.previous.remove(&key) {
            Some(layout) => layout,
            None => {
                self.misses += 1;
                fit_text(text, box_width, box_height, measurer, params)
            }
        };
        self.current.insert(key, layout.clone());
        layout
    }

    /// Forget layouts that were not used since the previous call.
    pub fn end_frame(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }

    /// Number of layouts computed from scratch so far.
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.current.len() + self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.previous.is_empty()
    }
}
