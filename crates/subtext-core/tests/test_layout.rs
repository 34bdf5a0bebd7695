use approx::assert_relative_eq;

use std::cell::Cell;

use subtext_core::layout::{
    fit_font_size, fit_text, wrap_text, EstimatedMetrics, FitParams, LayoutCache, TextMeasurer,
};

/// Every glyph is exactly `font_size` wide and lines are `font_size` tall.
struct MonoMetrics;

impl TextMeasurer for MonoMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size
    }
}

fn assert_fits(text: &str, w: f32, h: f32, measurer: &dyn TextMeasurer) {
    let layout = fit_text(text, w, h, measurer, &FitParams::default());
    assert!(!layout.is_empty());
    assert!(layout.height() <= h + 1e-3, "height {} > {h}", layout.height());
    for line in &layout.lines {
        let width = measurer.text_width(&line.text, layout.font_size);
        assert!(width <= w + 1e-3, "line {:?} width {width} > {w}", line.text);
    }
}

// ---------------------------------------------------------------------------
// Wrapping
// ---------------------------------------------------------------------------

#[test]
fn test_wrap_greedy() {
    let lines = wrap_text("aa bb cc dd", 5.0, 1.0, &MonoMetrics);
    assert_eq!(lines, vec!["aa bb", "cc dd"]);
}

#[test]
fn test_wrap_long_word_gets_own_line() {
    let lines = wrap_text("a verylongword b", 5.0, 1.0, &MonoMetrics);
    assert_eq!(lines, vec!["a", "verylongword", "b"]);
}

#[test]
fn test_wrap_honours_newlines() {
    let lines = wrap_text("one\ntwo three", 100.0, 1.0, &MonoMetrics);
    assert_eq!(lines, vec!["one", "two three"]);
}

#[test]
fn test_wrap_breaks_between_wide_glyphs() {
    let lines = wrap_text("你好世界", 2.0, 1.0, &MonoMetrics);
    assert_eq!(lines, vec!["你好", "世界"]);
}

// ---------------------------------------------------------------------------
// Font size search
// ---------------------------------------------------------------------------

#[test]
fn test_single_word_fills_box() {
    // "abcd" at size s is 4s wide and s tall: width-bound at 100/4 = 25.
    let size = fit_font_size("abcd", 100.0, 100.0, &MonoMetrics, &FitParams::default());
    assert!(size <= 25.0 && size > 24.8, "size {size}");
}

#[test]
fn test_short_text_in_huge_box_hits_cap() {
    let size = fit_font_size("a", 10_000.0, 10_000.0, &MonoMetrics, &FitParams::default());
    assert_relative_eq!(size, 200.0);
}

#[test]
fn test_unfittable_text_returns_floor() {
    let params = FitParams::default();
    let size = fit_font_size("abcdefghij", 2.0, 0.5, &MonoMetrics, &params);
    assert_relative_eq!(size, params.min_font_size);
}

#[test]
fn test_scenario_long_sentence_fits_region() {
    let text = "A very long sentence that will not fit";
    assert_fits(text, 100.0, 40.0, &EstimatedMetrics::default());
    assert_fits(text, 100.0, 40.0, &MonoMetrics);
}

#[test]
fn test_longer_text_never_larger_font() {
    let text = "The quick brown fox jumps over the lazy dog and keeps running far away";
    let metrics = EstimatedMetrics::default();
    let params = FitParams::default();
    let mut previous = f32::MAX;
    for end in (1..=text.len()).filter(|i| text.is_char_boundary(*i)) {
        let size = fit_font_size(&text[..end], 120.0, 60.0, &metrics, &params);
        assert!(size <= previous + 1e-4, "prefix {end}: {size} > {previous}");
        previous = size;
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[test]
fn test_lines_are_centered() {
    let layout = fit_text("ab cdef", 12.0, 100.0, &MonoMetrics, &FitParams::default());
    assert_eq!(layout.lines.len(), 2);
    for line in &layout.lines {
        assert_relative_eq!(line.x, (12.0 - line.width) / 2.0, epsilon = 1e-4);
    }
    let top = layout.lines[0].y;
    let bottom = 100.0 - (top + layout.height());
    assert_relative_eq!(top, bottom, epsilon = 1e-3);
    assert_relative_eq!(layout.lines[1].y - layout.lines[0].y, layout.line_height, epsilon = 1e-4);
}

#[test]
fn test_degenerate_box_is_empty_layout() {
    assert!(fit_text("hello", 0.0, 10.0, &MonoMetrics, &FitParams::default()).is_empty());
    assert!(fit_text("hello", 10.0, -1.0, &MonoMetrics, &FitParams::default()).is_empty());
    assert!(fit_text("   ", 10.0, 10.0, &MonoMetrics, &FitParams::default()).is_empty());
}

#[test]
fn test_estimated_metrics_scale_linearly() {
    let m = EstimatedMetrics::default();
    assert_relative_eq!(m.text_width("abc", 20.0), 2.0 * m.text_width("abc", 10.0), epsilon = 1e-4);
    assert!(m.text_width("你", 10.0) > m.text_width("a", 10.0));
    assert_relative_eq!(m.line_height(10.0), 12.0, epsilon = 1e-4);
}

// ---------------------------------------------------------------------------
// Layout cache
// ---------------------------------------------------------------------------

/// MonoMetrics that counts width measurements.
#[derive(Default)]
struct CountingMetrics {
    calls: Cell<usize>,
}

impl TextMeasurer for CountingMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.calls.set(self.calls.get() + 1);
        MonoMetrics.text_width(text, font_size)
    }

    fn line_height(&self, font_size: f32) -> f32 {
        MonoMetrics.line_height(font_size)
    }
}

#[test]
fn test_layout_cache_reuses_across_frames() {
    let metrics = CountingMetrics::default();
    let params = FitParams::default();
    let mut cache = LayoutCache::new();

    let first = cache.fit("hello world", 100.0, 40.0, &metrics, &params);
    cache.end_frame();
    let measured = metrics.calls.get();
    assert!(measured > 0);

    let second = cache.fit("hello world", 100.0, 40.0, &metrics, &params);
    cache.end_frame();
    assert_eq!(metrics.calls.get(), measured);
    assert_eq!(first, second);
    assert_eq!(first, fit_text("hello world", 100.0, 40.0, &MonoMetrics, &params));
    assert_eq!(cache.misses(), 1);
}

#[test]
fn test_layout_cache_recomputes_on_new_inputs() {
    let params = FitParams::default();
    let mut cache = LayoutCache::new();

    cache.fit("hello", 100.0, 40.0, &MonoMetrics, &params);
    cache.fit("hello", 120.0, 40.0, &MonoMetrics, &params);
    cache.fit("hello!", 100.0, 40.0, &MonoMetrics, &params);
    let smaller = FitParams {
        max_font_size: 10.0,
        ..params
    };
    let capped = cache.fit("hello", 100.0, 40.0, &MonoMetrics, &smaller);
    assert_eq!(cache.misses(), 4);
    assert_relative_eq!(capped.font_size, 10.0);
}

#[test]
fn test_layout_cache_drops_unused_entries() {
    let params = FitParams::default();
    let mut cache = LayoutCache::new();
    cache.fit("a", 100.0, 40.0, &MonoMetrics, &params);
    cache.fit("b", 100.0, 40.0, &MonoMetrics, &params);
    cache.end_frame();

    cache.fit("a", 100.0, 40.0, &MonoMetrics, &params);
    cache.end_frame();
    cache.end_frame();
    assert!(cache.is_empty());

    cache.fit("a", 100.0, 40.0, &MonoMetrics, &params);
    assert_eq!(cache.misses(), 3);
}
