use subtext_core::layout::TextMeasurer;

/// Measures text with the fonts egui actually paints with.
pub struct PainterMetrics<'a> {
    painter: &'a egui::Painter,
    line_spacing: f32,
}

impl<'a> PainterMetrics<'a> {
    pub fn new(painter: &'a egui::Painter, line_spacing: f32) -> Self {
        Self {
            painter,
            line_spacing,
        }
    }
}

impl TextMeasurer for PainterMetrics<'_> {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        self.painter
            .layout_no_wrap(
                text.to_owned(),
                egui::FontId::proportional(font_size),
                egui::Color32::BLACK,
            )
            .size()
            .x
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_spacing
    }
}
