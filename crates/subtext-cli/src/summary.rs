use console::Style;
use subtext_core::layout::TextLayout;
use subtext_core::model::SubtitleRegion;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    text: Style,
    empty: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            text: Style::new().green(),
            empty: Style::new().dim().yellow(),
        }
    }
}

fn one_line(text: &str) -> String {
    text.replace('\n', " / ")
}

pub fn print_regions(regions: &[SubtitleRegion]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("Subtitles ({})", regions.len())));
    println!();

    for (i, region) in regions.iter().enumerate() {
        println!(
            "  {:<4}{}",
            s.label.apply_to(format!("{}", i + 1)),
            s.value.apply_to(region.bounds)
        );
        for (label, text) in [("OCR", &region.source_text), ("Text", &region.translated_text)] {
            if text.is_empty() {
                println!("      {:<6}{}", s.label.apply_to(label), s.empty.apply_to("(empty)"));
            } else {
                println!("      {:<6}{}", s.label.apply_to(label), s.text.apply_to(one_line(text)));
            }
        }
    }
}

pub fn print_layout(layout: &TextLayout, box_width: f32, box_height: f32) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Box"),
        s.value.apply_to(format!("{box_width} x {box_height}"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Font size"),
        s.value.apply_to(format!("{:.1}", layout.font_size))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Block"),
        s.value
            .apply_to(format!("{:.1} x {:.1}", layout.width(), layout.height()))
    );
    println!();
    for line in &layout.lines {
        println!(
            "  {}  {}",
            s.label.apply_to(format!("({:>6.1}, {:>6.1})", line.x, line.y)),
            s.text.apply_to(&line.text)
        );
    }
}
