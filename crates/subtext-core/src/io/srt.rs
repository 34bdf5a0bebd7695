//! Block-wise translation of SubRip (`.srt`) and similar line-based subtitle files.
//!
//! Index lines, timing lines and blank lines pass through untouched. Each run
//! of consecutive text lines is sent to the translator as one block.

use std::path::Path;

use tracing::warn;

use crate::services::Translator;

/// Blank, purely numeric, or a `-->` timing line.
pub fn is_metadata_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.chars().all(|c| c.is_ascii_digit())
        || line.contains("-->")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Metadata(String),
    Text(Vec<String>),
}

pub fn segment(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut block: Vec<String> = Vec::new();
    for line in content.lines() {
        if is_metadata_line(line) {
            if !block.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut block)));
            }
            segments.push(Segment::Metadata(line.to_string()));
        } else {
            block.push(line.to_string());
        }
    }
    if !block.is_empty() {
        segments.push(Segment::Text(block));
    }
    segments
}

pub fn count_text_blocks(content: &str) -> usize {
    segment(content)
        .iter()
        .filter(|s| matches!(s, Segment::Text(_)))
        .count()
}

/// Translate every text block. A block whose translation fails keeps its
/// original text. `progress` receives `(done, total)` after each block.
pub fn translate_content(
    content: &str,
    translator: &dyn Translator,
    source: &str,
    target: &str,
    mut progress: impl FnMut(usize, usize),
) -> String {
    let segments = segment(content);
    let total = segments
        .iter()
        .filter(|s| matches!(s, Segment::Text(_)))
        .count();

    let mut done = 0;
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    for seg in segments {
        match seg {
            Segment::Metadata(line) => out.push(line),
            Segment::Text(lines) => {
                let text = lines.join("\n");
                match translator.translate(&text, source, target) {
                    Ok(translated) => out.push(translated),
                    Err(e) => {
                        warn!("Block {} left untranslated: {}", done + 1, e);
                        out.push(text);
                    }
                }
                done += 1;
                progress(done, total);
            }
        }
    }
    out.join("\n")
}

/// Replace characters that are illegal in file names with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '<' | '>' | '｜' | '!' | '&' => '_',
            other => other,
        })
        .collect()
}

/// `movie.srt` translated to `en` -> `movie.en.srt`.
pub fn translated_file_name(path: &Path, target: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = sanitize_file_name(&stem);
    match path.extension() {
        Some(ext) => format!("{stem}.{target}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{target}"),
    }
}
