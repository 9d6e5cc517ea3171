//! Greedy word wrap against real glyph widths.

use crate::layout::font_metrics::FontMetricTable;

/// One wrapped line: its words joined by single spaces and its natural width.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    /// Width in points at the wrap's font size, without any justification stretch.
    pub width_pt: f32,
    /// Number of inter-word spaces in `text`.
    pub gaps: usize,
}

/// Breaks `text` into lines no wider than the available width.
///
/// Any run of whitespace (including single newlines) separates words. The
/// first line is `first_line_width_pt` wide to leave room for an indent; the
/// rest use `line_width_pt`. A word longer than a whole line gets a line of
/// its own and overflows. Whitespace-only text yields no lines.
pub fn wrap_paragraph(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    first_line_width_pt: f32,
    line_width_pt: f32,
) -> Vec<WrappedLine> {
    let space_w = metrics.space_width * font_size_pt;
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = WrappedLine {
        text: String::new(),
        width_pt: 0.0,
        gaps: 0,
    };
    let mut max_width = first_line_width_pt;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_pt(word, font_size_pt);

        if current.text.is_empty() {
            current.text.push_str(word);
            current.width_pt = word_w;
        } else if current.width_pt + space_w + word_w > max_width {
            // Current line is full — push it and start a new one with this word.
            lines.push(std::mem::replace(
                &mut current,
                WrappedLine {
                    text: word.to_string(),
                    width_pt: word_w,
                    gaps: 0,
                },
            ));
            max_width = line_width_pt;
        } else {
            current.text.push(' ');
            current.text.push_str(word);
            current.width_pt += space_w + word_w;
            current.gaps += 1;
        }
    }

    if !current.text.is_empty() {
        lines.push(current);
    }
    lines
}
