//! Paragraph styles and the rule deciding which paragraph gets which.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of the lines within a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    /// Every line but the last is stretched to the full text width.
    Justify,
}

/// Typography for one paragraph, in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font_size_pt: f32,
    pub leading_pt: f32,
    pub first_line_indent_pt: f32,
    pub space_after_pt: f32,
    pub alignment: Alignment,
}

/// Plain left-aligned style: the contact block, the date and the closing paragraphs.
pub static HEADER_STYLE: ParagraphStyle = ParagraphStyle {
    name: "Header",
    font_size_pt: 11.0,
    leading_pt: 14.0,
    first_line_indent_pt: 0.0,
    space_after_pt: 6.0,
    alignment: Alignment::Left,
};

/// Indented, justified prose.
pub static BODY_STYLE: ParagraphStyle = ParagraphStyle {
    name: "Body",
    font_size_pt: 11.0,
    leading_pt: 14.0,
    first_line_indent_pt: 24.0,
    space_after_pt: 12.0,
    alignment: Alignment::Justify,
};

/// Which of the two styles a paragraph is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphKind {
    Header,
    Body,
}

impl ParagraphKind {
    pub fn style(self) -> &'static ParagraphStyle {
        match self {
            ParagraphKind::Header => &HEADER_STYLE,
            ParagraphKind::Body => &BODY_STYLE,
        }
    }
}

/// Number of trailing paragraphs (sign-off block) kept in header style.
pub const TRAILING_HEADER_PARAGRAPHS: usize = 3;

/// Splits generated letter text into paragraphs.
///
/// The text is trimmed and split on every `"\n\n"`; pieces are kept verbatim,
/// so runs of blank lines yield empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.trim().split("\n\n").collect()
}

/// Style for every paragraph of an `n`-paragraph letter, in order.
///
/// A countdown starts at `n` and drops by one after each paragraph; while it
/// is above three the paragraph is body style, otherwise header style. The
/// first `n - 3` paragraphs are therefore body style and the last `min(n, 3)`
/// header style, so letters of three paragraphs or fewer are all header style.
pub fn paragraph_kinds(n: usize) -> Vec<ParagraphKind> {
    (0..n)
        .map(|i| {
            let remaining = n - i;
            if remaining > TRAILING_HEADER_PARAGRAPHS {
                ParagraphKind::Body
            } else {
                ParagraphKind::Header
            }
        })
        .collect()
}
