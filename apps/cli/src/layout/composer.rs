//! Document Composer — turns a header and letter text into positioned lines on pages.
//!
//! # Flow
//! 1. `build_story` lays out the block sequence: contact lines, spacer, date,
//!    spacer, then the body paragraphs styled by `paragraph_kinds`.
//! 2. `paginate` wraps each paragraph, places lines top-down and starts a new
//!    page whenever the next line would cross the bottom margin.
//!
//! Nothing here touches the filesystem; `pdf_writer` serializes the result.

use serde::Serialize;
use tracing::debug;

use crate::layout::font_metrics::{FontMetricTable, PageConfig};
use crate::layout::styles::{paragraph_kinds, split_paragraphs, Alignment, ParagraphKind};
use crate::layout::wrap::wrap_paragraph;
use crate::models::LetterHeader;

/// Vertical gap between the contact lines and the date.
const HEADER_GAP_PT: f32 = 12.0;
/// Vertical gap between the date and the first body paragraph.
const DATE_GAP_PT: f32 = 24.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One element of the flow, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { text: String, kind: ParagraphKind },
    Spacer(f32),
}

/// A single line of text with its baseline position, ready for a content stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub x_pt: f32,
    /// Baseline, measured from the bottom of the page.
    pub y_pt: f32,
    pub font_size_pt: f32,
    /// Extra space added to every inter-word gap (PDF `Tw`); non-zero only when justified.
    pub word_spacing_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

/// The fully positioned letter.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedLetter {
    pub pages: Vec<LaidOutPage>,
    /// Style chosen for each body paragraph, in order.
    pub body_kinds: Vec<ParagraphKind>,
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the block sequence for a letter: header block followed by the styled body.
pub fn build_story(body: &str, header: &LetterHeader) -> Vec<Block> {
    let header_line = |text: &str| Block::Paragraph {
        text: text.to_string(),
        kind: ParagraphKind::Header,
    };

    let mut story = vec![
        header_line(&header.name),
        header_line(&header.email),
        header_line(&header.phone),
        Block::Spacer(HEADER_GAP_PT),
        header_line(&header.date),
        Block::Spacer(DATE_GAP_PT),
    ];

    let paragraphs = split_paragraphs(body);
    let kinds = paragraph_kinds(paragraphs.len());
    story.extend(
        paragraphs
            .into_iter()
            .zip(kinds)
            .map(|(text, kind)| Block::Paragraph {
                text: text.to_string(),
                kind,
            }),
    );
    story
}

/// Composes a full letter: story, then pagination.
pub fn compose_letter(
    body: &str,
    header: &LetterHeader,
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> ComposedLetter {
    let story = build_story(body, header);
    let body_kinds = paragraph_kinds(split_paragraphs(body).len());
    let pages = paginate(&story, config, metrics);
    debug!(
        "Composed letter: {} body paragraph(s), {} page(s)",
        body_kinds.len(),
        pages.len()
    );
    ComposedLetter { pages, body_kinds }
}

/// Places every block of `story` onto pages. Always returns at least one page.
pub fn paginate(story: &[Block], config: &PageConfig, metrics: &FontMetricTable) -> Vec<LaidOutPage> {
    let top = config.top_pt();
    let bottom = config.margin_bottom_pt;
    let text_width = config.text_width_pt();

    let mut pages = vec![LaidOutPage::default()];
    let mut cursor = top;

    for block in story {
        match block {
            Block::Spacer(height) => {
                if cursor - height < bottom {
                    new_page(&mut pages, &mut cursor, top);
                } else {
                    cursor -= height;
                }
            }
            Block::Paragraph { text, kind } => {
                let style = kind.style();
                let indent = style.first_line_indent_pt;
                let lines = wrap_paragraph(
                    text,
                    metrics,
                    style.font_size_pt,
                    text_width - indent,
                    text_width,
                );
                let last = lines.len().saturating_sub(1);

                for (i, line) in lines.into_iter().enumerate() {
                    if cursor - style.leading_pt < bottom {
                        new_page(&mut pages, &mut cursor, top);
                    }
                    let (x_offset, available) = if i == 0 {
                        (indent, text_width - indent)
                    } else {
                        (0.0, text_width)
                    };
                    let word_spacing_pt = if style.alignment == Alignment::Justify
                        && i != last
                        && line.gaps > 0
                    {
                        ((available - line.width_pt) / line.gaps as f32).max(0.0)
                    } else {
                        0.0
                    };

                    let placed = PlacedLine {
                        text: line.text,
                        x_pt: config.margin_left_pt + x_offset,
                        y_pt: cursor - style.font_size_pt,
                        font_size_pt: style.font_size_pt,
                        word_spacing_pt,
                    };
                    cursor -= style.leading_pt;
                    if let Some(page) = pages.last_mut() {
                        page.lines.push(placed);
                    }
                }
                cursor -= style.space_after_pt;
            }
        }
    }
    pages
}

/// Starts a fresh page unless the current one is still empty.
fn new_page(pages: &mut Vec<LaidOutPage>, cursor: &mut f32, top: f32) {
    if pages.last().is_some_and(|p| !p.lines.is_empty()) {
        pages.push(LaidOutPage::default());
    }
    *cursor = top;
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
