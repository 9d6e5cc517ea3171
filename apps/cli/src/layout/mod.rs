// Document Composer: paragraph styling, line wrapping, pagination and PDF output.
// Pure layout lives in composer/wrap/styles; only pdf_writer touches lopdf or the disk.

pub mod composer;
pub mod font_metrics;
pub mod pdf_writer;
pub mod styles;
pub mod wrap;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::LetterHeader;

// Re-export the public API consumed by the pipeline.
pub use composer::{compose_letter, ComposedLetter};
pub use font_metrics::{letter_page_config, TIMES_ROMAN};
pub use pdf_writer::DocumentInfo;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Composes the letter and writes it to `path` as a US-letter PDF.
pub fn write_letter_pdf(
    path: &Path,
    body: &str,
    header: &LetterHeader,
    meta: &DocumentInfo,
) -> Result<ComposedLetter, LayoutError> {
    let config = letter_page_config();
    let letter = compose_letter(body, header, &config, &TIMES_ROMAN);
    let mut doc = pdf_writer::build_document(&letter, &config, &TIMES_ROMAN, meta)?;
    pdf_writer::save_document(&mut doc, path)?;
    Ok(letter)
}
