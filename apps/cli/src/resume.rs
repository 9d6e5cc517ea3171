//! Resume Reader — pulls plain text out of the candidate's resume PDF.

use std::any::Any;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts the text of every page of the PDF at `path`, in page order.
///
/// Pages are joined with `\n`; a page with no extractable text contributes an
/// empty string so page boundaries stay stable.
pub fn extract_resume_text(path: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::ResumeNotFound(path.to_path_buf())
        } else {
            AppError::Io(e)
        }
    })?;

    // pdf-extract panics on some malformed documents instead of returning an error.
    let extracted =
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes));
    let pages = match extracted {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            return Err(AppError::ResumeParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
        Err(payload) => {
            return Err(AppError::ResumeParse {
                path: path.to_path_buf(),
                message: format!("malformed PDF ({})", panic_message(payload.as_ref())),
            })
        }
    };

    debug!("Extracted {} page(s) from {}", pages.len(), path.display());

    let text = join_pages(&pages);
    if text.trim().is_empty() {
        warn!(
            "No text could be extracted from {} (scanned resume?)",
            path.display()
        );
    }
    Ok(text)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "extractor panicked"
    }
}

/// Joins per-page text with newline separators.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}
