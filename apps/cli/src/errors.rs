use std::path::PathBuf;

use thiserror::Error;

use crate::layout::LayoutError;
use crate::llm_client::LlmError;

/// Pipeline error type.
/// Every stage after startup funnels into this; `main` turns it into a printed message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resume not found at {}", .0.display())]
    ResumeNotFound(PathBuf),

    #[error("Could not read resume {}: {message}", path.display())]
    ResumeParse { path: PathBuf, message: String },

    #[error("Generation failed ({stage}): {source}")]
    Llm {
        stage: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Document error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Failed to read input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Tags an `LlmError` with the pipeline stage it came from.
    pub fn llm(stage: &'static str) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Llm { stage, source }
    }
}
