//! The two generation calls: the letter body and the title it is filed under.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{LETTER_PROMPT_TEMPLATE, TITLE_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{NO_PLACEHOLDERS, PLAIN_TEXT_ONLY};
use crate::llm_client::GenerationClient;

/// Generates the cover letter body from the resume and job description.
///
/// The response is returned untouched; paragraphs are expected to be separated by blank lines.
pub async fn generate_letter(
    llm: &dyn GenerationClient,
    model: &str,
    resume_text: &str,
    job_description: &str,
) -> Result<String, AppError> {
    let prompt = build_letter_prompt(resume_text, job_description);
    info!("Requesting cover letter from {model}");
    let text = llm
        .generate(model, &prompt)
        .await
        .map_err(AppError::llm("letter"))?;
    info!("Received cover letter ({} chars)", text.len());
    Ok(text)
}

/// Asks for a `Cover Letter - <Company> - <Position>` title. Not validated here;
/// callers run it through `sanitize_title` before touching the filesystem.
pub async fn generate_title(
    llm: &dyn GenerationClient,
    model: &str,
    job_description: &str,
) -> Result<String, AppError> {
    let prompt = build_title_prompt(job_description);
    let title = llm
        .generate(model, &prompt)
        .await
        .map_err(AppError::llm("title"))?;
    info!("Received title: {}", title.trim());
    Ok(title)
}

fn build_letter_prompt(resume_text: &str, job_description: &str) -> String {
    LETTER_PROMPT_TEMPLATE
        .replace("{plain_text_only}", PLAIN_TEXT_ONLY)
        .replace("{no_placeholders}", NO_PLACEHOLDERS)
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

fn build_title_prompt(job_description: &str) -> String {
    TITLE_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}
