//! Cover letter pipeline — one linear run per process.
//!
//! Flow: read job description → extract resume text → generate letter →
//!       generate title → sanitize title → write PDF → report path.
//!
//! Any error aborts the run; nothing is written unless every step before the
//! PDF write succeeded.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::{generate_letter, generate_title, sanitize_title};
use crate::layout::{write_letter_pdf, DocumentInfo};
use crate::llm_client::GenerationClient;
use crate::models::CandidateProfile;
use crate::resume::extract_resume_text;

pub const JOB_DESCRIPTION_PROMPT: &str = "Enter the full job description:";

/// Everything one run needs, passed in explicitly.
pub struct Pipeline<'a> {
    pub config: &'a Config,
    pub profile: &'a CandidateProfile,
    pub llm: &'a dyn GenerationClient,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        profile: &'a CandidateProfile,
        llm: &'a dyn GenerationClient,
    ) -> Self {
        Self {
            config,
            profile,
            llm,
        }
    }

    /// Runs the pipeline once and returns the path of the written letter.
    ///
    /// `input`/`out` are the console; `today` dates the letter and the fallback title.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        today: NaiveDate,
    ) -> Result<PathBuf, AppError> {
        // Step 1: Job description
        let job_description = self.read_job_description(input, out)?;
        if job_description.trim().is_empty() {
            warn!("Job description is empty; generating anyway");
        }

        // Step 2: Resume text
        let resume_text = extract_resume_text(&self.config.resume_path)?;
        info!(
            "Resume text extracted from {} ({} chars)",
            self.config.resume_path.display(),
            resume_text.len()
        );

        // Step 3: Letter body
        let model = self.config.model.as_str();
        let letter = generate_letter(self.llm, model, &resume_text, &job_description).await?;

        // Step 4: Title
        let title = generate_title(self.llm, model, &job_description).await?;

        writeln!(out)?;
        writeln!(out, "Generated Cover Letter Title: {title}")?;
        writeln!(out)?;
        writeln!(out, "Cover Letter Text: {letter}")?;

        // Step 5: Filename
        let safe_title = sanitize_title(&title, today);
        if safe_title != title.trim() {
            info!("Title sanitized to {safe_title:?}");
        }
        std::fs::create_dir_all(&self.config.output_dir)?;
        let output_path = self.config.output_dir.join(format!("{safe_title}.pdf"));

        // Step 6: Document
        let header = self.profile.header(today);
        let meta = DocumentInfo {
            title: safe_title,
            author: self.profile.name.clone(),
        };
        let composed = write_letter_pdf(&output_path, &letter, &header, &meta)?;
        info!(
            "Letter laid out on {} page(s) with {} body paragraph(s)",
            composed.pages.len(),
            composed.body_kinds.len()
        );

        writeln!(out, "Cover letter saved as {}", output_path.display())?;
        Ok(output_path)
    }

    /// Reads the job description from `--job-file` or one line of console input.
    fn read_job_description<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<String, AppError> {
        if let Some(path) = &self.config.job_file {
            info!("Reading job description from {}", path.display());
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Input(format!("could not read {}: {e}", path.display()))
            });
        }

        writeln!(out, "{JOB_DESCRIPTION_PROMPT}")?;
        out.flush()?;
        let mut line = String::new();
        input
            .read_line(&mut line)
            .map_err(|e| AppError::Input(e.to_string()))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use clap::Parser;

    use crate::config::Cli;
    use crate::llm_client::LlmError;
    use crate::models::LetterHeader;

    /// Deterministic stand-in for the remote service: answers the letter prompt
    /// with `letter` and the title prompt with `title`.
    struct ScriptedClient {
        letter: String,
        title: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(letter: &str, title: &str) -> Self {
            Self {
                letter: letter.to_string(),
                title: Some(title.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if prompt.contains("Resume:") {
                Ok(self.letter.clone())
            } else {
                self.title.clone().ok_or(LlmError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                })
            }
        }
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            api_key: "test-key".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn config_in(dir: &Path, extra: &[&str]) -> Config {
        let base = dir.to_str().unwrap();
        let mut args = vec!["coverletter", "--base-dir", base, "--no-pause"];
        args.extend_from_slice(extra);
        Config::from_cli(Cli::parse_from(args)).unwrap()
    }

    /// Writes a small resume PDF into `dir` using the letter writer itself.
    fn write_resume(dir: &Path) {
        let header = LetterHeader {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            date: "Senior Rust Engineer".to_string(),
        };
        let meta = DocumentInfo {
            title: "Resume".to_string(),
            author: "Jane Doe".to_string(),
        };
        write_letter_pdf(
            &dir.join("resume.pdf"),
            "Experience\n\nBuilt payment systems in Rust.",
            &header,
            &meta,
        )
        .unwrap();
    }

    const TWO_PARAGRAPHS: &str =
        "Dear Hiring Manager,\n\nI am excited to apply for the Software Engineer role at Acme Corp.";

    async fn run(
        config: &Config,
        client: &ScriptedClient,
        stdin: &str,
    ) -> (Result<PathBuf, AppError>, String) {
        let profile = profile();
        let pipeline = Pipeline::new(config, &profile, client);
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = pipeline.run(&mut input, &mut out, today()).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_acme_scenario_writes_named_letter() {
        let dir = tempfile::tempdir().unwrap();
        write_resume(dir.path());
        let config = config_in(dir.path(), &[]);
        let client =
            ScriptedClient::new(TWO_PARAGRAPHS, "Cover Letter - Acme Corp - Software Engineer");

        let (result, out) = run(&config, &client, "Software Engineer at Acme Corp, remote\n").await;
        let path = result.unwrap();

        assert_eq!(
            path,
            dir.path()
                .join("Cover_Letters")
                .join("Cover Letter - Acme Corp - Software Engineer.pdf")
        );
        assert!(path.is_file());
        assert!(out.starts_with(JOB_DESCRIPTION_PROMPT));
        assert!(out.contains("Generated Cover Letter Title: Cover Letter - Acme Corp - Software Engineer"));
        assert!(out.contains(&format!("Cover letter saved as {}", path.display())));

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 2, "exactly two generation calls");
        assert!(prompts[0].contains("Job Description:\nSoftware Engineer at Acme Corp, remote"));
        assert!(prompts[0].contains("Jane"), "resume text reaches the letter prompt");
        assert!(prompts[1].ends_with("Job Description:\nSoftware Engineer at Acme Corp, remote"));

        let doc = lopdf::Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_slash_in_title_stays_one_component() {
        let dir = tempfile::tempdir().unwrap();
        write_resume(dir.path());
        let config = config_in(dir.path(), &[]);
        let client = ScriptedClient::new(TWO_PARAGRAPHS, "Cover Letter - A/B Corp - Engineer");

        let (result, _) = run(&config, &client, "Engineer at A/B Corp\n").await;
        let path = result.unwrap();

        assert_eq!(path.parent().unwrap(), config.output_dir);
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Cover Letter - A_B Corp - Engineer.pdf"
        );
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_empty_job_description_still_runs() {
        let dir = tempfile::tempdir().unwrap();
        write_resume(dir.path());
        let config = config_in(dir.path(), &[]);
        let client = ScriptedClient::new("Hello.", "Cover Letter - Unknown - Unknown");

        let (result, _) = run(&config, &client, "").await;
        assert!(result.unwrap().is_file());

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].ends_with("Job Description:\n"));
    }

    #[tokio::test]
    async fn test_repeat_run_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        write_resume(dir.path());
        let config = config_in(dir.path(), &[]);
        let client = ScriptedClient::new(TWO_PARAGRAPHS, "Cover Letter - Acme Corp - Software Engineer");

        let (first, _) = run(&config, &client, "Acme\n").await;
        let first = first.unwrap();
        let first_bytes = std::fs::read(&first).unwrap();

        let (second, _) = run(&config, &client, "Acme\n").await;
        let second = second.unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, std::fs::read(&second).unwrap());
    }

    #[tokio::test]
    async fn test_missing_resume_aborts_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &[]);
        let client = ScriptedClient::new(TWO_PARAGRAPHS, "Cover Letter - X - Y");

        let (result, _) = run(&config, &client, "jd\n").await;
        assert!(matches!(result, Err(AppError::ResumeNotFound(_))));
        assert!(client.prompts().is_empty());
        assert!(!config.output_dir.exists());
    }

    #[tokio::test]
    async fn test_title_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_resume(dir.path());
        let config = config_in(dir.path(), &[]);
        let client = ScriptedClient {
            letter: TWO_PARAGRAPHS.to_string(),
            title: None,
            prompts: Mutex::new(Vec::new()),
        };

        let (result, _) = run(&config, &client, "jd\n").await;
        assert!(matches!(
            result,
            Err(AppError::Llm { stage: "title", source: LlmError::Api { status: 503, .. } })
        ));
        assert!(!config.output_dir.exists());
    }

    #[tokio::test]
    async fn test_job_file_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        write_resume(dir.path());
        let jd_path = dir.path().join("jd.txt");
        std::fs::write(&jd_path, "Staff Engineer\n\nMust know Rust.").unwrap();
        let config = config_in(dir.path(), &["--job-file", jd_path.to_str().unwrap()]);
        let client = ScriptedClient::new(TWO_PARAGRAPHS, "Cover Letter - Acme - Staff Engineer");

        let (result, out) = run(&config, &client, "").await;
        assert!(result.is_ok());
        assert!(!out.contains(JOB_DESCRIPTION_PROMPT));
        assert!(client.prompts()[1].ends_with("Staff Engineer\n\nMust know Rust."));
    }
}
