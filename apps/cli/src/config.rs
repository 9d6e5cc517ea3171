use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;

/// Default Gemini model used for both generation calls.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// `{model}` is replaced with the configured model identifier.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent";

pub const PROFILE_FILE: &str = "Header.txt";
pub const RESUME_FILE: &str = "resume.pdf";
pub const OUTPUT_DIR: &str = "Cover_Letters";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Profile file not found at {}", .0.display())]
    ProfileMissing(PathBuf),

    #[error("Could not read profile file {}: {source}", path.display())]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Profile file {} is malformed: {source}", path.display())]
    ProfileMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Profile field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Could not determine base directory: {0}")]
    BaseDir(String),

    #[error("Invalid command line: {0}")]
    Cli(#[from] clap::Error),
}

/// Command-line flags. Every flag has an environment or built-in default,
/// so running the bare binary next to `Header.txt` and `resume.pdf` just works.
/// Precedence: flag, then environment variable, then built-in default.
#[derive(Debug, Clone, Parser)]
#[command(name = "coverletter", version, about = "Generate a tailored cover letter PDF")]
pub struct Cli {
    /// Directory holding the profile, resume and output folder.
    /// Defaults to `COVERLETTER_HOME`, then the directory of the executable.
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Profile JSON (api_key, name, email, number).
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Resume PDF used as generation context.
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Directory the finished letters are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Read the job description from a file instead of the console prompt.
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// Defaults to `GEMINI_MODEL`, then `gemini-2.0-flash`.
    #[arg(long)]
    pub model: Option<String>,

    /// Defaults to `GEMINI_API_ENDPOINT`, then the public Gemini endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout for the generation API, in seconds.
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Exit immediately instead of waiting for Enter.
    #[arg(long)]
    pub no_pause: bool,
}

/// Runtime configuration, resolved once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub profile_path: PathBuf,
    pub resume_path: PathBuf,
    pub output_dir: PathBuf,
    pub job_file: Option<PathBuf>,
    pub model: String,
    pub endpoint: String,
    pub request_timeout: Duration,
    pub pause_on_exit: bool,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env` (if present), parses the command line and resolves paths.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            // --help and --version print and exit as usual
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_cli(cli)
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let base_dir = match cli
            .base_dir
            .or_else(|| env_var("COVERLETTER_HOME").map(PathBuf::from))
        {
            Some(dir) => dir,
            None => executable_dir()?,
        };

        Ok(Config {
            profile_path: cli.profile.unwrap_or_else(|| base_dir.join(PROFILE_FILE)),
            resume_path: cli.resume.unwrap_or_else(|| base_dir.join(RESUME_FILE)),
            output_dir: cli.output_dir.unwrap_or_else(|| base_dir.join(OUTPUT_DIR)),
            job_file: cli.job_file,
            model: flag_or_env(cli.model, "GEMINI_MODEL", DEFAULT_MODEL),
            endpoint: flag_or_env(cli.endpoint, "GEMINI_API_ENDPOINT", DEFAULT_ENDPOINT),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            pause_on_exit: !cli.no_pause,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            base_dir,
        })
    }

    /// Endpoint URL with the model identifier substituted in.
    pub fn endpoint_for(&self, model: &str) -> String {
        self.endpoint.replace("{model}", model)
    }
}

fn flag_or_env(flag: Option<String>, key: &str, default: &str) -> String {
    flag.or_else(|| env_var(key))
        .unwrap_or_else(|| default.to_string())
}

/// Set and non-empty.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(|e| ConfigError::BaseDir(e.to_string()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::BaseDir(format!("{} has no parent", exe.display())))
}
