mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod pipeline;
mod resume;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::models::CandidateProfile;
use crate::pipeline::Pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Pause unless configuration says otherwise; a broken config still pauses.
    let mut pause_on_exit = true;

    let outcome = run(&mut pause_on_exit).await;
    let succeeded = finish(
        &outcome,
        pause_on_exit,
        &mut io::stdin().lock(),
        &mut io::stdout(),
    );

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(pause_on_exit: &mut bool) -> Result<PathBuf> {
    let config = Config::load()?;
    *pause_on_exit = config.pause_on_exit;

    // Logs go to stderr so the console dialogue on stdout stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting coverletter v{}", env!("CARGO_PKG_VERSION"));
    info!("Base directory: {}", config.base_dir.display());

    let profile = CandidateProfile::load(&config.profile_path)?;
    info!("Profile loaded for {}", profile.name);

    let llm = GeminiClient::new(profile.api_key.clone(), &config)?;
    info!(
        "Generation client initialized (model: {}, endpoint: {})",
        config.model,
        config.endpoint_for(&config.model)
    );

    let pipeline = Pipeline::new(&config, &profile, &llm);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let path = pipeline
        .run(&mut input, &mut out, Local::now().date_naive())
        .await?;
    Ok(path)
}

/// Reports a failed run and, when asked, waits for Enter. Returns whether the run succeeded.
///
/// Console errors are ignored here: there is nowhere left to report them.
fn finish<R: BufRead, W: Write>(
    outcome: &Result<PathBuf>,
    pause_on_exit: bool,
    input: &mut R,
    out: &mut W,
) -> bool {
    if let Err(e) = outcome {
        let _ = writeln!(out, "❌ Error: {e}");
    }

    if pause_on_exit {
        let _ = write!(out, "\nPress Enter to exit…");
        let _ = out.flush();
        let mut line = String::new();
        let _ = input.read_line(&mut line);
    }

    outcome.is_ok()
}
