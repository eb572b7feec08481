//! # Awful Digest
//!
//! Turns one web article into a structured digest: title, English title,
//! author, publish date, an abstractive summary, and up to five keywords,
//! emitted as a single JSON object on stdout.
//!
//! ## Usage
//!
//! ```sh
//! awful_digest https://example.com/2025/01/09/cats-explained
//! ```
//!
//! The local models need libtorch and are only compiled in with the
//! `models` feature (`cargo install --path . --features models`). A default
//! build always exits with `Model loading failed: ...` before touching the
//! network.
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Startup**: Apply runtime flags, parse the CLI, load configuration
//!    and every model once (a failure here is fatal)
//! 2. **Extraction**: Download the article and parse its fields
//! 3. **Detection / Translation**: Non-English bodies are translated sentence
//!    by sentence; titles go through an independent web service
//! 4. **Summarization / Keywords**: Summarize and rank keywords on the
//!    English text
//! 5. **Output**: Print the result record once stdout is restored
//!
//! Everything in steps 2-4 runs inside an [`OutputSuppressor`] so library
//! chatter never reaches the caller.

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod backends;
mod cli;
mod config;
mod error;
mod keywords;
mod language;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod summarize;
mod suppress;
mod translation;
mod utils;

use cli::{Invocation, usage_message};
use language::WhatlangDetector;
use models::ResultRecord;
use outputs::json;
use pipeline::Pipeline;
use scrapers::WebExtractor;
use suppress::OutputSuppressor;
use translation::title::GoogleTitleTranslator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // SAFETY: the current-thread runtime has not spawned any thread yet.
    unsafe { utils::apply_runtime_env() };

    // --- Tracing init (stderr, stdout is reserved for the result) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    let mut stdout = io::stdout();

    // Parse CLI
    let (url, cli) = match Invocation::from_args(std::env::args_os()) {
        Invocation::Run { url, cli } => (url, cli),
        Invocation::Usage => {
            json::write_result(&ResultRecord::error(usage_message()), &mut stdout)?;
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Informational(e) => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
    };
    debug!(?cli.config, ?cli.models_dir, %url, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fatal(&mut stdout, e.to_string()),
    };
    if let Some(models_dir) = cli.models_dir {
        config.models_dir = models_dir;
    }

    // ---- Models (loaded once, fatal on failure) ----
    let models = match backends::load_models(&config) {
        Ok(models) => models,
        Err(e) => return fatal(&mut stdout, format!("Model loading failed: {e}")),
    };

    let extractor = match WebExtractor::with_user_agent(&config.user_agent) {
        Ok(extractor) => extractor,
        Err(e) => return fatal(&mut stdout, e.to_string()),
    };
    let title_translator = GoogleTitleTranslator::new(reqwest::Client::new(), &config.title_endpoint);
    let pipeline = Pipeline::new(extractor, Box::new(WhatlangDetector), title_translator, models);

    // ---- Process, with stdout/stderr silenced ----
    let record = {
        let _guard = OutputSuppressor::acquire()
            .inspect_err(|e| warn!(error = %e, "Could not suppress diagnostics; continuing"))
            .ok();
        pipeline.process(&url).await
    };

    json::write_result(&record, &mut stdout)?;

    let elapsed = start_time.elapsed();
    info!(
        ok = record.is_ok(),
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );
    Ok(ExitCode::SUCCESS)
}

/// Report a startup failure as an error record and exit with status 1.
fn fatal<W: Write>(out: &mut W, message: String) -> Result<ExitCode, Box<dyn Error>> {
    error!(error = %message, "Startup failed");
    json::write_result(&ResultRecord::error(message), out)?;
    Ok(ExitCode::FAILURE)
}
