//! Batch summarizer: reads text from a file or stdin and prints summaries.
//!
//! Run with: `tldr [PATH]`
//!
//! The model is kept loaded for the whole batch and unloaded on exit.
//! `TLDR_SUMMARY_COUNT` sets how many summaries to print (default 1).

use std::io::{Read, Write};
use std::process::ExitCode;

use tldr_prompt::common::{AppConfig, TldrError, TldrResult};
use tldr_prompt::llm::{ModelSession, OllamaGenerator};
use tldr_prompt::start_tldr::init_tracing;
use tldr_prompt::summarization::TldrSummarizer;

const SUMMARY_COUNT_ENV: &str = "TLDR_SUMMARY_COUNT";

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Summarization failed: {e}");
            ExitCode::from(1)
        }
    }
}

fn run() -> TldrResult<()> {
    let config = AppConfig::from_env()?;
    config.validate()?;

    let input_text = read_input(std::env::args().nth(1).as_deref())?;
    let count = summary_count()?;

    let generator = OllamaGenerator::new(&config.ollama)?;
    let session = ModelSession::acquire(&generator)?;
    let summarizer = TldrSummarizer::new(session.generator().clone(), &config)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout)?;
    for i in 0..count {
        let summary = summarizer.generate(&input_text)?;
        writeln!(stdout, "Summary {}\n---\n{summary}\n---", i + 1)?;
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> TldrResult<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn summary_count() -> TldrResult<usize> {
    match std::env::var(SUMMARY_COUNT_ENV) {
        Ok(raw) => raw.parse().map_err(|_| {
            TldrError::InvalidConfig(format!("{SUMMARY_COUNT_ENV} is not a count: {raw}"))
        }),
        Err(_) => Ok(1),
    }
}
