//! Binary entrypoint that serves the summary API.

use std::process::ExitCode;

use tldr_prompt::start_tldr;

/// Start the HTTP server; configuration comes from `TLDR_*` environment variables.
fn main() -> ExitCode {
    start_tldr::run()
}
