//! nfcside sidecar
//!
//! Mock hardware/auth backend for frontend development.
//! - Requests: one JSON envelope per line on stdin
//! - Responses: one JSON envelope per line on stdout, flushed per line
//! - Diagnostics: stderr only

use std::process::ExitCode;

use nfcside_sidecar::{app_state::AppState, config, logging, transport};

const CONFIG_ENV: &str = "NFCSIDE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "nfcside.yaml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = match config::load_or_default(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("nfcside-sidecar: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&cfg.logging) {
        eprintln!("nfcside-sidecar: {e}");
    }

    let state = AppState::new(cfg);
    tracing::info!(config = %path, "nfcside-sidecar starting");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    // Read failures are already logged by `serve`; the process still exits 0.
    let _ = transport::stdio::serve(state.dispatcher(), stdin, stdout, &state.cfg().protocol).await;

    ExitCode::SUCCESS
}
