mod attendance;
mod config;
mod csv_import;
mod db;
mod history;
mod ipc;
mod viewer;

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &config::Config) {
    // stdout carries the protocol, so logs go to stderr.
    let (filter, bad_filter) = match EnvFilter::try_new(&config.log_filter) {
        Ok(f) => (f, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
    if let Some(e) = bad_filter {
        tracing::warn!(filter = %config.log_filter, error = %e, "invalid ATTENDD_LOG, using info");
    }
}

fn main() {
    let config = config::Config::from_env();
    init_tracing(&config);

    let mut state = ipc::AppState::new();
    if let Some(path) = config.workspace.as_deref() {
        if let Err(e) = ipc::open_workspace(&mut state, path) {
            tracing::warn!(
                workspace = %path.display(),
                error = %e,
                "configured workspace not opened"
            );
        }
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "attendd ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "bad request json");
                let _ = writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
