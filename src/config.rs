use std::env;
use std::path::PathBuf;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `attendd=debug`.
    pub log_filter: String,
    /// Workspace opened at startup, before any `workspace.select`.
    pub workspace: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            workspace: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(
            env::var("ATTENDD_LOG").ok(),
            env::var("ATTENDD_WORKSPACE").ok(),
        )
    }

    fn from_vars(log: Option<String>, workspace: Option<String>) -> Self {
        let non_empty = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            log_filter: non_empty(log).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            workspace: non_empty(workspace).map(PathBuf::from),
        }
    }
}
