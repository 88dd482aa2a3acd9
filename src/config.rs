//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_URL;
use crate::state::DEFAULT_RANKING_LIMIT;

/// Backend connection and startup options
#[derive(clap::Args, Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the team/player REST API
    #[arg(long, env = "ROSTERDESK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(
        long,
        env = "ROSTERDESK_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Initial number of players shown in rankings (minimum 1)
    #[arg(
        long,
        default_value_t = DEFAULT_RANKING_LIMIT as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ranking_limit: u64,

    /// Log file (defaults to the user data directory)
    #[arg(long, env = "ROSTERDESK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn ranking_limit(&self) -> usize {
        usize::try_from(self.ranking_limit).unwrap_or(DEFAULT_RANKING_LIMIT)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }
}

fn default_log_path() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("rosterdesk").join("rosterdesk.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        config: ClientConfig,
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let args = TestArgs::try_parse_from([
            "rosterdesk",
            "--api-url",
            "http://backend:8080/",
            "--timeout-secs",
            "3",
            "--ranking-limit",
            "20",
            "--log-file",
            "/tmp/desk.log",
        ])
        .unwrap();

        assert_eq!(args.config.api_url, "http://backend:8080/");
        assert_eq!(args.config.timeout(), Duration::from_secs(3));
        assert_eq!(args.config.ranking_limit(), 20);
        assert_eq!(args.config.log_path(), PathBuf::from("/tmp/desk.log"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(TestArgs::try_parse_from(["rosterdesk", "--timeout-secs", "0"]).is_err());
        assert!(TestArgs::try_parse_from(["rosterdesk", "--ranking-limit", "0"]).is_err());
    }

    #[test]
    fn default_log_file_lives_under_app_dir() {
        let args = TestArgs::try_parse_from(["rosterdesk", "--api-url", "http://x"]).unwrap();
        let path = args.config.log_path();
        assert!(path.ends_with("rosterdesk/rosterdesk.log") || args.config.log_file.is_some());
    }
}
