use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command line and environment configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "chess-match-server")]
#[command(about = "Real-time two-player chess match server")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "CHESS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CHESS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the records service that creates games and stores results
    #[arg(long, env = "RECORDS_URL", default_value = "http://localhost:3000")]
    pub records_url: String,

    /// Request timeout for the records service, in seconds
    #[arg(long, env = "RECORDS_TIMEOUT_SECS", default_value_t = 10)]
    pub records_timeout_secs: u64,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "./static")]
    pub static_dir: PathBuf,
}

impl Config {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn records_timeout(&self) -> Duration {
        Duration::from_secs(self.records_timeout_secs)
    }
}
