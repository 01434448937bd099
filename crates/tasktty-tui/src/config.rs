use std::path::PathBuf;

use clap::Parser;
use tasktty_service::credentials::{self, CredentialsError};

pub const DEFAULT_API_URL: &str = "https://api.todoist.com/sync/v9";

#[derive(Debug, Parser)]
#[command(name = "tasktty", about = "Keyboard-driven terminal front-end for a hosted to-do list")]
pub struct Config {
    /// File holding the API token (defaults to ~/.todoist)
    #[arg(long, env = "TASKTTY_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Base URL of the sync API
    #[arg(long, env = "TASKTTY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Where log output goes; the terminal belongs to the UI
    #[arg(long, env = "TASKTTY_LOG_FILE", default_value = "tasktty.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn token_path(&self) -> Result<PathBuf, CredentialsError> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => credentials::default_token_path(),
        }
    }
}
