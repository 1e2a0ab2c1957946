use clap::Parser;
use std::path::PathBuf;

use crate::shared::DEFAULT_SESSION_MAX_AGE;

/// Per-client deck of cards over HTTP.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Listen to http traffic on this tcp address
    #[arg(long, env = "ADDRESS", default_value = "localhost:8080")]
    pub address: String,

    /// Persist the sessions to this file on exit
    #[arg(long, env = "SESSIONS_PERSIST_TO")]
    pub sessions_persist_to: Option<PathBuf>,

    /// Restore the sessions from this file on startup
    #[arg(long, env = "SESSIONS_RESTORE_FROM")]
    pub sessions_restore_from: Option<PathBuf>,

    /// Lifetime of the session cookie in seconds
    #[arg(long, env = "SESSION_COOKIE_MAX_AGE", default_value_t = DEFAULT_SESSION_MAX_AGE)]
    pub session_cookie_max_age: u64,
}
