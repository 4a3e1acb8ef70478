use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// custody-admin: operator console for the custody backend.
#[derive(Parser, Debug)]
#[command(name = "custody-admin", version)]
pub struct Cli {
    /// Backend base URL (overrides config and CUSTODY_ADMIN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding config.toml and the session file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG when omitted
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Create an operator account
    Signup(SignupArgs),

    /// End the session and forget the stored token
    Logout,

    /// List users, one page at a time
    Users(UsersArgs),

    /// Show a user's detail, balance and ledgers
    User(UserArgs),

    /// Toggle a user's auto-withdraw flag
    AutoWithdraw(UserArgs),

    /// Show whether a session is stored
    Status,
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub username: String,

    /// Read from stdin when neither this nor the env var is set
    #[arg(long, env = "CUSTODY_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the `signup` subcommand.
#[derive(Parser, Debug)]
pub struct SignupArgs {
    pub username: String,

    pub email: String,

    #[arg(long, env = "CUSTODY_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the `users` subcommand.
#[derive(Parser, Debug)]
pub struct UsersArgs {
    /// 1-based page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (defaults to the configured page_limit)
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Arguments for the `user` and `auto-withdraw` subcommands.
#[derive(Parser, Debug)]
pub struct UserArgs {
    pub username: String,
}
