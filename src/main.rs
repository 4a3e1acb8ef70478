mod cli;
mod render;

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use cli::Command;
use custody_admin::client::AdminClient;
use custody_admin::config::AdminConfig;
use custody_admin::error::{AuthError, ConfigError, SdkError};
use custody_admin::session::FileSessionStore;
use custody_admin::shared::Username;
use custody_admin::view::{
    DashboardScreen, LoginScreen, Notice, Route, Router, SignupScreen, UserDetailScreen,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Already shown to the operator; only the exit code is left to set.
    #[error("{0}")]
    Reported(String),
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        CliError::Sdk(SdkError::Auth(e))
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv(); // load .env if present

    let cli = cli::Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        if !matches!(e, CliError::Reported(_)) {
            eprintln!("error: {e}");
        }
        tracing::debug!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<(), CliError> {
    let mut config = match &cli.data_dir {
        Some(dir) => AdminConfig::load_from(dir)?,
        None => AdminConfig::load()?,
    };
    config.apply_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    config.validate()?;

    let session = Arc::new(FileSessionStore::in_dir(config.session_dir()));
    let client = AdminClient::builder()
        .base_url(&config.api_url)
        .timeout(config.request_timeout())
        .user_cache_ttl(config.user_cache_ttl())
        .session_store(session.clone())
        .build()?;
    let mut router = Router::for_client(&client);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Login(args) => {
            let password = password_or_prompt(args.password)?;
            router.navigate(Route::Login);
            let mut screen = LoginScreen::new(args.username, password);
            let outcome = screen.submit(&client).await;
            render::notice(&mut out, &outcome.notice)?;
            router.navigate(outcome.route.clone());
            if !outcome.succeeded() {
                return Err(CliError::Reported(outcome.notice.description));
            }
        }

        Command::Signup(args) => {
            let password = password_or_prompt(args.password)?;
            router.navigate(Route::Signup);
            let mut screen = SignupScreen::new(args.username, args.email, password);
            let outcome = screen.submit(&client).await;
            render::notice(&mut out, &outcome.notice)?;
            if !outcome.succeeded() {
                return Err(CliError::Reported(outcome.notice.description));
            }
        }

        Command::Logout => {
            let failure = router.logout(&client).await;
            writeln!(out, "Logged out.")?;
            if let Some(notice) = failure {
                report(&notice)?;
                return Err(CliError::Reported(notice.description));
            }
        }

        Command::Users(args) => {
            enter(&mut router, Route::Dashboard)?;
            let limit = args.limit.unwrap_or(config.page_limit);
            let mut screen = DashboardScreen::new(limit).starting_at(args.page);
            screen.load(&client).await;
            render::users(&mut out, &screen)?;
            if let Some(e) = screen.state().error() {
                return Err(CliError::Reported(e.to_string()));
            }
        }

        Command::User(args) => {
            let username = Username::new(args.username);
            enter(&mut router, Route::UserDetail(username.clone()))?;
            let mut screen = UserDetailScreen::new(username);
            screen.load(&client).await;
            render::user_detail(&mut out, &screen)?;
            if let Some(e) = screen.state().error() {
                return Err(CliError::Reported(e.to_string()));
            }
        }

        Command::AutoWithdraw(args) => {
            let username = Username::new(args.username);
            enter(&mut router, Route::UserDetail(username.clone()))?;
            let mut screen = UserDetailScreen::new(username);
            screen.load(&client).await;
            if let Some(e) = screen.state().error() {
                writeln!(out, "Error: {e}")?;
                return Err(CliError::Reported(e.to_string()));
            }
            match screen.toggle_auto_withdraw(&client).await {
                Ok(notice) => {
                    render::notice(&mut out, &notice)?;
                    render::user_detail(&mut out, &screen)?;
                }
                Err(e) => {
                    let notice = Notice::failure(
                        "Update failed",
                        e.detail().unwrap_or_else(|| e.to_string()),
                    );
                    report(&notice)?;
                    return Err(CliError::Reported(notice.description));
                }
            }
        }

        Command::Status => {
            render::status(&mut out, router.is_logged_in(), client.base_url(), session.path())?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Enter a protected route, failing when the gate redirects to login.
fn enter(router: &mut Router, route: Route) -> Result<(), CliError> {
    if router.navigate(route) == &Route::Login {
        return Err(AuthError::NotAuthenticated.into());
    }
    Ok(())
}

fn report(notice: &Notice) -> Result<(), CliError> {
    let stderr = std::io::stderr();
    render::notice(&mut stderr.lock(), notice)?;
    Ok(())
}

/// Use the flag or env value, otherwise read one line from stdin.
fn password_or_prompt(password: Option<String>) -> Result<String, CliError> {
    if let Some(p) = password {
        return Ok(p);
    }
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
