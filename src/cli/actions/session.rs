use crate::{
    cli::terminal::Terminal,
    config::AppConfig,
    gateway::{HttpTransport, Outcome},
    login::LoginPage,
    session::{FileStore, Session, SessionStore},
    ui::{Navigator, Ui},
};
use anyhow::{Context, Result, anyhow};
use std::{
    io::{self, Write},
    sync::Arc,
};
use tracing::info;

/// Validate the stored token, as the login page does on load.
/// # Errors
/// Returns an error if the token was rejected or the backend is unreachable.
pub async fn check(config: AppConfig) -> Result<()> {
    let store = Arc::new(FileStore::new(config.session_path.clone()));
    let terminal = Arc::new(Terminal::new());
    let outcome = check_with(&config, store, Arc::clone(&terminal) as Arc<dyn Ui>, terminal).await?;
    let mut out = io::stdout().lock();
    write_check(outcome, &mut out)
}

/// Reports a token check. Navigation has already been written by the
/// navigator; only the no-token case prints here.
///
/// # Errors
/// Returns an error if the token was rejected, the backend is unreachable or
/// the output cannot be written.
pub fn write_check(outcome: Option<Outcome<()>>, out: &mut impl Write) -> Result<()> {
    match outcome {
        None => {
            writeln!(out, "not logged in")?;
            Ok(())
        }
        Some(Outcome::Success(())) => Ok(()),
        Some(Outcome::ClientError(message)) => {
            Err(anyhow!("stored token rejected and removed: {message}"))
        }
        Some(Outcome::TransportError(message)) => Err(anyhow!("token check failed: {message}")),
    }
}

/// Runs the page-load token check with injected collaborators.
///
/// # Errors
/// Returns an error if the configuration is invalid or the store fails.
pub async fn check_with(
    config: &AppConfig,
    store: Arc<dyn SessionStore>,
    ui: Arc<dyn Ui>,
    navigator: Arc<dyn Navigator>,
) -> Result<Option<Outcome<()>>> {
    let transport = HttpTransport::new(&config.api_base_url, config.request_timeout)?;
    let page = LoginPage::new(
        config.form()?,
        transport,
        store,
        ui,
        navigator,
        config.login_options(),
    );
    page.on_load().await.context("failed to access session store")
}

/// Print the stored session.
/// # Errors
/// Returns an error if the session file cannot be read.
pub fn status(config: &AppConfig) -> Result<()> {
    let store = FileStore::new(config.session_path.clone());
    let mut out = io::stdout().lock();
    write_status(&store, &mut out)
}

/// Writes the stored session with the token redacted.
///
/// # Errors
/// Returns an error if the store cannot be read or the output cannot be written.
pub fn write_status(store: &dyn SessionStore, out: &mut impl Write) -> Result<()> {
    match Session::load(store).context("failed to read session")? {
        Some(session) => {
            writeln!(out, "Username: {}", session.username)?;
            writeln!(out, "UID:      {}", session.uid)?;
            writeln!(out, "IsAdmin:  {}", session.is_admin)?;
            writeln!(out, "Token:    ***")?;
        }
        None => writeln!(out, "not logged in")?,
    }
    Ok(())
}

/// Remove the stored session.
/// # Errors
/// Returns an error if the session file cannot be written.
pub fn logout(config: &AppConfig) -> Result<()> {
    let store = FileStore::new(config.session_path.clone());
    Session::clear(&store).context("failed to clear session")?;
    info!(path = %store.path().display(), "session removed");
    Ok(())
}
