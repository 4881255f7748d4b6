use crate::{
    cli::terminal::Terminal,
    config::AppConfig,
    gateway::{HttpTransport, Outcome},
    login::LoginPage,
    session::{FileStore, SessionStore},
    ui::{Destination, FieldId, Navigator, Ui},
};
use anyhow::{Context, Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub username: String,
    pub password: SecretString,
}

/// Execute the login action against the file-backed session store.
/// # Errors
/// Returns an error if the login is rejected, the backend is unreachable or
/// the session cannot be stored.
pub async fn execute(args: Args) -> Result<()> {
    let store = Arc::new(FileStore::new(args.config.session_path.clone()));
    let terminal = Arc::new(Terminal::new());
    run(args, store, Arc::clone(&terminal) as Arc<dyn Ui>, terminal).await?;
    Ok(())
}

/// Types both fields, leaves them, submits and waits for the navigation.
///
/// # Errors
/// Returns an error unless the login succeeds and the navigation happens.
#[instrument(skip_all, fields(username = %args.username))]
pub async fn run(
    args: Args,
    store: Arc<dyn SessionStore>,
    ui: Arc<dyn Ui>,
    navigator: Arc<dyn Navigator>,
) -> Result<Destination> {
    let config = args.config;
    let form = config.form()?;
    let transport = HttpTransport::new(&config.api_base_url, config.request_timeout)?;

    let mut page = LoginPage::new(
        form,
        transport,
        store,
        ui,
        navigator,
        config.login_options(),
    );

    page.on_input(FieldId::Username, args.username);
    page.on_blur(FieldId::Username);
    page.on_input(FieldId::Password, args.password.expose_secret());
    page.on_blur(FieldId::Password);

    match page.submit().await.context("failed to store session")? {
        Outcome::Success(pending) => {
            let destination = pending
                .wait()
                .await
                .context("navigation task failed")?;
            info!(destination = %destination, "logged in");
            Ok(destination)
        }
        Outcome::ClientError(message) => Err(anyhow!("login rejected: {message}")),
        Outcome::TransportError(message) => Err(anyhow!("login failed: {message}")),
    }
}
