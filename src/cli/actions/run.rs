use crate::cli::actions::{Action, login, session};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Check(config) => session::check(config).await,
        Action::Status(config) => session::status(&config),
        Action::Logout(config) => session::logout(&config),
    }
}
