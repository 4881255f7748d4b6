pub mod login;
pub mod session;

// Internal "interpreter" for `Action`.
mod run;

use crate::config::AppConfig;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Check(AppConfig),
    Status(AppConfig),
    Logout(AppConfig),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
