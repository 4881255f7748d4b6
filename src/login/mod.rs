//! Login page controller. It owns the form, submits credentials through the
//! request gateway, persists the session and schedules navigation. On page
//! load it checks a previously stored token before the user types anything.
//!
//! Flow Overview: `Login` persists `Token`, `IsAdmin`, `UID` and `Username`,
//! updates the addon stylesheet and navigates after a fixed delay to the
//! `Callback` path or the home page. A rejected login marks the password
//! field invalid. `CheckTokenAvailable` navigates home when the stored token
//! is still valid and removes it when the backend rejects it.

mod navigation;
mod types;

pub use navigation::{CALLBACK_PARAM, addon_style, destination_after_login};
pub use types::{
    CHECK_TOKEN_OPERATION, Credentials, LOGIN_OPERATION, LoginResponse, token_payload,
};

use crate::{
    form::{FormContext, Validity},
    gateway::{Outcome, RequestGateway, Transport},
    session::{Session, SessionStore, StoreError, TOKEN_KEY},
    ui::{Control, Destination, FieldId, LoadingGuard, Navigator, Page, Ui},
};
use std::{fmt, sync::Arc, time::Duration};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};
use url::Url;

/// Delay between a successful login and the navigation that follows it.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct LoginOptions {
    /// URL of the login page, read for the `Callback` parameter.
    pub page_url: Url,
    pub redirect_delay: Duration,
    /// Suppresses the gateway's generic error notifications.
    pub silent: bool,
}

impl LoginOptions {
    #[must_use]
    pub fn new(page_url: Url) -> Self {
        Self {
            page_url,
            redirect_delay: REDIRECT_DELAY,
            silent: false,
        }
    }
}

/// Navigation scheduled after a successful login. The timer runs on its own
/// task and is not cancelled when this handle is dropped.
#[derive(Debug)]
pub struct PendingNavigation {
    destination: Destination,
    handle: JoinHandle<()>,
}

impl PendingNavigation {
    #[must_use]
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Waits until the navigation has happened.
    ///
    /// # Errors
    /// Returns an error if the navigation task panicked.
    pub async fn wait(self) -> Result<Destination, JoinError> {
        self.handle.await?;
        Ok(self.destination)
    }
}

pub struct LoginPage<T> {
    form: FormContext,
    gateway: RequestGateway<T>,
    store: Arc<dyn SessionStore>,
    ui: Arc<dyn Ui>,
    navigator: Arc<dyn Navigator>,
    options: LoginOptions,
}

impl<T: Transport> LoginPage<T> {
    pub fn new(
        form: FormContext,
        transport: T,
        store: Arc<dyn SessionStore>,
        ui: Arc<dyn Ui>,
        navigator: Arc<dyn Navigator>,
        options: LoginOptions,
    ) -> Self {
        Self {
            form,
            gateway: RequestGateway::new(transport, Arc::clone(&ui)),
            store,
            ui,
            navigator,
            options,
        }
    }

    #[must_use]
    pub const fn form(&self) -> &FormContext {
        &self.form
    }

    /// Input event on a field.
    pub fn on_input(&mut self, field: FieldId, value: impl Into<String>) {
        self.form.field_mut(field).on_change(value, self.ui.as_ref());
    }

    /// Blur event on a field.
    pub fn on_blur(&mut self, field: FieldId) -> Validity {
        self.form.field_mut(field).on_blur(self.ui.as_ref())
    }

    /// Click on the passkey button.
    pub fn on_passkey_click(&self) {
        self.navigator
            .navigate(Destination::Page(Page::LoginWithPasskey));
    }

    /// Click on the login button.
    ///
    /// The button shows a loading indicator for the duration of the call,
    /// whatever the outcome. Field validity does not gate the submission.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub async fn submit(&mut self) -> Result<Outcome<PendingNavigation>, StoreError> {
        let _loading = LoadingGuard::acquire(Arc::clone(&self.ui), Control::LoginButton);

        let credentials = Credentials::from_form(&self.form);
        info!(username = credentials.username(), "submitting login");

        let outcome = self
            .gateway
            .request(LOGIN_OPERATION, &credentials.payload(), self.options.silent)
            .await;

        match outcome {
            Outcome::Success(data) => {
                let response = match serde_json::from_value::<LoginResponse>(data) {
                    Ok(response) => response,
                    Err(err) => {
                        error!("login response is missing session fields: {err}");
                        return Ok(Outcome::TransportError(format!(
                            "Invalid login response: {err}"
                        )));
                    }
                };

                let session = Session {
                    token: response.token,
                    is_admin: response.is_admin,
                    uid: response.uid,
                    username: self.form.username.value().to_string(),
                };
                session.save(self.store.as_ref())?;
                info!(uid = %session.uid, is_admin = session.is_admin, "session stored");

                self.ui.set_addon_style(&addon_style(session.is_admin));

                let destination = destination_after_login(&self.options.page_url);
                Ok(Outcome::Success(self.schedule(destination)))
            }
            Outcome::ClientError(message) => {
                self.form.password.mark(false, self.ui.as_ref());
                Ok(Outcome::ClientError(message))
            }
            Outcome::TransportError(message) => Ok(Outcome::TransportError(message)),
        }
    }

    /// Page load: validates a stored token, if any.
    ///
    /// Returns `None` when no token is stored and no request was made.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the rejected token
    /// cannot be removed.
    pub async fn on_load(&self) -> Result<Option<Outcome<()>>, StoreError> {
        let Some(token) = self.store.get(TOKEN_KEY)? else {
            debug!("no stored token, skipping token check");
            return Ok(None);
        };

        let outcome = self
            .gateway
            .request(
                CHECK_TOKEN_OPERATION,
                &token_payload(&token),
                self.options.silent,
            )
            .await;

        match &outcome {
            Outcome::Success(_) => {
                info!("stored token accepted");
                self.navigator.navigate(Destination::Page(Page::Home));
            }
            Outcome::ClientError(_) => {
                self.store.remove(TOKEN_KEY)?;
                info!("stored token rejected and removed");
            }
            Outcome::TransportError(_) => {}
        }

        Ok(Some(outcome.map(|_| ())))
    }

    fn schedule(&self, destination: Destination) -> PendingNavigation {
        let navigator = Arc::clone(&self.navigator);
        let delay = self.options.redirect_delay;
        let target = destination.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(destination = %target, "navigating after login");
            navigator.navigate(target);
        });

        PendingNavigation {
            destination,
            handle,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LoginPage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPage")
            .field("form", &self.form)
            .field("gateway", &self.gateway)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
