//! Collaborator surface consumed by the login core. Rendering (field
//! decoration, error toasts, loading indicators) and navigation are not
//! implemented here; callers inject them through the [`Ui`] and
//! [`Navigator`] traits.

use std::{fmt, sync::Arc};
use url::Url;

/// Text fields on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Username,
    Password,
}

impl FieldId {
    /// Element identifier used by the page markup.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Username => "LoginUsernameInput",
            Self::Password => "LoginPasswordInput",
        }
    }

    /// Whether the field value must stay out of logs and debug output.
    #[must_use]
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Clickable controls that can show a loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    LoginButton,
    LoginWithPasskeyButton,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoginButton => f.write_str("LoginButton"),
            Self::LoginWithPasskeyButton => f.write_str("LoginWithPasskeyButton"),
        }
    }
}

/// Named pages reachable through [`Navigator::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    LoginWithPasskey,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("Home"),
            Self::LoginWithPasskey => f.write_str("LoginWithPasskey"),
        }
    }
}

/// Where the page goes next: a named page or an absolute same-origin URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Page(Page),
    Url(Url),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Visual feedback primitives.
pub trait Ui: Send + Sync {
    /// Decorates a field. `None` is the neutral reset: it clears error
    /// decoration without asserting correctness.
    fn set_valid(&self, field: FieldId, validity: Option<bool>);

    /// Shows a human-readable message to the user.
    fn show_error(&self, message: &str);

    fn add_loading(&self, control: Control);

    fn remove_loading(&self, control: Control);

    /// Replaces the rules of the `AddonStyle` stylesheet.
    fn set_addon_style(&self, rules: &str);
}

/// Page navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// Shows a loading indicator on a control for as long as the guard lives.
///
/// `remove_loading` runs exactly once when the guard is dropped, on every
/// exit path, so a control cannot stay stuck in the loading state.
#[must_use = "the loading indicator is removed as soon as the guard is dropped"]
pub struct LoadingGuard {
    ui: Arc<dyn Ui>,
    control: Control,
}

impl LoadingGuard {
    pub fn acquire(ui: Arc<dyn Ui>, control: Control) -> Self {
        ui.add_loading(control);
        Self { ui, control }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.ui.remove_loading(self.control);
    }
}

impl fmt::Debug for LoadingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingGuard")
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}
