//! # Signon (Login Client)
//!
//! `signon` models a login page as explicit, testable parts and drives them
//! from a command line front end.
//!
//! ## Components
//!
//! - **Field validation** ([`form`]): each text field carries a
//!   [`form::ValidationRule`]. Typing performs a neutral reset; leaving the
//!   field evaluates the rule and decorates the field valid or invalid.
//! - **Request gateway** ([`gateway`]): one asynchronous call per named
//!   backend operation, resolving to exactly one [`gateway::Outcome`].
//!   Cleanup (removing the loading indicator) is scoped by
//!   [`ui::LoadingGuard`] and always runs.
//! - **Session persistence** ([`session`]): the `Token`, `IsAdmin`, `UID` and
//!   `Username` keys live behind the injected [`session::SessionStore`].
//! - **Login page** ([`login`]): wires the parts together for the `Login`
//!   and `CheckTokenAvailable` flows.
//!
//! Collaborators that render state (field decoration, error toasts, loading
//! indicators, navigation) are traits in [`ui`] so the core runs the same in
//! a terminal and in tests.
//!
//! Credentials and tokens must never be logged; the types that carry them
//! redact their `Debug` output.

pub mod cli;
pub mod config;
pub mod form;
pub mod gateway;
pub mod login;
pub mod session;
pub mod ui;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
