//! Runtime configuration assembled from command line arguments and their
//! `SIGNON_*` environment fallbacks. Configuration values are not secret;
//! credentials are passed to the login action separately.

use crate::{
    form::{
        DEFAULT_PASSWORD_REJECT_PATTERN, DEFAULT_PASSWORD_REQUIREMENT, DEFAULT_USERNAME_PATTERN,
        DEFAULT_USERNAME_REQUIREMENT, FormContext, ValidationRule,
    },
    gateway::DEFAULT_TIMEOUT,
    login::{LoginOptions, REDIRECT_DELAY},
};
use anyhow::{Context, Result};
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_PAGE_URL: &str = "http://localhost/Login";
const SESSION_FILE_NAME: &str = "session.json";
const FALLBACK_SESSION_FILE: &str = "signon-session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_url: Url,
    pub session_path: PathBuf,
    pub request_timeout: Duration,
    pub redirect_delay: Duration,
    pub username_pattern: String,
    pub password_reject_pattern: String,
}

impl AppConfig {
    /// Configuration with defaults for everything but the API base URL.
    ///
    /// # Errors
    /// Returns an error if the default page URL cannot be parsed.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_base_url: api_base_url.into(),
            page_url: Url::parse(DEFAULT_PAGE_URL).context("invalid default page URL")?,
            session_path: default_session_path(),
            request_timeout: DEFAULT_TIMEOUT,
            redirect_delay: REDIRECT_DELAY,
            username_pattern: DEFAULT_USERNAME_PATTERN.to_string(),
            password_reject_pattern: DEFAULT_PASSWORD_REJECT_PATTERN.to_string(),
        })
    }

    /// Builds the form with the configured validation patterns.
    ///
    /// # Errors
    /// Returns an error if a pattern is not a valid regular expression.
    pub fn form(&self) -> Result<FormContext> {
        let username = ValidationRule::match_required(&self.username_pattern)
            .context("invalid username pattern")?
            .with_requirement(DEFAULT_USERNAME_REQUIREMENT);
        let password = ValidationRule::match_forbidden(&self.password_reject_pattern)
            .context("invalid password reject pattern")?
            .with_requirement(DEFAULT_PASSWORD_REQUIREMENT);
        Ok(FormContext::new(username, password))
    }

    #[must_use]
    pub fn login_options(&self) -> LoginOptions {
        let mut options = LoginOptions::new(self.page_url.clone());
        options.redirect_delay = self.redirect_delay;
        options
    }
}

/// `$XDG_CONFIG_HOME/signon/session.json`, then `$HOME/.config/signon/session.json`,
/// then `./signon-session.json`.
#[must_use]
pub fn default_session_path() -> PathBuf {
    if let Some(dir) = env_value("XDG_CONFIG_HOME") {
        return PathBuf::from(dir).join("signon").join(SESSION_FILE_NAME);
    }
    if let Some(home) = env_value("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("signon")
            .join(SESSION_FILE_NAME);
    }
    PathBuf::from(FALLBACK_SESSION_FILE)
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| normalize_value(&value))
}

/// Trims a value and rejects it when empty.
#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
