use crate::config::{AppConfig, default_session_path};
use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgMatches, Command};
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_PAGE_URL: &str = "page-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_TIMEOUT: &str = "timeout";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: Option<String>,
    pub page_url: String,
    pub session_file: Option<PathBuf>,
    pub timeout_seconds: u64,
}

impl Options {
    /// Parse backend and storage arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the timeout is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            api_url: matches
                .get_one::<String>(ARG_API_URL)
                .cloned()
                .filter(|v| !v.trim().is_empty()),
            page_url: matches
                .get_one::<String>(ARG_PAGE_URL)
                .cloned()
                .unwrap_or_else(|| crate::config::DEFAULT_PAGE_URL.to_string()),
            session_file: matches.get_one::<PathBuf>(ARG_SESSION_FILE).cloned(),
            timeout_seconds: matches
                .get_one::<u64>(ARG_TIMEOUT)
                .copied()
                .context("missing required argument: --timeout")?,
        })
    }

    /// Builds the runtime configuration. `require_api` fails early for
    /// commands that talk to the backend.
    ///
    /// # Errors
    /// Returns an error if a URL is invalid or the API URL is required but missing.
    pub fn into_config(self, require_api: bool) -> Result<AppConfig> {
        let api_url = match (self.api_url, require_api) {
            (Some(url), _) => url,
            (None, true) => return Err(anyhow!("missing required argument: --{ARG_API_URL}")),
            (None, false) => String::new(),
        };

        let mut config = AppConfig::new(api_url)?;
        config.page_url = Url::parse(self.page_url.trim())
            .with_context(|| format!("invalid --{ARG_PAGE_URL}: {}", self.page_url))?;
        config.session_path = self.session_file.unwrap_or_else(default_session_path);
        config.request_timeout = Duration::from_secs(self.timeout_seconds);
        Ok(config)
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .short('a')
                .long(ARG_API_URL)
                .help("Base URL of the backend API, example: https://judge.tld/api")
                .env("SIGNON_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PAGE_URL)
                .long(ARG_PAGE_URL)
                .help("URL of the login page, read for the Callback parameter")
                .env("SIGNON_PAGE_URL")
                .default_value(crate::config::DEFAULT_PAGE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Session file (default: $XDG_CONFIG_HOME/signon/session.json)")
                .env("SIGNON_SESSION_FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("SIGNON_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
}
