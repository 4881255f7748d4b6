use crate::form::{DEFAULT_PASSWORD_REJECT_PATTERN, DEFAULT_USERNAME_PATTERN};
use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const COMMAND_LOGIN: &str = "login";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_USERNAME_PATTERN: &str = "username-pattern";
pub const ARG_PASSWORD_REJECT_PATTERN: &str = "password-reject-pattern";

#[derive(Debug, Clone)]
pub struct Options {
    pub username: String,
    pub password: SecretString,
    pub username_pattern: String,
    pub password_reject_pattern: String,
}

impl Options {
    /// Parse login arguments from the `login` subcommand matches.
    ///
    /// # Errors
    /// Returns an error if the username or password is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let read_required = |id: &str| -> Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };
        let read_or = |id: &str, default: &str| -> String {
            matches
                .get_one::<String>(id)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            username: read_required(ARG_USERNAME)?,
            password: SecretString::from(read_required(ARG_PASSWORD)?),
            username_pattern: read_or(ARG_USERNAME_PATTERN, DEFAULT_USERNAME_PATTERN),
            password_reject_pattern: read_or(
                ARG_PASSWORD_REJECT_PATTERN,
                DEFAULT_PASSWORD_REJECT_PATTERN,
            ),
        })
    }
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(COMMAND_LOGIN)
        .about("Validate credentials, log in and store the session")
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long(ARG_USERNAME)
                .help("Username")
                .env("SIGNON_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password")
                .env("SIGNON_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_USERNAME_PATTERN)
                .long(ARG_USERNAME_PATTERN)
                .help("Regular expression a username must match")
                .env("SIGNON_USERNAME_PATTERN")
                .default_value(DEFAULT_USERNAME_PATTERN),
        )
        .arg(
            Arg::new(ARG_PASSWORD_REJECT_PATTERN)
                .long(ARG_PASSWORD_REJECT_PATTERN)
                .help("Regular expression matching passwords that are rejected")
                .env("SIGNON_PASSWORD_REJECT_PATTERN")
                .default_value(DEFAULT_PASSWORD_REJECT_PATTERN),
        )
}
