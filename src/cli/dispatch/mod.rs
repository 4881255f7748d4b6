//! Maps validated CLI matches to an action carrying its full configuration.

use crate::cli::{
    actions::{Action, login::Args},
    commands::{self, api, login},
};
use anyhow::{Context, Result, anyhow};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    match name {
        login::COMMAND_LOGIN => {
            let mut config = api::Options::parse(sub_m)?.into_config(true)?;
            let login_opts = login::Options::parse(sub_m)?;
            config.username_pattern = login_opts.username_pattern;
            config.password_reject_pattern = login_opts.password_reject_pattern;

            Ok(Action::Login(Args {
                config,
                username: login_opts.username,
                password: login_opts.password,
            }))
        }
        commands::COMMAND_CHECK => Ok(Action::Check(
            api::Options::parse(sub_m)?.into_config(true)?,
        )),
        commands::COMMAND_STATUS => Ok(Action::Status(
            api::Options::parse(sub_m)?.into_config(false)?,
        )),
        commands::COMMAND_LOGOUT => Ok(Action::Logout(
            api::Options::parse(sub_m)?.into_config(false)?,
        )),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::{path::PathBuf, time::Duration};

    fn without_env(f: impl FnOnce()) {
        temp_env::with_vars(
            [
                ("SIGNON_API_URL", None::<&str>),
                ("SIGNON_PAGE_URL", None),
                ("SIGNON_SESSION_FILE", None),
                ("SIGNON_TIMEOUT", None),
                ("SIGNON_USERNAME", None),
                ("SIGNON_PASSWORD", None),
                ("SIGNON_USERNAME_PATTERN", None),
                ("SIGNON_PASSWORD_REJECT_PATTERN", None),
            ],
            f,
        );
    }

    #[test]
    fn api_url_required_for_check() {
        without_env(|| {
            let matches = commands::new().get_matches_from(vec!["signon", "check"]);
            let result = handler(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(
                    err.to_string()
                        .contains("missing required argument: --api-url")
                );
            }
        });
    }

    #[test]
    fn status_does_not_need_api_url() {
        without_env(|| {
            let matches = commands::new().get_matches_from(vec![
                "signon",
                "status",
                "--session-file",
                "/tmp/signon-status.json",
            ]);
            match handler(&matches).unwrap() {
                Action::Status(config) => {
                    assert_eq!(config.session_path, PathBuf::from("/tmp/signon-status.json"));
                    assert!(config.api_base_url.is_empty());
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn login_builds_full_config() {
        without_env(|| {
            let matches = commands::new().get_matches_from(vec![
                "signon",
                "--api-url",
                "https://judge.example.com/api",
                "login",
                "--page-url",
                "https://judge.example.com/Login?Callback=/dashboard",
                "--timeout",
                "4",
                "-u",
                "alice",
                "--password",
                "s3cret-pass",
                "--username-pattern",
                "^[a-z]+$",
            ]);
            match handler(&matches).unwrap() {
                Action::Login(args) => {
                    assert_eq!(args.username, "alice");
                    assert_eq!(args.password.expose_secret(), "s3cret-pass");
                    assert_eq!(args.config.api_base_url, "https://judge.example.com/api");
                    assert_eq!(
                        args.config.page_url.as_str(),
                        "https://judge.example.com/Login?Callback=/dashboard"
                    );
                    assert_eq!(args.config.request_timeout, Duration::from_secs(4));
                    assert_eq!(args.config.username_pattern, "^[a-z]+$");
                    assert_eq!(
                        args.config.password_reject_pattern,
                        crate::form::DEFAULT_PASSWORD_REJECT_PATTERN
                    );
                }
                other => panic!("unexpected action: {other:?}"),
            }
        });
    }

    #[test]
    fn invalid_page_url_is_rejected() {
        without_env(|| {
            let matches = commands::new().get_matches_from(vec![
                "signon",
                "logout",
                "--page-url",
                "not a url",
            ]);
            let err = handler(&matches).unwrap_err();
            assert!(err.to_string().contains("invalid --page-url"));
        });
    }
}
