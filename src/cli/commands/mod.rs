pub mod api;
pub mod logging;
pub mod login;

use clap::{
    ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const COMMAND_CHECK: &str = "check";
pub const COMMAND_STATUS: &str = "status";
pub const COMMAND_LOGOUT: &str = "logout";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("signon")
        .about("Log in to the judge backend and manage the local session")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(login::subcommand())
        .subcommand(
            Command::new(COMMAND_CHECK)
                .about("Check the stored token, as the login page does on load"),
        )
        .subcommand(Command::new(COMMAND_STATUS).about("Print the stored session"))
        .subcommand(Command::new(COMMAND_LOGOUT).about("Remove the stored session"));

    let command = api::with_args(command);
    logging::with_args(command)
}
