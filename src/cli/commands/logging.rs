use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const MAX_NUMERIC_LEVEL: u8 = 5;

/// Parses `SIGNON_LOG_LEVEL`: a level name or a number up to 5.
fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim();
    if let Ok(parsed) = level.parse::<u8>() {
        return if parsed <= MAX_NUMERIC_LEVEL {
            Ok(parsed)
        } else {
            Err(format!("log level must be between 0 and {MAX_NUMERIC_LEVEL}"))
        };
    }

    LEVEL_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level: {level}"))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("SIGNON_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
