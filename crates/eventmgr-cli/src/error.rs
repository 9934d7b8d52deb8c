use anyhow::Error;
use eventmgr_civic::CivicError;
use eventmgr_config::ConfigError;
use eventmgr_core::time::TimeParseError;
use eventmgr_core::CoreError;
use eventmgr_letters::LetterError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            };
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(letter_err) = cause.downcast_ref::<LetterError>() {
            return letter_exit_code(letter_err);
        }
        if let Some(civic_err) = cause.downcast_ref::<CivicError>() {
            return civic_exit_code(civic_err);
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(_parse_err) = cause.downcast_ref::<TimeParseError>() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            EXIT_NOT_FOUND
        }
        ConfigError::MissingConfigFile(_) => EXIT_NOT_FOUND,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::EmptyPath { .. }
        | ConfigError::InvalidTimeout(_)
        | ConfigError::InvalidUserAgent
        | ConfigError::InvalidBaseUrl { .. }
        | ConfigError::EmptyKeyFile(_)
        | ConfigError::EmptyApiKey
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
        ConfigError::Read { .. } => EXIT_FAILURE,
    }
}

fn letter_exit_code(err: &LetterError) -> u8 {
    match err {
        LetterError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            EXIT_NOT_FOUND
        }
        LetterError::Csv(_) | LetterError::Template(_) | LetterError::InvalidId(_) => {
            EXIT_INVALID_INPUT
        }
        LetterError::Io(_) | LetterError::Read { .. } | LetterError::Write { .. } => EXIT_FAILURE,
    }
}

fn civic_exit_code(err: &CivicError) -> u8 {
    match err {
        CivicError::Url(_) => EXIT_INVALID_INPUT,
        CivicError::Http(_)
        | CivicError::Unauthorized(_)
        | CivicError::RateLimited
        | CivicError::Status { .. }
        | CivicError::Parse(_) => EXIT_FAILURE,
    }
}
