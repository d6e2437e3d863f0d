use anyhow::Error;
use frontdesk_config::ConfigError;
use frontdesk_lookup::LookupError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:?}", err);
    } else {
        eprintln!("error: {:#}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if cause.downcast_ref::<CliError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(lookup_err) = cause.downcast_ref::<LookupError>() {
            return ExitCode::from(lookup_exit_code(lookup_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidApiField { .. }
        | ConfigError::InvalidDebounce { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn lookup_exit_code(err: &LookupError) -> u8 {
    match err {
        LookupError::Unavailable(_) => EXIT_INVALID_INPUT,
        LookupError::Io(_) | LookupError::Status(_) => EXIT_FAILURE,
        LookupError::Parse(_) => EXIT_INVALID_INPUT,
        #[cfg(feature = "http")]
        LookupError::Http(_) => EXIT_FAILURE,
        #[cfg(feature = "http")]
        LookupError::Url(_) => EXIT_INVALID_INPUT,
    }
}
