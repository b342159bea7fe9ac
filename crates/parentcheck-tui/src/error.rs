use anyhow::Error;
use parentcheck_config::ConfigError;
use std::process::ExitCode;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_CONFIG: u8 = 3;

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
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ConfigError>())
        .map_or(EXIT_FAILURE, config_exit_code)
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidUrl { .. }
        | ConfigError::UnsupportedScheme { .. }
        | ConfigError::InvalidTimeout(_)
        | ConfigError::InvalidNoticeDuration(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_CONFIG,
    }
}
