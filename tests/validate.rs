//! Integration tests for the `validate` command.
use std::path::PathBuf;
use wellwatch::cli::handle_validate_command;
use wellwatch::log::is_logger_initialised;
use wellwatch::settings::Settings;

/// Get the path to the example model.
fn get_model_dir() -> PathBuf {
    PathBuf::from("demo_models/onshore-field")
}

/// An integration test for the `validate` command.
///
/// We also check that the logger is initialised after it is run.
#[test]
fn test_handle_validate_command() {
    unsafe { std::env::set_var("WELLWATCH_LOG_LEVEL", "off") };

    assert!(!is_logger_initialised());

    handle_validate_command(&get_model_dir(), Some(Settings::default())).unwrap();

    assert!(is_logger_initialised());
}
