//! Integration tests for the `example run` command.
use tempfile::tempdir;
use wellwatch::cli::example::handle_example_run_command;
use wellwatch::settings::Settings;

/// An integration test for the `example run` command.
#[test]
fn test_handle_example_run_command() {
    unsafe { std::env::set_var("WELLWATCH_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    let output_dir = tempdir.path().join("results");
    handle_example_run_command(
        "onshore-field",
        Some(output_dir.clone()),
        false,
        Some(Settings::default()),
    )
    .unwrap();

    assert!(output_dir.join("summary.toml").is_file());
    assert!(!output_dir.join("debug_critical_wells.csv").exists());
}
