//! Integration tests for the `run` command.
use std::path::PathBuf;
use tempfile::tempdir;
use wellwatch::cli::{RunOpts, handle_run_command};
use wellwatch::settings::Settings;

/// Get the path to the example model.
fn get_model_dir() -> PathBuf {
    PathBuf::from("demo_models/onshore-field")
}

fn run_opts(output_dir: PathBuf, overwrite: bool) -> RunOpts {
    RunOpts {
        output_dir: Some(output_dir),
        overwrite,
        debug_model: true,
        well: None,
    }
}

/// An integration test for the `run` command.
#[test]
fn test_handle_run_command() {
    unsafe { std::env::set_var("WELLWATCH_LOG_LEVEL", "off") };

    let output_dir;
    {
        // Save results to non-existent directory to check that directory creation works
        let tempdir = tempdir().unwrap();
        output_dir = tempdir.path().join("results");
        handle_run_command(
            &get_model_dir(),
            &run_opts(output_dir.clone(), false),
            Some(Settings::default()),
        )
        .unwrap();

        for file_name in [
            "projection.csv",
            "cash_flow.csv",
            "wells.csv",
            "summary.toml",
            "debug_critical_wells.csv",
        ] {
            assert!(output_dir.join(file_name).is_file(), "missing {file_name}");
        }
    }

    // Second time will fail because the logging is already initialised
    let tempdir = tempdir().unwrap();
    assert_eq!(
        handle_run_command(
            &get_model_dir(),
            &run_opts(tempdir.path().to_path_buf(), true),
            Some(Settings::default()),
        )
        .unwrap_err()
        .chain()
        .next()
        .unwrap()
        .to_string(),
        "Failed to initialise logging."
    );
}
