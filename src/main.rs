//! Provides the main entry point to the program.
use anyhow::Result;
use human_panic::setup_panic;
use wellwatch::cli::run_cli;

fn main() -> Result<()> {
    // Display user-friendly messages on panics
    setup_panic!();

    run_cli()
}
