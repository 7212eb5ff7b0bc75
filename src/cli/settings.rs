//! CLI commands for inspecting and editing the program settings file.
use crate::settings::{Settings, get_settings_file_path};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

/// The available subcommands for managing the settings file.
#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Open the settings file in a text editor, creating it first if needed
    Edit,
    /// Print the path the settings file is read from
    Path,
    /// Print a commented-out settings file with the default values
    DumpDefault,
}

impl SettingsSubcommands {
    /// Execute the supplied settings subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Edit => handle_edit_command(),
            Self::Path => {
                println!("{}", get_settings_file_path().display());
                Ok(())
            }
            Self::DumpDefault => {
                print!("{}", Settings::default_file_contents());
                Ok(())
            }
        }
    }
}

/// Write a placeholder settings file (all values commented out) to the given path
fn write_placeholder_settings(file_path: &Path) -> Result<()> {
    if let Some(dir_path) = file_path.parent() {
        fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir_path.display()))?;
    }

    fs::write(file_path, Settings::default_file_contents())
        .with_context(|| format!("Failed to write settings file: {}", file_path.display()))
}

/// Handle the `settings edit` command
fn handle_edit_command() -> Result<()> {
    let file_path = get_settings_file_path();

    // First use: give the user a placeholder to uncomment rather than an empty buffer
    if !file_path.is_file() {
        write_placeholder_settings(&file_path)?;
    }

    println!("Editing settings file: {}", file_path.display());
    edit::edit_file(&file_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_placeholder_settings() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config").join("settings.toml");

        write_placeholder_settings(&file_path).unwrap();
        assert!(file_path.is_file());

        // Everything in the placeholder is commented out, so reading it back gives the defaults
        let contents = fs::read_to_string(&file_path).unwrap();
        let settings: Settings = toml::from_str(&contents).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
