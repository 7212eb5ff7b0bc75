//! Common functionality for the wellwatch production analysis tool.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod decline;
pub mod economics;
pub mod id;
pub mod input;
pub mod log;
pub mod model;
pub mod output;
pub mod settings;
pub mod units;
pub mod well;

#[cfg(test)]
mod fixture;

/// The directory in which the user's program configuration is stored
pub fn get_wellwatch_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("wellwatch");

    path
}
