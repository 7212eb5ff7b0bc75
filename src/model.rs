//! The top-level model: a scenario plus the batch of wells it is evaluated against.
use crate::input::scenario::{Scenario, read_scenario};
use crate::input::well::{WellBatch, read_wells};
use crate::well::{WellID, WellReading};
use anyhow::{Context, Result};
use std::path::Path;

/// A model directory's contents, loaded and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// The market, decline and treatment assumptions
    pub scenario: Scenario,
    /// The wells to classify under the scenario
    pub wells: WellBatch,
}

impl Model {
    /// Read a model from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing the scenario and wells files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
        let model_dir = model_dir.as_ref();
        let scenario = read_scenario(model_dir).context("Failed to read scenario file.")?;
        let wells = read_wells(model_dir).context("Failed to read wells file.")?;

        Ok(Model { scenario, wells })
    }

    /// Look up a well reading by its ID.
    pub fn well(&self, id: &WellID) -> Result<&WellReading> {
        self.wells
            .wells
            .iter()
            .find(|reading| &reading.id == id)
            .with_context(|| format!("Unknown well ID {id}"))
    }
}
