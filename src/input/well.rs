//! Code for reading the wells CSV file.
use crate::input::input_err_msg;
use crate::units::{BarrelsPerDay, Celsius, Dimensionless};
use crate::well::{DEFAULT_TEMPERATURE, WellReading};
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const WELLS_FILE_NAME: &str = "wells.csv";

/// One row of the wells CSV file, as delivered from the field.
#[derive(Debug, Deserialize)]
struct WellReadingRaw {
    pozo_id: String,
    prod_teorica_bpd: f64,
    /// May be empty in raw field data
    prod_real_bpd: Option<f64>,
    /// Either a fraction in `[0, 1]` or a percentage in `[0, 100]`
    water_cut: f64,
    temp_c: Option<f64>,
}

/// The wells read from a model directory, with a count of unparseable rows.
#[derive(Debug, Clone, PartialEq)]
pub struct WellBatch {
    /// Well readings in file order
    pub wells: Vec<WellReading>,
    /// Number of rows that could not be parsed at all
    pub skipped_rows: usize,
}

/// Read well readings from the specified model directory.
///
/// Rows that fail to parse are skipped with a count rather than aborting the batch; readings with
/// a parseable but invalid actual rate are kept here and excluded later, during classification.
/// Duplicate well IDs are an error.
pub fn read_wells(model_dir: &Path) -> Result<WellBatch> {
    let file_path = model_dir.join(WELLS_FILE_NAME);
    let mut reader =
        csv::Reader::from_path(&file_path).with_context(|| input_err_msg(&file_path))?;

    let mut raws = Vec::new();
    let mut skipped_rows = 0;
    for record in reader.deserialize::<WellReadingRaw>() {
        match record {
            Ok(raw) => raws.push(raw),
            Err(err) => {
                skipped_rows += 1;
                warn!("Skipping malformed well row: {err}");
            }
        }
    }

    build_batch(raws, skipped_rows).with_context(|| input_err_msg(&file_path))
}

fn build_batch(raws: Vec<WellReadingRaw>, skipped_rows: usize) -> Result<WellBatch> {
    ensure!(!raws.is_empty(), "Wells file contains no readable rows");

    // The water cut column is either fractional or percentage; decide for the whole file by
    // whether any value exceeds one
    let max_water_cut = raws.iter().map(|raw| raw.water_cut).fold(0.0, f64::max);
    let water_cut_divisor = if max_water_cut > 1.0 { 100.0 } else { 1.0 };

    let mut seen = HashSet::new();
    let mut wells = Vec::with_capacity(raws.len());
    for raw in raws {
        ensure!(
            seen.insert(raw.pozo_id.clone()),
            "Duplicate well ID {}",
            raw.pozo_id
        );

        wells.push(WellReading {
            id: raw.pozo_id.as_str().into(),
            theoretical_rate: BarrelsPerDay(raw.prod_teorica_bpd),
            actual_rate: BarrelsPerDay(raw.prod_real_bpd.unwrap_or(f64::NAN)),
            water_cut: Dimensionless(raw.water_cut / water_cut_divisor),
            temperature: raw.temp_c.map_or(DEFAULT_TEMPERATURE, Celsius),
        });
    }

    Ok(WellBatch {
        wells,
        skipped_rows,
    })
}
