//! The module responsible for writing output data to disk.
use crate::analysis::{AnalysisResults, ExecutiveSummary};
use crate::classify::{Classification, ClassifiedWell, FieldSummary};
use crate::decline::ProjectionSeries;
use crate::economics::CashFlowSeries;
use crate::units::{BarrelsPerDay, Dimensionless, Money, MoneyPerDay};
use crate::well::{WellCategory, WellID};
use anyhow::{Context, Result, ensure};
use csv;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
pub const OUTPUT_DIRECTORY_ROOT: &str = "wellwatch_results";

/// The output file name for the daily production projection
const PROJECTION_FILE_NAME: &str = "projection.csv";

/// The output file name for the daily cash flow
const CASH_FLOW_FILE_NAME: &str = "cash_flow.csv";

/// The output file name for per-well classification results
const WELLS_FILE_NAME: &str = "wells.csv";

/// The output file name for the executive summary
const SUMMARY_FILE_NAME: &str = "summary.toml";

/// The output file name for the critical well ranking
const CRITICAL_WELLS_FILE_NAME: &str = "debug_critical_wells.csv";

/// Get the default output folder for the model in the specified directory
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Get the model name from the dir path. This ends up being convoluted because we need to check
    // for all possible errors. Ugh.
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model specified at `model_dir`.
///
/// If the directory already exists it is only reused when `overwrite` is set.
pub fn create_output_directory(output_dir: &Path, overwrite: bool) -> Result<()> {
    if output_dir.is_dir() {
        ensure!(
            overwrite,
            "Output folder {} already exists. Pass --overwrite to replace it.",
            output_dir.display()
        );
        fs::remove_dir_all(output_dir).context("Could not clear existing output folder")?;
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Represents a row in the projection CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ProjectionRow {
    day: u32,
    rate_bpd: BarrelsPerDay,
}

/// Represents a row in the cash flow CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct CashFlowRow {
    day: u32,
    net: MoneyPerDay,
    cumulative: Money,
}

/// Represents a row in the well classification CSV file
#[derive(Serialize, Debug, PartialEq)]
struct WellRow {
    well_id: WellID,
    actual_rate_bpd: BarrelsPerDay,
    efficiency_pct: Dimensionless,
    category: WellCategory,
    lost_bpd: BarrelsPerDay,
    net_oil_bpd: BarrelsPerDay,
    chemical_cost_per_day: MoneyPerDay,
}

impl WellRow {
    /// Create a new [`WellRow`]
    fn new(well: &ClassifiedWell) -> Self {
        Self {
            well_id: well.id.clone(),
            actual_rate_bpd: well.actual_rate,
            efficiency_pct: well.efficiency,
            category: well.category,
            lost_bpd: well.lost_barrels,
            net_oil_bpd: well.net_oil_rate,
            chemical_cost_per_day: well.chemical_cost,
        }
    }
}

/// Represents a row in the critical well ranking CSV file
#[derive(Serialize, Debug, PartialEq)]
struct CriticalWellRow {
    rank: usize,
    well_id: WellID,
    lost_bpd: BarrelsPerDay,
    gap_to_monitor_pct: Dimensionless,
}

/// The summary file's contents: headline figures plus field aggregates
#[derive(Serialize, Debug, PartialEq)]
struct SummaryFile<'a> {
    scenario: &'a ExecutiveSummary,
    field: &'a FieldSummary,
}

/// An object for writing analysis results to file
pub struct DataWriter {
    output_path: PathBuf,
    projection_writer: csv::Writer<File>,
    cash_flow_writer: csv::Writer<File>,
    wells_writer: csv::Writer<File>,
    critical_writer: Option<csv::Writer<File>>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `save_debug_info` - Whether to include extra CSV files for debugging the model
    pub fn create(output_path: &Path, save_debug_info: bool) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        let critical_writer = if save_debug_info {
            Some(new_writer(CRITICAL_WELLS_FILE_NAME)?)
        } else {
            None
        };

        Ok(Self {
            output_path: output_path.to_path_buf(),
            projection_writer: new_writer(PROJECTION_FILE_NAME)?,
            cash_flow_writer: new_writer(CASH_FLOW_FILE_NAME)?,
            wells_writer: new_writer(WELLS_FILE_NAME)?,
            critical_writer,
        })
    }

    /// Write every output file for a completed analysis
    pub fn write_results(&mut self, results: &AnalysisResults) -> Result<()> {
        self.write_projection(&results.assessment.projection)?;
        self.write_cash_flow(&results.assessment.cash_flow)?;
        self.write_wells(&results.classification)?;
        self.write_critical_ranking(&results.classification)?;
        self.write_summary(&results.summary, &results.field)?;
        Ok(())
    }

    /// Write the daily production projection to a CSV file
    pub fn write_projection(&mut self, projection: &ProjectionSeries) -> Result<()> {
        for (day, rate) in projection.iter() {
            let row = ProjectionRow { day, rate_bpd: rate };
            self.projection_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write daily and cumulative cash flow to a CSV file
    pub fn write_cash_flow(&mut self, cash_flow: &CashFlowSeries) -> Result<()> {
        for point in cash_flow.points() {
            let row = CashFlowRow {
                day: point.day,
                net: point.net,
                cumulative: point.cumulative,
            };
            self.cash_flow_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write per-well classification results to a CSV file
    pub fn write_wells(&mut self, classification: &Classification) -> Result<()> {
        for well in &classification.wells {
            self.wells_writer.serialize(WellRow::new(well))?;
        }

        Ok(())
    }

    /// Write the critical well ranking to a CSV file, if debug output was requested
    fn write_critical_ranking(&mut self, classification: &Classification) -> Result<()> {
        if let Some(wtr) = &mut self.critical_writer {
            for (rank, well) in classification.critical_ranking().iter().enumerate() {
                let row = CriticalWellRow {
                    rank: rank + 1,
                    well_id: well.id.clone(),
                    lost_bpd: well.lost_barrels,
                    gap_to_monitor_pct: well.gap_to_monitor,
                };
                wtr.serialize(row)?;
            }
        }

        Ok(())
    }

    /// Write the executive summary and field aggregates to a TOML file
    fn write_summary(&mut self, summary: &ExecutiveSummary, field: &FieldSummary) -> Result<()> {
        let contents = toml::to_string(&SummaryFile {
            scenario: summary,
            field,
        })
        .context("Could not serialise summary")?;
        fs::write(self.output_path.join(SUMMARY_FILE_NAME), contents)?;

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.projection_writer.flush()?;
        self.cash_flow_writer.flush()?;
        self.wells_writer.flush()?;
        if let Some(wtr) = &mut self.critical_writer {
            wtr.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decline::{DeclineParameters, project};
    use crate::units::PerDay;
    use itertools::{Itertools, assert_equal};
    use tempfile::tempdir;

    fn projection() -> ProjectionSeries {
        project(&DeclineParameters {
            initial_rate: BarrelsPerDay(1000.0),
            daily_decline_rate: PerDay(0.0),
            horizon_days: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_write_projection() {
        let dir = tempdir().unwrap();

        // Write the projection
        {
            let mut writer = DataWriter::create(dir.path(), false).unwrap();
            writer.write_projection(&projection()).unwrap();
            writer.flush().unwrap();
        }

        // Read back and compare
        let records: Vec<ProjectionRow> =
            csv::Reader::from_path(dir.path().join(PROJECTION_FILE_NAME))
                .unwrap()
                .into_deserialize()
                .try_collect()
                .unwrap();
        let expected = [
            ProjectionRow {
                day: 0,
                rate_bpd: BarrelsPerDay(1000.0),
            },
            ProjectionRow {
                day: 1,
                rate_bpd: BarrelsPerDay(1000.0),
            },
        ];
        assert_equal(records, expected);
    }

    #[test]
    fn test_critical_wells_file_only_written_in_debug_mode() {
        let dir = tempdir().unwrap();
        {
            let mut writer = DataWriter::create(dir.path(), false).unwrap();
            writer.flush().unwrap();
        }
        assert!(!dir.path().join(CRITICAL_WELLS_FILE_NAME).exists());

        let dir = tempdir().unwrap();
        {
            let mut writer = DataWriter::create(dir.path(), true).unwrap();
            writer.flush().unwrap();
        }
        assert!(dir.path().join(CRITICAL_WELLS_FILE_NAME).exists());
    }

    #[test]
    fn test_create_output_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("results");

        create_output_directory(&output_dir, false).unwrap();
        assert!(output_dir.is_dir());

        // A second run without --overwrite must refuse to clobber the folder
        assert!(create_output_directory(&output_dir, false).is_err());
        create_output_directory(&output_dir, true).unwrap();
        assert!(output_dir.is_dir());
    }
}
