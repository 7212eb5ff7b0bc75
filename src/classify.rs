//! Batch classification of wells by efficiency and the per-well derived metrics.
use crate::economics::EconomicScenario;
use crate::units::{BarrelsPerDay, Celsius, Dimensionless, MoneyPerBarrel, MoneyPerDay};
use crate::well::{WellCategory, WellID, WellReading};
use itertools::Itertools;
use log::warn;
use serde::Deserialize;

/// Efficiency thresholds (in percent) separating the classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EfficiencyThresholds {
    /// Wells at or above this efficiency are Optimal
    pub optimal: Dimensionless,
    /// Wells at or above this efficiency (but below `optimal`) are Monitor
    pub monitor: Dimensionless,
}

impl Default for EfficiencyThresholds {
    fn default() -> Self {
        Self {
            optimal: Dimensionless(90.0),
            monitor: Dimensionless(70.0),
        }
    }
}

/// Empirical parameters of the emulsion-treatment cost model.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TreatmentParameters {
    /// Scale constant of the emulsion factor
    #[serde(default = "default_emulsion_scale")]
    pub emulsion_scale: Dimensionless,
    /// Demulsifier cost per barrel of oil per unit of emulsion factor
    #[serde(default = "default_chemical_unit_cost")]
    pub chemical_unit_cost: MoneyPerBarrel,
}

fn default_emulsion_scale() -> Dimensionless {
    Dimensionless(80.0)
}

fn default_chemical_unit_cost() -> MoneyPerBarrel {
    MoneyPerBarrel(2.0)
}

impl Default for TreatmentParameters {
    fn default() -> Self {
        Self {
            emulsion_scale: default_emulsion_scale(),
            chemical_unit_cost: default_chemical_unit_cost(),
        }
    }
}

/// A well reading together with its efficiency band and derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedWell {
    /// The well's unique identifier
    pub id: WellID,
    /// Observed production rate
    pub actual_rate: BarrelsPerDay,
    /// Water fraction of produced fluid, in `[0, 1]`
    pub water_cut: Dimensionless,
    /// Efficiency percentage (NaN when the theoretical rate is zero)
    pub efficiency: Dimensionless,
    /// The efficiency band the well falls into
    pub category: WellCategory,
    /// Barrels per day lost relative to the theoretical rate
    pub lost_barrels: BarrelsPerDay,
    /// Percentage points of efficiency needed to reach the monitor threshold (zero if already
    /// there)
    pub gap_to_monitor: Dimensionless,
    /// Oil fraction of the observed rate
    pub net_oil_rate: BarrelsPerDay,
    /// Empirical proxy for oil-water separation difficulty
    pub emulsion_factor: Dimensionless,
    /// Daily demulsifier spend implied by the emulsion factor
    pub chemical_cost: MoneyPerDay,
}

/// The outcome of classifying a batch of well readings.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Classified wells, in input order
    pub wells: Vec<ClassifiedWell>,
    /// Number of readings excluded for missing or invalid actual rates
    pub excluded: usize,
}

impl Classification {
    /// Critical wells ordered by lost barrels, worst first
    pub fn critical_ranking(&self) -> Vec<&ClassifiedWell> {
        self.wells
            .iter()
            .filter(|well| well.category == WellCategory::Critical)
            .sorted_by(|a, b| b.lost_barrels.value().total_cmp(&a.lost_barrels.value()))
            .collect()
    }
}

/// Assign an efficiency band. Bands are mutually exclusive; first match wins.
fn category_for(efficiency: Dimensionless, thresholds: &EfficiencyThresholds) -> WellCategory {
    if !efficiency.is_finite() {
        WellCategory::NoData
    } else if efficiency >= thresholds.optimal {
        WellCategory::Optimal
    } else if efficiency >= thresholds.monitor {
        WellCategory::Monitor
    } else {
        WellCategory::Critical
    }
}

/// Emulsion factor: increases with water cut, decreases with temperature.
///
/// The temperature is floored to one degree so a zero or negative reading cannot blow up the
/// division.
fn emulsion_factor(
    water_cut: Dimensionless,
    temperature: Celsius,
    scale: Dimensionless,
) -> Dimensionless {
    let floored = if temperature < Celsius(1.0) {
        Celsius(1.0)
    } else {
        temperature
    };

    water_cut * Dimensionless(scale.value() / floored.value())
}

/// Classify a batch of well readings by efficiency and compute per-well derived metrics.
///
/// Readings with a missing or invalid (negative, NaN) actual rate are excluded from the working
/// set and counted on the result; a bad row never aborts the batch.
pub fn classify(
    readings: &[WellReading],
    thresholds: &EfficiencyThresholds,
    treatment: &TreatmentParameters,
) -> Classification {
    let mut wells = Vec::with_capacity(readings.len());
    let mut excluded = 0;

    for reading in readings {
        if !reading.has_valid_actual_rate() {
            excluded += 1;
            continue;
        }

        let efficiency = reading.efficiency();
        let net_oil_rate = reading.net_oil_rate();
        let emulsion_factor = emulsion_factor(
            reading.water_cut,
            reading.temperature,
            treatment.emulsion_scale,
        );

        wells.push(ClassifiedWell {
            id: reading.id.clone(),
            actual_rate: reading.actual_rate,
            water_cut: reading.water_cut,
            efficiency,
            category: category_for(efficiency, thresholds),
            lost_barrels: reading.lost_barrels(),
            gap_to_monitor: (thresholds.monitor - efficiency).max(Dimensionless(0.0)),
            net_oil_rate,
            emulsion_factor,
            chemical_cost: emulsion_factor * (net_oil_rate * treatment.chemical_unit_cost),
        });
    }

    if excluded > 0 {
        warn!("Excluded {excluded} readings with missing or invalid actual rates");
    }

    Classification { wells, excluded }
}

/// Aggregate metrics across a classified field of wells.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldSummary {
    /// Number of wells in the working set
    pub well_count: usize,
    /// Number of readings excluded for data-quality defects
    pub excluded_count: usize,
    /// Mean efficiency across wells with a defined efficiency
    pub average_efficiency: Dimensionless,
    /// Total barrels per day lost relative to theoretical rates
    pub total_lost_barrels: BarrelsPerDay,
    /// The well losing the most barrels per day
    pub most_critical_well: Option<WellID>,
    /// Wells with efficiency below the monitor threshold
    pub alert_count: usize,
    /// Wells producing at or below the scenario break-even rate
    pub wells_at_risk: usize,
    /// Value of the lost production at the scenario oil price
    pub improvement_potential: MoneyPerDay,
    /// Field-wide daily revenue after royalties, less fixed operating costs
    pub field_ebitda: MoneyPerDay,
}

/// Summarise a classified field under the given economic scenario.
///
/// `field_breakeven` is the scenario break-even rate used for the at-risk count.
pub fn summarise_field(
    classification: &Classification,
    scenario: &EconomicScenario,
    field_breakeven: BarrelsPerDay,
    thresholds: &EfficiencyThresholds,
) -> FieldSummary {
    let wells = &classification.wells;

    let defined: Vec<_> = wells
        .iter()
        .filter(|well| well.efficiency.is_finite())
        .collect();
    let average_efficiency = if defined.is_empty() {
        Dimensionless(f64::NAN)
    } else {
        let mut total = Dimensionless(0.0);
        for well in &defined {
            total = total + well.efficiency;
        }
        total / Dimensionless(defined.len() as f64)
    };

    let mut total_lost_barrels = BarrelsPerDay(0.0);
    let mut revenue = MoneyPerDay(0.0);
    for well in wells {
        total_lost_barrels += well.lost_barrels;
        revenue += well.actual_rate * scenario.effective_price();
    }

    let most_critical_well = wells
        .iter()
        .max_by(|a, b| a.lost_barrels.value().total_cmp(&b.lost_barrels.value()))
        .map(|well| well.id.clone());

    FieldSummary {
        well_count: wells.len(),
        excluded_count: classification.excluded,
        average_efficiency,
        total_lost_barrels,
        most_critical_well,
        alert_count: wells
            .iter()
            .filter(|well| well.efficiency < thresholds.monitor)
            .count(),
        wells_at_risk: wells
            .iter()
            .filter(|well| well.actual_rate <= field_breakeven)
            .count(),
        improvement_potential: total_lost_barrels * scenario.oil_price,
        field_ebitda: revenue
            - scenario.daily_fixed_opex * Dimensionless(wells.len() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{scenario, well_reading};
    use crate::well::DEFAULT_TEMPERATURE;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn classify_one(reading: WellReading) -> Classification {
        classify(
            &[reading],
            &EfficiencyThresholds::default(),
            &TreatmentParameters::default(),
        )
    }

    #[rstest]
    #[case(100.0, 90.0, WellCategory::Optimal)] // boundary is closed
    #[case(100.0, 89.999, WellCategory::Monitor)]
    #[case(100.0, 70.0, WellCategory::Monitor)]
    #[case(100.0, 69.999, WellCategory::Critical)]
    #[case(100.0, 0.0, WellCategory::Critical)]
    #[case(0.0, 50.0, WellCategory::NoData)]
    fn test_category_bands(
        #[case] theoretical: f64,
        #[case] actual: f64,
        #[case] expected: WellCategory,
    ) {
        let result = classify_one(well_reading("AN-001", theoretical, actual, 0.3));
        assert_eq!(result.wells[0].category, expected);
    }

    #[test]
    fn test_classify_excludes_invalid_rates_with_count() {
        let mut readings = Vec::new();
        for i in 0..100 {
            let actual = match i {
                5 => -10.0,
                10 => f64::NAN,
                _ => 800.0,
            };
            readings.push(well_reading(&format!("AN-{i:03}"), 1000.0, actual, 0.3));
        }

        let result = classify(
            &readings,
            &EfficiencyThresholds::default(),
            &TreatmentParameters::default(),
        );
        assert_eq!(result.wells.len(), 98);
        assert_eq!(result.excluded, 2);
    }

    #[rstest]
    #[case(80.0, 0.0)] // already above the monitor threshold
    #[case(70.0, 0.0)]
    #[case(60.0, 10.0)]
    fn test_gap_to_monitor(#[case] actual: f64, #[case] expected: f64) {
        let result = classify_one(well_reading("AN-001", 100.0, actual, 0.3));
        assert_approx_eq!(f64, result.wells[0].gap_to_monitor.value(), expected);
    }

    #[test]
    fn test_emulsion_factor_and_chemical_cost() {
        let result = classify_one(well_reading("AN-001", 1000.0, 800.0, 0.3));
        let well = &result.wells[0];

        // water_cut * (scale / temp) = 0.3 * 80 / 70
        let expected_factor = 0.3 * 80.0 / DEFAULT_TEMPERATURE.value();
        assert_approx_eq!(f64, well.emulsion_factor.value(), expected_factor);

        // factor * net oil (560 bbl/d) * unit cost (2 USD/bbl)
        assert_approx_eq!(
            f64,
            well.chemical_cost.value(),
            expected_factor * 560.0 * 2.0
        );
    }

    #[test]
    fn test_emulsion_factor_floors_temperature() {
        let mut reading = well_reading("AN-001", 1000.0, 800.0, 0.5);
        reading.temperature = Celsius(-10.0);

        let result = classify_one(reading);
        // Temperature floored to 1: 0.5 * 80 / 1
        assert_approx_eq!(f64, result.wells[0].emulsion_factor.value(), 40.0);
    }

    #[test]
    fn test_critical_ranking_orders_by_lost_barrels() {
        let readings = vec![
            well_reading("AN-001", 1000.0, 950.0, 0.3), // Optimal
            well_reading("AN-002", 1000.0, 500.0, 0.3), // Critical, 500 lost
            well_reading("AN-003", 1000.0, 300.0, 0.3), // Critical, 700 lost
            well_reading("AN-004", 1000.0, 600.0, 0.3), // Critical, 400 lost
        ];
        let result = classify(
            &readings,
            &EfficiencyThresholds::default(),
            &TreatmentParameters::default(),
        );

        let ranking: Vec<_> = result
            .critical_ranking()
            .iter()
            .map(|well| well.id.to_string())
            .collect();
        assert_eq!(ranking, vec!["AN-003", "AN-002", "AN-004"]);
    }

    #[test]
    fn test_summarise_field() {
        let readings = vec![
            well_reading("AN-001", 1000.0, 900.0, 0.3),
            well_reading("AN-002", 1000.0, 600.0, 0.3),
            well_reading("AN-003", 1000.0, f64::NAN, 0.3),
        ];
        let classification = classify(
            &readings,
            &EfficiencyThresholds::default(),
            &TreatmentParameters::default(),
        );
        let scenario = scenario();
        let summary = summarise_field(
            &classification,
            &scenario,
            BarrelsPerDay(879.0),
            &EfficiencyThresholds::default(),
        );

        assert_eq!(summary.well_count, 2);
        assert_eq!(summary.excluded_count, 1);
        assert_approx_eq!(f64, summary.average_efficiency.value(), 75.0);
        assert_approx_eq!(f64, summary.total_lost_barrels.value(), 500.0);
        assert_eq!(summary.most_critical_well, Some("AN-002".into()));
        assert_eq!(summary.alert_count, 1);
        // AN-002 produces below the 879 bbl/d break-even rate
        assert_eq!(summary.wells_at_risk, 1);
        assert_approx_eq!(f64, summary.improvement_potential.value(), 500.0 * 75.0);
        // (900 + 600) * 75 * 0.88 - 2 * 58000
        assert_approx_eq!(f64, summary.field_ebitda.value(), 1500.0 * 66.0 - 116000.0);
    }
}
