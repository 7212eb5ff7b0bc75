//! Code for reading the scenario file, which holds the market and decline assumptions.
use crate::classify::TreatmentParameters;
use crate::decline::DeclineParameters;
use crate::economics::{AccumulationPolicy, EconomicScenario, STANDARD_MONTH_DAYS};
use crate::input::{deserialise_proportion, input_err_msg, read_toml};
use crate::units::{Dimensionless, Money, MoneyPerBarrel};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

const SCENARIO_FILE_NAME: &str = "scenario.toml";

fn default_water_cut() -> Dimensionless {
    Dimensionless(0.30)
}

/// Represents the contents of the entire scenario file.
#[derive(Debug, Deserialize, PartialEq)]
struct ScenarioFile {
    asset: AssetSection,
    market: MarketSection,
    #[serde(default)]
    treatment: TreatmentParameters,
    #[serde(default)]
    cash_flow: CashFlowSection,
}

/// The asset being projected: decline curve plus its water cut.
#[derive(Debug, Deserialize, PartialEq)]
struct AssetSection {
    #[serde(flatten)]
    decline: DeclineParameters,
    /// Water fraction of produced fluid, as a fraction in `[0, 1)`
    #[serde(default = "default_water_cut")]
    #[serde(deserialize_with = "deserialise_proportion")]
    water_cut: Dimensionless,
}

/// Market prices and operating costs.
#[derive(Debug, Deserialize, PartialEq)]
struct MarketSection {
    oil_price: MoneyPerBarrel,
    #[serde(deserialize_with = "deserialise_proportion")]
    royalty_fraction: Dimensionless,
    /// Fixed operating cost per standard (30-day) month
    monthly_fixed_opex: Money,
    treatment_cost_per_barrel: MoneyPerBarrel,
}

#[derive(Debug, Deserialize, PartialEq, Default)]
struct CashFlowSection {
    #[serde(default)]
    accumulation: AccumulationPolicy,
}

/// A fully validated scenario: everything needed to evaluate one asset and its field.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Decline curve of the projected asset
    pub decline: DeclineParameters,
    /// Water cut assumed for the projected asset
    pub water_cut: Dimensionless,
    /// Market and cost assumptions
    pub economics: EconomicScenario,
    /// Emulsion-treatment model parameters
    pub treatment: TreatmentParameters,
    /// How cumulative cash flow is accumulated
    pub accumulation: AccumulationPolicy,
}

impl ScenarioFile {
    fn into_scenario(self) -> Result<Scenario> {
        self.asset.decline.validate()?;
        ensure!(
            self.asset.water_cut < Dimensionless(1.0),
            "water_cut must be less than 1"
        );
        ensure!(
            self.market.oil_price.is_finite() && self.market.oil_price > MoneyPerBarrel(0.0),
            "oil_price must be a positive number"
        );
        ensure!(
            self.market.royalty_fraction < Dimensionless(1.0),
            "royalty_fraction must be less than 1"
        );
        ensure!(
            self.market.monthly_fixed_opex.is_finite()
                && self.market.monthly_fixed_opex >= Money(0.0),
            "monthly_fixed_opex must be a non-negative number"
        );
        ensure!(
            self.market.treatment_cost_per_barrel.is_finite()
                && self.market.treatment_cost_per_barrel >= MoneyPerBarrel(0.0),
            "treatment_cost_per_barrel must be a non-negative number"
        );

        Ok(Scenario {
            decline: self.asset.decline,
            water_cut: self.asset.water_cut,
            economics: EconomicScenario {
                oil_price: self.market.oil_price,
                royalty_fraction: self.market.royalty_fraction,
                daily_fixed_opex: self.market.monthly_fixed_opex / STANDARD_MONTH_DAYS,
                treatment_cost_per_barrel: self.market.treatment_cost_per_barrel,
            },
            treatment: self.treatment,
            accumulation: self.cash_flow.accumulation,
        })
    }
}

/// Read the scenario file from the specified model directory.
pub fn read_scenario(model_dir: &Path) -> Result<Scenario> {
    let file_path = model_dir.join(SCENARIO_FILE_NAME);
    let file: ScenarioFile = read_toml(&file_path)?;
    file.into_scenario().with_context(|| input_err_msg(&file_path))
}
