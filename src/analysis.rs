//! The scenario evaluation pipeline: projection, break-even, cash flow and classification.
use crate::classify::{
    Classification, EfficiencyThresholds, FieldSummary, classify, summarise_field,
};
use crate::decline::{DeclineParameters, ProjectionSeries, project};
use crate::economics::{
    CashFlowSeries, DailyOpex, ViabilityStatus, breakeven_rate, cash_flow, days_of_useful_life,
};
use crate::input::scenario::Scenario;
use crate::model::Model;
use crate::units::{BarrelsPerDay, Dimensionless, MoneyPerBarrel, MoneyPerDay};
use crate::well::WellID;
use anyhow::{Context, Result, ensure};
use log::{error, info, warn};
use serde::Serialize;

/// The economic assessment of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioAssessment {
    /// Projected production, one entry per day
    pub projection: ProjectionSeries,
    /// The economic limit rate (Qel)
    pub breakeven_rate: BarrelsPerDay,
    /// Total daily operating cost (fixed plus emulsion treatment)
    pub opex: DailyOpex,
    /// Daily and cumulative net cash flow
    pub cash_flow: CashFlowSeries,
    /// First day on which production falls below the break-even rate, or the horizon length
    pub breakeven_day: u32,
    /// Overall viability over the horizon
    pub status: ViabilityStatus,
}

/// The key figures handed to the report renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    /// Production rate on day zero
    pub initial_rate: BarrelsPerDay,
    /// Sale price of oil assumed by the scenario
    pub oil_price: MoneyPerBarrel,
    /// The economic limit rate (Qel)
    pub breakeven_rate: BarrelsPerDay,
    /// Mean total daily operating cost over the horizon
    pub avg_daily_opex: MoneyPerDay,
    /// `PROFITABLE` or `CLOSURE_ALERT(day=N)`
    pub status_label: String,
    /// First day below break-even, or the horizon length if never reached
    pub breakeven_day: u32,
}

/// Everything produced by evaluating a model.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResults {
    /// The scenario-level economic assessment
    pub assessment: ScenarioAssessment,
    /// Per-well classification of the field
    pub classification: Classification,
    /// Aggregate field metrics
    pub field: FieldSummary,
    /// The report-facing summary figures
    pub summary: ExecutiveSummary,
}

/// Evaluate the economics of a single scenario.
///
/// Pure apart from logging: the same scenario always yields bit-identical results.
pub fn assess_scenario(scenario: &Scenario) -> Result<ScenarioAssessment> {
    let economics = &scenario.economics;
    let qel = breakeven_rate(
        economics.daily_fixed_opex,
        economics.oil_price,
        economics.royalty_fraction,
    );

    let projection = project(&scenario.decline)?;

    // Emulsion treatment is paid on produced fluid, so the variable part of the opex scales with
    // the projected rate grossed up by the water cut
    let oil_fraction = Dimensionless(1.0) - scenario.water_cut;
    let opex = DailyOpex::Varying(
        projection
            .rates()
            .iter()
            .map(|rate| {
                let fluid = *rate / oil_fraction;
                economics.daily_fixed_opex + fluid * economics.treatment_cost_per_barrel
            })
            .collect(),
    );

    let cash_flow = cash_flow(
        &projection,
        economics.oil_price,
        economics.royalty_fraction,
        &opex,
        scenario.accumulation,
    )?;

    let breakeven_day = days_of_useful_life(&projection, qel);
    let status = ViabilityStatus::from_breakeven_day(breakeven_day, scenario.decline.horizon_days);
    log_viability(scenario, qel, breakeven_day);

    Ok(ScenarioAssessment {
        projection,
        breakeven_rate: qel,
        opex,
        cash_flow,
        breakeven_day,
        status,
    })
}

/// Report the viability tier for the scenario in the log.
fn log_viability(scenario: &Scenario, qel: BarrelsPerDay, breakeven_day: u32) {
    let horizon = scenario.decline.horizon_days;
    let price = scenario.economics.oil_price.value();

    if breakeven_day >= horizon {
        info!(
            "Profitable operation: production stays above the economic limit for the whole \
             {horizon}-day horizon at a price of {price}"
        );
    } else if breakeven_day == 0 {
        let deficit = scenario.decline.initial_rate - qel;
        error!(
            "Inviable from day one: operating costs exceed revenue at a price of {price} \
             (initial deficit {:.2} bbl/d)",
            deficit.value()
        );
    } else if breakeven_day < 100 {
        warn!("Imminent closure: production drops below the economic limit on day {breakeven_day}");
    } else {
        info!("Economic limit reached on day {breakeven_day}; profitable until then");
    }
}

impl ExecutiveSummary {
    fn new(scenario: &Scenario, assessment: &ScenarioAssessment) -> Self {
        Self {
            initial_rate: scenario.decline.initial_rate,
            oil_price: scenario.economics.oil_price,
            breakeven_rate: assessment.breakeven_rate,
            avg_daily_opex: assessment.opex.mean(),
            status_label: assessment.status.to_string(),
            breakeven_day: assessment.breakeven_day,
        }
    }
}

/// Evaluate a model: assess the scenario and classify the field under it.
pub fn run(model: &Model) -> Result<AnalysisResults> {
    run_scenario(model, &model.scenario)
}

/// Evaluate a model with the decline curve re-derived from one well's reading.
///
/// The well's observed rate becomes the initial rate and its decline rate is estimated
/// heuristically from the gap to the theoretical rate.
pub fn run_for_well(model: &Model, id: &WellID) -> Result<AnalysisResults> {
    let reading = model.well(id)?;
    ensure!(
        reading.has_valid_actual_rate(),
        "Well {id} has no valid actual rate to project from"
    );

    let scenario = Scenario {
        decline: DeclineParameters {
            initial_rate: reading.actual_rate,
            daily_decline_rate: reading.heuristic_decline_rate(),
            horizon_days: model.scenario.decline.horizon_days,
        },
        water_cut: reading.water_cut,
        ..model.scenario.clone()
    };
    info!(
        "Projecting well {id} from its own reading: qi {:.1} bbl/d, di {:.4}/day",
        scenario.decline.initial_rate.value(),
        scenario.decline.daily_decline_rate.value()
    );

    run_scenario(model, &scenario)
}

fn run_scenario(model: &Model, scenario: &Scenario) -> Result<AnalysisResults> {
    let assessment =
        assess_scenario(scenario).context("Failed to assess the economic scenario.")?;

    let thresholds = EfficiencyThresholds::default();
    let classification = classify(&model.wells.wells, &thresholds, &scenario.treatment);
    let field = summarise_field(
        &classification,
        &scenario.economics,
        assessment.breakeven_rate,
        &thresholds,
    );

    let summary = ExecutiveSummary::new(scenario, &assessment);

    Ok(AnalysisResults {
        assessment,
        classification,
        field,
        summary,
    })
}
