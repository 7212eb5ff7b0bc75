//! Break-even and cash-flow formulas for a production scenario.
use crate::decline::ProjectionSeries;
use crate::units::{BarrelsPerDay, Days, Dimensionless, Money, MoneyPerBarrel, MoneyPerDay};
use anyhow::{Result, ensure};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// Length of a standard operating month, used to convert monthly fixed opex to a daily figure
pub const STANDARD_MONTH_DAYS: Days = Days(30.0);

/// The market and cost assumptions a scenario is evaluated under.
///
/// An immutable value passed explicitly into every core function; the caller owns parameter state
/// and re-invokes the pure core on change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicScenario {
    /// Sale price of oil
    pub oil_price: MoneyPerBarrel,
    /// Government/landowner share of gross revenue, in `[0, 1)`
    pub royalty_fraction: Dimensionless,
    /// Fixed operating cost per day
    pub daily_fixed_opex: MoneyPerDay,
    /// Cost of emulsion treatment per barrel of produced fluid
    pub treatment_cost_per_barrel: MoneyPerBarrel,
}

impl EconomicScenario {
    /// Revenue per barrel once royalties are deducted
    pub fn effective_price(&self) -> MoneyPerBarrel {
        self.oil_price * (Dimensionless(1.0) - self.royalty_fraction)
    }
}

/// The minimum production rate at which revenue after royalties covers the daily operating cost
/// (Qel).
///
/// Degenerate inputs (non-positive or non-finite effective price, which includes royalty
/// fractions of one or more) resolve to a `0.0` sentinel meaning "break-even undefined" rather
/// than an error: the primary caller is a live control surface that must tolerate transient
/// invalid states. This is a documented exception to the fail-don't-coerce rule and is confined
/// to this formula.
pub fn breakeven_rate(
    daily_opex: MoneyPerDay,
    oil_price: MoneyPerBarrel,
    royalty_fraction: Dimensionless,
) -> BarrelsPerDay {
    if oil_price <= MoneyPerBarrel(0.0) {
        return BarrelsPerDay(0.0);
    }

    let effective_price = oil_price * (Dimensionless(1.0) - royalty_fraction);
    if !effective_price.is_finite() || effective_price <= MoneyPerBarrel(0.0) {
        return BarrelsPerDay(0.0);
    }

    daily_opex / effective_price
}

/// Daily operating cost, either constant or varying by day.
///
/// A varying series is used when part of the cost scales with produced fluid volume (emulsion
/// treatment).
#[derive(Debug, Clone, PartialEq)]
pub enum DailyOpex {
    /// The same cost applies every day
    Fixed(MoneyPerDay),
    /// One cost entry per projected day
    Varying(Vec<MoneyPerDay>),
}

impl DailyOpex {
    /// The cost for the given day index
    fn get(&self, day: usize) -> MoneyPerDay {
        match self {
            Self::Fixed(opex) => *opex,
            Self::Varying(series) => series[day],
        }
    }

    /// The mean daily cost (zero for an empty varying series)
    pub fn mean(&self) -> MoneyPerDay {
        match self {
            Self::Fixed(opex) => *opex,
            Self::Varying(series) if series.is_empty() => MoneyPerDay(0.0),
            Self::Varying(series) => {
                let mut total = MoneyPerDay(0.0);
                for opex in series {
                    total += *opex;
                }
                total / Dimensionless(series.len() as f64)
            }
        }
    }
}

/// How daily net cash flows are accumulated into a cumulative figure.
///
/// The two policies give materially different "life of well" and "annual EBITDA" figures, so the
/// choice is always an explicit parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, DeserializeLabeledStringEnum, SerializeLabeledStringEnum)]
pub enum AccumulationPolicy {
    /// Sum every day's net flow, including negative days
    #[default]
    #[string = "raw"]
    Raw,
    /// Days with non-positive net flow contribute nothing (models upside accrual only)
    #[string = "floored"]
    Floored,
}

/// One day of net and cumulative cash flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlowPoint {
    /// Day index, starting at zero
    pub day: u32,
    /// Net cash flow for this day
    pub net: MoneyPerDay,
    /// Cumulative cash flow up to and including this day
    pub cumulative: Money,
}

/// Daily and cumulative net cash flow over a projection horizon
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CashFlowSeries {
    points: Vec<CashFlowPoint>,
}

impl CashFlowSeries {
    /// The number of days covered
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series covers no days at all
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The daily points, in day order
    pub fn points(&self) -> &[CashFlowPoint] {
        &self.points
    }

    /// The cumulative cash flow at the end of the horizon (zero for an empty series)
    pub fn final_cumulative(&self) -> Money {
        self.points.last().map_or(Money(0.0), |point| point.cumulative)
    }
}

/// Turn a production projection into daily and cumulative net cash flow.
///
/// Per-day net cash flow is `production[t] * price * (1 - royalty) - opex[t]`. A varying opex
/// series must cover exactly one entry per projected day.
pub fn cash_flow(
    production: &ProjectionSeries,
    price: MoneyPerBarrel,
    royalty_fraction: Dimensionless,
    opex: &DailyOpex,
    policy: AccumulationPolicy,
) -> Result<CashFlowSeries> {
    ensure!(price.is_finite(), "price must be a finite number");
    ensure!(
        royalty_fraction.is_finite(),
        "royalty_fraction must be a finite number"
    );
    if let DailyOpex::Varying(series) = opex {
        ensure!(
            series.len() == production.len(),
            "opex series must cover one entry per projected day ({} provided for {} days)",
            series.len(),
            production.len()
        );
    }

    let royalty_share = Dimensionless(1.0) - royalty_fraction;
    let mut cumulative = Money(0.0);
    let points = production
        .iter()
        .map(|(day, rate)| {
            let net = rate * price * royalty_share - opex.get(day as usize);
            let contribution = match policy {
                AccumulationPolicy::Raw => net,
                AccumulationPolicy::Floored if net <= MoneyPerDay(0.0) => MoneyPerDay(0.0),
                AccumulationPolicy::Floored => net,
            };
            cumulative += contribution * Days(1.0);

            CashFlowPoint {
                day,
                net,
                cumulative,
            }
        })
        .collect();

    Ok(CashFlowSeries { points })
}

/// The number of days until production falls below the break-even rate.
///
/// Reports the full horizon length when production never drops below the threshold, as a sentinel
/// for "still profitable at horizon end".
pub fn days_of_useful_life(production: &ProjectionSeries, breakeven: BarrelsPerDay) -> u32 {
    production
        .first_day_below(breakeven)
        .unwrap_or(production.len() as u32)
}

/// The economic viability of a scenario over its horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViabilityStatus {
    /// Production stays above the break-even rate for the whole horizon
    Profitable,
    /// Production drops below the break-even rate on the given day
    ClosureAlert {
        /// First day below break-even
        day: u32,
    },
}

impl ViabilityStatus {
    /// Derive the status from the break-even day and the horizon length
    pub fn from_breakeven_day(breakeven_day: u32, horizon_days: u32) -> Self {
        if breakeven_day >= horizon_days {
            Self::Profitable
        } else {
            Self::ClosureAlert { day: breakeven_day }
        }
    }
}

impl std::fmt::Display for ViabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profitable => write!(f, "PROFITABLE"),
            Self::ClosureAlert { day } => write!(f, "CLOSURE_ALERT(day={day})"),
        }
    }
}
