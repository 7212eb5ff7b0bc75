//! Exponential (Arps-style) decline projection of well production.
use crate::units::{BarrelsPerDay, PerDay};
use anyhow::{Result, ensure};
use serde::Deserialize;

/// Parameters of an exponential decline curve.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DeclineParameters {
    /// Production rate on day zero
    pub initial_rate: BarrelsPerDay,
    /// Nominal daily decline rate (zero gives flat production)
    pub daily_decline_rate: PerDay,
    /// Number of days to project
    pub horizon_days: u32,
}

impl DeclineParameters {
    /// Check the parameters are usable for a projection.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.initial_rate.is_finite() && self.initial_rate >= BarrelsPerDay(0.0),
            "initial_rate must be a finite, non-negative number"
        );
        ensure!(
            self.daily_decline_rate.is_finite() && self.daily_decline_rate >= PerDay(0.0),
            "daily_decline_rate must be a finite, non-negative number"
        );

        Ok(())
    }
}

/// A projected production series with one entry per day, starting at day zero.
///
/// Read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSeries {
    rates: Vec<BarrelsPerDay>,
}

impl ProjectionSeries {
    /// The number of projected days
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the projection covers no days at all
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// The projected rates, in day order
    pub fn rates(&self) -> &[BarrelsPerDay] {
        &self.rates
    }

    /// Iterate over `(day, rate)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u32, BarrelsPerDay)> + '_ {
        self.rates
            .iter()
            .enumerate()
            .map(|(day, rate)| (day as u32, *rate))
    }

    /// The first day on which production falls below `threshold`.
    ///
    /// A single linear scan over the projection. Returns `None` if production stays at or above
    /// the threshold for the whole horizon.
    pub fn first_day_below(&self, threshold: BarrelsPerDay) -> Option<u32> {
        self.rates
            .iter()
            .position(|rate| *rate < threshold)
            .map(|day| day as u32)
    }
}

/// Project production over time with exponential decline: `rate(t) = qi * exp(-di * t)`.
///
/// The result is monotonically non-increasing, starts at exactly `initial_rate` and is never
/// negative. It tends towards zero but never reaches it within any finite horizon; callers must
/// apply their own cutoff (e.g. an economic limit rate).
///
/// A zero horizon yields an empty series, not an error. Negative parameters are an error rather
/// than being silently clamped.
pub fn project(params: &DeclineParameters) -> Result<ProjectionSeries> {
    params.validate()?;

    let qi = params.initial_rate.value();
    let di = params.daily_decline_rate.value();
    let rates = (0..params.horizon_days)
        .map(|day| BarrelsPerDay(qi * (-di * day as f64).exp()))
        .collect();

    Ok(ProjectionSeries { rates })
}
