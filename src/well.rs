//! Code for working with individual well readings.
use crate::id::define_id_type;
use crate::units::{BarrelsPerDay, Celsius, Dimensionless, PerDay};

define_id_type! {WellID}

/// Temperature assumed when the input data has no `temp_c` column
pub const DEFAULT_TEMPERATURE: Celsius = Celsius(70.0);

/// Lower bound for the heuristic per-well decline rate
pub const MIN_HEURISTIC_DECLINE_RATE: PerDay = PerDay(0.001);

/// Upper bound for the heuristic per-well decline rate
pub const MAX_HEURISTIC_DECLINE_RATE: PerDay = PerDay(0.05);

/// One well's observed state at a point in time.
///
/// Constructed from one row of the wells input table and immutable thereafter; derived quantities
/// (efficiency, lost barrels) are computed on demand rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct WellReading {
    /// Unique identifier for the well
    pub id: WellID,
    /// Theoretical fluid rate the well should deliver
    pub theoretical_rate: BarrelsPerDay,
    /// Observed fluid rate.
    ///
    /// May be negative or NaN in raw field data; such readings are a data-quality defect and are
    /// excluded (with a count) during classification.
    pub actual_rate: BarrelsPerDay,
    /// Fraction of produced fluid that is water, normalised to `[0, 1]`
    pub water_cut: Dimensionless,
    /// Wellhead temperature, used by the emulsion-cost formula
    pub temperature: Celsius,
}

impl WellReading {
    /// Whether the observed rate is a usable, non-negative number
    pub fn has_valid_actual_rate(&self) -> bool {
        self.actual_rate.is_finite() && self.actual_rate >= BarrelsPerDay(0.0)
    }

    /// Production efficiency as a percentage of the theoretical rate.
    ///
    /// NaN when the theoretical rate is zero: the ratio is undefined, not infinite.
    pub fn efficiency(&self) -> Dimensionless {
        if self.theoretical_rate == BarrelsPerDay(0.0) {
            return Dimensionless(f64::NAN);
        }

        (self.actual_rate / self.theoretical_rate) * Dimensionless(100.0)
    }

    /// Difference between the theoretical and observed rates
    pub fn lost_barrels(&self) -> BarrelsPerDay {
        self.theoretical_rate - self.actual_rate
    }

    /// Oil fraction of the observed rate, once water is removed
    pub fn net_oil_rate(&self) -> BarrelsPerDay {
        self.actual_rate * (Dimensionless(1.0) - self.water_cut)
    }

    /// Estimate a daily decline rate from the gap between theoretical and observed rates.
    ///
    /// Used when the input data carries no decline-rate column. Non-positive estimates are raised
    /// to a technical minimum and the result is capped at 5% per day to avoid distortions from
    /// wildly underperforming wells.
    pub fn heuristic_decline_rate(&self) -> PerDay {
        if self.theoretical_rate == BarrelsPerDay(0.0) {
            return MIN_HEURISTIC_DECLINE_RATE;
        }

        let estimate = PerDay((self.lost_barrels() / self.theoretical_rate).value());
        if !estimate.is_finite() || estimate <= PerDay(0.0) {
            return MIN_HEURISTIC_DECLINE_RATE;
        }

        if estimate > MAX_HEURISTIC_DECLINE_RATE {
            MAX_HEURISTIC_DECLINE_RATE
        } else {
            estimate
        }
    }
}

/// The efficiency band a well falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum::Display)]
pub enum WellCategory {
    /// Efficiency at or above the optimal threshold
    Optimal,
    /// Efficiency between the monitor and optimal thresholds
    Monitor,
    /// Efficiency below the monitor threshold
    Critical,
    /// Efficiency is undefined (zero theoretical rate)
    NoData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn reading(theoretical: f64, actual: f64) -> WellReading {
        WellReading {
            id: "AN-001".into(),
            theoretical_rate: BarrelsPerDay(theoretical),
            actual_rate: BarrelsPerDay(actual),
            water_cut: Dimensionless(0.3),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[rstest]
    #[case(1000.0, 850.0, 85.0)]
    #[case(500.0, 500.0, 100.0)]
    #[case(400.0, 0.0, 0.0)]
    fn test_efficiency(#[case] theoretical: f64, #[case] actual: f64, #[case] expected: f64) {
        assert_approx_eq!(f64, reading(theoretical, actual).efficiency().value(), expected);
    }

    #[test]
    fn test_efficiency_undefined_for_zero_theoretical_rate() {
        assert!(reading(0.0, 100.0).efficiency().value().is_nan());
    }

    #[test]
    fn test_lost_barrels() {
        assert_approx_eq!(f64, reading(1000.0, 850.0).lost_barrels().value(), 150.0);
    }

    #[test]
    fn test_net_oil_rate() {
        // 30% water cut leaves 70% of the fluid as oil
        assert_approx_eq!(f64, reading(1000.0, 800.0).net_oil_rate().value(), 560.0);
    }

    #[rstest]
    #[case(-10.0, false)]
    #[case(f64::NAN, false)]
    #[case(0.0, true)]
    #[case(850.0, true)]
    fn test_has_valid_actual_rate(#[case] actual: f64, #[case] expected: bool) {
        assert_eq!(reading(1000.0, actual).has_valid_actual_rate(), expected);
    }

    #[rstest]
    #[case(1000.0, 990.0, 0.01)] // in range
    #[case(1000.0, 1100.0, 0.001)] // negative estimate floored
    #[case(1000.0, 100.0, 0.05)] // capped at 5% per day
    #[case(0.0, 100.0, 0.001)] // undefined estimate floored
    fn test_heuristic_decline_rate(
        #[case] theoretical: f64,
        #[case] actual: f64,
        #[case] expected: f64,
    ) {
        let result = reading(theoretical, actual).heuristic_decline_rate();
        assert_approx_eq!(f64, result.value(), expected);
    }
}
