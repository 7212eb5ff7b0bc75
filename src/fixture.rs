//! Fixtures for tests

use crate::economics::EconomicScenario;
use crate::units::{BarrelsPerDay, Dimensionless, MoneyPerBarrel, MoneyPerDay};
use crate::well::{DEFAULT_TEMPERATURE, WellReading};

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A well reading with the given rates and water cut at the default temperature
pub fn well_reading(id: &str, theoretical: f64, actual: f64, water_cut: f64) -> WellReading {
    WellReading {
        id: id.into(),
        theoretical_rate: BarrelsPerDay(theoretical),
        actual_rate: BarrelsPerDay(actual),
        water_cut: Dimensionless(water_cut),
        temperature: DEFAULT_TEMPERATURE,
    }
}

/// An economic scenario with figures typical of a mature onshore field
pub fn scenario() -> EconomicScenario {
    EconomicScenario {
        oil_price: MoneyPerBarrel(75.0),
        royalty_fraction: Dimensionless(0.12),
        daily_fixed_opex: MoneyPerDay(58000.0),
        treatment_cost_per_barrel: MoneyPerBarrel(1.5),
    }
}
