#![allow(missing_docs)]

//! This module defines various unit types and their conversions.

/// Represents a dimensionless quantity (fractions, efficiencies, factors).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    derive_more::Add,
    derive_more::Sub,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl Dimensionless {
    /// Creates a new dimensionless value.
    pub fn new(val: f64) -> Self {
        Self(val)
    }

    /// Returns the value as a f64.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the value is neither infinite nor NaN.
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// The larger of `self` and `other`, ignoring NaN.
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            derive_more::Add,
            derive_more::Sub,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the value is neither infinite nor NaN.
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::ops::Div for $name {
            type Output = Dimensionless;
            fn div(self, rhs: $name) -> Dimensionless {
                Dimensionless(self.0 / rhs.0)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Money);
unit_struct!(Days);
unit_struct!(BarrelsPerDay);
unit_struct!(Celsius);

// Derived quantities
unit_struct!(MoneyPerBarrel);
unit_struct!(MoneyPerDay);
unit_struct!(PerDay);

// Division rules
impl_div!(Money, Days, MoneyPerDay);
impl_div!(MoneyPerDay, MoneyPerBarrel, BarrelsPerDay);

// Multiplication rules
impl_mul!(MoneyPerDay, Days, Money);
impl_mul!(BarrelsPerDay, MoneyPerBarrel, MoneyPerDay);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_revenue_rule() {
        let revenue = BarrelsPerDay(100.0) * MoneyPerBarrel(75.0);
        assert_approx_eq!(f64, revenue.value(), 7500.0);
    }

    #[test]
    fn test_breakeven_rule() {
        let rate = MoneyPerDay(66000.0) / MoneyPerBarrel(66.0);
        assert_approx_eq!(f64, rate.value(), 1000.0);
    }

    #[test]
    fn test_monthly_opex_rules() {
        let daily = Money(1740000.0) / Days(30.0);
        assert_approx_eq!(f64, daily.value(), 58000.0);

        let total = daily * Days(30.0);
        assert_approx_eq!(f64, total.value(), 1740000.0);
    }

    #[test]
    fn test_dimensionless_scaling() {
        let net = MoneyPerDay(1000.0) * Dimensionless(0.88);
        assert_approx_eq!(f64, net.value(), 880.0);
    }
}
