//! Unit conversion functions
//!
//! Parses unit symbols and scales values to and from each family's base unit.

use super::units::{ConcentrationUnit, MassUnit, VolumeUnit};
use crate::error::{CalcError, CalcResult};

/// A unit with a fixed multiplicative factor relative to its family's base unit
pub trait ScaledUnit: Copy {
    /// Family name used in error messages ("concentration", "volume", "mass")
    const FAMILY: &'static str;
    /// Symbol of the family's base unit
    const BASE_SYMBOL: &'static str;

    fn factor(&self) -> f64;
    fn symbol(&self) -> &'static str;
    fn from_symbol(s: &str) -> Option<Self>;
}

impl ScaledUnit for ConcentrationUnit {
    const FAMILY: &'static str = "concentration";
    const BASE_SYMBOL: &'static str = "M";

    fn factor(&self) -> f64 {
        ConcentrationUnit::factor(self)
    }
    fn symbol(&self) -> &'static str {
        ConcentrationUnit::symbol(self)
    }
    fn from_symbol(s: &str) -> Option<Self> {
        ConcentrationUnit::from_symbol(s)
    }
}

impl ScaledUnit for VolumeUnit {
    const FAMILY: &'static str = "volume";
    const BASE_SYMBOL: &'static str = "L";

    fn factor(&self) -> f64 {
        VolumeUnit::factor(self)
    }
    fn symbol(&self) -> &'static str {
        VolumeUnit::symbol(self)
    }
    fn from_symbol(s: &str) -> Option<Self> {
        VolumeUnit::from_symbol(s)
    }
}

impl ScaledUnit for MassUnit {
    const FAMILY: &'static str = "mass";
    const BASE_SYMBOL: &'static str = "g";

    fn factor(&self) -> f64 {
        MassUnit::factor(self)
    }
    fn symbol(&self) -> &'static str {
        MassUnit::symbol(self)
    }
    fn from_symbol(s: &str) -> Option<Self> {
        MassUnit::from_symbol(s)
    }
}

/// Parse a unit symbol, failing with `InvalidUnit` if it is not recognized
pub fn parse_unit<U: ScaledUnit>(symbol: &str) -> CalcResult<U> {
    U::from_symbol(symbol).ok_or_else(|| CalcError::InvalidUnit {
        family: U::FAMILY,
        symbol: symbol.to_string(),
    })
}

/// Scale a value in `unit` to the base unit
pub fn to_base<U: ScaledUnit>(value: f64, unit: U) -> f64 {
    value * unit.factor()
}

/// Scale a base-unit value to `unit`
pub fn from_base<U: ScaledUnit>(base_value: f64, unit: U) -> f64 {
    base_value / unit.factor()
}

/// Convert between two units of the same family
pub fn convert<U: ScaledUnit>(value: f64, from: U, to: U) -> f64 {
    if from.factor() == to.factor() {
        return value;
    }
    from_base(to_base(value, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_molar_to_millimolar() {
        assert_relative_eq!(from_base(1.0, ConcentrationUnit::Millimolar), 1000.0, max_relative = 1e-12);
        let mm: ConcentrationUnit = parse_unit("mM").unwrap();
        assert_relative_eq!(convert(1.0, ConcentrationUnit::Molar, mm), 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_to_base() {
        assert_relative_eq!(to_base(250.0, VolumeUnit::Milliliter), 0.25, max_relative = 1e-12);
        assert_relative_eq!(to_base(500.0, ConcentrationUnit::Micromolar), 5e-4, max_relative = 1e-12);
        assert_relative_eq!(to_base(20.0, MassUnit::Milligram), 0.02, max_relative = 1e-12);
    }

    #[test]
    fn test_round_trip_every_unit() {
        let values = [0.0, 1e-12, 0.5, 1.0, 29.22, 1234.5678, 1e9];
        for x in values {
            for unit in ConcentrationUnit::ALL {
                assert_relative_eq!(from_base(to_base(x, unit), unit), x, max_relative = 1e-12);
            }
            for unit in VolumeUnit::ALL {
                assert_relative_eq!(from_base(to_base(x, unit), unit), x, max_relative = 1e-12);
            }
            for unit in MassUnit::ALL {
                assert_relative_eq!(from_base(to_base(x, unit), unit), x, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_convert_within_family() {
        assert_relative_eq!(convert(2.5, VolumeUnit::Liter, VolumeUnit::Microliter), 2.5e6, max_relative = 1e-12);
        assert_relative_eq!(
            convert(150.0, ConcentrationUnit::Millimolar, ConcentrationUnit::Molar),
            0.15,
            max_relative = 1e-12
        );
        assert_eq!(convert(7.0, MassUnit::Gram, MassUnit::Gram), 7.0);
    }

    #[test]
    fn test_invalid_unit() {
        let err = parse_unit::<VolumeUnit>("gallon").unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidUnit {
                family: "volume",
                symbol: "gallon".to_string()
            }
        );
        assert!(matches!(
            parse_unit::<ConcentrationUnit>("pM"),
            Err(CalcError::InvalidUnit { family: "concentration", .. })
        ));
    }
}
