//! Unit conversion MCP Tools

use serde::Serialize;

use crate::chemistry::converter::{convert, parse_unit, to_base, ScaledUnit};
use crate::chemistry::{ConcentrationUnit, MassUnit, VolumeUnit};
use crate::config::Settings;
use crate::error::{ensure_finite_result, CalcResult};

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub family: &'static str,
    pub value: f64,
    pub from_unit: &'static str,
    pub result: f64,
    pub to_unit: &'static str,
    pub base_value: f64,
    pub base_unit: &'static str,
    pub display: String,
}

fn convert_units<U: ScaledUnit>(
    settings: &Settings,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> CalcResult<ConversionResponse> {
    let from: U = parse_unit(from_unit)?;
    let to: U = parse_unit(to_unit)?;
    let base_value = ensure_finite_result("converted value", to_base(value, from))?;
    let result = ensure_finite_result("converted value", convert(value, from, to))?;

    Ok(ConversionResponse {
        family: U::FAMILY,
        value,
        from_unit: from.symbol(),
        result,
        to_unit: to.symbol(),
        base_value,
        base_unit: U::BASE_SYMBOL,
        display: format!(
            "{} = {}",
            settings.format_quantity(value, from.symbol()),
            settings.format_quantity(result, to.symbol())
        ),
    })
}

pub fn convert_concentration(settings: &Settings, value: f64, from_unit: &str, to_unit: &str) -> CalcResult<ConversionResponse> {
    convert_units::<ConcentrationUnit>(settings, value, from_unit, to_unit)
}

pub fn convert_volume(settings: &Settings, value: f64, from_unit: &str, to_unit: &str) -> CalcResult<ConversionResponse> {
    convert_units::<VolumeUnit>(settings, value, from_unit, to_unit)
}

pub fn convert_mass(settings: &Settings, value: f64, from_unit: &str, to_unit: &str) -> CalcResult<ConversionResponse> {
    convert_units::<MassUnit>(settings, value, from_unit, to_unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn test_molar_to_millimolar() {
        let resp = convert_concentration(&Settings::default(), 1.0, "M", "mM").unwrap();
        assert!((resp.result - 1000.0).abs() < 1e-9);
        assert_eq!(resp.display, "1.0000 M = 1000.0000 mM");
        assert_eq!(resp.family, "concentration");
    }

    #[test]
    fn test_volume_through_base() {
        let resp = convert_volume(&Settings::default(), 250.0, "µL", "mL").unwrap();
        assert!((resp.result - 0.25).abs() < 1e-12);
        assert!((resp.base_value - 2.5e-4).abs() < 1e-15);
        assert_eq!(resp.base_unit, "L");
    }

    #[test]
    fn test_mass_units_canonicalized() {
        let resp = convert_mass(&Settings::default(), 1.0, "grams", "ug").unwrap();
        assert_eq!(resp.from_unit, "g");
        assert_eq!(resp.to_unit, "µg");
    }

    #[test]
    fn test_cross_family_rejected() {
        assert!(matches!(
            convert_volume(&Settings::default(), 1.0, "L", "M"),
            Err(CalcError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_overflowing_conversion_rejected() {
        assert!(matches!(
            convert_concentration(&Settings::default(), 1e305, "M", "nM"),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(convert_mass(&Settings::default(), 1e305, "g", "mg").is_ok());
    }
}
