//! Molarity MCP Tools
//!
//! Builds solver requests from unit symbols and shapes the results for display.

use serde::Serialize;

use crate::chemistry::converter::parse_unit;
use crate::chemistry::{
    solve, CalculationMode, CalculationRequest, ConcentrationUnit, Knowns, MassUnit, Quantity,
    ReagentChoice, VolumeUnit,
};
use crate::config::Settings;
use crate::error::CalcResult;

/// Response for calculate_mass / calculate_molarity / calculate_volume
#[derive(Debug, Serialize)]
pub struct MolarityResponse {
    pub mode: &'static str,
    pub reagent: String,
    pub molecular_weight: f64,
    pub value: f64,
    pub unit: &'static str,
    pub base_value: f64,
    pub base_unit: &'static str,
    pub display: String,
}

/// A value with the unit symbol the caller typed
#[derive(Debug, Clone, Copy)]
pub struct RawQuantity<'a> {
    pub value: f64,
    pub unit: &'a str,
}

impl<'a> RawQuantity<'a> {
    pub fn new(value: f64, unit: &'a str) -> Self {
        Self { value, unit }
    }
}

/// Build a request from the two known quantities, in the order the mode
/// names them: concentration + volume for mass, mass + volume for molarity,
/// mass + concentration for volume. A missing output unit means the base
/// unit (g, M, L).
pub fn build_request(
    mode: CalculationMode,
    reagent: ReagentChoice,
    first: RawQuantity<'_>,
    second: RawQuantity<'_>,
    output_unit: Option<&str>,
) -> CalcResult<CalculationRequest> {
    let knowns = match mode {
        CalculationMode::ComputeMass => Knowns::ConcentrationAndVolume {
            concentration: Quantity::new(first.value, parse_unit::<ConcentrationUnit>(first.unit)?),
            volume: Quantity::new(second.value, parse_unit::<VolumeUnit>(second.unit)?),
            output: parse_output(output_unit, MassUnit::Gram)?,
        },
        CalculationMode::ComputeMolarity => Knowns::MassAndVolume {
            mass: Quantity::new(first.value, parse_unit::<MassUnit>(first.unit)?),
            volume: Quantity::new(second.value, parse_unit::<VolumeUnit>(second.unit)?),
            output: parse_output(output_unit, ConcentrationUnit::Molar)?,
        },
        CalculationMode::ComputeVolume => Knowns::MassAndConcentration {
            mass: Quantity::new(first.value, parse_unit::<MassUnit>(first.unit)?),
            concentration: Quantity::new(second.value, parse_unit::<ConcentrationUnit>(second.unit)?),
            output: parse_output(output_unit, VolumeUnit::Liter)?,
        },
    };
    Ok(CalculationRequest { reagent, knowns })
}

fn parse_output<U: crate::chemistry::ScaledUnit>(symbol: Option<&str>, default: U) -> CalcResult<U> {
    match symbol.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => parse_unit(s),
    }
}

/// Solve a request and format the answer
pub fn calculate(settings: &Settings, request: &CalculationRequest) -> CalcResult<MolarityResponse> {
    let result = solve(request)?;
    tracing::debug!(
        mode = result.mode.as_str(),
        reagent = %result.reagent,
        value = result.value,
        unit = result.unit,
        "Solved molarity request"
    );

    let label = match result.mode {
        CalculationMode::ComputeMass => "Mass required",
        CalculationMode::ComputeMolarity => "Molarity",
        CalculationMode::ComputeVolume => "Volume required",
    };

    Ok(MolarityResponse {
        mode: result.mode.as_str(),
        display: format!("{}: {}", label, settings.format_quantity(result.value, result.unit)),
        reagent: result.reagent,
        molecular_weight: result.molecular_weight,
        value: result.value,
        unit: result.unit,
        base_value: result.base_value,
        base_unit: result.base_unit,
    })
}
