//! Molarity solver
//!
//! `mass = concentration × volume × molecular_weight`, rearranged for
//! whichever of the three quantities is unknown. The `compute_*` functions
//! take and return base units (g, mol/L, L); [`solve`] handles unit scaling
//! and reagent lookup around them.

use serde::Serialize;

use super::converter::{from_base, to_base, ScaledUnit};
use super::reagents::{validate_molecular_weight, ReagentChoice};
use super::units::{ConcentrationUnit, MassUnit, VolumeUnit};
use crate::error::{ensure_finite_result, ensure_non_negative, CalcError, CalcResult};

/// Mass in grams needed for `concentration_molar` in `volume_liters`
pub fn compute_mass(
    concentration_molar: f64,
    volume_liters: f64,
    molecular_weight: f64,
) -> CalcResult<f64> {
    let mw = validate_molecular_weight(molecular_weight)?;
    let c = ensure_non_negative("concentration", concentration_molar)?;
    let v = ensure_non_negative("volume", volume_liters)?;
    ensure_finite_result("mass", c * v * mw)
}

/// Molar concentration of `mass_grams` dissolved to `volume_liters`
pub fn compute_molarity(
    mass_grams: f64,
    volume_liters: f64,
    molecular_weight: f64,
) -> CalcResult<f64> {
    let mw = validate_molecular_weight(molecular_weight)?;
    let m = ensure_non_negative("mass", mass_grams)?;
    let v = ensure_non_negative("volume", volume_liters)?;
    if v == 0.0 {
        return Err(CalcError::DivisionByZero { divisor: "volume" });
    }
    ensure_finite_result("concentration", m / (v * mw))
}

/// Volume in liters that brings `mass_grams` to `concentration_molar`
pub fn compute_volume(
    mass_grams: f64,
    concentration_molar: f64,
    molecular_weight: f64,
) -> CalcResult<f64> {
    let mw = validate_molecular_weight(molecular_weight)?;
    let m = ensure_non_negative("mass", mass_grams)?;
    let c = ensure_non_negative("concentration", concentration_molar)?;
    let divisor = c * mw;
    if divisor == 0.0 {
        return Err(CalcError::DivisionByZero { divisor: "concentration" });
    }
    ensure_finite_result("volume", m / divisor)
}

// ============================================================================
// Requests
// ============================================================================

/// Which quantity is being solved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalculationMode {
    ComputeMass,
    ComputeMolarity,
    ComputeVolume,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::ComputeMass => "mass",
            CalculationMode::ComputeMolarity => "molarity",
            CalculationMode::ComputeVolume => "volume",
        }
    }
}

/// A value together with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: ScaledUnit> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    pub fn to_base(&self) -> f64 {
        to_base(self.value, self.unit)
    }
}

/// The two known quantities for each mode, and the unit to report the
/// third in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Knowns {
    ConcentrationAndVolume {
        concentration: Quantity<ConcentrationUnit>,
        volume: Quantity<VolumeUnit>,
        output: MassUnit,
    },
    MassAndVolume {
        mass: Quantity<MassUnit>,
        volume: Quantity<VolumeUnit>,
        output: ConcentrationUnit,
    },
    MassAndConcentration {
        mass: Quantity<MassUnit>,
        concentration: Quantity<ConcentrationUnit>,
        output: VolumeUnit,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub reagent: ReagentChoice,
    pub knowns: Knowns,
}

impl CalculationRequest {
    pub fn mode(&self) -> CalculationMode {
        match self.knowns {
            Knowns::ConcentrationAndVolume { .. } => CalculationMode::ComputeMass,
            Knowns::MassAndVolume { .. } => CalculationMode::ComputeMolarity,
            Knowns::MassAndConcentration { .. } => CalculationMode::ComputeVolume,
        }
    }
}

/// One solved quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub mode: CalculationMode,
    /// Result in the requested output unit
    pub value: f64,
    pub unit: &'static str,
    /// Result in the family's base unit (g, M or L)
    pub base_value: f64,
    pub base_unit: &'static str,
    pub reagent: String,
    pub molecular_weight: f64,
}

/// Resolve the reagent, normalize inputs, solve, and scale the answer
pub fn solve(request: &CalculationRequest) -> CalcResult<CalculationResult> {
    let mw = request.reagent.molecular_weight()?;

    let (base_value, value, unit, base_unit) = match request.knowns {
        Knowns::ConcentrationAndVolume { concentration, volume, output } => {
            let grams = compute_mass(concentration.to_base(), volume.to_base(), mw)?;
            let scaled = ensure_finite_result("mass", from_base(grams, output))?;
            (grams, scaled, output.symbol(), MassUnit::BASE_SYMBOL)
        }
        Knowns::MassAndVolume { mass, volume, output } => {
            let molar = compute_molarity(mass.to_base(), volume.to_base(), mw)?;
            let scaled = ensure_finite_result("concentration", from_base(molar, output))?;
            (molar, scaled, output.symbol(), ConcentrationUnit::BASE_SYMBOL)
        }
        Knowns::MassAndConcentration { mass, concentration, output } => {
            let liters = compute_volume(mass.to_base(), concentration.to_base(), mw)?;
            let scaled = ensure_finite_result("volume", from_base(liters, output))?;
            (liters, scaled, output.symbol(), VolumeUnit::BASE_SYMBOL)
        }
    };

    Ok(CalculationResult {
        mode: request.mode(),
        value,
        unit,
        base_value,
        base_unit,
        reagent: request.reagent.display_name().to_string(),
        molecular_weight: mw,
    })
}
