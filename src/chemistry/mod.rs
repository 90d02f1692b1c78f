//! Lab chemistry calculations
//!
//! Unit conversions, the molarity solver, the reagent table, and the protein
//! assay and DNA assembly calculators.

pub mod assembly;
pub mod converter;
pub mod molarity;
pub mod protein_assay;
pub mod reagents;
pub mod units;

pub use assembly::{compute_assembly_protocol, AssemblyPlan, AssemblySettings, Fragment};
pub use converter::{convert, from_base, parse_unit, to_base, ScaledUnit};
pub use molarity::{
    compute_mass, compute_molarity, compute_volume, solve, CalculationMode, CalculationRequest,
    CalculationResult, Knowns, Quantity,
};
pub use protein_assay::{
    fit_standard_curve, parse_standard_duplicates, sample_concentration, total_yield,
    StandardCurve, StandardPoint,
};
pub use reagents::{Reagent, ReagentChoice};
pub use units::{ConcentrationUnit, MassUnit, VolumeUnit};
