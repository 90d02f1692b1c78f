//! Gibson / HiFi DNA assembly planner
//!
//! Works out how many µL of each fragment, master mix and water go into one
//! assembly reaction.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Average molar mass of one base pair of dsDNA (g/mol)
pub const AVG_BP_MOLECULAR_WEIGHT: f64 = 650.0;

pub const DEFAULT_TOTAL_REACTION_VOLUME_UL: f64 = 20.0;
pub const DEFAULT_MASTER_MIX_STRENGTH: f64 = 2.0;
pub const DEFAULT_VECTOR_PMOL: f64 = 0.05;
pub const DEFAULT_INSERT_MOLAR_EXCESS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub name: String,
    pub length_bp: f64,
    pub concentration_ng_ul: f64,
    #[serde(default)]
    pub is_vector: bool,
}

impl Fragment {
    pub fn new(name: impl Into<String>, length_bp: f64, concentration_ng_ul: f64, is_vector: bool) -> Self {
        Self {
            name: name.into(),
            length_bp,
            concentration_ng_ul,
            is_vector,
        }
    }
}

/// Reaction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblySettings {
    pub total_reaction_volume_ul: f64,
    /// 2.0 for a 2X master mix
    pub master_mix_strength: f64,
    pub vector_pmol: f64,
    /// Insert pmol per vector pmol
    pub insert_molar_excess: f64,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            total_reaction_volume_ul: DEFAULT_TOTAL_REACTION_VOLUME_UL,
            master_mix_strength: DEFAULT_MASTER_MIX_STRENGTH,
            vector_pmol: DEFAULT_VECTOR_PMOL,
            insert_molar_excess: DEFAULT_INSERT_MOLAR_EXCESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentVolume {
    pub name: String,
    pub is_vector: bool,
    pub pmol: f64,
    pub mass_ng: f64,
    pub volume_ul: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyPlan {
    /// In input order
    pub fragments: Vec<FragmentVolume>,
    pub master_mix_volume_ul: f64,
    pub water_volume_ul: f64,
    pub total_reaction_volume_ul: f64,
}

/// Nanograms of `pmol` picomoles of a `length_bp` dsDNA fragment
pub fn fragment_mass_ng(pmol: f64, length_bp: f64) -> f64 {
    // pmol -> mol -> g -> ng
    pmol * 1e-12 * (length_bp * AVG_BP_MOLECULAR_WEIGHT) * 1e9
}

pub fn compute_assembly_protocol(
    fragments: &[Fragment],
    settings: &AssemblySettings,
) -> CalcResult<AssemblyPlan> {
    validate_settings(settings)?;

    let vector_count = fragments.iter().filter(|f| f.is_vector).count();
    if vector_count != 1 {
        return Err(CalcError::InvalidProtocol(format!(
            "exactly one fragment must be flagged as vector (found {})",
            vector_count
        )));
    }

    let insert_pmol = settings.insert_molar_excess * settings.vector_pmol;

    let volumes = fragments
        .iter()
        .map(|frag| {
            if !(frag.length_bp.is_finite() && frag.length_bp > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("length of {}", frag.name),
                    "must be greater than 0 bp",
                ));
            }
            if !(frag.concentration_ng_ul.is_finite() && frag.concentration_ng_ul > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("concentration of {}", frag.name),
                    "must be greater than 0 ng/µL",
                ));
            }
            let pmol = if frag.is_vector { settings.vector_pmol } else { insert_pmol };
            let mass_ng = fragment_mass_ng(pmol, frag.length_bp);
            Ok(FragmentVolume {
                name: frag.name.clone(),
                is_vector: frag.is_vector,
                pmol,
                mass_ng,
                volume_ul: mass_ng / frag.concentration_ng_ul,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let fragments_volume: f64 = volumes.iter().map(|v| v.volume_ul).sum();
    let master_mix_volume_ul = settings.total_reaction_volume_ul / settings.master_mix_strength;
    let water_volume_ul = settings.total_reaction_volume_ul - master_mix_volume_ul - fragments_volume;

    if water_volume_ul < 0.0 {
        return Err(CalcError::InvalidProtocol(format!(
            "volumes exceed total reaction volume by {:.2} µL; reduce vector pmol or fragment count",
            -water_volume_ul
        )));
    }

    Ok(AssemblyPlan {
        fragments: volumes,
        master_mix_volume_ul,
        water_volume_ul,
        total_reaction_volume_ul: settings.total_reaction_volume_ul,
    })
}

fn validate_settings(settings: &AssemblySettings) -> CalcResult<()> {
    let positive = [
        ("total reaction volume", settings.total_reaction_volume_ul),
        ("master mix strength", settings.master_mix_strength),
        ("vector pmol", settings.vector_pmol),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(CalcError::invalid_input(
                field,
                format!("must be greater than 0 (got {})", value),
            ));
        }
    }
    if !(settings.insert_molar_excess.is_finite() && settings.insert_molar_excess >= 0.0) {
        return Err(CalcError::invalid_input(
            "insert molar excess",
            "must not be negative",
        ));
    }
    Ok(())
}
