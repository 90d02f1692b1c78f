//! Unit types and conversion constants
//!
//! Each unit family has a canonical base unit: mol/L for concentration,
//! liters for volume and grams for mass.

use serde::{Deserialize, Serialize};

// ============================================================================
// Scale Factors (to base unit)
// ============================================================================

pub const MILLI: f64 = 1e-3;
pub const MICRO: f64 = 1e-6;
pub const NANO: f64 = 1e-9;

/// Molar concentration units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    #[serde(rename = "M")]
    Molar,
    #[serde(rename = "mM")]
    Millimolar,
    #[serde(rename = "µM")]
    Micromolar,
    #[serde(rename = "nM")]
    Nanomolar,
}

impl ConcentrationUnit {
    pub const ALL: [ConcentrationUnit; 4] = [
        ConcentrationUnit::Molar,
        ConcentrationUnit::Millimolar,
        ConcentrationUnit::Micromolar,
        ConcentrationUnit::Nanomolar,
    ];

    /// Factor relative to mol/L
    pub fn factor(&self) -> f64 {
        match self {
            ConcentrationUnit::Molar => 1.0,
            ConcentrationUnit::Millimolar => MILLI,
            ConcentrationUnit::Micromolar => MICRO,
            ConcentrationUnit::Nanomolar => NANO,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConcentrationUnit::Molar => "M",
            ConcentrationUnit::Millimolar => "mM",
            ConcentrationUnit::Micromolar => "µM",
            ConcentrationUnit::Nanomolar => "nM",
        }
    }

    /// Parse a unit symbol. The prefix letter decides the scale, so `M` and
    /// `m` are not interchangeable here; long names ignore case.
    pub fn from_symbol(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        match normalize_micro(trimmed).as_str() {
            "M" => return Some(ConcentrationUnit::Molar),
            "mM" => return Some(ConcentrationUnit::Millimolar),
            "uM" => return Some(ConcentrationUnit::Micromolar),
            "nM" => return Some(ConcentrationUnit::Nanomolar),
            _ => {}
        }
        match trimmed.to_lowercase().as_str() {
            "molar" | "mol/l" => Some(ConcentrationUnit::Molar),
            "millimolar" | "mmol/l" => Some(ConcentrationUnit::Millimolar),
            "micromolar" => Some(ConcentrationUnit::Micromolar),
            "nanomolar" | "nmol/l" => Some(ConcentrationUnit::Nanomolar),
            _ => None,
        }
    }
}

/// Volume units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "mL")]
    Milliliter,
    #[serde(rename = "µL")]
    Microliter,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 3] = [
        VolumeUnit::Liter,
        VolumeUnit::Milliliter,
        VolumeUnit::Microliter,
    ];

    /// Factor relative to liters
    pub fn factor(&self) -> f64 {
        match self {
            VolumeUnit::Liter => 1.0,
            VolumeUnit::Milliliter => MILLI,
            VolumeUnit::Microliter => MICRO,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Liter => "L",
            VolumeUnit::Milliliter => "mL",
            VolumeUnit::Microliter => "µL",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        let lower = normalize_micro(s.trim()).to_lowercase();
        match lower.as_str() {
            "l" | "liter" | "liters" | "litre" | "litres" => Some(VolumeUnit::Liter),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(VolumeUnit::Milliliter)
            }
            "ul" | "microliter" | "microliters" | "microlitre" | "microlitres" => {
                Some(VolumeUnit::Microliter)
            }
            _ => None,
        }
    }
}

/// Mass units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "µg")]
    Microgram,
}

impl MassUnit {
    pub const ALL: [MassUnit; 3] = [MassUnit::Gram, MassUnit::Milligram, MassUnit::Microgram];

    /// Factor relative to grams
    pub fn factor(&self) -> f64 {
        match self {
            MassUnit::Gram => 1.0,
            MassUnit::Milligram => MILLI,
            MassUnit::Microgram => MICRO,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Milligram => "mg",
            MassUnit::Microgram => "µg",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        let lower = normalize_micro(s.trim()).to_lowercase();
        match lower.as_str() {
            "g" | "gram" | "grams" => Some(MassUnit::Gram),
            "mg" | "milligram" | "milligrams" => Some(MassUnit::Milligram),
            "ug" | "mcg" | "microgram" | "micrograms" => Some(MassUnit::Microgram),
            _ => None,
        }
    }
}

/// Fold the micro sign and Greek mu into ASCII `u`
fn normalize_micro(s: &str) -> String {
    s.replace(['\u{00B5}', '\u{03BC}'], "u")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concentration_symbols() {
        assert_eq!(ConcentrationUnit::from_symbol("M"), Some(ConcentrationUnit::Molar));
        assert_eq!(ConcentrationUnit::from_symbol("mM"), Some(ConcentrationUnit::Millimolar));
        assert_eq!(ConcentrationUnit::from_symbol("µM"), Some(ConcentrationUnit::Micromolar));
        assert_eq!(ConcentrationUnit::from_symbol("μM"), Some(ConcentrationUnit::Micromolar));
        assert_eq!(ConcentrationUnit::from_symbol("uM"), Some(ConcentrationUnit::Micromolar));
        assert_eq!(ConcentrationUnit::from_symbol(" nM "), Some(ConcentrationUnit::Nanomolar));
        assert_eq!(ConcentrationUnit::from_symbol("Millimolar"), Some(ConcentrationUnit::Millimolar));
    }

    #[test]
    fn test_concentration_prefix_is_case_sensitive() {
        assert_eq!(ConcentrationUnit::from_symbol("m"), None);
        assert_eq!(ConcentrationUnit::from_symbol("MM"), None);
        assert_eq!(ConcentrationUnit::from_symbol("pM"), None);
    }

    #[test]
    fn test_volume_symbols() {
        assert_eq!(VolumeUnit::from_symbol("L"), Some(VolumeUnit::Liter));
        assert_eq!(VolumeUnit::from_symbol("ml"), Some(VolumeUnit::Milliliter));
        assert_eq!(VolumeUnit::from_symbol("µL"), Some(VolumeUnit::Microliter));
        assert_eq!(VolumeUnit::from_symbol("uL"), Some(VolumeUnit::Microliter));
        assert_eq!(VolumeUnit::from_symbol("litres"), Some(VolumeUnit::Liter));
        assert_eq!(VolumeUnit::from_symbol("cup"), None);
    }

    #[test]
    fn test_mass_symbols() {
        assert_eq!(MassUnit::from_symbol("g"), Some(MassUnit::Gram));
        assert_eq!(MassUnit::from_symbol("MG"), Some(MassUnit::Milligram));
        assert_eq!(MassUnit::from_symbol("mcg"), Some(MassUnit::Microgram));
        assert_eq!(MassUnit::from_symbol("µg"), Some(MassUnit::Microgram));
        assert_eq!(MassUnit::from_symbol("oz"), None);
    }

    #[test]
    fn test_symbols_parse_back() {
        for unit in ConcentrationUnit::ALL {
            assert_eq!(ConcentrationUnit::from_symbol(unit.symbol()), Some(unit));
        }
        for unit in VolumeUnit::ALL {
            assert_eq!(VolumeUnit::from_symbol(unit.symbol()), Some(unit));
        }
        for unit in MassUnit::ALL {
            assert_eq!(MassUnit::from_symbol(unit.symbol()), Some(unit));
        }
    }

    #[test]
    fn test_factors() {
        assert_eq!(ConcentrationUnit::Molar.factor(), 1.0);
        assert_eq!(ConcentrationUnit::Nanomolar.factor(), 1e-9);
        assert_eq!(VolumeUnit::Microliter.factor(), 1e-6);
        assert_eq!(MassUnit::Milligram.factor(), 1e-3);
    }
}
