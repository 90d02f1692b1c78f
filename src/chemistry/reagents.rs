//! Built-in reagent table
//!
//! Molecular weights (g/mol) of common bench reagents, plus the custom path
//! where the caller supplies the molecular weight directly.

use serde::Serialize;

use crate::error::{CalcError, CalcResult};

/// A named chemical with its molecular weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reagent {
    pub name: &'static str,
    /// g/mol
    pub molecular_weight: f64,
}

/// Display name of the custom (user-supplied molecular weight) choice
pub const CUSTOM_REAGENT: &str = "Custom";

static REAGENTS: [Reagent; 5] = [
    Reagent { name: "NaCl", molecular_weight: 58.44 },
    Reagent { name: "IPTG", molecular_weight: 238.31 },
    Reagent { name: "Tris Base", molecular_weight: 121.14 },
    Reagent { name: "EDTA (disodium salt)", molecular_weight: 372.24 },
    Reagent { name: "Glucose (Dextrose)", molecular_weight: 180.16 },
];

/// All built-in reagents in display order
pub fn list() -> &'static [Reagent] {
    &REAGENTS
}

/// Look up a built-in reagent by exact name
pub fn lookup(name: &str) -> CalcResult<&'static Reagent> {
    REAGENTS
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| CalcError::UnknownReagent(name.to_string()))
}

/// Which molecular weight a calculation should use
#[derive(Debug, Clone, PartialEq)]
pub enum ReagentChoice {
    BuiltIn(String),
    Custom(f64),
    /// A name outside the table, paired with a caller-supplied molecular weight
    Unlisted { name: String, molecular_weight: f64 },
}

impl ReagentChoice {
    /// Build a choice from a reagent name and an optional molecular weight.
    ///
    /// `"Custom"` (any case) or an absent name selects the custom path, which
    /// needs `molecular_weight`. A built-in name ignores `molecular_weight`.
    /// Any other name uses `molecular_weight` when given and keeps the name
    /// for display; without one it fails later as `UnknownReagent`.
    pub fn from_parts(reagent: Option<&str>, molecular_weight: Option<f64>) -> CalcResult<Self> {
        match reagent.map(str::trim) {
            Some(name) if !name.is_empty() && !name.eq_ignore_ascii_case(CUSTOM_REAGENT) => {
                match (lookup(name), molecular_weight) {
                    (Err(_), Some(mw)) => Ok(ReagentChoice::Unlisted {
                        name: name.to_string(),
                        molecular_weight: mw,
                    }),
                    _ => Ok(ReagentChoice::BuiltIn(name.to_string())),
                }
            }
            _ => molecular_weight
                .map(ReagentChoice::Custom)
                .ok_or(CalcError::InvalidMolecularWeight(0.0)),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ReagentChoice::BuiltIn(name) | ReagentChoice::Unlisted { name, .. } => name,
            ReagentChoice::Custom(_) => CUSTOM_REAGENT,
        }
    }

    /// Resolve to a validated molecular weight
    pub fn molecular_weight(&self) -> CalcResult<f64> {
        let mw = match self {
            ReagentChoice::BuiltIn(name) => lookup(name)?.molecular_weight,
            ReagentChoice::Custom(mw) | ReagentChoice::Unlisted { molecular_weight: mw, .. } => *mw,
        };
        validate_molecular_weight(mw)
    }
}

/// Molecular weight must be a positive finite number
pub fn validate_molecular_weight(mw: f64) -> CalcResult<f64> {
    if mw.is_finite() && mw > 0.0 {
        Ok(mw)
    } else {
        Err(CalcError::InvalidMolecularWeight(mw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_builtin() {
        let nacl = lookup("NaCl").unwrap();
        assert_eq!(nacl.molecular_weight, 58.44);
        assert_eq!(lookup("Tris Base").unwrap().molecular_weight, 121.14);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("nacl"), Err(CalcError::UnknownReagent("nacl".to_string())));
        assert!(lookup("HEPES").is_err());
    }

    #[test]
    fn test_list_order() {
        let names: Vec<&str> = list().iter().map(|r| r.name).collect();
        assert_eq!(names[0], "NaCl");
        assert_eq!(names.len(), 5);
        assert!(list().iter().all(|r| r.molecular_weight > 0.0));
    }

    #[test]
    fn test_choice_from_parts() {
        assert_eq!(
            ReagentChoice::from_parts(Some("IPTG"), Some(1.0)).unwrap(),
            ReagentChoice::BuiltIn("IPTG".to_string())
        );
        assert_eq!(
            ReagentChoice::from_parts(Some("custom"), Some(342.3)).unwrap(),
            ReagentChoice::Custom(342.3)
        );
        assert_eq!(
            ReagentChoice::from_parts(None, Some(100.0)).unwrap(),
            ReagentChoice::Custom(100.0)
        );
        assert!(matches!(
            ReagentChoice::from_parts(Some("Custom"), None),
            Err(CalcError::InvalidMolecularWeight(_))
        ));
    }

    #[test]
    fn test_unlisted_name_with_molecular_weight() {
        let choice = ReagentChoice::from_parts(Some("Sucrose"), Some(342.3)).unwrap();
        assert_eq!(
            choice,
            ReagentChoice::Unlisted { name: "Sucrose".to_string(), molecular_weight: 342.3 }
        );
        assert_eq!(choice.display_name(), "Sucrose");
        assert_eq!(choice.molecular_weight().unwrap(), 342.3);

        let bad = ReagentChoice::from_parts(Some("Sucrose"), Some(-1.0)).unwrap();
        assert_eq!(bad.molecular_weight(), Err(CalcError::InvalidMolecularWeight(-1.0)));
    }

    #[test]
    fn test_unlisted_name_without_molecular_weight() {
        let choice = ReagentChoice::from_parts(Some("Sucrose"), None).unwrap();
        assert_eq!(
            choice.molecular_weight(),
            Err(CalcError::UnknownReagent("Sucrose".to_string()))
        );
    }

    #[test]
    fn test_custom_bypasses_table() {
        let choice = ReagentChoice::Custom(342.3);
        assert_eq!(choice.molecular_weight().unwrap(), 342.3);
        assert_eq!(choice.display_name(), "Custom");
    }

    #[test]
    fn test_custom_still_validated() {
        assert_eq!(
            ReagentChoice::Custom(0.0).molecular_weight(),
            Err(CalcError::InvalidMolecularWeight(0.0))
        );
        assert!(ReagentChoice::Custom(-5.0).molecular_weight().is_err());
        assert!(ReagentChoice::Custom(f64::NAN).molecular_weight().is_err());
    }

    #[test]
    fn test_unknown_builtin() {
        let choice = ReagentChoice::BuiltIn("Unobtainium".to_string());
        assert_eq!(
            choice.molecular_weight(),
            Err(CalcError::UnknownReagent("Unobtainium".to_string()))
        );
    }
}
