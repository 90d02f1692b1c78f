//! LabZen Status Tool
//!
//! Runtime status and usage instructions for the LabZen service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::chemistry::reagents;
use crate::config::Settings;

/// Calculator usage instructions for AI assistants
pub const LABZEN_INSTRUCTIONS: &str = r#"
# LabZen Calculator Instructions

LabZen solves `mass = concentration × volume × molecular_weight` for whichever
quantity is unknown, plus protein assay and DNA assembly arithmetic.

## Choosing the Molecular Weight

- Call `list_reagents` to see the built-in reagents (NaCl, IPTG, Tris Base,
  EDTA (disodium salt), Glucose (Dextrose)).
- Pass the exact name as `reagent`. Names are case-sensitive.
- For anything else, pass `reagent: "Custom"` (or omit it) together with
  `molecular_weight` in g/mol.

## Molarity Tools

| Tool | Known values | Default output |
|------|--------------|----------------|
| `calculate_mass` | concentration + volume | g |
| `calculate_molarity` | mass + volume | M |
| `calculate_volume` | mass + concentration | L |

Units:
- Concentration: `M`, `mM`, `µM` (or `uM`), `nM`
- Volume: `L`, `mL`, `µL` (or `uL`)
- Mass: `g`, `mg`, `µg` (or `ug`, `mcg`)

Set `output_unit` to get the answer in another unit of the same family.

**Example:** 500 mL of 150 mM NaCl
```
calculate_mass(reagent: "NaCl", concentration: 150, concentration_unit: "mM",
               volume: 500, volume_unit: "mL")
→ "Mass required: 4.3830 g"
```

## Conversions

`convert_concentration`, `convert_volume`, `convert_mass` convert a value
between two units of the same family.

## Protein Assay

1. `protein_standard_curve` with nine lines of duplicate absorbances for the
   standards A1-A9 (2.0, 1.5, 1.0, 0.75, 0.5, 0.25, 0.125, 0.025, 0 mg/mL).
2. `protein_sample_concentration` with the returned slope and intercept, the
   sample absorbances, the dilution factor (at least 1) and optionally the
   total sample volume in µL for yield.

## DNA Assembly

`assembly_protocol` takes fragments (name, length_bp, concentration_ng_ul,
is_vector). Exactly one fragment must be the vector. Defaults: 20 µL
reaction, 2X master mix, 0.05 pmol vector, 2-fold molar excess of inserts.

## Errors

Failed calculations return `{"error": ..., "error_kind": ...}`. Kinds:
InvalidUnit, InvalidMolecularWeight, InvalidInput, DivisionByZero,
UnknownReagent, InsufficientData, InvalidProtocol.
"#;

#[derive(Debug, Serialize)]
pub struct LabzenStatus {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub display_precision: usize,
    pub builtin_reagents: usize,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

pub struct StatusTracker {
    start_time: Instant,
    settings: Settings,
}

impl StatusTracker {
    pub fn new(settings: Settings) -> Self {
        Self {
            start_time: Instant::now(),
            settings,
        }
    }

    pub fn get_status(&self) -> LabzenStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        LabzenStatus {
            name: build_info.name,
            version: build_info.version,
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            display_precision: self.settings.precision,
            builtin_reagents: reagents::list().len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_settings() {
        let tracker = StatusTracker::new(Settings { precision: 6 });
        let status = tracker.get_status();
        assert_eq!(status.display_precision, 6);
        assert_eq!(status.builtin_reagents, 5);
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_mention_every_calculator() {
        for tool in ["calculate_mass", "calculate_molarity", "calculate_volume", "protein_standard_curve", "assembly_protocol"] {
            assert!(LABZEN_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
