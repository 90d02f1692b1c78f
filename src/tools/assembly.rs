//! DNA Assembly MCP Tools

use serde::Serialize;

use crate::chemistry::assembly::{compute_assembly_protocol, AssemblyPlan, AssemblySettings, Fragment};
use crate::config::Settings;
use crate::error::CalcResult;

#[derive(Debug, Serialize)]
pub struct AssemblyResponse {
    #[serde(flatten)]
    pub plan: AssemblyPlan,
    /// Pipetting list, one line per component
    pub steps: Vec<String>,
}

pub fn assembly_protocol(
    settings: &Settings,
    fragments: &[Fragment],
    assembly: &AssemblySettings,
) -> CalcResult<AssemblyResponse> {
    let plan = compute_assembly_protocol(fragments, assembly)?;
    tracing::debug!(
        fragments = plan.fragments.len(),
        water_ul = plan.water_volume_ul,
        "Planned assembly reaction"
    );

    let mut steps: Vec<String> = plan
        .fragments
        .iter()
        .map(|f| {
            let role = if f.is_vector { "vector" } else { "insert" };
            format!(
                "{} ({}): {}",
                f.name,
                role,
                settings.format_quantity(f.volume_ul, "µL")
            )
        })
        .collect();
    steps.push(format!(
        "Master mix ({}X): {}",
        assembly.master_mix_strength,
        settings.format_quantity(plan.master_mix_volume_ul, "µL")
    ));
    steps.push(format!("Water: {}", settings.format_quantity(plan.water_volume_ul, "µL")));
    steps.push(format!(
        "Total: {}",
        settings.format_quantity(plan.total_reaction_volume_ul, "µL")
    ));

    Ok(AssemblyResponse { plan, steps })
}
