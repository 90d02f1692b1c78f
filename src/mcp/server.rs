//! LabZen MCP Server Implementation
//!
//! Implements the MCP server with all LabZen tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::chemistry::assembly::{
    AssemblySettings, Fragment, DEFAULT_INSERT_MOLAR_EXCESS, DEFAULT_MASTER_MIX_STRENGTH,
    DEFAULT_TOTAL_REACTION_VOLUME_UL, DEFAULT_VECTOR_PMOL,
};
use crate::chemistry::{CalculationMode, ReagentChoice};
use crate::config::Settings;
use crate::error::CalcResult;
use crate::tools::molarity::RawQuantity;
use crate::tools::status::StatusTracker;
use crate::tools::{assembly, conversions, molarity, protein_assay, reagents, ErrorResponse};

/// LabZen MCP Service
#[derive(Clone)]
pub struct LabzenService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    settings: Settings,
    tool_router: ToolRouter<LabzenService>,
}

impl LabzenService {
    pub fn new(settings: Settings) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(settings))),
            settings,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool outcome. Calculation failures are reported in the body
/// so the client can show them; only serialization itself is an MCP error.
fn respond<T: Serialize>(tool: &str, result: CalcResult<T>) -> Result<CallToolResult, McpError> {
    let json = match result {
        Ok(value) => serde_json::to_string_pretty(&value),
        Err(e) => {
            tracing::debug!(tool, kind = ?e.kind(), "Calculation rejected: {}", e);
            serde_json::to_string_pretty(&ErrorResponse::from(&e))
        }
    }
    .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Reagent Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetReagentParams {
    /// Exact reagent name, e.g. "NaCl" or "Tris Base"
    pub name: String,
}

// ============================================================================
// Molarity Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateMassParams {
    /// Built-in reagent name, or "Custom" to use molecular_weight (default Custom)
    pub reagent: Option<String>,
    /// Molecular weight in g/mol (required for Custom or a name not in the table)
    pub molecular_weight: Option<f64>,
    /// Target concentration
    pub concentration: f64,
    /// M, mM, µM or nM (default M)
    #[serde(default = "default_concentration_unit")]
    pub concentration_unit: String,
    /// Target volume
    pub volume: f64,
    /// L, mL or µL (default L)
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    /// g, mg or µg (default g)
    pub output_unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateMolarityParams {
    /// Built-in reagent name, or "Custom" to use molecular_weight (default Custom)
    pub reagent: Option<String>,
    /// Molecular weight in g/mol (required for Custom or a name not in the table)
    pub molecular_weight: Option<f64>,
    /// Mass of solute
    pub mass: f64,
    /// g, mg or µg (default g)
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,
    /// Final solution volume
    pub volume: f64,
    /// L, mL or µL (default L)
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    /// M, mM, µM or nM (default M)
    pub output_unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateVolumeParams {
    /// Built-in reagent name, or "Custom" to use molecular_weight (default Custom)
    pub reagent: Option<String>,
    /// Molecular weight in g/mol (required for Custom or a name not in the table)
    pub molecular_weight: Option<f64>,
    /// Mass of solute
    pub mass: f64,
    /// g, mg or µg (default g)
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,
    /// Target concentration
    pub concentration: f64,
    /// M, mM, µM or nM (default M)
    #[serde(default = "default_concentration_unit")]
    pub concentration_unit: String,
    /// L, mL or µL (default L)
    pub output_unit: Option<String>,
}

fn default_concentration_unit() -> String { "M".to_string() }
fn default_volume_unit() -> String { "L".to_string() }
fn default_mass_unit() -> String { "g".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertParams {
    pub value: f64,
    /// Unit of `value`
    pub from_unit: String,
    /// Unit to convert to (same family)
    pub to_unit: String,
}

// ============================================================================
// Protein Assay Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StandardCurveParams {
    /// Nine lines (A1-A9), each with two whitespace-separated absorbance readings
    pub absorbances: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SampleConcentrationParams {
    /// Sample absorbance readings
    pub absorbances: Vec<f64>,
    /// Slope from protein_standard_curve
    pub slope: f64,
    /// Intercept from protein_standard_curve
    pub intercept: f64,
    /// Sample dilution factor, at least 1 (default 1)
    #[serde(default = "default_dilution_factor")]
    pub dilution_factor: f64,
    /// Total sample volume in µL, for yield (optional)
    pub total_volume_ul: Option<f64>,
}

fn default_dilution_factor() -> f64 { 1.0 }

// ============================================================================
// Assembly Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FragmentParam {
    pub name: String,
    /// Length in base pairs
    pub length_bp: f64,
    /// Concentration in ng/µL
    pub concentration_ng_ul: f64,
    /// Mark the single vector fragment (default false)
    #[serde(default)]
    pub is_vector: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AssemblyProtocolParams {
    /// Fragments, exactly one flagged as vector
    pub fragments: Vec<FragmentParam>,
    /// Total reaction volume in µL (default 20)
    #[serde(default = "default_total_reaction_volume")]
    pub total_reaction_volume_ul: f64,
    /// Master mix strength, 2.0 for 2X (default 2)
    #[serde(default = "default_master_mix_strength")]
    pub master_mix_strength: f64,
    /// pmol of vector (default 0.05)
    #[serde(default = "default_vector_pmol")]
    pub vector_pmol: f64,
    /// Insert pmol per vector pmol (default 2)
    #[serde(default = "default_insert_molar_excess")]
    pub insert_molar_excess: f64,
}

fn default_total_reaction_volume() -> f64 { DEFAULT_TOTAL_REACTION_VOLUME_UL }
fn default_master_mix_strength() -> f64 { DEFAULT_MASTER_MIX_STRENGTH }
fn default_vector_pmol() -> f64 { DEFAULT_VECTOR_PMOL }
fn default_insert_molar_excess() -> f64 { DEFAULT_INSERT_MOLAR_EXCESS }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl LabzenService {
    // --- Status ---

    #[tool(description = "Get the current status of the LabZen service including build info, display precision, and process information")]
    async fn labzen_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for the LabZen calculators: reagent selection, units, protein assay and DNA assembly. Call this when unsure how to use the tools.")]
    fn labzen_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LABZEN_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LABZEN_INSTRUCTIONS)]))
    }

    // --- Reagents ---

    #[tool(description = "List built-in reagents and their molecular weights (g/mol)")]
    fn list_reagents(&self) -> Result<CallToolResult, McpError> {
        respond("list_reagents", Ok(reagents::list_reagents()))
    }

    #[tool(description = "Get a built-in reagent by exact name")]
    fn get_reagent(&self, Parameters(p): Parameters<GetReagentParams>) -> Result<CallToolResult, McpError> {
        respond("get_reagent", reagents::get_reagent(&p.name))
    }

    // --- Molarity ---

    #[tool(description = "Calculate the mass of solute needed for a target concentration and volume")]
    fn calculate_mass(&self, Parameters(p): Parameters<CalculateMassParams>) -> Result<CallToolResult, McpError> {
        let result = ReagentChoice::from_parts(p.reagent.as_deref(), p.molecular_weight)
            .and_then(|reagent| {
                molarity::build_request(
                    CalculationMode::ComputeMass,
                    reagent,
                    RawQuantity::new(p.concentration, &p.concentration_unit),
                    RawQuantity::new(p.volume, &p.volume_unit),
                    p.output_unit.as_deref(),
                )
            })
            .and_then(|request| molarity::calculate(&self.settings, &request));
        respond("calculate_mass", result)
    }

    #[tool(description = "Calculate the molar concentration of a given mass dissolved to a given volume")]
    fn calculate_molarity(&self, Parameters(p): Parameters<CalculateMolarityParams>) -> Result<CallToolResult, McpError> {
        let result = ReagentChoice::from_parts(p.reagent.as_deref(), p.molecular_weight)
            .and_then(|reagent| {
                molarity::build_request(
                    CalculationMode::ComputeMolarity,
                    reagent,
                    RawQuantity::new(p.mass, &p.mass_unit),
                    RawQuantity::new(p.volume, &p.volume_unit),
                    p.output_unit.as_deref(),
                )
            })
            .and_then(|request| molarity::calculate(&self.settings, &request));
        respond("calculate_molarity", result)
    }

    #[tool(description = "Calculate the volume needed to bring a given mass to a target concentration")]
    fn calculate_volume(&self, Parameters(p): Parameters<CalculateVolumeParams>) -> Result<CallToolResult, McpError> {
        let result = ReagentChoice::from_parts(p.reagent.as_deref(), p.molecular_weight)
            .and_then(|reagent| {
                molarity::build_request(
                    CalculationMode::ComputeVolume,
                    reagent,
                    RawQuantity::new(p.mass, &p.mass_unit),
                    RawQuantity::new(p.concentration, &p.concentration_unit),
                    p.output_unit.as_deref(),
                )
            })
            .and_then(|request| molarity::calculate(&self.settings, &request));
        respond("calculate_volume", result)
    }

    // --- Conversions ---

    #[tool(description = "Convert a concentration between M, mM, µM and nM")]
    fn convert_concentration(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        respond(
            "convert_concentration",
            conversions::convert_concentration(&self.settings, p.value, &p.from_unit, &p.to_unit),
        )
    }

    #[tool(description = "Convert a volume between L, mL and µL")]
    fn convert_volume(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        respond(
            "convert_volume",
            conversions::convert_volume(&self.settings, p.value, &p.from_unit, &p.to_unit),
        )
    }

    #[tool(description = "Convert a mass between g, mg and µg")]
    fn convert_mass(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        respond(
            "convert_mass",
            conversions::convert_mass(&self.settings, p.value, &p.from_unit, &p.to_unit),
        )
    }

    // --- Protein Assay ---

    #[tool(description = "Fit a protein assay standard curve from duplicate absorbances of the nine standards A1-A9 (2.0 down to 0 mg/mL)")]
    fn protein_standard_curve(&self, Parameters(p): Parameters<StandardCurveParams>) -> Result<CallToolResult, McpError> {
        respond(
            "protein_standard_curve",
            protein_assay::standard_curve(&self.settings, &p.absorbances),
        )
    }

    #[tool(description = "Compute sample protein concentrations (mg/mL) from absorbances using a standard curve, with optional total yield")]
    fn protein_sample_concentration(&self, Parameters(p): Parameters<SampleConcentrationParams>) -> Result<CallToolResult, McpError> {
        respond(
            "protein_sample_concentration",
            protein_assay::sample_concentrations(
                &self.settings,
                &p.absorbances,
                p.slope,
                p.intercept,
                p.dilution_factor,
                p.total_volume_ul,
            ),
        )
    }

    // --- Assembly ---

    #[tool(description = "Plan a Gibson/HiFi DNA assembly reaction: µL of each fragment, master mix and water")]
    fn assembly_protocol(&self, Parameters(p): Parameters<AssemblyProtocolParams>) -> Result<CallToolResult, McpError> {
        let fragments: Vec<Fragment> = p
            .fragments
            .into_iter()
            .map(|f| Fragment::new(f.name, f.length_bp, f.concentration_ng_ul, f.is_vector))
            .collect();
        let settings = AssemblySettings {
            total_reaction_volume_ul: p.total_reaction_volume_ul,
            master_mix_strength: p.master_mix_strength,
            vector_pmol: p.vector_pmol,
            insert_molar_excess: p.insert_molar_excess,
        };
        respond(
            "assembly_protocol",
            assembly::assembly_protocol(&self.settings, &fragments, &settings),
        )
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LabzenService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "labzen".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("LabZen Lab Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "LabZen - molarity, unit conversion, protein assay and DNA assembly calculators. \
                 Call labzen_instructions before a calculation session. \
                 Reagents: list_reagents/get_reagent (or reagent=\"Custom\" with molecular_weight). \
                 Molarity: calculate_mass/calculate_molarity/calculate_volume. \
                 Conversions: convert_concentration/convert_volume/convert_mass. \
                 Protein assay: protein_standard_curve, protein_sample_concentration. \
                 Assembly: assembly_protocol."
                    .into(),
            ),
        }
    }
}
