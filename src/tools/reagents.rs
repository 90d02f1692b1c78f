//! Reagent MCP Tools

use serde::Serialize;

use crate::chemistry::reagents::{self, Reagent, CUSTOM_REAGENT};
use crate::error::CalcResult;

#[derive(Debug, Serialize)]
pub struct ReagentListResponse {
    pub reagents: Vec<Reagent>,
    pub count: usize,
    /// Name that selects a caller-supplied molecular weight
    pub custom_option: &'static str,
}

pub fn list_reagents() -> ReagentListResponse {
    let reagents = reagents::list().to_vec();
    ReagentListResponse {
        count: reagents.len(),
        reagents,
        custom_option: CUSTOM_REAGENT,
    }
}

pub fn get_reagent(name: &str) -> CalcResult<Reagent> {
    reagents::lookup(name).copied()
}
