//! Protein Assay MCP Tools

use serde::Serialize;

use crate::chemistry::protein_assay::{
    fit_standard_curve, parse_standard_duplicates, sample_concentration, total_yield,
    StandardPoint,
};
use crate::config::Settings;
use crate::error::CalcResult;

#[derive(Debug, Serialize)]
pub struct StandardCurveResponse {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub equation: String,
    pub points: Vec<StandardPoint>,
}

#[derive(Debug, Serialize)]
pub struct SampleResult {
    pub absorbance: f64,
    pub concentration_mg_ml: f64,
    /// Present when a total volume was given
    pub total_yield_mg: Option<f64>,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct SampleConcentrationResponse {
    pub slope: f64,
    pub intercept: f64,
    pub dilution_factor: f64,
    pub total_volume_ul: Option<f64>,
    pub samples: Vec<SampleResult>,
}

/// Fit a standard curve to pasted duplicate absorbances
pub fn standard_curve(settings: &Settings, raw_text: &str) -> CalcResult<StandardCurveResponse> {
    let points = parse_standard_duplicates(raw_text)?;
    let curve = fit_standard_curve(&points)?;
    tracing::debug!(slope = curve.slope, intercept = curve.intercept, r2 = curve.r_squared, "Fitted standard curve");

    let p = settings.precision;
    Ok(StandardCurveResponse {
        equation: format!(
            "Abs = {:.*} × Conc + {:.*} (R² = {:.*})",
            p, curve.slope, p, curve.intercept, p, curve.r_squared
        ),
        slope: curve.slope,
        intercept: curve.intercept,
        r_squared: curve.r_squared,
        points: curve.points,
    })
}

/// Concentrations (and optionally total yields) for a batch of readings
pub fn sample_concentrations(
    settings: &Settings,
    absorbances: &[f64],
    slope: f64,
    intercept: f64,
    dilution_factor: f64,
    total_volume_ul: Option<f64>,
) -> CalcResult<SampleConcentrationResponse> {
    let samples = absorbances
        .iter()
        .map(|&absorbance| {
            let conc = sample_concentration(absorbance, slope, intercept, dilution_factor)?;
            let yield_mg = total_volume_ul.map(|v| total_yield(conc, v)).transpose()?;
            let mut display = settings.format_quantity(conc, "mg/mL");
            if let Some(mg) = yield_mg {
                display.push_str(&format!(" ({} total)", settings.format_quantity(mg, "mg")));
            }
            Ok(SampleResult {
                absorbance,
                concentration_mg_ml: conc,
                total_yield_mg: yield_mg,
                display,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    Ok(SampleConcentrationResponse {
        slope,
        intercept,
        dilution_factor,
        total_volume_ul,
        samples,
    })
}
