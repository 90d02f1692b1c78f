//! Protein assay standard curve
//!
//! Nine-point standard series in duplicate, fitted by least squares, then
//! used to read sample concentrations off their absorbance.

use serde::Serialize;

use crate::error::{ensure_non_negative, CalcError, CalcResult};

/// Standard concentrations (mg/mL) for wells A1 through A9
pub const STANDARD_CONCENTRATIONS: [f64; 9] = [2.0, 1.5, 1.0, 0.75, 0.5, 0.25, 0.125, 0.025, 0.0];

/// One standard well with its duplicate readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardPoint {
    pub concentration_mg_ml: f64,
    pub absorbance_rep1: f64,
    pub absorbance_rep2: f64,
    pub absorbance_mean: f64,
}

impl StandardPoint {
    pub fn new(concentration_mg_ml: f64, absorbance_rep1: f64, absorbance_rep2: f64) -> Self {
        Self {
            concentration_mg_ml,
            absorbance_rep1,
            absorbance_rep2,
            absorbance_mean: (absorbance_rep1 + absorbance_rep2) / 2.0,
        }
    }
}

/// `absorbance = slope × concentration + intercept`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardCurve {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub points: Vec<StandardPoint>,
}

/// Parse pasted absorbance readings for the nine standards.
///
/// Each of the first nine non-empty lines holds two whitespace-separated
/// readings (rep1, rep2), paired in order with [`STANDARD_CONCENTRATIONS`].
/// Extra columns and lines are ignored.
pub fn parse_standard_duplicates(raw_text: &str) -> CalcResult<Vec<StandardPoint>> {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < STANDARD_CONCENTRATIONS.len() {
        return Err(CalcError::InsufficientData(format!(
            "expected {} lines of standard absorbances (A1-A9), got {}",
            STANDARD_CONCENTRATIONS.len(),
            lines.len()
        )));
    }

    lines
        .iter()
        .zip(STANDARD_CONCENTRATIONS)
        .enumerate()
        .map(|(i, (line, conc))| {
            let field = format!("standard line {}", i + 1);
            let mut parts = line.split_whitespace();
            let (Some(a), Some(b)) = (parts.next(), parts.next()) else {
                return Err(CalcError::invalid_input(field, "needs two absorbance columns"));
            };
            let rep1 = parse_reading(&field, a)?;
            let rep2 = parse_reading(&field, b)?;
            Ok(StandardPoint::new(conc, rep1, rep2))
        })
        .collect()
}

fn parse_reading(field: &str, s: &str) -> CalcResult<f64> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::invalid_input(field, format!("'{}' is not a number", s))),
    }
}

/// Ordinary least-squares fit of mean absorbance against concentration
pub fn fit_standard_curve(points: &[StandardPoint]) -> CalcResult<StandardCurve> {
    if points.len() < 2 {
        return Err(CalcError::InsufficientData(
            "need at least 2 points for regression".to_string(),
        ));
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.concentration_mg_ml).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.absorbance_mean).sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.concentration_mg_ml - mean_x;
        let dy = p.absorbance_mean - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Err(CalcError::DivisionByZero {
            divisor: "standard concentration variance",
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // Flat absorbances fit a flat line exactly
    let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

    Ok(StandardCurve {
        slope,
        intercept,
        r_squared,
        points: points.to_vec(),
    })
}

/// Sample concentration (mg/mL) read off the curve, scaled by dilution.
///
/// Readings below the intercept clamp to zero.
pub fn sample_concentration(
    absorbance: f64,
    slope: f64,
    intercept: f64,
    dilution_factor: f64,
) -> CalcResult<f64> {
    if !absorbance.is_finite() {
        return Err(CalcError::invalid_input("absorbance", "must be a finite number"));
    }
    if !dilution_factor.is_finite() || dilution_factor < 1.0 {
        return Err(CalcError::invalid_input(
            "dilution factor",
            format!("must be at least 1 (got {})", dilution_factor),
        ));
    }
    if slope == 0.0 {
        return Err(CalcError::DivisionByZero { divisor: "slope" });
    }
    let conc = ((absorbance - intercept) / slope).max(0.0);
    Ok(conc * dilution_factor)
}

/// Total protein (mg) in `total_volume_ul` at `concentration_mg_ml`
pub fn total_yield(concentration_mg_ml: f64, total_volume_ul: f64) -> CalcResult<f64> {
    let c = ensure_non_negative("concentration", concentration_mg_ml)?;
    let v = ensure_non_negative("total volume", total_volume_ul)?;
    Ok(c * v / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Absorbance = 0.5 × conc + 0.05, both replicates offset ±0.01
    fn linear_standards() -> String {
        STANDARD_CONCENTRATIONS
            .iter()
            .map(|c| {
                let a = 0.5 * c + 0.05;
                format!("{:.4}\t{:.4}", a - 0.01, a + 0.01)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_standards() {
        let points = parse_standard_duplicates(&linear_standards()).unwrap();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0].concentration_mg_ml, 2.0);
        assert!((points[0].absorbance_mean - 1.05).abs() < 1e-9);
        assert_eq!(points[8].concentration_mg_ml, 0.0);
    }

    #[test]
    fn test_parse_ignores_blank_and_extra_lines() {
        let text = format!("\n{}\n\n0.9 0.9\n", linear_standards());
        let points = parse_standard_duplicates(&text).unwrap();
        assert_eq!(points.len(), 9);
    }

    #[test]
    fn test_parse_too_few_lines() {
        let text = "0.1 0.1\n0.2 0.2\n";
        assert!(matches!(
            parse_standard_duplicates(text),
            Err(CalcError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_parse_missing_column() {
        let mut lines: Vec<String> = linear_standards().lines().map(String::from).collect();
        lines[3] = "0.4".to_string();
        let err = parse_standard_duplicates(&lines.join("\n")).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "standard line 4"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_numeric() {
        let mut lines: Vec<String> = linear_standards().lines().map(String::from).collect();
        lines[0] = "abc 0.4".to_string();
        assert!(matches!(
            parse_standard_duplicates(&lines.join("\n")),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_fit_recovers_line() {
        let points = parse_standard_duplicates(&linear_standards()).unwrap();
        let curve = fit_standard_curve(&points).unwrap();
        assert!((curve.slope - 0.5).abs() < 1e-6);
        assert!((curve.intercept - 0.05).abs() < 1e-6);
        assert!((curve.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_needs_two_points() {
        let points = [StandardPoint::new(1.0, 0.5, 0.5)];
        assert!(matches!(
            fit_standard_curve(&points),
            Err(CalcError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_fit_identical_concentrations() {
        let points = [StandardPoint::new(1.0, 0.5, 0.5), StandardPoint::new(1.0, 0.6, 0.6)];
        assert!(matches!(
            fit_standard_curve(&points),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_sample_concentration() {
        // (0.55 - 0.05) / 0.5 = 1.0 mg/mL, diluted 5x
        let conc = sample_concentration(0.55, 0.5, 0.05, 5.0).unwrap();
        assert!((conc - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_below_blank_clamps_to_zero() {
        assert_eq!(sample_concentration(0.01, 0.5, 0.05, 2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_sample_concentration_errors() {
        assert!(matches!(
            sample_concentration(0.5, 0.0, 0.05, 1.0),
            Err(CalcError::DivisionByZero { divisor: "slope" })
        ));
        assert!(matches!(
            sample_concentration(0.5, 0.5, 0.05, 0.5),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_total_yield() {
        let mg = total_yield(1.5, 200.0).unwrap();
        assert!((mg - 0.3).abs() < 1e-12);
        assert!(total_yield(-1.0, 200.0).is_err());
    }
}
