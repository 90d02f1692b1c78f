//! Runtime settings
//!
//! Read once from the environment at startup.

use serde::Serialize;

/// Decimal places shown in result strings
pub const DEFAULT_PRECISION: usize = 4;
pub const MAX_PRECISION: usize = 12;

pub const PRECISION_ENV: &str = "LABZEN_PRECISION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_precision_var(std::env::var(PRECISION_ENV).ok().as_deref())
    }

    fn from_precision_var(raw: Option<&str>) -> Self {
        let precision = match raw.map(str::trim) {
            None | Some("") => DEFAULT_PRECISION,
            Some(s) => match s.parse::<usize>() {
                Ok(p) if p > MAX_PRECISION => {
                    tracing::warn!("{}={} exceeds {}, clamping", PRECISION_ENV, p, MAX_PRECISION);
                    MAX_PRECISION
                }
                Ok(p) => p,
                Err(_) => {
                    tracing::warn!(
                        "{}='{}' is not a number, using default {}",
                        PRECISION_ENV,
                        s,
                        DEFAULT_PRECISION
                    );
                    DEFAULT_PRECISION
                }
            },
        };
        Self { precision }
    }

    /// Render a value with the configured fixed precision, e.g. "29.2200 g"
    pub fn format_quantity(&self, value: f64, unit: &str) -> String {
        if unit.is_empty() {
            format!("{:.*}", self.precision, value)
        } else {
            format!("{:.*} {}", self.precision, value, unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_precision() {
        let settings = Settings::default();
        assert_eq!(settings.format_quantity(29.22, "g"), "29.2200 g");
        assert_eq!(settings.format_quantity(1000.0, "mM"), "1000.0000 mM");
    }

    #[test]
    fn test_precision_var() {
        assert_eq!(Settings::from_precision_var(None).precision, 4);
        assert_eq!(Settings::from_precision_var(Some("2")).precision, 2);
        assert_eq!(Settings::from_precision_var(Some(" 0 ")).precision, 0);
        assert_eq!(Settings::from_precision_var(Some("99")).precision, MAX_PRECISION);
        assert_eq!(Settings::from_precision_var(Some("abc")).precision, 4);
    }

    #[test]
    fn test_format_without_unit() {
        let settings = Settings { precision: 2 };
        assert_eq!(settings.format_quantity(0.98765, ""), "0.99");
    }
}
