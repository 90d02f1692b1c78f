//! LabZen Library
//!
//! Molarity, unit conversion, protein assay and DNA assembly calculators.

pub mod build_info;
pub mod chemistry;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;

pub use error::{CalcError, CalcResult, ErrorKind};
