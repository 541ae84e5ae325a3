//! Input adapters used by the binary: titles from CSV and the bank profile
//! from JSON.

pub mod csv;
pub mod json;
