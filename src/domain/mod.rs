//! Remittance domain: input models, record model, field formatting and the
//! ports implemented by bank dialects and sinks.

pub mod checksum;
pub mod format;
pub mod ports;
pub mod profile;
pub mod record;
pub mod title;
