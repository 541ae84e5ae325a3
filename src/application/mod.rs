//! Application layer orchestrating remittance generation.
//!
//! [`registry::BankRegistry`] maps bank codes to their CNAB 400 dialect and
//! [`assembler::RemittanceAssembler`] drives a dialect through header,
//! details and trailer before handing the records to a sink.

pub mod assembler;
pub mod registry;
