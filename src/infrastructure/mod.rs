//! Adapters behind the domain ports: the bank dialects and the sinks that
//! receive rendered remittances.

pub mod banks;
pub mod file_sink;
pub mod in_memory;
