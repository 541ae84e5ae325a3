use crate::domain::profile::BankProfile;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parses a bank profile from any JSON source.
///
/// Only syntax and types are checked here; required fields are enforced by
/// the bank layout before rendering.
pub fn read_profile<R: Read>(source: R) -> Result<BankProfile> {
    Ok(serde_json::from_reader(source)?)
}

pub fn load_profile(path: &Path) -> Result<BankProfile> {
    read_profile(BufReader::new(File::open(path)?))
}
