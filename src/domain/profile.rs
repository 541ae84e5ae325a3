use crate::error::{RemessaError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The only CNAB layout family produced by this crate.
pub const CNAB_400: u16 = 400;

fn default_cnab_version() -> u16 {
    CNAB_400
}

fn default_remittance_number() -> u32 {
    1
}

/// Collection agreement between the assignor and one bank.
///
/// String fields default to empty so that a missing value is reported by
/// [`BankProfile::validate`] with the field's name instead of by the
/// deserializer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BankProfile {
    #[serde(default)]
    pub bank_code: String,
    /// Display name of the agreement. Carried input only; no dialect prints
    /// it, the header uses the bank's own name.
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_cnab_version")]
    pub cnab_version: u16,
    /// Cedente: the creditor the bank collects on behalf of.
    #[serde(default)]
    pub assignor_name: String,
    #[serde(default)]
    pub assignor_code: String,
    /// CPF or CNPJ of the assignor.
    #[serde(default)]
    pub assignor_document: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub branch_digit: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub account_digit: String,
    /// Carteira.
    #[serde(default)]
    pub wallet: String,
    /// Monthly penalty percentage (e.g. `2.00` for 2%).
    #[serde(default)]
    pub penalty_percent: Decimal,
    /// Monthly interest percentage. Carried input only: every dialect prints
    /// the interest amount already computed on each title.
    #[serde(default)]
    pub interest_percent: Decimal,
    #[serde(default)]
    pub output_dir: PathBuf,
    /// Sequential remittance counter printed by banks that track it.
    #[serde(default = "default_remittance_number")]
    pub remittance_number: u32,
}

impl BankProfile {
    /// Presence checks shared by every dialect.
    pub fn validate(&self) -> Result<()> {
        if self.cnab_version != CNAB_400 {
            return Err(RemessaError::ValidationError(format!(
                "unsupported CNAB version {} (only {CNAB_400} is available)",
                self.cnab_version
            )));
        }
        require(ENTITY, "branch", &self.branch)?;
        require(ENTITY, "account", &self.account)?;
        require(ENTITY, "assignor_code", &self.assignor_code)?;
        require(ENTITY, "assignor_name", &self.assignor_name)?;
        Ok(())
    }

    /// Presence check for an optional field a dialect prints.
    pub fn require(&self, field: &str, value: &str) -> Result<()> {
        require(ENTITY, field, value)
    }
}

const ENTITY: &str = "bank profile";

/// Fails with a validation error naming `field` when `value` is blank.
pub fn require(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(RemessaError::missing_field(entity, field))
    } else {
        Ok(())
    }
}
