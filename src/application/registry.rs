use crate::domain::ports::{BankLayoutBox, BankLayoutFactory};
use crate::error::{RemessaError, Result};
use crate::infrastructure::banks;
use std::collections::BTreeMap;

/// Maps three-digit bank codes to the factory of their layout.
///
/// Built once at startup and read-only afterwards; registering a code twice
/// is rejected so an existing dialect can never be replaced.
#[derive(Default)]
pub struct BankRegistry {
    factories: BTreeMap<String, BankLayoutFactory>,
}

impl BankRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every dialect shipped with the crate.
    pub fn with_default_banks() -> Self {
        let mut registry = Self::new();
        for (code, factory) in banks::default_factories() {
            registry.factories.insert(code.to_string(), factory);
        }
        registry
    }

    pub fn register(&mut self, code: &str, factory: BankLayoutFactory) -> Result<()> {
        let key = normalize_code(code)?;
        if self.factories.contains_key(&key) {
            return Err(RemessaError::ValidationError(format!(
                "bank code {key} is already registered"
            )));
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Builds the layout registered for `code`.
    pub fn resolve(&self, code: &str) -> Result<BankLayoutBox> {
        let key = normalize_code(code)?;
        self.factories
            .get(&key)
            .map(|factory| factory())
            .ok_or_else(|| unsupported(code))
    }

    pub fn is_supported(&self, code: &str) -> bool {
        normalize_code(code).is_ok_and(|key| self.factories.contains_key(&key))
    }

    /// Registered codes in ascending order.
    pub fn supported_codes(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

/// Left-zero-pads a code of one to three digits.
fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(RemessaError::missing_field("bank profile", "bank_code"));
    }
    if code.len() > 3 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(unsupported(code));
    }
    Ok(format!("{code:0>3}"))
}

fn unsupported(code: &str) -> RemessaError {
    RemessaError::ValidationError(format!("unsupported bank code: {}", code.trim()))
}
