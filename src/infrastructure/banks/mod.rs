//! CNAB 400 dialects, one type per bank.
//!
//! Column ranges in these modules are 1-based and inclusive, as printed in
//! the banks' layout manuals.

pub mod bradesco;
pub mod caixa;
pub mod inter;
pub mod itau;
pub mod santander;
pub mod sicredi;

use crate::domain::format;
use crate::domain::ports::{BankLayout, BankLayoutBox, BankLayoutFactory, BatchInfo};
use crate::domain::title::{BillingTitle, DocumentKind};
use chrono::NaiveDate;

pub use bradesco::Bradesco;
pub use caixa::Caixa;
pub use inter::Inter;
pub use itau::Itau;
pub use santander::Santander;
pub use sicredi::Sicredi;

/// Factories for every dialect shipped with the crate, keyed by bank code.
pub fn default_factories() -> Vec<(&'static str, BankLayoutFactory)> {
    vec![
        (bradesco::CODE, factory::<Bradesco>()),
        (caixa::CODE, factory::<Caixa>()),
        (itau::CODE, factory::<Itau>()),
        (santander::CODE, factory::<Santander>()),
        (sicredi::CODE, factory::<Sicredi>()),
        (inter::CODE, factory::<Inter>()),
    ]
}

fn factory<L: BankLayout + Default + 'static>() -> BankLayoutFactory {
    Box::new(|| Box::new(L::default()) as BankLayoutBox)
}

/// Two-digit registration type used by most dialects.
fn document_code(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Individual => "01",
        DocumentKind::Organization => "02",
    }
}

/// Issue date of a title, defaulting to the day the file is generated.
fn issue_date(title: &BillingTitle, batch: &BatchInfo) -> Option<NaiveDate> {
    title.issue_date.or(Some(batch.generated_on()))
}

/// Splits free text into `count` fixed-width message lines.
fn message_lines(text: &str, width: usize, count: usize) -> Vec<String> {
    let folded = format::alphanumeric(text, width * count);
    (0..count)
        .map(|i| folded[i * width..(i + 1) * width].to_string())
        .collect()
}
