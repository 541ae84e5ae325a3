use super::profile::BankProfile;
use super::record::Record;
use super::title::BillingTitle;
use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

/// Batch-level facts a layout may print in its header or trailer.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInfo {
    pub generated_at: NaiveDateTime,
    pub title_count: usize,
    pub total_amount: Decimal,
}

impl BatchInfo {
    pub fn new(generated_at: NaiveDateTime, titles: &[BillingTitle]) -> Self {
        Self {
            generated_at,
            title_count: titles.len(),
            total_amount: titles.iter().map(BillingTitle::amount_or_zero).sum(),
        }
    }

    pub fn generated_on(&self) -> NaiveDate {
        self.generated_at.date()
    }
}

/// Column geometry of one bank's CNAB 400 dialect.
///
/// Implementations are stateless; the assembler drives them in the fixed
/// order header, details, trailer and assigns the sequence numbers.
pub trait BankLayout: Send + Sync {
    /// Three-digit code of the bank.
    fn bank_code(&self) -> &'static str;

    fn bank_name(&self) -> &'static str;

    fn validate_profile(&self, profile: &BankProfile) -> Result<()> {
        profile.validate()
    }

    fn validate_title(&self, title: &BillingTitle) -> Result<()> {
        title.validate()
    }

    fn render_header(&self, profile: &BankProfile, batch: &BatchInfo, sequence: u32)
    -> Result<Record>;

    /// Renders the detail block of one title. Each returned record takes its
    /// own sequence number, starting at `sequence`.
    fn render_detail(
        &self,
        profile: &BankProfile,
        title: &BillingTitle,
        sequence: u32,
        batch: &BatchInfo,
    ) -> Result<Vec<Record>>;

    fn render_trailer(
        &self,
        profile: &BankProfile,
        batch: &BatchInfo,
        total_records: u32,
        sequence: u32,
    ) -> Result<Record>;
}

/// Destination of rendered remittance files.
pub trait RemittanceSink: Send + Sync {
    /// Makes sure `dir` exists and can receive a file.
    fn prepare(&self, dir: &Path) -> Result<()>;

    /// Stores all records at once and returns where they ended up.
    fn write(&self, dir: &Path, file_name: &str, records: &[Record]) -> Result<PathBuf>;
}

pub type BankLayoutBox = Box<dyn BankLayout>;
pub type BankLayoutFactory = Box<dyn Fn() -> BankLayoutBox + Send + Sync>;
pub type RemittanceSinkBox = Box<dyn RemittanceSink>;
