use super::registry::BankRegistry;
use crate::domain::ports::{BankLayout, BatchInfo, RemittanceSinkBox};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RemittanceFile, SEQUENCE_WIDTH};
use crate::domain::title::BillingTitle;
use crate::error::{RemessaError, Result};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use tracing::{debug, info};

/// Highest sequence number that fits in columns 395-400.
const MAX_SEQUENCE: u32 = 10u32.pow(SEQUENCE_WIDTH as u32) - 1;

/// Turns a bank profile and its titles into a remittance file.
///
/// `RemittanceAssembler` owns the bank registry and the sink. Every batch is
/// validated in full before the sink is touched, so a rejected batch never
/// leaves a file behind.
pub struct RemittanceAssembler {
    registry: BankRegistry,
    sink: RemittanceSinkBox,
}

impl RemittanceAssembler {
    pub fn new(registry: BankRegistry, sink: RemittanceSinkBox) -> Self {
        Self { registry, sink }
    }

    pub fn registry(&self) -> &BankRegistry {
        &self.registry
    }

    /// Generates the remittance stamped with the local clock and returns the
    /// path the sink stored it at.
    pub fn generate(&self, profile: &BankProfile, titles: &[BillingTitle]) -> Result<PathBuf> {
        self.generate_at(profile, titles, Local::now().naive_local())
    }

    /// Same as [`RemittanceAssembler::generate`] with an explicit timestamp,
    /// which makes the output reproducible.
    pub fn generate_at(
        &self,
        profile: &BankProfile,
        titles: &[BillingTitle],
        generated_at: NaiveDateTime,
    ) -> Result<PathBuf> {
        let layout = self.registry.resolve(&profile.bank_code)?;
        validate(layout.as_ref(), profile, titles)?;
        if profile.output_dir.as_os_str().is_empty() {
            return Err(RemessaError::missing_field("bank profile", "output_dir"));
        }

        self.sink.prepare(&profile.output_dir)?;
        let file = assemble(layout.as_ref(), profile, titles, generated_at)?;
        let path = self
            .sink
            .write(&profile.output_dir, &file.file_name, &file.records)?;

        info!(
            bank = layout.bank_code(),
            titles = titles.len(),
            records = file.records.len(),
            path = %path.display(),
            "remittance written"
        );
        Ok(path)
    }

    /// Renders the remittance without handing it to the sink.
    pub fn build(
        &self,
        profile: &BankProfile,
        titles: &[BillingTitle],
        generated_at: NaiveDateTime,
    ) -> Result<RemittanceFile> {
        let layout = self.registry.resolve(&profile.bank_code)?;
        validate(layout.as_ref(), profile, titles)?;
        assemble(layout.as_ref(), profile, titles, generated_at)
    }
}

/// `CB<bank><ddmmyy><HHMMSS>.REM`
pub fn file_name(bank_code: &str, generated_at: NaiveDateTime) -> String {
    format!("CB{}{}.REM", bank_code, generated_at.format("%d%m%y%H%M%S"))
}

fn validate(layout: &dyn BankLayout, profile: &BankProfile, titles: &[BillingTitle]) -> Result<()> {
    layout.validate_profile(profile)?;
    for title in titles {
        layout.validate_title(title)?;
    }
    Ok(())
}

fn assemble(
    layout: &dyn BankLayout,
    profile: &BankProfile,
    titles: &[BillingTitle],
    generated_at: NaiveDateTime,
) -> Result<RemittanceFile> {
    let batch = BatchInfo::new(generated_at, titles);
    let mut records = Vec::with_capacity(titles.len() + 2);

    let mut sequence = 1;
    records.push(layout.render_header(profile, &batch, sequence)?);
    debug!(bank = layout.bank_code(), "header rendered");

    for title in titles {
        sequence = next_sequence(sequence)?;
        let block = layout.render_detail(profile, title, sequence, &batch)?;
        debug!(title = %title.id, records = block.len(), sequence, "detail rendered");
        // An empty block consumes no number.
        match u32::try_from(block.len()) {
            Ok(0) => sequence -= 1,
            Ok(n) => sequence += n - 1,
            Err(_) => return Err(too_many_records()),
        }
        records.extend(block);
    }

    sequence = next_sequence(sequence)?;
    records.push(layout.render_trailer(profile, &batch, sequence, sequence)?);

    records.iter().try_for_each(Record::check_length)?;
    Ok(RemittanceFile {
        file_name: file_name(layout.bank_code(), generated_at),
        records,
    })
}

fn next_sequence(sequence: u32) -> Result<u32> {
    if sequence >= MAX_SEQUENCE {
        return Err(too_many_records());
    }
    Ok(sequence + 1)
}

fn too_many_records() -> RemessaError {
    RemessaError::ValidationError(format!("remittance exceeds {MAX_SEQUENCE} records"))
}
