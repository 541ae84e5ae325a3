//! Caixa Econômica Federal (104), SIGCB CNAB 400.

use super::{document_code, issue_date};
use crate::domain::format::{alphanumeric, calendar_date, integer, monetary, numeric};
use crate::domain::ports::{BankLayout, BatchInfo};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RecordKind, RecordWriter};
use crate::domain::title::{BillingTitle, DocumentKind};
use crate::error::Result;
use rust_decimal::Decimal;

pub const CODE: &str = "104";

/// Our-number modality for titles registered by the beneficiary.
const OUR_NUMBER_MODALITY: &str = "14";

#[derive(Debug, Default, Clone, Copy)]
pub struct Caixa;

impl BankLayout for Caixa {
    fn bank_code(&self) -> &'static str {
        CODE
    }

    fn bank_name(&self) -> &'static str {
        "C ECON FEDERAL"
    }

    fn validate_profile(&self, profile: &BankProfile) -> Result<()> {
        profile.validate()?;
        profile.require("assignor_document", &profile.assignor_document)
    }

    fn render_header(
        &self,
        profile: &BankProfile,
        batch: &BatchInfo,
        sequence: u32,
    ) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Header);
        w.field(1, 1, "0")
            .field(2, 2, "1")
            .field(3, 9, "REMESSA")
            .field(10, 11, "01")
            .field(12, 26, alphanumeric("COBRANCA", 15))
            .field(27, 30, numeric(&profile.branch, 4))
            .field(31, 36, numeric(&profile.assignor_code, 6))
            .blank(37, 46)
            .field(47, 76, alphanumeric(&profile.assignor_name, 30))
            .field(77, 79, CODE)
            .field(80, 94, alphanumeric(self.bank_name(), 15))
            .field(95, 100, calendar_date(Some(batch.generated_on()), 6))
            .blank(101, 389)
            .field(390, 394, integer(profile.remittance_number.into(), 5))
            .sequence(sequence);
        w.finish()
    }

    fn render_detail(
        &self,
        profile: &BankProfile,
        title: &BillingTitle,
        sequence: u32,
        batch: &BatchInfo,
    ) -> Result<Vec<Record>> {
        let assignor_kind = DocumentKind::from_document(&profile.assignor_document);
        let charges_penalty =
            profile.penalty_percent > Decimal::ZERO || title.penalty > Decimal::ZERO;
        let penalty_date = if charges_penalty { title.due_date } else { None };
        let our_number = format!(
            "{OUR_NUMBER_MODALITY}{}",
            numeric(&title.our_number_digits(), 15)
        );

        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .field(2, 3, document_code(assignor_kind))
            .field(4, 17, numeric(&profile.assignor_document, 14))
            .field(18, 21, numeric(&profile.branch, 4))
            .field(22, 27, numeric(&profile.assignor_code, 6))
            .field(28, 28, "2")
            .field(29, 29, "0")
            .field(30, 31, "00")
            .field(32, 56, alphanumeric(&title.id, 25))
            .field(57, 73, our_number)
            .blank(74, 75)
            .blank(76, 76)
            .blank(77, 106)
            .field(107, 108, "01")
            .field(109, 110, "01")
            .field(111, 120, alphanumeric(&title.id, 10))
            .field(121, 126, calendar_date(title.due_date, 6))
            .field(127, 139, monetary(title.amount_or_zero(), 13))
            .field(140, 142, CODE)
            .zeros(143, 147)
            .field(148, 149, "01")
            .field(150, 150, "A")
            .field(151, 156, calendar_date(issue_date(title, batch), 6))
            .zeros(157, 158)
            .zeros(159, 160)
            .field(161, 173, monetary(title.interest, 13))
            .field(174, 179, calendar_date(title.discount_until, 6))
            .field(180, 192, monetary(title.discount, 13))
            .zeros(193, 205)
            .zeros(206, 218)
            .field(219, 220, document_code(title.debtor_kind()))
            .field(221, 234, numeric(&title.debtor_document, 14))
            .field(235, 274, alphanumeric(&title.debtor_name, 40))
            .field(275, 314, alphanumeric(&title.address, 40))
            .field(315, 326, alphanumeric(&title.neighborhood, 12))
            .field(327, 334, numeric(&title.postal_code, 8))
            .field(335, 349, alphanumeric(&title.city, 15))
            .field(350, 351, alphanumeric(&title.state, 2))
            .field(352, 357, calendar_date(penalty_date, 6))
            .field(358, 367, monetary(title.penalty, 10))
            .blank(368, 389)
            .zeros(390, 391)
            .zeros(392, 393)
            .field(394, 394, "1")
            .sequence(sequence);
        Ok(vec![w.finish()?])
    }

    fn render_trailer(
        &self,
        _profile: &BankProfile,
        _batch: &BatchInfo,
        _total_records: u32,
        sequence: u32,
    ) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9").blank(2, 394).sequence(sequence);
        w.finish()
    }
}
