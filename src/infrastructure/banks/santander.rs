//! Santander (033) CNAB 400.
//!
//! The trailer carries the record count and the sum of all title amounts.

use super::{document_code, issue_date};
use crate::domain::checksum;
use crate::domain::format::{alphanumeric, calendar_date, integer, monetary, numeric};
use crate::domain::ports::{BankLayout, BatchInfo};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RecordKind, RecordWriter};
use crate::domain::title::{BillingTitle, DocumentKind};
use crate::error::Result;
use rust_decimal::Decimal;

pub const CODE: &str = "033";

#[derive(Debug, Default, Clone, Copy)]
pub struct Santander;

impl Santander {
    /// Seven-digit our number followed by its modulo-11 (base 9) digit.
    pub fn our_number(title: &BillingTitle) -> String {
        let number = numeric(&title.our_number_digits(), 7);
        let digit = checksum::modulo11(&number, 9);
        format!("{number}{digit}")
    }
}

impl BankLayout for Santander {
    fn bank_code(&self) -> &'static str {
        CODE
    }

    fn bank_name(&self) -> &'static str {
        "SANTANDER"
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
            .field(27, 46, numeric(&profile.assignor_code, 20))
            .field(47, 76, alphanumeric(&profile.assignor_name, 30))
            .field(77, 79, CODE)
            .field(80, 94, alphanumeric(self.bank_name(), 15))
            .field(95, 100, calendar_date(Some(batch.generated_on()), 6))
            .zeros(101, 116)
            .blank(117, 391)
            .field(392, 394, integer(profile.remittance_number.into(), 3))
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
        let has_penalty = profile.penalty_percent > Decimal::ZERO;
        let account_complement = format!(
            "{}{}",
            numeric(&profile.account, 1),
            numeric(&profile.account_digit, 1)
        );

        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .field(2, 3, document_code(assignor_kind))
            .field(4, 17, numeric(&profile.assignor_document, 14))
            .field(18, 37, numeric(&profile.assignor_code, 20))
            .field(38, 62, alphanumeric(&title.id, 25))
            .field(63, 70, Self::our_number(title))
            .zeros(71, 76)
            .blank(77, 77)
            .field(78, 78, if has_penalty { "4" } else { "0" })
            .field(79, 82, monetary(profile.penalty_percent, 4))
            .zeros(83, 84)
            .zeros(85, 97)
            .blank(98, 101)
            .field(
                102,
                107,
                calendar_date(if has_penalty { title.due_date } else { None }, 6),
            )
            .field(108, 108, numeric(&profile.wallet, 1))
            .field(109, 110, "01")
            .field(111, 120, alphanumeric(&title.id, 10))
            .field(121, 126, calendar_date(title.due_date, 6))
            .field(127, 139, monetary(title.amount_or_zero(), 13))
            .field(140, 142, CODE)
            .zeros(143, 147)
            .field(148, 149, "01")
            .field(150, 150, "N")
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
            .blank(352, 381)
            .blank(382, 382)
            .field(383, 383, "I")
            .field(384, 385, account_complement)
            .blank(386, 391)
            .zeros(392, 393)
            .blank(394, 394)
            .sequence(sequence);
        Ok(vec![w.finish()?])
    }

    fn render_trailer(
        &self,
        _profile: &BankProfile,
        batch: &BatchInfo,
        total_records: u32,
        sequence: u32,
    ) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9")
            .field(2, 7, integer(total_records.into(), 6))
            .field(8, 20, monetary(batch.total_amount, 13))
            .zeros(21, 394)
            .sequence(sequence);
        w.finish()
    }
}
