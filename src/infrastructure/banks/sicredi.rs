//! Sicredi (748) CNAB 400, layout version 2.00.
//!
//! Sicredi prints full dates as `YYYYMMDD` in the header and in the
//! instruction date of each detail.

use super::issue_date;
use crate::domain::checksum;
use crate::domain::format::{alphanumeric, calendar_date, integer, iso_date, monetary, numeric};
use crate::domain::ports::{BankLayout, BatchInfo};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RecordKind, RecordWriter};
use crate::domain::title::{BillingTitle, DocumentKind};
use crate::error::Result;
use chrono::Datelike;

pub const CODE: &str = "748";

const LAYOUT_VERSION: &str = "2.00";

/// Byte of our numbers generated by the beneficiary (2 to 9).
const OUR_NUMBER_BYTE: char = '2';

#[derive(Debug, Default, Clone, Copy)]
pub struct Sicredi;

impl Sicredi {
    /// `YY` + byte + five-digit sequence + modulo-11 (base 9) digit computed
    /// over branch, post, beneficiary code and those eight digits.
    pub fn our_number(profile: &BankProfile, title: &BillingTitle, batch: &BatchInfo) -> String {
        let year = batch.generated_on().year().rem_euclid(100);
        let base = format!(
            "{year:02}{OUR_NUMBER_BYTE}{}",
            numeric(&title.our_number_digits(), 5)
        );
        let digit = checksum::modulo11(
            &format!(
                "{}{}{}{base}",
                numeric(&profile.branch, 4),
                numeric(&profile.branch_digit, 2),
                numeric(&profile.assignor_code, 5)
            ),
            9,
        );
        format!("{base}{digit}")
    }

    fn person_code(kind: DocumentKind) -> &'static str {
        match kind {
            DocumentKind::Individual => "1",
            DocumentKind::Organization => "2",
        }
    }
}

impl BankLayout for Sicredi {
    fn bank_code(&self) -> &'static str {
        CODE
    }

    fn bank_name(&self) -> &'static str {
        "SICREDI"
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
            .field(27, 31, numeric(&profile.assignor_code, 5))
            .field(32, 45, numeric(&profile.assignor_document, 14))
            .blank(46, 76)
            .field(77, 79, CODE)
            .field(80, 94, alphanumeric(self.bank_name(), 15))
            .field(95, 102, iso_date(Some(batch.generated_on())))
            .blank(103, 110)
            .field(111, 117, integer(profile.remittance_number.into(), 7))
            .blank(118, 390)
            .field(391, 394, LAYOUT_VERSION)
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
        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .field(2, 2, "A")
            .field(3, 3, "A")
            .field(4, 4, "A")
            .blank(5, 16)
            .field(17, 17, "A")
            .field(18, 18, "A")
            .field(19, 19, "A")
            .blank(20, 47)
            .field(48, 56, Self::our_number(profile, title, batch))
            .blank(57, 62)
            .field(63, 70, iso_date(Some(batch.generated_on())))
            .blank(71, 71)
            .field(72, 72, "N")
            .blank(73, 73)
            .field(74, 74, "B")
            .zeros(75, 76)
            .zeros(77, 78)
            .blank(79, 82)
            .zeros(83, 92)
            .field(93, 96, monetary(profile.penalty_percent, 4))
            .blank(97, 108)
            .field(109, 110, "01")
            .field(111, 120, alphanumeric(&title.id, 10))
            .field(121, 126, calendar_date(title.due_date, 6))
            .field(127, 139, monetary(title.amount_or_zero(), 13))
            .blank(140, 148)
            .field(149, 149, "A")
            .field(150, 150, "N")
            .field(151, 156, calendar_date(issue_date(title, batch), 6))
            .zeros(157, 158)
            .zeros(159, 160)
            .field(161, 173, monetary(title.interest, 13))
            .field(174, 179, calendar_date(title.discount_until, 6))
            .field(180, 192, monetary(title.discount, 13))
            .zeros(193, 205)
            .zeros(206, 218)
            .field(219, 219, Self::person_code(title.debtor_kind()))
            .zeros(220, 220)
            .field(221, 234, numeric(&title.debtor_document, 14))
            .field(235, 274, alphanumeric(&title.debtor_name, 40))
            .field(275, 314, alphanumeric(&title.address, 40))
            .zeros(315, 319)
            .zeros(320, 325)
            .blank(326, 326)
            .field(327, 334, numeric(&title.postal_code, 8))
            .zeros(335, 339)
            .blank(340, 353)
            .blank(354, 394)
            .sequence(sequence);
        Ok(vec![w.finish()?])
    }

    fn render_trailer(
        &self,
        profile: &BankProfile,
        _batch: &BatchInfo,
        _total_records: u32,
        sequence: u32,
    ) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9")
            .field(2, 2, "1")
            .field(3, 5, CODE)
            .field(6, 10, numeric(&profile.assignor_code, 5))
            .blank(11, 394)
            .sequence(sequence);
        w.finish()
    }
}
