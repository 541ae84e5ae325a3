//! Itaú (341) CNAB 400.

use super::{document_code, issue_date};
use crate::domain::format::{alphanumeric, calendar_date, monetary, numeric};
use crate::domain::ports::{BankLayout, BatchInfo};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RecordKind, RecordWriter};
use crate::domain::title::{BillingTitle, DocumentKind};
use crate::error::Result;
use rust_decimal::Decimal;

pub const CODE: &str = "341";

#[derive(Debug, Default, Clone, Copy)]
pub struct Itau;

impl BankLayout for Itau {
    fn bank_code(&self) -> &'static str {
        CODE
    }

    fn bank_name(&self) -> &'static str {
        "BANCO ITAU SA"
    }

    fn validate_profile(&self, profile: &BankProfile) -> Result<()> {
        profile.validate()?;
        profile.require("account_digit", &profile.account_digit)?;
        profile.require("assignor_document", &profile.assignor_document)?;
        profile.require("wallet", &profile.wallet)
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
            .zeros(31, 32)
            .field(33, 37, numeric(&profile.account, 5))
            .field(38, 38, numeric(&profile.account_digit, 1))
            .blank(39, 46)
            .field(47, 76, alphanumeric(&profile.assignor_name, 30))
            .field(77, 79, CODE)
            .field(80, 94, alphanumeric(self.bank_name(), 15))
            .field(95, 100, calendar_date(Some(batch.generated_on()), 6))
            .blank(101, 394)
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
        // Interest accrues from the day after the due date.
        let interest_from = if title.interest > Decimal::ZERO {
            title.due_date.and_then(|d| d.succ_opt())
        } else {
            None
        };

        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .field(2, 3, document_code(assignor_kind))
            .field(4, 17, numeric(&profile.assignor_document, 14))
            .field(18, 21, numeric(&profile.branch, 4))
            .zeros(22, 23)
            .field(24, 28, numeric(&profile.account, 5))
            .field(29, 29, numeric(&profile.account_digit, 1))
            .blank(30, 33)
            .zeros(34, 37)
            .field(38, 62, alphanumeric(&title.id, 25))
            .field(63, 70, numeric(&title.our_number_digits(), 8))
            .zeros(71, 83)
            .field(84, 86, numeric(&profile.wallet, 3))
            .blank(87, 107)
            .field(108, 108, "I")
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
            .field(235, 264, alphanumeric(&title.debtor_name, 30))
            .blank(265, 274)
            .field(275, 314, alphanumeric(&title.address, 40))
            .field(315, 326, alphanumeric(&title.neighborhood, 12))
            .field(327, 334, numeric(&title.postal_code, 8))
            .field(335, 349, alphanumeric(&title.city, 15))
            .field(350, 351, alphanumeric(&title.state, 2))
            .blank(352, 381)
            .blank(382, 385)
            .field(386, 391, calendar_date(interest_from, 6))
            .zeros(392, 393)
            .blank(394, 394)
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
