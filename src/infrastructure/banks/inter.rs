//! Banco Inter (077) CNAB 400.
//!
//! Inter assigns the our number itself, so the field is sent as zeros.

use super::{document_code, issue_date};
use crate::domain::format::{alphanumeric, calendar_date, integer, monetary, numeric};
use crate::domain::ports::{BankLayout, BatchInfo};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RecordKind, RecordWriter};
use crate::domain::title::BillingTitle;
use crate::error::Result;
use rust_decimal::Decimal;

pub const CODE: &str = "077";

const WALLET: &str = "112";
const BRANCH: &str = "0001";
/// Days the slip remains payable after the due date.
const DAYS_TO_EXPIRE: &str = "60";

#[derive(Debug, Default, Clone, Copy)]
pub struct Inter;

impl BankLayout for Inter {
    fn bank_code(&self) -> &'static str {
        CODE
    }

    fn bank_name(&self) -> &'static str {
        "INTER"
    }

    fn validate_profile(&self, profile: &BankProfile) -> Result<()> {
        profile.validate()?;
        profile.require("account_digit", &profile.account_digit)
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
            .blank(27, 46)
            .field(47, 76, alphanumeric(&profile.assignor_name, 30))
            .field(77, 79, CODE)
            .field(80, 94, alphanumeric(self.bank_name(), 15))
            .field(95, 100, calendar_date(Some(batch.generated_on()), 6))
            .blank(101, 110)
            .field(111, 117, integer(profile.remittance_number.into(), 7))
            .blank(118, 394)
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
        let has_penalty = profile.penalty_percent > Decimal::ZERO;
        let has_interest = title.interest > Decimal::ZERO;
        let has_discount = title.discount > Decimal::ZERO;
        let day_after_due = title.due_date.and_then(|d| d.succ_opt());
        let account = format!("{}{}", profile.account.trim(), profile.account_digit.trim());

        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .blank(2, 20)
            .field(21, 23, WALLET)
            .field(24, 27, BRANCH)
            .field(28, 37, numeric(&account, 10))
            .field(38, 62, alphanumeric(&title.id, 25))
            .blank(63, 65)
            .field(66, 66, if has_penalty { "2" } else { "0" })
            .zeros(67, 79)
            .field(80, 83, monetary(profile.penalty_percent, 4))
            .field(
                84,
                89,
                calendar_date(if has_penalty { day_after_due } else { None }, 6),
            )
            .zeros(90, 100)
            .blank(101, 108)
            .field(109, 110, "01")
            .field(111, 120, alphanumeric(&title.id, 10))
            .field(121, 126, calendar_date(title.due_date, 6))
            .field(127, 139, monetary(title.amount_or_zero(), 13))
            .field(140, 141, DAYS_TO_EXPIRE)
            .blank(142, 147)
            .field(148, 149, "01")
            .field(150, 150, "N")
            .field(151, 156, calendar_date(issue_date(title, batch), 6))
            .blank(157, 159)
            .field(160, 160, if has_interest { "1" } else { "0" })
            .field(161, 173, monetary(title.interest, 13))
            .zeros(174, 177)
            .field(
                178,
                183,
                calendar_date(if has_interest { day_after_due } else { None }, 6),
            )
            .field(184, 184, if has_discount { "1" } else { "0" })
            .field(185, 197, monetary(title.discount, 13))
            .zeros(198, 201)
            .field(
                202,
                207,
                calendar_date(if has_discount { title.discount_until } else { None }, 6),
            )
            .zeros(208, 218)
            .field(219, 220, document_code(title.debtor_kind()))
            .field(221, 234, numeric(&title.debtor_document, 14))
            .field(235, 274, alphanumeric(&title.debtor_name, 40))
            .field(275, 314, alphanumeric(&title.address, 40))
            .field(315, 322, numeric(&title.postal_code, 8))
            .field(323, 382, alphanumeric(&title.instructions, 60))
            .blank(383, 394)
            .sequence(sequence);
        Ok(vec![w.finish()?])
    }

    fn render_trailer(
        &self,
        _profile: &BankProfile,
        batch: &BatchInfo,
        _total_records: u32,
        sequence: u32,
    ) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9")
            .field(2, 7, integer(batch.title_count as u64, 6))
            .blank(8, 394)
            .sequence(sequence);
        w.finish()
    }
}
