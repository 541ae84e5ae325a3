//! Bradesco (237), "Cobrança Bradesco" CNAB 400.
//!
//! Every title produces a type-1 detail followed by a type-2 record that
//! carries four lines of messages and repeats the account identification.

use super::{document_code, issue_date, message_lines};
use crate::domain::checksum;
use crate::domain::format::{alphanumeric, calendar_date, integer, monetary, numeric};
use crate::domain::ports::{BankLayout, BatchInfo};
use crate::domain::profile::BankProfile;
use crate::domain::record::{Record, RecordKind, RecordWriter};
use crate::domain::title::BillingTitle;
use crate::error::Result;
use rust_decimal::Decimal;

pub const CODE: &str = "237";

#[derive(Debug, Default, Clone, Copy)]
pub struct Bradesco;

impl Bradesco {
    fn our_number(title: &BillingTitle) -> String {
        numeric(&title.our_number_digits(), 11)
    }

    /// Modulo 11, base 7, over wallet + our number; remainder 1 prints `P`.
    pub fn our_number_digit(wallet: &str, our_number: &str) -> char {
        let input = format!("{}{}", numeric(wallet, 2), numeric(our_number, 11));
        match checksum::modulo11_remainder(&input, 7) {
            0 => '0',
            1 => 'P',
            r => char::from_digit(11 - r, 10).unwrap_or('0'),
        }
    }

    /// Wallet, branch, account and digit as printed in the detail records.
    fn company_identification(profile: &BankProfile) -> String {
        format!(
            "0{}{}{}{}",
            numeric(&profile.wallet, 3),
            numeric(&profile.branch, 5),
            numeric(&profile.account, 7),
            numeric(&profile.account_digit, 1)
        )
    }

    fn render_messages(
        &self,
        profile: &BankProfile,
        title: &BillingTitle,
        sequence: u32,
    ) -> Result<Record> {
        let our_number = Self::our_number(title);
        let lines = message_lines(&title.instructions, 80, 4);
        let mut w = RecordWriter::new(RecordKind::Message);
        w.field(1, 1, "2")
            .field(2, 81, &lines[0])
            .field(82, 161, &lines[1])
            .field(162, 241, &lines[2])
            .field(242, 321, &lines[3])
            .zeros(322, 327)
            .zeros(328, 340)
            .zeros(341, 346)
            .zeros(347, 359)
            .blank(360, 366)
            .field(367, 369, numeric(&profile.wallet, 3))
            .field(370, 374, numeric(&profile.branch, 5))
            .field(375, 381, numeric(&profile.account, 7))
            .field(382, 382, numeric(&profile.account_digit, 1))
            .field(383, 393, &our_number)
            .field(
                394,
                394,
                Self::our_number_digit(&profile.wallet, &our_number).to_string(),
            )
            .sequence(sequence);
        w.finish()
    }
}

impl BankLayout for Bradesco {
    fn bank_code(&self) -> &'static str {
        CODE
    }

    fn bank_name(&self) -> &'static str {
        "BRADESCO"
    }

    fn validate_profile(&self, profile: &BankProfile) -> Result<()> {
        profile.validate()?;
        profile.require("wallet", &profile.wallet)?;
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
            .field(27, 46, numeric(&profile.assignor_code, 20))
            .field(47, 76, alphanumeric(&profile.assignor_name, 30))
            .field(77, 79, CODE)
            .field(80, 94, alphanumeric(self.bank_name(), 15))
            .field(95, 100, calendar_date(Some(batch.generated_on()), 6))
            .blank(101, 108)
            .field(109, 110, "MX")
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
        let our_number = Self::our_number(title);
        let has_penalty = profile.penalty_percent > Decimal::ZERO;
        let second_message = format!("{} {} {}", title.neighborhood, title.city, title.state);

        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .zeros(2, 6)
            .zeros(7, 7)
            .zeros(8, 12)
            .zeros(13, 19)
            .zeros(20, 20)
            .field(21, 37, Self::company_identification(profile))
            .field(38, 62, alphanumeric(&title.id, 25))
            .zeros(63, 65)
            .field(66, 66, if has_penalty { "2" } else { "0" })
            .field(67, 70, monetary(profile.penalty_percent, 4))
            .field(71, 81, &our_number)
            .field(
                82,
                82,
                Self::our_number_digit(&profile.wallet, &our_number).to_string(),
            )
            .zeros(83, 92)
            .field(93, 93, "2")
            .field(94, 94, "N")
            .blank(95, 104)
            .blank(105, 105)
            .field(106, 106, "2")
            .blank(107, 108)
            .field(109, 110, "01")
            .field(111, 120, alphanumeric(&title.id, 10))
            .field(121, 126, calendar_date(title.due_date, 6))
            .field(127, 139, monetary(title.amount_or_zero(), 13))
            .zeros(140, 142)
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
            .field(315, 326, alphanumeric(&title.contract, 12))
            .field(327, 334, numeric(&title.postal_code, 8))
            .field(335, 394, alphanumeric(&second_message, 60))
            .sequence(sequence);

        Ok(vec![
            w.finish()?,
            self.render_messages(profile, title, sequence + 1)?,
        ])
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
