use crate::domain::format::parse_date_input;
use crate::domain::profile::require;
use crate::error::{RemessaError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Debtor registration type, derived from the document's digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// CPF, 11 digits.
    Individual,
    /// CNPJ, 14 digits.
    Organization,
}

impl DocumentKind {
    pub fn from_document(document: &str) -> Self {
        if document.chars().filter(char::is_ascii_digit).count() == 14 {
            Self::Organization
        } else {
            Self::Individual
        }
    }
}

/// One installment to be collected by the bank.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BillingTitle {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub debtor_name: String,
    #[serde(default)]
    pub debtor_document: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub contract: String,
    /// Accrued interest, already computed upstream.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub interest: Decimal,
    /// Penalty amount, already computed upstream.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub penalty: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub discount: Decimal,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub discount_until: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub issue_date: Option<NaiveDate>,
    /// Bank-side title number. Falls back to the digits of `id`.
    #[serde(default)]
    pub our_number: String,
    #[serde(default)]
    pub instructions: String,
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date_input(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

const ENTITY: &str = "billing title";

impl BillingTitle {
    pub fn new(id: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            amount: Some(amount),
            due_date: Some(due_date),
            ..Self::default()
        }
    }

    /// Checks the fields every dialect needs: amount and due date.
    pub fn validate(&self) -> Result<()> {
        let label = self.label();
        if self.amount.is_none() {
            return Err(RemessaError::missing_field(&label, "amount"));
        }
        if self.due_date.is_none() {
            return Err(RemessaError::missing_field(&label, "due_date"));
        }
        Ok(())
    }

    /// Presence check for an optional field a dialect prints.
    pub fn require(&self, field: &str, value: &str) -> Result<()> {
        require(&self.label(), field, value)
    }

    fn label(&self) -> String {
        if self.id.trim().is_empty() {
            ENTITY.to_string()
        } else {
            format!("{ENTITY} '{}'", self.id.trim())
        }
    }

    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or_default()
    }

    pub fn debtor_kind(&self) -> DocumentKind {
        DocumentKind::from_document(&self.debtor_document)
    }

    pub fn our_number_digits(&self) -> String {
        let source = if self.our_number.trim().is_empty() {
            &self.id
        } else {
            &self.our_number
        };
        source.chars().filter(char::is_ascii_digit).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use rust_decimal_macros::dec;

    pub fn title(id: &str) -> BillingTitle {
        BillingTitle {
            id: id.to_string(),
            amount: Some(dec!(150.00)),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            debtor_name: "José da Conceição".to_string(),
            debtor_document: "123.456.789-09".to_string(),
            address: "Rua das Acácias, 100".to_string(),
            neighborhood: "Centro".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            postal_code: "01001-000".to_string(),
            contract: "CT-2025/001".to_string(),
            interest: dec!(0.15),
            penalty: dec!(3.00),
            discount: Decimal::ZERO,
            discount_until: None,
            issue_date: NaiveDate::from_ymd_opt(2025, 2, 10),
            our_number: String::new(),
            instructions: "IPTU 2025 parcela 03. Não receber após 30 dias.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::title;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_document_kind_from_length() {
        assert_eq!(
            DocumentKind::from_document("123.456.789-09"),
            DocumentKind::Individual
        );
        assert_eq!(
            DocumentKind::from_document("12.345.678/0001-95"),
            DocumentKind::Organization
        );
        assert_eq!(DocumentKind::from_document(""), DocumentKind::Individual);
    }

    #[test]
    fn test_validate_requires_amount_and_due_date() {
        assert!(title("1").validate().is_ok());

        let mut missing_amount = title("42");
        missing_amount.amount = None;
        assert!(matches!(
            missing_amount.validate(),
            Err(RemessaError::ValidationError(msg)) if msg.contains("amount") && msg.contains("42")
        ));

        let mut missing_due = title("43");
        missing_due.due_date = None;
        assert!(matches!(
            missing_due.validate(),
            Err(RemessaError::ValidationError(msg)) if msg.contains("due_date")
        ));
    }

    #[test]
    fn test_our_number_falls_back_to_id() {
        let mut t = title("TIT-000123");
        assert_eq!(t.our_number_digits(), "000123");
        t.our_number = "998877".to_string();
        assert_eq!(t.our_number_digits(), "998877");
    }

    #[test]
    fn test_csv_deserialization() {
        let csv = "id,amount,due_date,debtor_document,interest,discount_until\n\
                   7,150.00,10/03/2025,12345678909,,2025-03-01";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let t: BillingTitle = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(t.id, "7");
        assert_eq!(t.amount, Some(dec!(150.00)));
        assert_eq!(t.due_date, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(t.interest, Decimal::ZERO);
        assert_eq!(t.discount_until, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert!(t.issue_date.is_none());
    }

    #[test]
    fn test_csv_rejects_garbage_date() {
        let csv = "id,amount,due_date\n7,1.00,someday";
        let mut reader = csv::ReaderBuilder::new().from_reader(csv.as_bytes());
        let result: std::result::Result<BillingTitle, csv::Error> =
            reader.deserialize().next().unwrap();
        assert!(result.is_err());
    }
}
