use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use remessa_cnab::domain::profile::BankProfile;
use remessa_cnab::domain::title::BillingTitle;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const ALL_BANKS: [&str; 6] = ["033", "077", "104", "237", "341", "748"];

pub fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 14)
        .and_then(|d| d.and_hms_opt(9, 30, 15))
        .expect("valid timestamp")
}

pub fn profile_json(bank_code: &str, output_dir: &Path) -> Value {
    json!({
        "bank_code": bank_code,
        "name": "Cobrança municipal",
        "cnab_version": 400,
        "assignor_name": "Prefeitura Municipal de Itajubá",
        "assignor_code": "4567890",
        "assignor_document": "18.025.940/0001-09",
        "branch": "3344",
        "branch_digit": "2",
        "account": "0012345",
        "account_digit": "6",
        "wallet": "09",
        "penalty_percent": "2.00",
        "interest_percent": "1.00",
        "output_dir": output_dir.to_string_lossy(),
        "remittance_number": 12
    })
}

pub fn profile(bank_code: &str, output_dir: &Path) -> BankProfile {
    serde_json::from_value(profile_json(bank_code, output_dir)).expect("valid profile")
}

pub fn title(index: usize) -> BillingTitle {
    let due = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
    let mut title = BillingTitle::new(
        format!("IPTU-{index:05}"),
        Decimal::new(10_000 + index as i64, 2),
        due,
    );
    title.debtor_name = format!("Contribuinte Número {index}");
    title.debtor_document = "529.982.247-25".to_string();
    title.address = "Avenida Brasil, 2500".to_string();
    title.neighborhood = "Jardim América".to_string();
    title.city = "Itajubá".to_string();
    title.state = "MG".to_string();
    title.postal_code = "37500-000".to_string();
    title.instructions = "Após o vencimento cobrar multa de 2%".to_string();
    title
}

pub fn titles(count: usize) -> Vec<BillingTitle> {
    (1..=count).map(title).collect()
}

const TEXT_CHARS: &[char] = &[
    'a', 'B', 'c', 'ç', 'ã', 'É', 'í', 'õ', 'ü', 'ñ', ' ', '-', '/', '.', ',', '7', '0', '\t',
    'ß', '€',
];

fn random_text<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| TEXT_CHARS[rng.gen_range(0..TEXT_CHARS.len())])
        .collect()
}

fn random_digits<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// A title with arbitrary text, amounts and dates that still passes validation.
pub fn random_title<R: Rng>(rng: &mut R, index: usize) -> BillingTitle {
    let due = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
        + chrono::Days::new(rng.gen_range(0..365));
    let mut title = BillingTitle::new(
        format!("{}{index}", random_text(rng, 30)),
        Decimal::new(rng.gen_range(1..1_000_000_000_000), 2),
        due,
    );
    title.debtor_name = random_text(rng, 60);
    let document_len = if rng.gen_bool(0.5) { 11 } else { 14 };
    title.debtor_document = random_digits(rng, document_len);
    title.address = random_text(rng, 60);
    title.neighborhood = random_text(rng, 20);
    title.city = random_text(rng, 20);
    title.state = random_text(rng, 3);
    let postal_len = rng.gen_range(0..10);
    title.postal_code = random_digits(rng, postal_len);
    title.interest = Decimal::new(rng.gen_range(0..100_000), 2);
    if rng.gen_bool(0.3) {
        title.discount = Decimal::new(rng.gen_range(1..10_000), 2);
        title.discount_until = due.pred_opt();
    }
    if rng.gen_bool(0.5) {
        let our_number_len = rng.gen_range(0..15);
        title.our_number = random_digits(rng, our_number_len);
    }
    title.instructions = random_text(rng, 400);
    title
}

pub fn write_profile(path: &Path, bank_code: &str, output_dir: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &profile_json(bank_code, output_dir))?;
    Ok(())
}

pub fn write_titles_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record([
        "id",
        "amount",
        "due_date",
        "debtor_name",
        "debtor_document",
        "address",
        "city",
        "state",
        "postal_code",
        "instructions",
    ])?;

    for i in 1..=rows {
        wtr.write_record([
            format!("IPTU-{i:05}").as_str(),
            "125.40",
            "2025-03-10",
            "Maria Antônia",
            "529.982.247-25",
            "Rua Direita, 10",
            "Itajubá",
            "MG",
            "37500-000",
            "Parcela única",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
