use remessa_cnab::application::assembler::RemittanceAssembler;
use remessa_cnab::application::registry::BankRegistry;
use remessa_cnab::domain::format::{alphanumeric, monetary};
use remessa_cnab::domain::ports::{BankLayout, BankLayoutBox, BankLayoutFactory, BatchInfo};
use remessa_cnab::domain::profile::BankProfile;
use remessa_cnab::domain::record::{Record, RecordKind, RecordWriter};
use remessa_cnab::domain::title::BillingTitle;
use remessa_cnab::error::{RemessaError, Result};
use remessa_cnab::infrastructure::in_memory::InMemorySink;
use std::path::Path;

mod common;

/// A minimal dialect living outside the crate.
#[derive(Default)]
struct Cooperative;

impl BankLayout for Cooperative {
    fn bank_code(&self) -> &'static str {
        "756"
    }

    fn bank_name(&self) -> &'static str {
        "COOPERATIVA"
    }

    fn render_header(&self, profile: &BankProfile, _: &BatchInfo, sequence: u32) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Header);
        w.field(1, 1, "0")
            .field(2, 31, alphanumeric(&profile.assignor_name, 30))
            .blank(32, 394)
            .sequence(sequence);
        w.finish()
    }

    fn render_detail(
        &self,
        _: &BankProfile,
        title: &BillingTitle,
        sequence: u32,
        _: &BatchInfo,
    ) -> Result<Vec<Record>> {
        let mut w = RecordWriter::new(RecordKind::Detail);
        w.field(1, 1, "1")
            .field(2, 14, monetary(title.amount_or_zero(), 13))
            .blank(15, 394)
            .sequence(sequence);
        Ok(vec![w.finish()?])
    }

    fn render_trailer(
        &self,
        _: &BankProfile,
        _: &BatchInfo,
        _: u32,
        sequence: u32,
    ) -> Result<Record> {
        let mut w = RecordWriter::new(RecordKind::Trailer);
        w.field(1, 1, "9").blank(2, 394).sequence(sequence);
        w.finish()
    }
}

#[test]
fn test_custom_layout_is_resolved_by_code() {
    let mut registry = BankRegistry::with_default_banks();
    let factory: BankLayoutFactory = Box::new(|| Box::new(Cooperative) as BankLayoutBox);
    registry.register("756", factory).unwrap();
    assert!(registry.supported_codes().contains(&"756"));

    let sink = InMemorySink::new();
    let assembler = RemittanceAssembler::new(registry, Box::new(sink.clone()));
    let profile = common::profile("756", Path::new("out"));

    let path = assembler
        .generate_at(&profile, &common::titles(2), common::generated_at())
        .unwrap();

    assert_eq!(path, Path::new("out").join("CB756140225093015.REM"));
    let contents = sink.get(&path).unwrap();
    let lines: Vec<&str> = contents.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("0PREFEITURA MUNICIPAL DE ITAJUB "));
    assert!(lines[1].starts_with("10000000010001"));
    assert!(lines[3].ends_with("000004"));
}

#[test]
fn test_builtin_codes_cannot_be_replaced() {
    let mut registry = BankRegistry::with_default_banks();
    let result = registry.register("237", Box::new(|| Box::new(Cooperative) as BankLayoutBox));
    assert!(matches!(result, Err(RemessaError::ValidationError(_))));
    assert_eq!(registry.resolve("237").unwrap().bank_name(), "BRADESCO");
}

#[test]
fn test_registry_is_shared_across_threads() {
    let registry = BankRegistry::with_default_banks();

    let names: Vec<&'static str> = std::thread::scope(|scope| {
        let handles: Vec<_> = common::ALL_BANKS
            .iter()
            .map(|code| {
                let registry = &registry;
                scope.spawn(move || registry.resolve(code).unwrap().bank_name())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        names,
        vec!["SANTANDER", "INTER", "C ECON FEDERAL", "BRADESCO", "BANCO ITAU SA", "SICREDI"]
    );
}
