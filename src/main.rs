use chrono::Local;
use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use remessa_cnab::application::assembler::RemittanceAssembler;
use remessa_cnab::application::registry::BankRegistry;
use remessa_cnab::domain::title::BillingTitle;
use remessa_cnab::infrastructure::file_sink::FileSink;
use remessa_cnab::interfaces::csv::title_reader::TitleReader;
use remessa_cnab::interfaces::json::profile_reader::load_profile;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Generates CNAB 400 billing remittance files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bank profile JSON file
    #[arg(required_unless_present = "list_banks")]
    profile: Option<PathBuf>,

    /// Billing titles CSV file
    #[arg(required_unless_present = "list_banks")]
    titles: Option<PathBuf>,

    /// Directory for the remittance, overriding the profile's output_dir
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the supported bank codes and exit
    #[arg(long)]
    list_banks: bool,

    /// Print the remittance to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let assembler = RemittanceAssembler::new(
        BankRegistry::with_default_banks(),
        Box::new(FileSink::new()),
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_banks {
        let registry = assembler.registry();
        for code in registry.supported_codes() {
            let layout = registry.resolve(code).into_diagnostic()?;
            writeln!(out, "{} {}", code, layout.bank_name()).into_diagnostic()?;
        }
        return Ok(());
    }

    let (Some(profile_path), Some(titles_path)) = (cli.profile, cli.titles) else {
        return Err(miette::miette!("profile and titles files are required"));
    };

    let mut profile = load_profile(&profile_path).into_diagnostic()?;
    if let Some(dir) = cli.output_dir {
        profile.output_dir = dir;
    } else if profile.output_dir.as_os_str().is_empty() {
        profile.output_dir = PathBuf::from(".");
    }

    let titles = read_titles(&titles_path)?;

    if cli.dry_run {
        let file = assembler
            .build(&profile, &titles, Local::now().naive_local())
            .into_diagnostic()?;
        out.write_all(file.contents().as_bytes()).into_diagnostic()?;
        return Ok(());
    }

    let path = assembler.generate(&profile, &titles).into_diagnostic()?;
    writeln!(out, "{}", path.display()).into_diagnostic()?;

    Ok(())
}

/// Reads every title; the first unreadable row rejects the whole file.
fn read_titles(path: &Path) -> Result<Vec<BillingTitle>> {
    let file = File::open(path).into_diagnostic()?;
    let rows = TitleReader::new(file).titles().into_diagnostic()?;
    let mut titles = Vec::new();
    for (index, result) in rows.enumerate() {
        // Row 1 is the header.
        let row = index + 2;
        let title = result
            .into_diagnostic()
            .wrap_err_with(|| format!("titles row {row} is unreadable"))?;
        titles.push(title);
    }
    debug!(titles = titles.len(), path = %path.display(), "titles loaded");
    Ok(titles)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
