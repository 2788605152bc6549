//! Process command - extract and validate a single recognized-text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use beleg_core::{ProcessedReceipt, RawDocumentText, ReceiptPipeline};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file with recognized text, one line per recognized line
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text report
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("Input file contains no text: {}", args.input.display());
    }

    let pipeline = ReceiptPipeline::new(&config);
    let processed = pipeline.process(&RawDocumentText::from_text(text))?;

    let output = format_receipt(&processed, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            processed.draft.confidence * 100.0
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_receipt(processed: &ProcessedReceipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(processed)?),
        OutputFormat::Text => Ok(format_text(processed)),
    }
}

fn format_text(processed: &ProcessedReceipt) -> String {
    let draft = &processed.draft;
    let receipt = &processed.receipt;
    let tax = &receipt.steuerberechnung;
    let validation = &processed.validation;
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", receipt.belegnummer));
    output.push_str(&format!("Date: {}\n", receipt.belegdatum));
    if let Some(due_date) = draft.due_date {
        output.push_str(&format!("Due: {}\n", due_date));
    }
    output.push('\n');

    output.push_str("Supplier:\n");
    output.push_str(&format!("  {}\n", receipt.lieferant.name));
    if let Some(address) = &receipt.lieferant.adresse {
        output.push_str(&format!("  {}\n", address));
    }
    let city: Vec<&str> = [&receipt.lieferant.plz, &receipt.lieferant.ort, &receipt.lieferant.land]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    if !city.is_empty() {
        output.push_str(&format!("  {}\n", city.join(" ")));
    }
    if let Some(vat_id) = &receipt.lieferant.ust_id_nr {
        output.push_str(&format!("  VAT ID: {}\n", vat_id));
    }
    output.push('\n');

    let currency = &receipt.rechnungsdetails.waehrung;
    output.push_str("Amounts:\n");
    output.push_str(&format!("  Net:   {:.2} {}\n", tax.nettobetrag, currency));
    output.push_str(&format!("  VAT:   {:.2} {} ({}%)\n", tax.ust_betrag, currency, tax.ust_satz.normalize()));
    output.push_str(&format!("  Gross: {:.2} {}\n", tax.bruttobetrag, currency));
    output.push('\n');

    let verdict = if validation.is_compliant {
        "compliant"
    } else {
        "NOT compliant"
    };
    output.push_str(&format!("Compliance: {} (score {})\n", verdict, validation.score));
    for issue in &validation.issues {
        output.push_str(&format!("  - {}\n", issue));
    }
    if !validation.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for recommendation in &validation.recommendations {
            output.push_str(&format!("  - {}\n", recommendation));
        }
    }

    output
}
