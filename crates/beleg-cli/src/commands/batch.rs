//! Batch processing command for multiple recognized-text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use beleg_core::{ProcessedReceipt, RawDocumentText, ReceiptPipeline};

use super::process::{format_receipt, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    receipt: Option<ProcessedReceipt>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline = Arc::new(ReceiptPipeline::new(&config));
    let mut results = Vec::with_capacity(files.len());

    for chunk in files.chunks(args.jobs.max(1)) {
        let handles: Vec<_> = chunk
            .iter()
            .cloned()
            .map(|path| {
                let pipeline = Arc::clone(&pipeline);
                tokio::task::spawn_blocking(move || {
                    let file_start = Instant::now();
                    let outcome = process_single_file(&path, &pipeline);
                    (path, outcome, file_start.elapsed().as_millis() as u64)
                })
            })
            .collect();

        for handle in handles {
            let (path, outcome, processing_time_ms) = handle.await?;

            match outcome {
                Ok(receipt) => results.push(ProcessResult {
                    path,
                    receipt: Some(receipt),
                    error: None,
                    processing_time_ms,
                }),
                Err(e) => {
                    let error_msg = e.to_string();
                    if !args.continue_on_error {
                        error!("Failed to process {}: {}", path.display(), error_msg);
                        pb.abandon();
                        anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                    }
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        receipt: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                }
            }

            pb.inc(1);
        }
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.receipt.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let compliant = successful
        .iter()
        .filter(|r| r.receipt.as_ref().is_some_and(|p| p.validation.is_compliant))
        .count();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(receipt) = &result.receipt else { continue };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("receipt");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_receipt(receipt, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} compliant), {} failed",
        style(successful.len()).green(),
        compliant,
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, pipeline: &ReceiptPipeline) -> anyhow::Result<ProcessedReceipt> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text in file");
    }
    Ok(pipeline.process(&RawDocumentText::from_text(text))?)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_number",
        "document_date",
        "supplier",
        "vat_id",
        "net",
        "vat",
        "gross",
        "currency",
        "confidence",
        "score",
        "compliant",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(processed) = &result.receipt {
            let receipt = &processed.receipt;
            let tax = &receipt.steuerberechnung;
            wtr.write_record([
                filename,
                "success",
                &receipt.belegnummer,
                &receipt.belegdatum,
                &receipt.lieferant.name,
                receipt.lieferant.ust_id_nr.as_deref().unwrap_or(""),
                &format!("{:.2}", tax.nettobetrag),
                &format!("{:.2}", tax.ust_betrag),
                &format!("{:.2}", tax.bruttobetrag),
                &receipt.rechnungsdetails.waehrung,
                &format!("{:.2}", processed.draft.confidence),
                &processed.validation.score.to_string(),
                &processed.validation.is_compliant.to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
