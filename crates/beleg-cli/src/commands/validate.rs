//! Validate command - check a GoBD receipt JSON file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use beleg_core::{ComplianceValidator, GoBDReceiptData};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// GoBD receipt JSON file
    #[arg(required = true)]
    input: PathBuf,

    /// Print the validation result as JSON
    #[arg(long)]
    json: bool,

    /// Exit with an error when the receipt is not compliant
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let content = fs::read_to_string(&args.input)?;
    let receipt: GoBDReceiptData = serde_json::from_str(&content)?;
    info!("Validating receipt {}", receipt.belegnummer);

    let result = ComplianceValidator::new(config.validation).validate(&receipt);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if result.is_compliant {
            println!(
                "{} Compliant, score {}",
                style("✓").green(),
                result.score
            );
        } else {
            println!(
                "{} Not compliant, score {}",
                style("✗").red(),
                result.score
            );
        }
        for issue in &result.issues {
            println!("  - {}", issue);
        }
        for recommendation in &result.recommendations {
            println!("  {} {}", style("ℹ").blue(), recommendation);
        }
    }

    if args.strict && !result.is_compliant {
        anyhow::bail!(
            "Receipt {} is not compliant ({} errors)",
            receipt.belegnummer,
            result.error_count()
        );
    }

    Ok(())
}
