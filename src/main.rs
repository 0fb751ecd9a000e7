use std::time::Duration;

use apex_moves::utils::{logger, validation::Validate};
use apex_moves::{CliConfig, EstimateResult, EstimatorFileConfig, QuoteSession};
use clap::Parser;

fn render_card(estimate: &EstimateResult) {
    println!("═══════════════════════════════════════");
    println!("  ESTIMATE READY");
    println!(
        "  Estimated Cost: ${} - ${}",
        estimate.price_range.min, estimate.price_range.max
    );
    println!("═══════════════════════════════════════");
    println!("  Volume:     {} cu ft", estimate.estimated_cubic_feet);
    println!("  Crew Size:  {} movers", estimate.recommended_movers);
    println!("  Duration:   {} hours", estimate.estimated_hours);
    println!();
    println!("Analysis Summary:");
    println!("  {}", estimate.summary);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_json);
    tracing::debug!("CLI config: {:?}", args);

    let file_config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match EstimatorFileConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => EstimatorFileConfig::default(),
    };

    if let Err(e) = file_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut estimator = file_config.build_estimator();
    if args.no_delay {
        estimator = apex_moves::KeywordEstimator::new(Duration::ZERO, *estimator.pricing());
    }

    let mut session = QuoteSession::new(estimator);
    if !args.json {
        println!("Analyzing Inventory...");
        println!("Calculating volume and crew requirements.");
        println!();
    }

    match session.submit(args.to_request()).await {
        Ok(estimate) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                render_card(&estimate);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Quote failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
