use anyhow::{bail, Context};
use apex_moves::utils::{logger, validation::Validate};
use apex_moves::{BatchEngine, CsvQuotePipeline, EstimatorFileConfig, LocalStorage};
use clap::Parser;
use std::path::Path;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "batch-quotes")]
#[command(about = "Estimate every quote request in a CSV file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "estimator.toml")]
    config: String,

    /// Input CSV; overrides [batch].input_file
    #[arg(short, long)]
    input: Option<String>,

    /// Keep the simulated per-quote delay from the config
    #[arg(long)]
    with_delay: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    log_json: bool,

    /// Dry run - validate config and input without estimating
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting batch quote tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = EstimatorFileConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        bail!(e.user_friendly_message());
    }

    let batch = config.batch_or_default();
    let input = match config.resolve_input_file(args.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            bail!(e.user_friendly_message());
        }
    };
    let input = std::fs::canonicalize(&input)
        .with_context(|| format!("Input file '{}' not found", input))?;

    tracing::info!("✅ Configuration loaded and validated successfully");
    tracing::info!("  Input:   {}", input.display());
    tracing::info!("  Output:  {} ({})", batch.output_path, batch.output_formats.join(", "));
    tracing::info!(
        "  Pricing: ${}/mover-hour, ${}/mile, materials {}-{}",
        config.pricing.hourly_rate_per_mover,
        config.pricing.per_mile_rate,
        config.pricing.materials_min_ratio,
        config.pricing.materials_max_ratio
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No estimates will be generated");
        return Ok(());
    }

    // 批次處理預設不需要 UX 延遲
    let estimator = if args.with_delay {
        config.build_estimator()
    } else {
        apex_moves::KeywordEstimator::new(Duration::ZERO, config.pricing)
    };

    let storage = LocalStorage::new(batch.output_path.clone());
    let input = input.to_string_lossy().into_owned();
    let pipeline = CsvQuotePipeline::new(storage, estimator, input, &batch);
    let engine = BatchEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            let output = Path::new(&batch.output_path).join(&report.output_path);
            println!("✅ Quoted {} requests ({} rejected)", report.quoted, report.rejected);
            println!("📁 Output saved to: {}", output.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            Err(e).context("Batch quote run failed")
        }
    }
}
