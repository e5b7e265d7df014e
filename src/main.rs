use clap::Parser;
use customer_sync::domain::ports::SourceReader;
use customer_sync::utils::{
    logger,
    validation::{redact, Validate},
};
use customer_sync::{
    BatchRunner, CliArgs, MongoSourceReader, PostgresUpsertSink, RecordTransformer, Result,
    SyncConfig,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting customer-sync");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入並驗證配置
    let config = match args.load_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - configuration is valid, no connections opened");
        return Ok(());
    }

    let exit_code = match run(&config, args.report_json.as_deref()).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(
                "❌ Sync aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run(config: &SyncConfig, report_path: Option<&Path>) -> Result<i32> {
    // 連線在讀取前建立，結束時 (含失敗) 由 BatchRunner 釋放
    let reader = MongoSourceReader::connect(&config.source).await?;
    let sink = match PostgresUpsertSink::connect(&config.target).await {
        Ok(sink) => sink,
        Err(e) => {
            reader.release().await;
            return Err(e);
        }
    };

    let transformer = RecordTransformer::new(config.mapping.clone());
    let mut runner =
        BatchRunner::new(reader, sink, transformer).with_concurrency(config.concurrency());
    let report = runner.run().await?;

    for line in report.summary_lines() {
        println!("{}", line);
    }

    // 報告寫入失敗不影響批次結果
    if let Some(path) = report_path {
        match report.write_json(path) {
            Ok(()) => tracing::info!("📁 Report saved to: {}", path.display()),
            Err(e) => tracing::warn!("⚠️ Could not write report to {}: {}", path.display(), e),
        }
    }

    if report.is_clean() {
        tracing::info!("✅ All {} records applied", report.applied);
    } else {
        tracing::warn!("⚠️ {} of {} records failed", report.failed, report.total_read);
    }

    Ok(report.exit_code())
}

fn display_config_summary(config: &SyncConfig) {
    tracing::info!("📋 Sync Configuration Summary:");
    tracing::info!(
        "  📥 Source: {} ({}.{})",
        redact(&config.source.uri),
        config.source.database,
        config.source.collection
    );
    tracing::info!(
        "  📤 Target: {} -> {}",
        redact(&config.target.url),
        config.target.procedure
    );
    tracing::info!("  🗺️ Mapping: {}", config.mapping.paths().join(", "));
    tracing::info!("  ⚙️ Concurrency: {}", config.concurrency());
}
