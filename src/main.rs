use clap::Parser;
use hazard_map::core::ConfigProvider;
use hazard_map::utils::error::HazardMapError;
use hazard_map::utils::{logger, validation::Validate};
use hazard_map::{CliConfig, HazardMapPipeline, LocalStorage, MapEngine, TomlConfig};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting hazard-map CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result = match config.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(toml_config) => run(toml_config).await,
                Err(e) => Err(e),
            }
        }
        None => run(config).await,
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Hazard map export completed successfully!");
            println!("✅ Layers written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Hazard map export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run<C>(config: C) -> Result<String, HazardMapError>
where
    C: ConfigProvider + Validate + 'static,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = HazardMapPipeline::new(storage, config)?;

    let cancel = pipeline.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Ctrl-C received, cancelling fetch");
            cancel.cancel();
        }
    });

    MapEngine::new(pipeline).run().await
}
