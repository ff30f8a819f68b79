use clap::Parser;
use hex2bin::utils::{logger, validation::Validate};
use hex2bin::{CliConfig, ConversionEngine, ConvertError, HexPipeline, LocalStorage};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting hex2bin");
    tracing::debug!("CLI config: {:?}", config);

    let json = config.json;
    let settings = match config.into_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };
    let pipeline = HexPipeline::new(LocalStorage::current_dir(), settings);
    let engine = if json {
        ConversionEngine::new_quiet(pipeline)
    } else {
        ConversionEngine::new(pipeline)
    };

    let outcome = engine.run().and_then(|summary| {
        tracing::info!(
            "✅ Conversion finished: {} bytes -> {}",
            summary.byte_count,
            summary.output_path
        );
        if json {
            let rendered = serde_json::to_string_pretty(&summary).map_err(ConvertError::from)?;
            println!("{}", rendered);
        }
        Ok(summary)
    });

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = engine.exit_code(&e);
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
        tracing::warn!("Write failure reported only (on-write-error=report)");
    }

    Ok(())
}
