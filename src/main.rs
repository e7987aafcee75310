use anyhow::Context;
use clap::Parser;
use leftover_impact::config::Command;
use leftover_impact::domain::ports::ConfigProvider;
use leftover_impact::utils::error::{ErrorSeverity, ImpactError};
use leftover_impact::utils::{logger, validation};
use leftover_impact::{
    CliConfig, ExplanationProvider, FixedExplanation, GeneratedExplanation, GeneratorSettings,
    HttpTextGenerator, LocalStorage, NewLeftoverPost, PlatesSavedEstimator, PostLedger, PostStore,
    TomlConfig,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if let Err(e) = run(&cli.command, &config).await {
        match e.downcast::<ImpactError>() {
            Ok(impact_error) => exit_with(impact_error),
            Err(other) => return Err(other),
        }
    }

    Ok(())
}

async fn run(command: &Command, config: &TomlConfig) -> anyhow::Result<()> {
    let store = PostLedger::new(LocalStorage::new(config.store_path()));

    match command {
        Command::Estimate { posts } => {
            let estimator = PlatesSavedEstimator::new(build_provider(config)?);
            let estimate = match posts {
                Some(n) => estimator.estimate(*n).await?,
                None => estimator.estimate_from_store(&store).await?,
            };
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        }
        Command::Post {
            food_name,
            freshness,
            expiration_date,
            image_uri,
        } => {
            let post = store
                .add_post(NewLeftoverPost {
                    food_name: food_name.clone(),
                    freshness: freshness.clone(),
                    expiration_date: validation::parse_iso_date(
                        "expiration_date",
                        expiration_date,
                    )?,
                    image_uri: image_uri.clone(),
                })
                .await?;
            println!("✅ Posted {} ({})", post.food_name, post.id);
        }
        Command::Posts => {
            let posts = store.list_posts().await?;
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        Command::Delete { id } => {
            let id = Uuid::parse_str(id).with_context(|| format!("'{}' is not a post id", id))?;
            store.delete_post(id).await?;
            println!("🗑️  Deleted post {}", id);
        }
        Command::Voice { utterance } => {
            let command = leftover_impact::interpret_offline(utterance)?;
            let output = serde_json::json!({
                "command": command,
                "route": command.route(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Scan { barcode } => {
            let (format, scan) = leftover_impact::scan_offline(barcode)?;
            let output = serde_json::json!({
                "format": format,
                "result": scan,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn build_provider(config: &TomlConfig) -> anyhow::Result<Box<dyn ExplanationProvider>> {
    if !config.augmented() {
        return Ok(Box::new(FixedExplanation));
    }

    let settings = GeneratorSettings::from_config(config)?;
    tracing::info!(
        "Augmented explanations via {} (model {})",
        settings.endpoint,
        settings.model
    );
    let generator = HttpTextGenerator::new(settings)?;
    Ok(Box::new(GeneratedExplanation::new(generator)))
}

fn exit_with(e: ImpactError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
