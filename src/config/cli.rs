use crate::config::toml_config::{ExplanationMode, GeneratorConfig, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "leftover-impact")]
#[command(about = "Track leftover posts and estimate the plates they saved")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the post store")]
    pub store_path: Option<String>,

    #[arg(long, global = true, help = "Word the explanation with the text generator")]
    pub augmented: bool,

    #[arg(long, global = true)]
    pub generator_endpoint: Option<String>,

    #[arg(long, global = true)]
    pub generator_model: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Estimate plates saved, from --posts or from the post store
    Estimate {
        #[arg(long, allow_negative_numbers = true)]
        posts: Option<f64>,
    },
    /// Record a confirmed leftover post
    Post {
        #[arg(long)]
        food_name: String,
        #[arg(long)]
        freshness: String,
        #[arg(long, help = "YYYY-MM-DD")]
        expiration_date: String,
        #[arg(long)]
        image_uri: Option<String>,
    },
    /// List posts, newest first
    Posts,
    /// Delete a post by id
    Delete { id: String },
    /// Interpret a voice command without a model
    Voice { utterance: String },
    /// Usage and storage suggestions for a barcode, without a model
    Scan { barcode: String },
}

impl CliConfig {
    /// File configuration with command-line overrides applied, validated.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(path) = &self.store_path {
            config.store.path = path.clone();
        }
        if self.augmented {
            config.explanation.mode = ExplanationMode::Augmented;
        }
        if let Some(endpoint) = &self.generator_endpoint {
            match config.generator.as_mut() {
                Some(generator) => generator.endpoint = endpoint.clone(),
                None => {
                    config.generator = Some(GeneratorConfig {
                        endpoint: endpoint.clone(),
                        model: None,
                        api_key: None,
                        timeout_seconds: None,
                        temperature: None,
                    })
                }
            }
        }
        if let (Some(model), Some(generator)) = (&self.generator_model, config.generator.as_mut())
        {
            generator.model = Some(model.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
