//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use clap::{Args, Subcommand};
use serde::Serialize;
use swatchmatch::config::Config;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Enable or disable contrast correction (true or false)
    #[arg(long, value_name = "BOOL")]
    correct_contrast: Option<bool>,

    /// Default match distance threshold
    #[arg(long, value_name = "DISTANCE")]
    threshold: Option<f64>,

    /// Default target contrast ratio
    #[arg(long, value_name = "RATIO")]
    ratio: Option<f64>,
}

/// JSON-serializable configuration for output. Keys are reported as presence flags.
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    providers: ProvidersOutput,
    matching: MatchingOutput,
    roles: RolesOutput,
}

#[derive(Serialize, Debug)]
struct ProvidersOutput {
    unsplash: bool,
    pexels: bool,
    pixabay: bool,
    per_page: u32,
    timeout_secs: u64,
}

#[derive(Serialize, Debug)]
struct MatchingOutput {
    default_threshold: f64,
    query_terms: String,
}

#[derive(Serialize, Debug)]
struct RolesOutput {
    correct_contrast: bool,
    default_target_ratio: f64,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?;

        let output = ConfigOutput {
            config_file: path.display().to_string(),
            providers: ProvidersOutput {
                unsplash: config.providers.unsplash_key().is_some(),
                pexels: config.providers.pexels_key().is_some(),
                pixabay: config.providers.pixabay_key().is_some(),
                per_page: config.providers.per_page,
                timeout_secs: config.providers.timeout_secs,
            },
            matching: MatchingOutput {
                default_threshold: config.matching.default_threshold,
                query_terms: config.matching.query_terms.clone(),
            },
            roles: RolesOutput {
                correct_contrast: config.roles.correct_contrast,
                default_target_ratio: config.roles.default_target_ratio,
            },
        };

        if self.json {
            return print_json(&output);
        }

        let status = |present: bool| if present { "configured" } else { "missing" };
        println!("Config file: {}", output.config_file);
        println!("\nProviders:");
        println!("  Unsplash key: {}", status(output.providers.unsplash));
        println!("  Pexels key:   {}", status(output.providers.pexels));
        println!("  Pixabay key:  {}", status(output.providers.pixabay));
        println!("  Per page:     {}", output.providers.per_page);
        println!("  Timeout:      {}s", output.providers.timeout_secs);
        println!("\nMatching:");
        println!("  Default threshold: {}", output.matching.default_threshold);
        println!("  Query terms:       {}", output.matching.query_terms);
        println!("\nRoles:");
        println!("  Correct contrast:  {}", output.roles.correct_contrast);
        println!("  Target ratio:      {}", output.roles.default_target_ratio);

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.correct_contrast.is_none() && self.threshold.is_none() && self.ratio.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --correct-contrast, --threshold, or --ratio",
            ));
        }

        // An unreadable file may still hold credentials, so never replace it with defaults
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(correct) = self.correct_contrast {
            config.roles.correct_contrast = correct;
        }
        if let Some(threshold) = self.threshold {
            config.matching.default_threshold = threshold;
        }
        if let Some(ratio) = self.ratio {
            config.roles.default_target_ratio = ratio;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}
