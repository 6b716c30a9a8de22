//! `match` command: rank stock images by distance to colors in free text.

use crate::cli::common::{print_json, CliError, CliResult};
use clap::Args;
use swatchmatch::config::Config;
use swatchmatch::matching::{LiveMatchEngine, MatchRequest};

/// Find stock images whose palettes match the colors in TEXT
#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    /// Text containing one or more hex colors, e.g. "#ff0000 and #00f"
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Result page (1-based)
    #[arg(long, value_name = "N")]
    pub page: Option<u32>,

    /// Maximum palette distance; 20-150 is the useful range
    #[arg(long, value_name = "DISTANCE")]
    pub threshold: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl MatchArgs {
    /// Execute the match command
    pub fn execute(&self) -> CliResult<()> {
        let request = MatchRequest {
            text: self.text.join(" "),
            page: self.page,
            threshold: self.threshold,
        };

        let config = Config::load().unwrap_or_default();
        let engine = LiveMatchEngine::from_config(&config)
            .map_err(|e| CliError::io(format!("Failed to set up providers: {e:#}")))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::io(format!("Failed to start async runtime: {e}")))?;

        let response = runtime
            .block_on(engine.run(&request))
            .map_err(|e| CliError::validation(format!("{e} ({})", e.details())))?;

        if self.json {
            return print_json(&response);
        }

        let swatches: Vec<String> = response.swatches.iter().map(ToString::to_string).collect();
        println!("Query: {:?}", response.query);
        println!("Swatches: {}", swatches.join(" "));
        println!(
            "Fetched: unsplash {}, pexels {}, pixabay {}",
            response.provider_counts.unsplash,
            response.provider_counts.pexels,
            response.provider_counts.pixabay
        );
        println!("Page {}: {} matches", response.page, response.total);

        for matched in &response.images {
            let image = &matched.image;
            println!(
                "  {:>6.1}  {}  {:<24} {}",
                matched.score, image.color, image.id, image.urls.regular
            );
            println!("          by {} ({})", image.attribution.photographer, image.attribution.source_url);
        }

        Ok(())
    }
}
