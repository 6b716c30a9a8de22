//! swatchmatch - color palettes, contrast-aware roles and stock image matching
//!
//! Command-line front end over the `swatchmatch` library.

mod cli;

use clap::{Parser, Subcommand};
use cli::{ConfigArgs, ExitCode, HarmonyArgs, MatchArgs, PaletteArgs, RolesArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// swatchmatch - derive palettes and find matching stock images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the nine-color palette of a color
    Palette(PaletteArgs),
    /// Show HSL harmonies of a color
    Harmony(HarmonyArgs),
    /// Assign UI roles from a base color
    Roles(RolesArgs),
    /// Match stock images against colors in text
    Match(MatchArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Palette(args) => args.execute(),
        Command::Harmony(args) => args.execute(),
        Command::Roles(args) => args.execute(),
        Command::Match(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {e}");
            e.code
        }
    };

    std::process::exit(code as i32);
}
