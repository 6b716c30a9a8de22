//! `roles` command.

use crate::cli::common::{color_row, parse_color, print_json, CliError, CliResult};
use clap::Args;
use swatchmatch::config::Config;
use swatchmatch::roles::{assign_roles, Brightness, ContrastCheck, RoleSettings, Vibe};

/// Assign background, illustration, accent and text roles from a base color
#[derive(Debug, Clone, Args)]
pub struct RolesArgs {
    /// Base color (#rrggbb, rrggbb or #rgb)
    #[arg(value_name = "BASE")]
    pub base: String,

    /// Vibe: minimal, vibrant, playful, professional, elegant or bold
    #[arg(long, value_name = "VIBE")]
    pub vibe: Option<String>,

    /// Background brightness: dark, light or mixed
    #[arg(long, value_name = "MODE")]
    pub brightness: Option<String>,

    /// Target contrast ratio for text (defaults to the configured value)
    #[arg(long, value_name = "RATIO")]
    pub ratio: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl RolesArgs {
    /// Execute the roles command
    pub fn execute(&self) -> CliResult<()> {
        let base = parse_color(&self.base)?;
        let vibe = match &self.vibe {
            Some(s) => s.parse::<Vibe>().map_err(|e| CliError::validation(e.to_string()))?,
            None => Vibe::default(),
        };
        let brightness = match &self.brightness {
            Some(s) => s
                .parse::<Brightness>()
                .map_err(|e| CliError::validation(e.to_string()))?,
            None => Brightness::default(),
        };

        let config = Config::load().unwrap_or_default();
        let settings = RoleSettings {
            vibe,
            brightness,
            target_ratio: self.ratio.unwrap_or(config.roles.default_target_ratio),
            correct_contrast: config.roles.correct_contrast,
            ..RoleSettings::new(base)
        };
        let palette = assign_roles(&settings);

        if self.json {
            return print_json(&palette);
        }

        println!("Roles for {base} ({vibe}, {brightness})");
        println!("{}", color_row("base", palette.base));
        println!("{}", color_row("background", palette.background));
        println!("{}", color_row("illustration", palette.illustration));
        println!("{}", color_row("accent", palette.accent));
        println!("{}", color_row("text heading", palette.text_heading));
        println!("{}", color_row("text body", palette.text_body));

        println!("\nContrast:");
        let report = palette.contrast;
        for (label, check) in [
            ("accent", report.accent),
            ("text heading", report.text_heading),
            ("text body", report.text_body),
        ] {
            println!("  {label:<20} {}", describe(check));
        }
        if !settings.correct_contrast {
            println!("\n(contrast correction disabled in config)");
        }

        Ok(())
    }
}

fn describe(check: ContrastCheck) -> String {
    let mark = if check.meets_target { "✓" } else { "✗" };
    format!("{mark} {:.2}:1 (target {:.1}:1)", check.ratio, check.target)
}
