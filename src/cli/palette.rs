//! `palette` and `harmony` commands.

use crate::cli::common::{color_row, parse_color, print_json, CliResult};
use clap::Args;
use serde::Serialize;
use swatchmatch::color::{harmony, Color, ColorName, Harmony};
use swatchmatch::palette::{derive, DerivedPalette};

/// Print the nine-color palette derived from a color
#[derive(Debug, Clone, Args)]
pub struct PaletteArgs {
    /// Source color (#rrggbb, rrggbb or #rgb)
    #[arg(value_name = "COLOR")]
    pub color: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print HSL color harmonies for a color
#[derive(Debug, Clone, Args)]
pub struct HarmonyArgs {
    /// Base color (#rrggbb, rrggbb or #rgb)
    #[arg(value_name = "COLOR")]
    pub color: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PaletteOutput {
    color: Color,
    name: ColorName,
    palette: DerivedPalette,
}

#[derive(Serialize)]
struct HarmonyOutput {
    color: Color,
    name: ColorName,
    harmony: Harmony,
}

impl PaletteArgs {
    /// Execute the palette command
    pub fn execute(&self) -> CliResult<()> {
        let color = parse_color(&self.color)?;
        let palette = derive(color);

        if self.json {
            return print_json(&PaletteOutput {
                color,
                name: ColorName::of(color),
                palette,
            });
        }

        println!("Palette for {color} ({})", ColorName::of(color));
        let rows = [
            ("vibrant", palette.vibrant),
            ("dark vibrant", palette.dark_vibrant),
            ("light vibrant", palette.light_vibrant),
            ("muted", palette.muted),
            ("dark muted", palette.dark_muted),
            ("light muted", palette.light_muted),
            ("complementary", palette.complementary),
            ("analogous 1", palette.analogous1),
            ("analogous 2", palette.analogous2),
        ];
        for (label, color) in rows {
            println!("{}", color_row(label, color));
        }

        Ok(())
    }
}

impl HarmonyArgs {
    /// Execute the harmony command
    pub fn execute(&self) -> CliResult<()> {
        let color = parse_color(&self.color)?;
        let harmony = harmony(color);

        if self.json {
            return print_json(&HarmonyOutput {
                color,
                name: ColorName::of(color),
                harmony,
            });
        }

        let join = |colors: &[Color]| {
            colors
                .iter()
                .map(Color::to_hex)
                .collect::<Vec<_>>()
                .join(" ")
        };

        println!("Harmony for {color} ({})", ColorName::of(color));
        println!("{}", color_row("complementary", harmony.complementary));
        println!("  {:<20} {}", "analogous", join(&harmony.analogous));
        println!("  {:<20} {}", "triadic", join(&harmony.triadic));
        println!("  {:<20} {}", "split complementary", join(&harmony.split_complementary));
        println!("  {:<20} {}", "monochromatic", join(&harmony.monochromatic));

        Ok(())
    }
}
