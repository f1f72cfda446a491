//! kikiqr command-line entrypoint
//!
//! With no arguments it writes `kiki_ghibli_qr.png` for
//! `https://kikisconnect.vercel.app/` in the Kiki palette.

use anyhow::Context;
use clap::Parser;
use kikiqr::{Color, ErrorCorrection, GeneratorConfig, generate, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kikiqr", version, about = "Generate a styled QR code image")]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to kikiqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Text or URL to encode
    #[arg(long)]
    url: Option<String>,

    /// Output image path; PNG unless the extension says otherwise
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Pixels per module
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    scale: Option<u32>,

    /// Quiet zone width in modules
    #[arg(long)]
    border: Option<u32>,

    /// Color of dark data modules (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    dark: Option<Color>,

    /// Color of light data modules (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    light: Option<Color>,

    /// Color of dark finder pattern modules (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    finder_dark: Option<Color>,

    /// Color of light finder pattern modules (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    finder_light: Option<Color>,

    /// Color of the quiet zone; defaults to the light color
    #[arg(long, value_name = "HEX")]
    quiet_zone: Option<Color>,

    /// Minimum error correction level (L, M, Q, H)
    #[arg(long, value_name = "LEVEL")]
    error_correction: Option<ErrorCorrection>,

    /// Keep the requested error correction level even when a higher one fits
    #[arg(long)]
    no_boost_error: bool,

    /// Decode the written image and fail unless it matches the payload
    #[arg(long)]
    verify: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, config: &mut GeneratorConfig) {
        if let Some(url) = self.url {
            config.payload.url = url;
        }
        if let Some(level) = self.error_correction {
            config.payload.encoding.error_correction = level;
        }
        if self.no_boost_error {
            config.payload.encoding.boost_error = false;
        }
        if let Some(output) = self.output {
            config.output.path = output;
        }
        if self.verify {
            config.output.verify = true;
        }

        let style = &mut config.style;
        if let Some(scale) = self.scale {
            style.scale = scale;
        }
        if let Some(border) = self.border {
            style.border = border;
        }
        if let Some(dark) = self.dark {
            style.dark = dark;
        }
        if let Some(light) = self.light {
            style.light = light;
        }
        if let Some(finder_dark) = self.finder_dark {
            style.finder_dark = finder_dark;
        }
        if let Some(finder_light) = self.finder_light {
            style.finder_light = finder_light;
        }
        if self.quiet_zone.is_some() {
            style.quiet_zone = self.quiet_zone;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let json = cli.json;

    let mut config = GeneratorConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let _log_guard = logging::init(&config.logging)?;
    tracing::debug!(?config, "Resolved configuration");

    let report = generate(&config)
        .with_context(|| format!("failed to generate {}", config.output.path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.human_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
