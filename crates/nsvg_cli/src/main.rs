//! nsvg CLI
//!
//! Normalize SVG prop values and resolve element prop files from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nsvg_core::{ColorInput, ListInput, NumberProp, TransformInput};
use nsvg_props::{Element, Resolve};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod output;

use config::{NsvgConfig, OutputFormat};
use output::render;

#[derive(Parser)]
#[command(name = "nsvg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Normalize SVG prop values", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./nsvg.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a number or percentage (e.g. `12.5`, `50%`)
    Scalar {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Normalize a color (name, hex, rgb()/hsl(), 0xAARRGGBB, or `[r, g, b, a]`)
    Color {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Normalize a number list (e.g. `"4 2"`, `"1,2,3"`, or a JSON array)
    List {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Normalize a points list into coordinate pairs
    Points {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Normalize a transform (list string, JSON matrix, or JSON object)
    Transform {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Resolve a JSON file holding one element or an array of elements
    Props {
        /// Prop file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config_path = NsvgConfig::locate(cli.config.as_deref(), &cwd)?;
    let mut config = NsvgConfig::load(config_path.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.log.filter.as_deref().unwrap_or("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match &config_path {
        Some(path) => debug!(path = %path.display(), "Loaded config"),
        None => debug!("No config file, using defaults"),
    }

    let rendered = match cli.command {
        Commands::Scalar { value } => cmd_scalar(&value, &config)?,
        Commands::Color { value } => cmd_color(&value, &config)?,
        Commands::List { value } => cmd_list(&value, &config)?,
        Commands::Points { value } => cmd_points(&value, &config)?,
        Commands::Transform { value } => cmd_transform(&value, &config)?,
        Commands::Props { file } => cmd_props(&file, &config)?,
    };

    println!("{}", rendered);
    Ok(())
}

/// JSON arrays and objects are parsed as such, anything else is taken as text
fn looks_like_json(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    trimmed.starts_with('[') || trimmed.starts_with('{')
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("Failed to parse {:?} as JSON", raw))
}

fn parse_color(raw: &str) -> Result<ColorInput> {
    let trimmed = raw.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        let packed = u32::from_str_radix(hex, 16)
            .with_context(|| format!("Invalid packed color {:?}", raw))?;
        return Ok(ColorInput::Packed(packed));
    }
    if looks_like_json(trimmed) || trimmed.parse::<i64>().is_ok() {
        return parse_json(trimmed);
    }
    Ok(ColorInput::Text(raw.to_string()))
}

fn parse_list(raw: &str) -> Result<ListInput> {
    if looks_like_json(raw) {
        parse_json(raw)
    } else {
        Ok(ListInput::Text(raw.to_string()))
    }
}

fn parse_transform(raw: &str) -> Result<TransformInput> {
    if looks_like_json(raw) {
        parse_json(raw)
    } else {
        Ok(TransformInput::Text(raw.to_string()))
    }
}

fn cmd_scalar(raw: &str, config: &NsvgConfig) -> Result<String> {
    let scalar = NumberProp::from(raw)
        .normalize()
        .with_context(|| format!("Failed to normalize scalar {:?}", raw))?;
    render(&scalar, &config.output)
}

fn cmd_color(raw: &str, config: &NsvgConfig) -> Result<String> {
    let color = parse_color(raw)?
        .normalize()
        .with_context(|| format!("Failed to normalize color {:?}", raw))?;
    render(&color, &config.output)
}

fn cmd_list(raw: &str, config: &NsvgConfig) -> Result<String> {
    let list = parse_list(raw)?
        .normalize()
        .with_context(|| format!("Failed to normalize list {:?}", raw))?;
    render(&list, &config.output)
}

fn cmd_points(raw: &str, config: &NsvgConfig) -> Result<String> {
    let points = parse_list(raw)?
        .normalize()
        .with_context(|| format!("Failed to normalize points {:?}", raw))?
        .into_points();
    render(&points, &config.output)
}

fn cmd_transform(raw: &str, config: &NsvgConfig) -> Result<String> {
    let matrix = parse_transform(raw)?
        .normalize()
        .with_context(|| format!("Failed to normalize transform {:?}", raw))?;
    render(&matrix, &config.output)
}

fn cmd_props(file: &Path, config: &NsvgConfig) -> Result<String> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let elements = parse_elements(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    info!("Resolving {} element(s) from {}", elements.len(), file.display());

    let resolved = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            debug!(index, kind = element.kind(), "Resolving element");
            element
                .resolve()
                .with_context(|| format!("Element {} ({})", index, element.kind()))
        })
        .collect::<Result<Vec<_>>>()?;

    render(&resolved[..], &config.output)
}

/// A prop file holds either one element or an array of them
fn parse_elements(content: &str) -> Result<Vec<Element>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}
