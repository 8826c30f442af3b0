// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadgen CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use scadgen::axis::{AxisBounds, BackgroundTheme, UnitSystem};
use scadgen::factory::{render_documents, schema, ParamDefault};
use scadgen::{Config, NodeKind, RenderStyle};
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "scadgen")]
#[command(about = "Parametric OpenSCAD script generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./scadgen.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build node documents (JSON) and render them to OpenSCAD
    Build {
        /// Node document files or directories of *.json files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// One statement per line instead of the compact form
        #[arg(long)]
        pretty: bool,
    },

    /// Normalize axis bounds and generate the axis reference module
    Axis {
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        min_x: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        max_x: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        min_y: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        max_y: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        min_z: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        max_z: f64,

        /// Unit system (metric, imperial)
        #[arg(short, long)]
        unit: Option<UnitSystem>,

        /// Background theme (light, dark)
        #[arg(short, long)]
        theme: Option<BackgroundTheme>,

        /// Output file for the module script
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List node kinds, or the parameters of one kind
    Kinds {
        kind: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if cli.config.is_some() {
        config.apply_overrides(|key| std::env::var(key).ok());
    }
    debug!("configuration: {:?}", config);

    match cli.command {
        Commands::Build {
            inputs,
            output,
            pretty,
        } => build_command(&config, &inputs, output.as_deref(), pretty),
        Commands::Axis {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
            unit,
            theme,
            output,
            json,
        } => {
            let bounds = AxisBounds::from_raw(min_x, max_x, min_y, max_y, min_z, max_z);
            let unit = unit.unwrap_or(config.axis.unit_system);
            let theme = theme.unwrap_or(config.axis.theme);
            axis_command(&config, bounds, unit, theme, output.as_deref(), json)
        }
        Commands::Kinds { kind, json } => kinds_command(kind.as_deref(), json),
        Commands::Version => {
            println!("scadgen v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Expand directories into the JSON files below them, sorted by path
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.exists() {
            bail!("Input not found: {}", input.display());
        }

        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    Ok(files)
}

fn build_command(config: &Config, inputs: &[PathBuf], output: Option<&Path>, pretty: bool) -> Result<()> {
    let files = collect_inputs(inputs)?;
    info!("building {} document(s)", files.len());

    let documents = files
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<Value>(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let style = if pretty {
        RenderStyle::Indented
    } else {
        RenderStyle::Compact
    };
    let results = render_documents(&config.factory(), &documents, style);

    let mut script = String::new();
    let mut failures = 0;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(text) => {
                if files.len() > 1 {
                    script.push_str(&format!("// {}\n", path.display()));
                }
                script.push_str(&text);
                if !text.ends_with('\n') {
                    script.push('\n');
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "Error:".red(), path.display(), e);
            }
        }
    }

    match output {
        Some(path) => {
            std::fs::write(path, &script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {} document(s) -> {}",
                "Rendered".green(),
                files.len() - failures,
                path.display()
            );
        }
        None => print!("{}", script),
    }

    if failures > 0 {
        bail!("{} of {} document(s) failed", failures, files.len());
    }
    Ok(())
}

fn axis_command(
    config: &Config,
    bounds: AxisBounds,
    unit: UnitSystem,
    theme: BackgroundTheme,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let result = config.axis.generate(bounds, unit, theme);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let (linear_unit, scaled_unit) = unit.volume_units();
    match output {
        Some(path) => {
            std::fs::write(path, &result.script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Module:".bold(), result.module_name.cyan());
            println!("{} {}", "Invocation:".bold(), result.invocation);
            println!(
                "{} {} {} ({} {})",
                "Volume:".bold(),
                result.volume_linear,
                linear_unit,
                result.volume_scaled,
                scaled_unit
            );
            println!("{} {}", "Output:".bold(), path.display());
        }
        None => {
            print!("{}", result.script);
            println!("{}", result.invocation);
        }
    }

    Ok(())
}

fn kinds_command(kind: Option<&str>, json: bool) -> Result<()> {
    let Some(tag) = kind else {
        if json {
            let kinds: Vec<&str> = NodeKind::ALL.iter().map(|k| k.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&kinds)?);
            return Ok(());
        }
        for kind in NodeKind::ALL {
            println!("  {:<20} {:?}", kind.as_str().cyan(), kind.category());
        }
        return Ok(());
    };

    let kind: NodeKind = tag.parse()?;
    let specs = schema(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(specs)?);
        return Ok(());
    }

    println!("{}", kind.as_str().bold());
    for spec in specs {
        let default = match spec.default {
            None => "required".red().to_string(),
            Some(ParamDefault::Absent) => "optional".bright_black().to_string(),
            Some(default) => format!("default {:?}", default).bright_black().to_string(),
        };
        println!("  {:<14} {:<32} {}", spec.name, spec.ty.describe(), default);
    }
    Ok(())
}
