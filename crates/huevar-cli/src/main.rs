//! huevar - hue variation CLI
//!
//! Generates hue-shifted variants of an image and runs the HTTP service.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "huevar")]
#[command(author, version, about = "Hue variation generator")]
#[command(long_about = "
Generates hue-rotated variants of an image, one JPEG per hue offset,
and serves the same pipeline over HTTP.

Examples:
  huevar generate shirt.jpg -o out/             # 17 variants, 20..340 step 20
  huevar generate shirt.png -o out/ --hues 90,180,270 -q 85
  huevar shift shirt.jpg -o shirt.120.png --hue 120
  huevar palette --reverse                      # Swatch colors
  huevar serve --config huevar.yaml --port 8080
  huevar -vv serve                              # Debug logging
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one JPEG variant per hue offset
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),

    /// Shift the hue of a single image
    Shift(ShiftArgs),

    /// Print the swatch palette
    Palette(PaletteArgs),

    /// Run the HTTP service
    Serve(ServeArgs),
}

/// Arguments for the `generate` command.
#[derive(Args)]
struct GenerateArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Comma-separated hue offsets in degrees (default: 20,40,...,340)
    #[arg(long, allow_hyphen_values = true)]
    hues: Option<String>,

    /// JPEG quality 1-100
    #[arg(short, long)]
    quality: Option<u8>,

    /// YAML config supplying hues and quality
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the `shift` command.
#[derive(Args)]
struct ShiftArgs {
    /// Input image
    input: PathBuf,

    /// Output image; format follows the extension
    #[arg(short, long)]
    output: PathBuf,

    /// Hue offset in degrees, may be negative
    #[arg(long, allow_hyphen_values = true)]
    hue: i32,
}

/// Arguments for the `palette` command.
#[derive(Args)]
struct PaletteArgs {
    /// Reverse the palette order
    #[arg(short, long)]
    reverse: bool,

    /// YAML config supplying the palette
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Arguments for the `serve` command.
#[derive(Args)]
struct ServeArgs {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overrides config and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, cli.verbose),
        Commands::Shift(args) => commands::shift::run(args, cli.verbose),
        Commands::Palette(args) => commands::palette::run(args),
        Commands::Serve(args) => commands::serve::run(args),
    }
}
