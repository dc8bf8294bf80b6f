//! Batch variant generation.
//!
//! Writes `{output}/{stem}.{hue}.jpg` for every hue offset.

use crate::GenerateArgs;
use anyhow::{Context, Result};
use huevar_io::jpeg::JpegWriter;
use huevar_ops::{HueShiftSpec, VariationBatchGenerator, VariationResult};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace};

/// Runs the generate command.
pub fn run(args: GenerateArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "generate::run");

    let config = super::load_config(args.config.as_deref())?;
    let spec = match &args.hues {
        Some(list) => list
            .parse::<HueShiftSpec>()
            .with_context(|| format!("Invalid hue list: {list}"))?,
        None => config.hues.clone(),
    };
    let quality = args.quality.unwrap_or(config.jpeg_quality);

    let image = super::load_image(&args.input)?;
    info!(
        width = image.width(),
        height = image.height(),
        format = %image.format(),
        hues = spec.len(),
        quality,
        "Generating variations"
    );

    let start = Instant::now();
    let generator = VariationBatchGenerator::new(spec);
    let writer = JpegWriter::with_quality(quality);
    let base = base_name(&args.input);
    let results = generator
        .generate(&image, &base, &writer)
        .context("Failed to generate variations")?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Encoded variants");

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create: {}", args.output.display()))?;
    let written = write_results(&args.output, &results)?;

    if args.json {
        let report = json!({
            "input": args.input.display().to_string(),
            "hues": generator.spec().hues(),
            "images": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (path, result) in written.iter().zip(&results) {
            if verbose > 0 {
                println!(
                    "  {:>4}  {}  ({})",
                    result.hue,
                    path.display(),
                    super::format_size(result.bytes.len() as u64)
                );
            }
        }
        println!(
            "Generated {} variations of {} in {:.2?}",
            results.len(),
            args.input.display(),
            start.elapsed()
        );
    }

    Ok(())
}

/// File stem of `input`, or `image` when it has none.
fn base_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image")
        .to_string()
}

fn write_results(dir: &Path, results: &[VariationResult]) -> Result<Vec<PathBuf>> {
    results
        .iter()
        .map(|result| {
            let path = dir.join(&result.path);
            fs::write(&path, &result.bytes)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            trace!(path = %path.display(), hue = result.hue, "wrote variant");
            Ok(path)
        })
        .collect()
}
