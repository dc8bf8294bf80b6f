//! Swatch palette listing.

use crate::PaletteArgs;
use anyhow::Result;

/// Runs the palette command.
pub fn run(args: PaletteArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let palette = if args.reverse {
        config.palette.reversed()
    } else {
        config.palette
    };
    for color in palette.iter() {
        println!("{color}");
    }
    Ok(())
}
