//! Single-image hue shift.

use crate::ShiftArgs;
use anyhow::Result;
use tracing::{info, trace};

/// Runs the shift command.
pub fn run(args: ShiftArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), hue = args.hue, "shift::run");

    let image = super::load_image(&args.input)?;
    info!(width = image.width(), height = image.height(), hue = args.hue, "Shifting hue");

    let shifted = huevar_ops::shift_hue(&image, args.hue);
    super::save_image(&args.output, &shifted)?;

    if verbose > 0 {
        println!(
            "Shifted {} by {} degrees -> {}",
            args.input.display(),
            args.hue,
            args.output.display()
        );
    }
    Ok(())
}
