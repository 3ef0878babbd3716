use anyhow::{Context, Result};

use synthizer_hrtf_writer as hw;

use crate::cli_args::{BuildArgs, CliArgs};
use crate::manifest::Manifest;

pub fn build(_top_args: &CliArgs, args: &BuildArgs) -> Result<()> {
    let dataset = Manifest::load_dataset(&args.manifest)?;

    let packed = if args.skip_normalize {
        let descriptor = hw::FormatDescriptor::for_dataset(&dataset);
        let packed = hw::pack(&dataset, &descriptor)?;
        hw::write_file(&packed, &args.output)?;
        packed
    } else {
        hw::standard_build(dataset, &args.output)
            .with_context(|| format!("Building {}", args.output.display()))?
    };

    log::info!(
        "Wrote {} ({} bytes, id {})",
        args.output.display(),
        packed.len(),
        packed.id()
    );
    Ok(())
}
