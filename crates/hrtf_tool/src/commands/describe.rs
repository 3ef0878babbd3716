use anyhow::Result;

use synthizer_hrtf_writer as hw;

use crate::cli_args::{CliArgs, DescribeArgs};
use crate::manifest::Manifest;

pub fn describe(_top_args: &CliArgs, args: &DescribeArgs) -> Result<()> {
    let dataset = Manifest::load_dataset(&args.manifest)?;
    let descriptor = hw::FormatDescriptor::for_dataset(&dataset);

    println!("format: {}", descriptor.format_string());
    println!("sample rate: {}", dataset.sample_rate());
    println!(
        "elevations: {} ({} to {} degrees)",
        dataset.elevation_count(),
        dataset.min_elevation(),
        dataset.max_elevation()
    );
    println!("azimuth counts: {:?}", dataset.azimuth_counts());
    println!(
        "responses: {} of {} samples",
        dataset.response_count(),
        dataset.response_length()
    );

    for field in descriptor.fields() {
        println!(
            "{:>8}  {:<18} {} x {:?}",
            descriptor.offset_of(field.kind),
            field.kind.to_string(),
            field.count,
            field.encoding
        );
    }
    println!("total: {} bytes", descriptor.total_size());

    Ok(())
}
