//! The standard build: normalize, pack, write.
use std::io::Write;
use std::path::Path;

use crate::dataset::HrtfDataset;
use crate::error::Result;
use crate::format::FormatDescriptor;
use crate::packer::{pack, PackedHrtf};
use crate::writer::{write_file, write_to};

fn normalize_and_pack(mut dataset: HrtfDataset) -> Result<PackedHrtf> {
    log::log!(
        dataset.config().progress_level(),
        "Standard build requested"
    );
    dataset.normalize_to_float64()?;

    let descriptor = FormatDescriptor::for_dataset(&dataset);
    log::debug!("Layout: {:?}", descriptor.fields());
    Ok(pack(&dataset, &descriptor)?)
}

/// Run the transformations most HRIR sets need, then write the file to `path`.
///
/// The dataset is consumed.  Each stage runs once; the first failure is returned as-is and later stages don't run.
/// On success, returns the packed file so that callers can see what was written, for example its identifier.
pub fn standard_build(dataset: HrtfDataset, path: impl AsRef<Path>) -> Result<PackedHrtf> {
    let path = path.as_ref();
    let level = dataset.config().progress_level();

    let packed = normalize_and_pack(dataset)?;
    write_file(&packed, path)?;

    log::log!(level, "Data written to {}", path.display());
    Ok(packed)
}

/// Like [standard_build], but writes to any sink.
pub fn standard_build_to<W: Write>(
    dataset: HrtfDataset,
    sink: &mut W,
    destination: &str,
) -> Result<PackedHrtf> {
    let level = dataset.config().progress_level();

    let packed = normalize_and_pack(dataset)?;
    write_to(&packed, sink, destination)?;

    log::log!(level, "Data written to {destination}");
    Ok(packed)
}
