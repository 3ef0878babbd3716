//! Write HRTF datasets to the binary format Synthizer loads.
//!
//! The pipeline is: build and validate an [HrtfDataset], optionally normalize it, derive its [FormatDescriptor],
//! [pack] it, then write the packed bytes somewhere.  [standard_build] does all of that in one call.  Nothing here
//! reads the format back.
#[cfg(test)]
mod close_floats;
mod config;
mod dataset;
mod error;
mod format;
mod packer;
mod pipeline;
mod sample;
mod writer;

pub use config::{WriterConfig, WriterConfigBuilder, WriterConfigBuilderError};
pub use dataset::{validate, DatasetShape, HrtfDataset, ValidationError};
pub use error::{Error, Result};
pub use format::{Encoding, Endianness, Field, FieldKind, FormatDescriptor, IDENTIFIER_LEN};
pub use packer::{pack, PackedHrtf, PackingError, ENDIANNESS_MARKER};
pub use pipeline::{standard_build, standard_build_to};
pub use sample::{normalize_integers, ImpulseResponse};
pub use writer::{write_file, write_to, WriteError};
