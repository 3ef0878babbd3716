use crate::format::Endianness;

/// Everything about an HRTF file which isn't the impulse responses themselves.
///
/// Build with [WriterConfigBuilder]:
///
/// ```
/// use synthizer_hrtf_writer::{Endianness, WriterConfigBuilder};
///
/// let config = WriterConfigBuilder::default()
///     .sample_rate(44100)
///     .min_elevation(-40)
///     .max_elevation(90)
///     .endianness(Endianness::Big)
///     .build()
///     .unwrap();
/// assert!(config.progress);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, derive_builder::Builder, serde::Deserialize, serde::Serialize)]
#[builder(pattern = "owned")]
pub struct WriterConfig {
    /// Sampling rate of the impulse responses, in HZ.
    pub sample_rate: u32,

    /// Lowest elevation in degrees, matching the first elevation group.
    pub min_elevation: i32,

    /// Highest elevation in degrees, matching the last elevation group.
    pub max_elevation: i32,

    /// Byte order of the machine which will load the file.
    #[builder(default)]
    #[serde(default)]
    pub endianness: Endianness,

    /// If set, report progress through each stage at info level.  Otherwise the same messages go out at debug.
    #[builder(default = "true")]
    #[serde(default = "default_progress")]
    pub progress: bool,
}

fn default_progress() -> bool {
    true
}

impl WriterConfig {
    pub(crate) fn progress_level(&self) -> log::Level {
        if self.progress {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}
