//! The binary layout of an HRTF file.
//!
//! Files look like this, every multi-byte value in the byte order chosen at build time:
//!
//! - 16 raw bytes of a random identifier.
//! - 2 i32: the endianness marker (always 1) and the sampling rate.
//! - 4 i32: response count, elevation count, min elevation, max elevation.
//! - One i32 per elevation: the azimuth counts, lowest elevation first.
//! - 1 i32: the length of every response in samples.
//! - `response_count * response_length` f32: the responses, elevation by elevation, azimuth by azimuth.
//!
//! A reader checks the marker to learn whether it has to swap bytes.  The descriptor here only knows sizes and order;
//! the packer fills in the values.
use crate::dataset::HrtfDataset;

/// Byte order of a packed file.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[display(fmt = "big")]
    Big,

    #[default]
    #[display(fmt = "little")]
    Little,
}

impl Endianness {
    /// The prefix used for this byte order in the format string, as with Python's `struct` module.
    pub fn format_token(&self) -> char {
        match self {
            Endianness::Big => '>',
            Endianness::Little => '<',
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, derive_more::Display)]
pub enum FieldKind {
    #[display(fmt = "identifier")]
    Identifier,
    #[display(fmt = "endianness marker")]
    EndiannessMarker,
    #[display(fmt = "sample rate")]
    SampleRate,
    #[display(fmt = "response count")]
    ResponseCount,
    #[display(fmt = "elevation count")]
    ElevationCount,
    #[display(fmt = "min elevation")]
    MinElevation,
    #[display(fmt = "max elevation")]
    MaxElevation,
    #[display(fmt = "azimuth counts")]
    AzimuthCounts,
    #[display(fmt = "response length")]
    ResponseLength,
    #[display(fmt = "samples")]
    Samples,
}

/// How each element of a field is stored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Encoding {
    /// Single bytes, not subject to byte order.
    RawByte,
    I32,
    F32,
}

impl Encoding {
    pub fn width(&self) -> usize {
        match self {
            Encoding::RawByte => 1,
            Encoding::I32 | Encoding::F32 => 4,
        }
    }
}

/// One entry of the layout: `count` elements of `encoding`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Field {
    pub kind: FieldKind,
    pub encoding: Encoding,
    pub count: usize,
}

impl Field {
    pub fn size(&self) -> usize {
        self.encoding.width().saturating_mul(self.count)
    }
}

/// Length of the identifier at the start of every file.
pub const IDENTIFIER_LEN: usize = 16;

/// The layout of one packed file.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FormatDescriptor {
    endianness: Endianness,
    elevation_count: usize,
    response_count: usize,
    response_length: usize,
}

impl FormatDescriptor {
    pub fn new(
        endianness: Endianness,
        elevation_count: usize,
        response_count: usize,
        response_length: usize,
    ) -> Self {
        Self {
            endianness,
            elevation_count,
            response_count,
            response_length,
        }
    }

    /// Build the descriptor matching the current shape of `dataset`.
    pub fn for_dataset(dataset: &HrtfDataset) -> Self {
        Self::new(
            dataset.config().endianness,
            dataset.elevation_count(),
            dataset.response_count(),
            dataset.response_length(),
        )
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn elevation_count(&self) -> usize {
        self.elevation_count
    }

    pub fn response_count(&self) -> usize {
        self.response_count
    }

    pub fn response_length(&self) -> usize {
        self.response_length
    }

    /// Total number of samples in the file.
    ///
    /// Descriptors can be built with any sizes, so this and the other size computations saturate at `usize::MAX`
    /// rather than overflowing.  A saturated layout can never match a real dataset.
    pub fn sample_count(&self) -> usize {
        self.response_count.saturating_mul(self.response_length)
    }

    /// The fields of the file, in order.
    pub fn fields(&self) -> Vec<Field> {
        use Encoding::*;
        use FieldKind::*;

        let f = |kind, encoding, count| Field {
            kind,
            encoding,
            count,
        };

        vec![
            f(Identifier, RawByte, IDENTIFIER_LEN),
            f(EndiannessMarker, I32, 1),
            f(SampleRate, I32, 1),
            f(ResponseCount, I32, 1),
            f(ElevationCount, I32, 1),
            f(MinElevation, I32, 1),
            f(MaxElevation, I32, 1),
            f(AzimuthCounts, I32, self.elevation_count),
            f(ResponseLength, I32, 1),
            f(Samples, F32, self.sample_count()),
        ]
    }

    /// Exact size of the packed file in bytes.
    pub fn total_size(&self) -> usize {
        let ints = self.elevation_count.saturating_add(2 + 4 + 1);
        IDENTIFIER_LEN
            .saturating_add(ints.saturating_mul(4))
            .saturating_add(self.sample_count().saturating_mul(4))
    }

    /// Byte offset at which `kind` starts.
    pub fn offset_of(&self, kind: FieldKind) -> usize {
        self.fields()
            .iter()
            .take_while(|f| f.kind != kind)
            .fold(0usize, |acc, f| acc.saturating_add(f.size()))
    }

    /// Render the layout as a `struct`-module style format string, e.g. `<16B2i4i3ii600f`.
    ///
    /// Only used for logging, but it's a compact way to see the whole layout at once.
    pub fn format_string(&self) -> String {
        format!(
            "{}16B2i4i{}ii{}f",
            self.endianness.format_token(),
            self.elevation_count,
            self.sample_count()
        )
    }
}
