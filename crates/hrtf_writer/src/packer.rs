//! Turn a dataset into the bytes of an HRTF file.
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use uuid::Uuid;

use crate::config::WriterConfig;
use crate::dataset::HrtfDataset;
use crate::format::{Endianness, FieldKind, FormatDescriptor};

/// Written right after the identifier.  A reader which sees anything other than 1 here must swap bytes.
pub const ENDIANNESS_MARKER: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::IsVariant)]
pub enum PackingError {
    #[error("Elevation {elevation}, azimuth {azimuth} has {found} samples but the dataset expects {expected}; the dataset must be valid before packing")]
    NotValidated {
        elevation: usize,
        azimuth: usize,
        expected: usize,
        found: usize,
    },

    #[error("Elevation {elevation} no longer matches the azimuth counts the dataset was validated with")]
    StaleShape { elevation: usize },

    #[error("The format descriptor {descriptor:?} does not describe this dataset (expected {expected:?})")]
    DescriptorMismatch {
        descriptor: FormatDescriptor,
        expected: FormatDescriptor,
    },

    #[error("The {field} is {value}, which does not fit in a 32-bit signed integer")]
    OutOfRange { field: FieldKind, value: u64 },

    #[error("Packed {actual} bytes, but the layout requires exactly {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// The packed bytes of an HRTF file.
///
/// Immutable once built: the only way to get one is [pack].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedHrtf {
    id: Uuid,
    endianness: Endianness,
    bytes: Box<[u8]>,
}

impl PackedHrtf {
    /// The identifier written at the start of the file.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn header_int(field: FieldKind, value: usize) -> Result<i32, PackingError> {
    i32::try_from(value).map_err(|_| PackingError::OutOfRange {
        field,
        value: value as u64,
    })
}

/// Every response must still agree with the shape the dataset last validated.
fn check_validated(dataset: &HrtfDataset) -> Result<(), PackingError> {
    let shape = dataset.shape();
    let responses = dataset.responses();

    let elevations = responses.len().max(shape.elevation_count());
    for elevation in 0..elevations {
        let found = responses.get(elevation).map(|g| g.len()).unwrap_or(0);
        let expected = shape.azimuth_counts.get(elevation).copied().unwrap_or(0);
        if found != expected {
            return Err(PackingError::StaleShape { elevation });
        }
    }

    for (elevation, group) in responses.iter().enumerate() {
        for (azimuth, response) in group.iter().enumerate() {
            if response.len() != shape.response_length {
                return Err(PackingError::NotValidated {
                    elevation,
                    azimuth,
                    expected: shape.response_length,
                    found: response.len(),
                });
            }
        }
    }

    Ok(())
}

/// Pack `dataset` using the layout in `descriptor`.
///
/// A fresh identifier is generated on every call, so packing the same dataset twice gives files which differ in their
/// first 16 bytes and nowhere else.
pub fn pack(
    dataset: &HrtfDataset,
    descriptor: &FormatDescriptor,
) -> Result<PackedHrtf, PackingError> {
    check_validated(dataset)?;

    let expected = FormatDescriptor::for_dataset(dataset);
    if *descriptor != expected {
        return Err(PackingError::DescriptorMismatch {
            descriptor: descriptor.clone(),
            expected,
        });
    }

    log::debug!("Format string: {}", descriptor.format_string());

    let packed = match descriptor.endianness() {
        Endianness::Little => pack_with::<LittleEndian>(dataset, descriptor)?,
        Endianness::Big => pack_with::<BigEndian>(dataset, descriptor)?,
    };

    log::log!(
        dataset.config().progress_level(),
        "Data packed. Total size is {}",
        packed.len()
    );
    Ok(packed)
}

/// The i32 fields between the identifier and the samples, in file order.
///
/// Only values which are written must fit in an i32; the total sample count never appears in the file.
fn header_values(
    config: &WriterConfig,
    azimuth_counts: &[usize],
    descriptor: &FormatDescriptor,
) -> Result<Vec<i32>, PackingError> {
    let mut header = vec![
        ENDIANNESS_MARKER,
        header_int(FieldKind::SampleRate, config.sample_rate as usize)?,
        header_int(FieldKind::ResponseCount, descriptor.response_count())?,
        header_int(FieldKind::ElevationCount, descriptor.elevation_count())?,
        config.min_elevation,
        config.max_elevation,
    ];
    for count in azimuth_counts {
        header.push(header_int(FieldKind::AzimuthCounts, *count)?);
    }
    header.push(header_int(
        FieldKind::ResponseLength,
        descriptor.response_length(),
    )?);
    Ok(header)
}

fn pack_with<B: ByteOrder>(
    dataset: &HrtfDataset,
    descriptor: &FormatDescriptor,
) -> Result<PackedHrtf, PackingError> {
    // Convert everything up front so that a range failure can't leave a half-built buffer around.
    let header = header_values(dataset.config(), dataset.azimuth_counts(), descriptor)?;

    let id = Uuid::new_v4();
    let mut out = Vec::with_capacity(descriptor.total_size());
    out.extend_from_slice(id.as_bytes());

    for value in header {
        let mut word = [0u8; 4];
        B::write_i32(&mut word, value);
        out.extend_from_slice(&word);
    }

    for response in dataset.iter_responses() {
        response.extend_f32::<B>(&mut out);
    }

    if out.len() != descriptor.total_size() {
        return Err(PackingError::SizeMismatch {
            expected: descriptor.total_size(),
            actual: out.len(),
        });
    }

    Ok(PackedHrtf {
        id,
        endianness: descriptor.endianness(),
        bytes: out.into_boxed_slice(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::WriterConfigBuilder;
    use crate::sample::ImpulseResponse;

    fn config(endianness: Endianness) -> WriterConfig {
        WriterConfigBuilder::default()
            .sample_rate(44100)
            .min_elevation(0)
            .max_elevation(0)
            .endianness(endianness)
            .progress(false)
            .build()
            .unwrap()
    }

    fn small_dataset(endianness: Endianness) -> HrtfDataset {
        HrtfDataset::new(
            config(endianness),
            vec![vec![
                ImpulseResponse::from(vec![0.0f64, 1.0, 2.0]),
                ImpulseResponse::from(vec![1.0f64, 2.0, 3.0]),
            ]],
        )
        .unwrap()
    }

    fn ints<B: ByteOrder>(bytes: &[u8]) -> Vec<i32> {
        bytes.chunks_exact(4).map(B::read_i32).collect()
    }

    fn floats<B: ByteOrder>(bytes: &[u8]) -> Vec<f32> {
        bytes.chunks_exact(4).map(B::read_f32).collect()
    }

    #[test]
    fn test_small_little() {
        let dataset = small_dataset(Endianness::Little);
        let desc = FormatDescriptor::for_dataset(&dataset);
        let packed = pack(&dataset, &desc).unwrap();
        let bytes = packed.as_bytes();

        assert_eq!(packed.len(), 16 + 4 * 8 + 4 * 6);
        assert_eq!(&bytes[..16], packed.id().as_bytes());
        assert_eq!(
            ints::<LittleEndian>(&bytes[16..48]),
            vec![1, 44100, 2, 1, 0, 0, 2, 3]
        );
        assert_eq!(
            floats::<LittleEndian>(&bytes[48..]),
            vec![0.0, 1.0, 2.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn test_small_big() {
        let dataset = small_dataset(Endianness::Big);
        let desc = FormatDescriptor::for_dataset(&dataset);
        let packed = pack(&dataset, &desc).unwrap();
        let bytes = packed.as_bytes();

        assert!(packed.endianness().is_big());
        assert_eq!(&bytes[16..20], &[0, 0, 0, 1]);
        assert_eq!(
            ints::<BigEndian>(&bytes[16..48]),
            vec![1, 44100, 2, 1, 0, 0, 2, 3]
        );
        assert_eq!(
            floats::<BigEndian>(&bytes[48..]),
            vec![0.0, 1.0, 2.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn test_repacking_changes_only_the_id() {
        let dataset = small_dataset(Endianness::Little);
        let desc = FormatDescriptor::for_dataset(&dataset);
        let a = pack(&dataset, &desc).unwrap();
        let b = pack(&dataset, &desc).unwrap();

        assert_ne!(a.id(), b.id());
        assert_ne!(&a.as_bytes()[..16], &b.as_bytes()[..16]);
        assert_eq!(&a.as_bytes()[16..], &b.as_bytes()[16..]);
    }

    #[test]
    fn test_unnormalized_integers_pack_numerically() {
        let dataset = HrtfDataset::new(
            config(Endianness::Little),
            vec![vec![ImpulseResponse::from(vec![0u8, 128, 255])]],
        )
        .unwrap();
        let packed = pack(&dataset, &FormatDescriptor::for_dataset(&dataset)).unwrap();
        let start = FormatDescriptor::for_dataset(&dataset).offset_of(FieldKind::Samples);
        assert_eq!(
            floats::<LittleEndian>(&packed.as_bytes()[start..]),
            vec![0.0, 128.0, 255.0]
        );
    }

    #[test]
    fn test_negative_elevations() {
        let config = WriterConfigBuilder::default()
            .sample_rate(48000)
            .min_elevation(-40)
            .max_elevation(90)
            .progress(false)
            .build()
            .unwrap();
        let dataset = HrtfDataset::new(
            config,
            vec![
                vec![ImpulseResponse::from(vec![0.5f32]); 2],
                vec![ImpulseResponse::from(vec![0.25f32]); 3],
            ],
        )
        .unwrap();
        let desc = FormatDescriptor::for_dataset(&dataset);
        let packed = pack(&dataset, &desc).unwrap();
        let ints = ints::<LittleEndian>(&packed.as_bytes()[16..16 + 4 * 9]);
        assert_eq!(ints, vec![1, 48000, 5, 2, -40, 90, 2, 3, 1]);
    }

    #[test]
    fn test_refuses_invalid_dataset() {
        let mut dataset = small_dataset(Endianness::Little);
        dataset.responses_mut()[0][1] = ImpulseResponse::from(vec![1.0f64]);
        let desc = FormatDescriptor::for_dataset(&dataset);
        let err = pack(&dataset, &desc).unwrap_err();
        assert_eq!(
            err,
            PackingError::NotValidated {
                elevation: 0,
                azimuth: 1,
                expected: 3,
                found: 1,
            }
        );
    }

    #[test]
    fn test_refuses_added_elevation() {
        let mut dataset = small_dataset(Endianness::Little);
        dataset
            .responses_mut()
            .push(vec![ImpulseResponse::from(vec![1.0f64, 2.0, 3.0])]);
        let desc = FormatDescriptor::for_dataset(&dataset);
        assert_eq!(
            pack(&dataset, &desc).unwrap_err(),
            PackingError::StaleShape { elevation: 1 }
        );
    }

    #[test]
    fn test_refuses_wrong_descriptor() {
        let dataset = small_dataset(Endianness::Little);
        let desc = FormatDescriptor::new(Endianness::Little, 1, 2, 4);
        assert!(pack(&dataset, &desc).unwrap_err().is_descriptor_mismatch());
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let config = WriterConfigBuilder::default()
            .sample_rate(u32::MAX)
            .min_elevation(0)
            .max_elevation(0)
            .progress(false)
            .build()
            .unwrap();
        let dataset =
            HrtfDataset::new(config, vec![vec![ImpulseResponse::from(vec![0.0f32])]]).unwrap();
        let err = pack(&dataset, &FormatDescriptor::for_dataset(&dataset)).unwrap_err();
        assert_eq!(
            err,
            PackingError::OutOfRange {
                field: FieldKind::SampleRate,
                value: u32::MAX as u64,
            }
        );
    }

    #[test]
    fn test_total_sample_count_is_not_limited_to_i32() {
        let config = config(Endianness::Little);
        // 2^32 samples in all, but every written field is small.
        let desc = FormatDescriptor::new(Endianness::Little, 1, 65536, 65536);
        assert!(desc.sample_count() > i32::MAX as usize);

        let header = header_values(&config, &[65536], &desc).unwrap();
        assert_eq!(header, vec![1, 44100, 65536, 1, 0, 0, 65536, 65536]);
    }

    #[test]
    fn test_written_fields_must_fit_i32() {
        let config = config(Endianness::Little);
        let too_many = i32::MAX as usize + 1;
        let desc = FormatDescriptor::new(Endianness::Little, 1, 1, too_many);
        assert_eq!(
            header_values(&config, &[1], &desc).unwrap_err(),
            PackingError::OutOfRange {
                field: FieldKind::ResponseLength,
                value: too_many as u64,
            }
        );
    }
}
