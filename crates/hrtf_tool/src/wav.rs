//! Loading impulse responses from WAV files.
//!
//! Samples keep their stored type so that normalization can scale them by that type's range.  24-bit files are the
//! exception: hound hands them to us in an i32, so we shift them up to fill it.
use std::path::Path;

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavReader};

use synthizer_hrtf_writer::ImpulseResponse;

fn read_channel<S: hound::Sample, R: std::io::Read>(
    reader: &mut WavReader<R>,
    channel: u16,
) -> Result<Vec<S>> {
    let stride = reader.spec().channels as usize;
    let samples = reader
        .samples::<S>()
        .skip(channel as usize)
        .step_by(stride)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples)
}

/// Read one channel of the WAV file at `path` as an impulse response.
///
/// `sample_rate` is the rate the dataset claims.  A file at another rate is loaded anyway, since we don't resample, but
/// it is almost certainly a mistake and we say so.
pub fn read_response(path: &Path, channel: u16, sample_rate: u32) -> Result<ImpulseResponse> {
    let mut reader =
        WavReader::open(path).with_context(|| format!("Opening {}", path.display()))?;
    let spec = reader.spec();

    if channel >= spec.channels {
        bail!(
            "{} has {} channels, so channel {} does not exist",
            path.display(),
            spec.channels,
            channel
        );
    }

    if spec.sample_rate != sample_rate {
        log::warn!(
            "{} is at {} HZ but the dataset is at {} HZ",
            path.display(),
            spec.sample_rate,
            sample_rate
        );
    }

    let response = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => {
            ImpulseResponse::from(read_channel::<f32, _>(&mut reader, channel)?)
        }
        (SampleFormat::Int, 8) => {
            ImpulseResponse::from(read_channel::<i8, _>(&mut reader, channel)?)
        }
        (SampleFormat::Int, 16) => {
            ImpulseResponse::from(read_channel::<i16, _>(&mut reader, channel)?)
        }
        (SampleFormat::Int, 24) => {
            let samples = read_channel::<i32, _>(&mut reader, channel)?;
            ImpulseResponse::from(samples.into_iter().map(|s| s << 8).collect::<Vec<_>>())
        }
        (SampleFormat::Int, 32) => {
            ImpulseResponse::from(read_channel::<i32, _>(&mut reader, channel)?)
        }
        (format, bits) => bail!(
            "{}: unsupported sample format {:?} at {} bits",
            path.display(),
            format,
            bits
        ),
    };

    log::debug!(
        "Loaded {} samples from {} channel {}",
        response.len(),
        path.display(),
        channel
    );
    Ok(response)
}
