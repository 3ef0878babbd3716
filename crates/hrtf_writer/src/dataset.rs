//! The in-memory HRTF dataset, and the checks which must pass before it can be packed.
//!
//! A dataset is a list of elevation groups from lowest to highest, each holding one impulse response per azimuth.
//! Groups may have different azimuth counts, but every response in the whole dataset must be the same length.
use rayon::prelude::*;

use crate::config::WriterConfig;
use crate::sample::ImpulseResponse;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::IsVariant)]
pub enum ValidationError {
    #[error("The dataset has no elevations")]
    EmptyDataset,

    #[error("Elevation {elevation} has no azimuths")]
    EmptyElevation { elevation: usize },

    #[error("Elevation {elevation}, azimuth {azimuth}: found {found} samples, but responses must all have the same length ({expected} samples)")]
    InconsistentLength {
        elevation: usize,
        azimuth: usize,
        expected: usize,
        found: usize,
    },
}

/// The derived shape of a set of elevation groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetShape {
    /// One entry per elevation group, the number of responses in that group.
    pub azimuth_counts: Vec<usize>,

    /// The length of every response.
    pub response_length: usize,

    /// The sum of `azimuth_counts`.
    pub response_count: usize,
}

impl DatasetShape {
    pub fn elevation_count(&self) -> usize {
        self.azimuth_counts.len()
    }
}

/// Work out the shape of `responses`, failing if it can't be written.
///
/// The expected response length is the length of the first response of the first elevation; everything else is
/// compared against it.
pub fn validate(responses: &[Vec<ImpulseResponse>]) -> Result<DatasetShape, ValidationError> {
    if responses.is_empty() {
        return Err(ValidationError::EmptyDataset);
    }

    let mut azimuth_counts = Vec::with_capacity(responses.len());
    for (elevation, group) in responses.iter().enumerate() {
        if group.is_empty() {
            return Err(ValidationError::EmptyElevation { elevation });
        }
        azimuth_counts.push(group.len());
    }

    let response_length = responses[0][0].len();
    for (elevation, group) in responses.iter().enumerate() {
        for (azimuth, response) in group.iter().enumerate() {
            if response.len() != response_length {
                return Err(ValidationError::InconsistentLength {
                    elevation,
                    azimuth,
                    expected: response_length,
                    found: response.len(),
                });
            }
        }
    }

    let response_count = azimuth_counts.iter().sum();

    Ok(DatasetShape {
        azimuth_counts,
        response_length,
        response_count,
    })
}

/// A validated HRTF dataset, ready to be normalized and packed.
#[derive(Debug, Clone)]
pub struct HrtfDataset {
    config: WriterConfig,
    responses: Vec<Vec<ImpulseResponse>>,
    shape: DatasetShape,
}

impl HrtfDataset {
    /// Validate `responses` and build a dataset from them.
    ///
    /// `responses` is one `Vec` per elevation, lowest elevation first, each holding that elevation's responses in
    /// azimuth order.
    pub fn new(
        config: WriterConfig,
        responses: Vec<Vec<ImpulseResponse>>,
    ) -> Result<HrtfDataset, ValidationError> {
        let shape = validate(&responses)?;

        if config.min_elevation > config.max_elevation {
            log::warn!(
                "Minimum elevation {} is above maximum elevation {}; writing them as given",
                config.min_elevation,
                config.max_elevation
            );
        }

        let level = config.progress_level();
        log::log!(level, "Basic sanity checks passed");
        log::log!(
            level,
            "Dataset has {} responses of {} samples over {} elevations",
            shape.response_count,
            shape.response_length,
            shape.elevation_count()
        );
        log::log!(
            level,
            "sr = {}, min elevation = {}, max elevation = {}",
            config.sample_rate,
            config.min_elevation,
            config.max_elevation
        );
        log::debug!("Azimuth counts: {:?}", shape.azimuth_counts);

        Ok(HrtfDataset {
            config,
            responses,
            shape,
        })
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn responses(&self) -> &[Vec<ImpulseResponse>] {
        &self.responses[..]
    }

    pub fn shape(&self) -> &DatasetShape {
        &self.shape
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub fn min_elevation(&self) -> i32 {
        self.config.min_elevation
    }

    pub fn max_elevation(&self) -> i32 {
        self.config.max_elevation
    }

    pub fn elevation_count(&self) -> usize {
        self.shape.elevation_count()
    }

    pub fn azimuth_counts(&self) -> &[usize] {
        &self.shape.azimuth_counts[..]
    }

    pub fn response_length(&self) -> usize {
        self.shape.response_length
    }

    pub fn response_count(&self) -> usize {
        self.shape.response_count
    }

    /// Iterate over every response: elevation by elevation, then azimuth by azimuth.
    ///
    /// This is the order in which responses are laid out in the packed file.
    pub fn iter_responses(&self) -> impl Iterator<Item = &ImpulseResponse> + '_ {
        self.responses.iter().flatten()
    }

    /// Replace every response with `transform(response)`.
    ///
    /// Responses are transformed in parallel; order is preserved.  Once all of them are done the response length is
    /// re-derived from the first response.  The transform may change the length, but must change all of them the same
    /// way: if any response disagrees with the first, this fails with [ValidationError::InconsistentLength] and the
    /// dataset must not be packed.
    pub fn map<F>(&mut self, transform: F) -> Result<(), ValidationError>
    where
        F: Fn(&ImpulseResponse) -> ImpulseResponse + Sync + Send,
    {
        self.responses.par_iter_mut().for_each(|group| {
            for response in group.iter_mut() {
                *response = transform(response);
            }
        });

        // par_iter_mut has joined by now, so the first response is stable.
        let shape = validate(&self.responses)?;
        if shape.response_length != self.shape.response_length {
            log::debug!(
                "Response length changed from {} to {}",
                self.shape.response_length,
                shape.response_length
            );
        }
        self.shape = shape;
        Ok(())
    }

    /// Convert all responses to f64, rescaling integer sample types onto `[-1, 1)`.
    ///
    /// See [ImpulseResponse::normalize_to_float64].
    pub fn normalize_to_float64(&mut self) -> Result<(), ValidationError> {
        log::log!(self.config.progress_level(), "Converting data to float");
        self.map(ImpulseResponse::normalize_to_float64)
    }

    #[cfg(test)]
    pub(crate) fn responses_mut(&mut self) -> &mut Vec<Vec<ImpulseResponse>> {
        &mut self.responses
    }
}
