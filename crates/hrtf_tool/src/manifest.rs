//! Dataset manifests.
//!
//! The writer configuration is flattened into the top level of the manifest, next to the list of elevations.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use synthizer_hrtf_writer::{HrtfDataset, ImpulseResponse, WriterConfig};

use crate::cli_args::ManifestArgs;

#[derive(Debug, serde::Deserialize)]
pub struct Manifest {
    #[serde(flatten)]
    pub config: WriterConfig,

    /// Lowest elevation first.
    pub elevations: Vec<ElevationEntry>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ElevationEntry {
    /// In azimuth order.
    pub azimuths: Vec<AzimuthEntry>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum AzimuthEntry {
    Inline {
        samples: Vec<f64>,
    },
    Wav {
        wav: PathBuf,
        #[serde(default)]
        channel: u16,
    },
}

impl Manifest {
    /// Parse a manifest, choosing JSON or YAML by the file extension.
    pub fn parse(text: &str, path: &Path) -> Result<Manifest> {
        let is_json = path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(text)
                .with_context(|| format!("Parsing {} as JSON", path.display()))
        } else {
            serde_yaml::from_str(text)
                .with_context(|| format!("Parsing {} as YAML", path.display()))
        }
    }

    pub fn load(path: &Path) -> Result<Manifest> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Reading manifest {}", path.display()))?;
        Self::parse(&text, path)
    }

    /// Load every response the manifest names.  Relative WAV paths are resolved against `base_dir`.
    pub fn load_responses(&self, base_dir: &Path) -> Result<Vec<Vec<ImpulseResponse>>> {
        let mut out = Vec::with_capacity(self.elevations.len());

        for (elev_index, elev) in self.elevations.iter().enumerate() {
            let mut group = Vec::with_capacity(elev.azimuths.len());
            for (az_index, az) in elev.azimuths.iter().enumerate() {
                let response = match az {
                    AzimuthEntry::Inline { samples } => ImpulseResponse::from(samples.clone()),
                    AzimuthEntry::Wav { wav, channel } => {
                        let path = base_dir.join(wav);
                        crate::wav::read_response(&path, *channel, self.config.sample_rate)
                            .with_context(|| {
                                format!("Elevation {elev_index}, azimuth {az_index}")
                            })?
                    }
                };
                group.push(response);
            }
            out.push(group);
        }

        Ok(out)
    }

    /// Load the manifest named by `args`, apply command line overrides, and build a validated dataset from it.
    pub fn load_dataset(args: &ManifestArgs) -> Result<HrtfDataset> {
        let mut manifest = Self::load(&args.manifest)?;
        if let Some(e) = args.endianness {
            manifest.config.endianness = e.into();
        }

        let base_dir = args.manifest.parent().unwrap_or_else(|| Path::new("."));
        let responses = manifest.load_responses(base_dir)?;

        Ok(HrtfDataset::new(manifest.config, responses)?)
    }
}
