//! Definition of the Clap command line.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use synthizer_hrtf_writer::Endianness;

#[derive(Debug, Parser)]
pub struct CliArgs {
    /// Log at debug level, including the full file layout.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build an HRTF file from a manifest.
    Build(BuildArgs),

    /// Validate a manifest and print the layout of the file it would produce, without writing anything.
    Describe(DescribeArgs),
}

#[derive(Debug, Parser)]
pub struct ManifestArgs {
    /// YAML or JSON manifest describing the dataset.  Paths inside it are relative to the manifest.
    pub manifest: PathBuf,

    /// Override the manifest's byte order.
    #[arg(long, value_enum)]
    pub endianness: Option<EndiannessArg>,
}

#[derive(Debug, Parser)]
pub struct BuildArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Where to write the packed file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Pack samples exactly as loaded, without converting integer samples to the -1..1 range.
    #[arg(long)]
    pub skip_normalize: bool,
}

#[derive(Debug, Parser)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum EndiannessArg {
    Big,
    Little,
}

impl From<EndiannessArg> for Endianness {
    fn from(value: EndiannessArg) -> Endianness {
        match value {
            EndiannessArg::Big => Endianness::Big,
            EndiannessArg::Little => Endianness::Little,
        }
    }
}
