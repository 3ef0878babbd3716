//! Command line front end for the HRTF writer.
//!
//! A manifest lists the elevations of a dataset, lowest first, and for each the impulse responses in azimuth order,
//! either inline or as WAV files:
//!
//! ```yaml
//! sample_rate: 44100
//! min_elevation: -40
//! max_elevation: 90
//! endianness: little
//! elevations:
//!   - azimuths:
//!       - wav: elev-40/az000.wav
//!       - wav: elev-40/az006.wav
//!         channel: 1
//!   - azimuths:
//!       - samples: [0.0, 0.5, 0.25]
//! ```
//!
//! `hrtf_tool build manifest.yaml -o out.hrtf` then runs the standard build.
mod cli_args;
mod commands;
mod manifest;
mod wav;

fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let args = cli_args::CliArgs::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    commands::dispatch_command(args)
}
