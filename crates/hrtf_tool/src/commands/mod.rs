mod build;
mod describe;

use anyhow::Result;

use crate::cli_args;

/// Figure out what command to run, then run it.
pub fn dispatch_command(args: cli_args::CliArgs) -> Result<()> {
    match &args.command {
        cli_args::Command::Build(b) => build::build(&args, b),
        cli_args::Command::Describe(d) => describe::describe(&args, d),
    }
}
