use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = tribc_drv::Cli::parse();
    tribc_drv::run(cli)
}
