use clap::Parser;
use std::process::ExitCode;
use treetools::cli::{InfoArgs, init_logging, run_info};

fn main() -> ExitCode {
    init_logging();
    let args = InfoArgs::parse();

    match run_info(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
