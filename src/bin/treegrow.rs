use clap::Parser;
use std::process::ExitCode;
use treetools::cli::{GrowArgs, init_logging, run_grow};

fn main() -> ExitCode {
    init_logging();
    let args = GrowArgs::parse();

    match run_grow(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
