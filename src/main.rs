use clap::Parser;
use stocklens::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt::init();
    run(Cli::parse())
}
