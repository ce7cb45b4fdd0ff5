// src/bin/echo-loop.rs

use std::process::ExitCode;

use graceterm::{cli, logging, run_worker};

#[tokio::main]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("echo-loop error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse_worker();
    logging::init_logging(args.log_level)?;
    run_worker(args).await
}
