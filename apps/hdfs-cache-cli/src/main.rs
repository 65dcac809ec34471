mod cli;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use hdfs_cache_core::error::format_error_chain;
use hdfs_cache_core::logging::init_logging;
use hdfs_cache_core::{run_remote, CoreError, RunSummary};
use std::process::ExitCode;

use crate::cli::{Cli, USAGE};

/// Missing or malformed configuration, as `exit(-1)`.
const EXIT_USAGE: u8 = 255;
const EXIT_FAILURE: u8 = 1;

fn execute(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = cli.load_config()?;
    init_logging(config.verbose);
    tracing::info!(
        endpoint = %config.endpoint,
        pool = %config.pool_name,
        ttl_ms = config.ttl_ms,
        "starting cache run"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let summary = runtime
        .block_on(run_remote(&config))
        .with_context(|| format!("caching into pool {} failed", config.pool_name))?;
    Ok(summary)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            println!("{}", USAGE);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let result = execute(&cli);
    let code = exit_code(&result);
    match &result {
        Ok(summary) => println!("{}", summary),
        Err(err) if code == EXIT_USAGE => {
            eprintln!("{:#}", err);
            println!("{}", USAGE);
        }
        Err(err) => eprintln!("{}", format_error_chain(&**err)),
    }
    ExitCode::from(code)
}

/// Usage and configuration errors map to [`EXIT_USAGE`], anything else that
/// failed to [`EXIT_FAILURE`].
fn exit_code(result: &anyhow::Result<RunSummary>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) if err.downcast_ref::<CoreError>().is_some_and(CoreError::is_usage) => EXIT_USAGE,
        Err(_) => EXIT_FAILURE,
    }
}
