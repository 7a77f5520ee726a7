use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ralph_prd::cli::{run_check, run_convert, run_create, Cli, Command};
use ralph_prd::theme::{paint, Tone};
use ralph_prd::PrdResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{}", paint(&format!("ERROR: {}", e), Tone::Error));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> PrdResult<()> {
    let mut stdout = io::stdout();

    match cli.command {
        Command::Convert(args) => {
            run_convert(&args.resolve(), &mut stdout).await?;
        }
        Command::Create(args) => {
            run_create(&args.resolve(), io::stdin().lock(), &mut stdout)?;
        }
        Command::Check(args) => {
            run_check(&args.path, &mut stdout)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so `convert --stdout` output stays pure JSON
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "ralph_prd=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
