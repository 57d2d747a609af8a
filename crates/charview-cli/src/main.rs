//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers, which drive the store and orchestrator
//! through CliContext.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use charview_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// Log to stderr so table output on stdout stays clean.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` for our crates with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,charview=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_env(cli.api_url.as_deref());

    match command {
        Commands::List { page, query } => {
            let ctx = bootstrap(&config.with_catalog(query.catalog_config()))?;
            handlers::list::execute(&ctx, page, &query).await?;
        }
        Commands::Show { id } => {
            let ctx = bootstrap(&config)?;
            handlers::show::execute(&ctx, id).await?;
        }
        Commands::Browse { query } => {
            let ctx = bootstrap(&config.with_catalog(query.catalog_config()))?;
            handlers::browse::execute(&ctx, &query).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
