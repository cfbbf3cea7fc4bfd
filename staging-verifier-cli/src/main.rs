use clap::{Parser, Subcommand};
use staging_verifier::{FixtureSource, RuntimeConfig, StagingVerifier, TestRuntime};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "staging-verifier")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Deployment JSON file with named endpoints (default: STAGING_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the default container endpoint; overrides any config file
    #[arg(long)]
    endpoint: Option<String>,
    /// Read `<name>.json` fixtures from this directory instead of the bundled ones
    #[arg(long)]
    fixtures_dir: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Write the album documents to the deployment
    Feed,
    /// Check the album documents are searchable and ranked as expected
    Verify,
    /// Feed, then verify
    Setup,
}

/// An explicit `--endpoint` beats `--config`; the environment is the fallback.
fn runtime_config(cli: &Cli) -> staging_verifier::Result<RuntimeConfig> {
    match (&cli.endpoint, &cli.config) {
        (Some(url), _) => RuntimeConfig::single(url.as_str()),
        (None, Some(path)) => RuntimeConfig::load(path),
        (None, None) => RuntimeConfig::from_env(),
    }
}

async fn run(cli: Cli) -> staging_verifier::Result<()> {
    let runtime = TestRuntime::new(runtime_config(&cli)?);
    tracing::info!(deployment = %runtime.config().deployment, "Resolved deployment");

    let mut verifier = StagingVerifier::new(runtime);
    if let Some(dir) = cli.fixtures_dir {
        verifier = verifier.with_fixtures(FixtureSource::Directory(dir));
    }

    match cli.command.unwrap_or(Command::Verify) {
        Command::Feed => {
            let fed = verifier.feed().await?;
            println!("Fed {} documents", fed);
        }
        Command::Verify => {
            verifier.verify().await?;
            println!("Staging documents are searchable and ranked as expected");
        }
        Command::Setup => {
            verifier.setup().await?;
            println!("Staging documents fed and verified");
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::from(1)
        }
    }
}
