use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use retroplan::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Only show logs with --verbose; stdout stays reserved for results
    let filter = if cli.verbose {
        EnvFilter::new("retroplan=debug")
    } else {
        EnvFilter::new("retroplan=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schedule(args) => cli::schedule::execute(args),
        Commands::Generate(args) => cli::generate::execute(args).await,
        Commands::Tasks(args) => cli::tasks::execute(args).await,
        Commands::Status(args) => cli::tasks::set_status(args).await,
        Commands::Summary(args) => cli::summary::execute(args).await,
        Commands::Reminders(args) => cli::reminders::execute(args).await,
        Commands::Schema => cli::schema::execute(),
    }
}
