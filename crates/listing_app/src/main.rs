mod app;
mod cli;
mod logging;
mod persistence;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let stats = app::run_app(cli).await?;
    println!(
        "{} listings: {} viewed, {} applied",
        stats.total, stats.viewed, stats.applied
    );
    Ok(())
}
