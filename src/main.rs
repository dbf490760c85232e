use anyhow::Context;
use clap::Parser;

use marketwatch::cli::{self, output, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => cli::run::execute(&args)
            .await
            .with_context(|| format!("monitor failed with config {}", args.config.display())),
        Commands::Rules => {
            cli::rules::execute();
            Ok(())
        }
        Commands::Check(arg) => cli::check::execute(&arg.config)
            .with_context(|| format!("config check failed for {}", arg.config.display())),
    }
}
