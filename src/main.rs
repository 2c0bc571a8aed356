use anyhow::Result;
use bucket_upload::cli::{run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    tracing::info!("bucket-upload starting: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("bucket-upload finished"),
        Err(e) => tracing::error!(error = %e, "bucket-upload exiting with error"),
    }
    result
}
