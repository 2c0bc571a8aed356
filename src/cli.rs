//! CLI interface for bucket-upload: argument parsing and the async
//! entrypoint used by both `main()` and integration tests.
//!
//! All upload logic lives in [`crate::upload`]; this module is strictly CLI
//! glue. The two Supabase credentials are read from the process environment
//! here, at the boundary, and handed to the orchestrator as explicit values.

use std::env;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error, info};

use crate::upload::{execute, Credentials, UploadConfig};

/// CLI for bucket-upload: publish a directory of build artifacts to a
/// Supabase Storage bucket.
#[derive(Parser)]
#[clap(
    name = "bucket-upload",
    version,
    about = "Upload a directory of files to a Supabase Storage bucket"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload every file in the given directory to the target bucket
    Upload {
        /// Base path of the repository checkout
        #[clap(long)]
        repo_directory: String,
        /// Directory with files to upload, relative to the repo directory
        #[clap(long)]
        upload_directory_path: String,
        /// Target storage bucket
        #[clap(long)]
        bucket_name: String,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Upload {
            repo_directory,
            upload_directory_path,
            bucket_name,
        } => {
            debug!(
                repo_directory = %repo_directory,
                upload_directory_path = %upload_directory_path,
                bucket_name = %bucket_name,
                "parsed upload arguments"
            );

            // Missing and empty are treated alike; validation rejects both.
            let credentials = Credentials {
                project_id: env::var("SUPABASE_PROJECT_ID").unwrap_or_default(),
                api_key: env::var("SUPABASE_API_KEY").unwrap_or_default(),
            };

            let config = UploadConfig {
                repo_directory,
                upload_directory_path,
                bucket_name,
            };

            match execute(&config, &credentials).await {
                Ok(outcome) => {
                    let message = outcome.message();
                    info!(message = %message, "upload run complete");
                    println!("{message}");
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "upload run failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
