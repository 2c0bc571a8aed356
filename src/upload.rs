//! Orchestration of a single upload run.
//!
//! Drives the sequential pipeline: validate inputs, construct the storage
//! client, enumerate the upload directory, then per file read bytes,
//! resolve the content type and upload. Fail-fast throughout: the first
//! error ends the run and remaining files are not attempted.
//!
//! Credentials are passed in explicitly rather than read from the process
//! environment here, so the orchestrator stays testable without
//! process-level mocking; the CLI boundary owns the environment lookup.

use std::path::Path;

use tracing::{debug, error, info};

use crate::content_type;
use crate::error::{Error, Result};
use crate::files;
use crate::storage::{StorageUploader, SupabaseClient};

/// Required invocation parameters for a run.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Base path of the repository checkout.
    pub repo_directory: String,
    /// Path, relative to `repo_directory`, containing the files to upload.
    pub upload_directory_path: String,
    /// Target storage bucket.
    pub bucket_name: String,
}

/// Backend credentials, sourced from the environment at the CLI boundary.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub project_id: String,
    pub api_key: String,
}

/// Terminal outcome of a successful run.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The upload directory contained no files. A soft success: the run
    /// performed no work but does not fail the pipeline.
    NoFiles { directory: String },
    Uploaded,
}

impl Outcome {
    /// The run's user-visible result message.
    pub fn message(&self) -> String {
        match self {
            Outcome::NoFiles { directory } => {
                format!("no files in provided directory '{directory}'")
            }
            Outcome::Uploaded => "Files uploaded successfully".to_string(),
        }
    }
}

/// Checks that every required input is present before any I/O is attempted.
fn validate(config: &UploadConfig, credentials: &Credentials) -> Result<()> {
    if config.repo_directory.is_empty() {
        return Err(Error::Configuration(
            "repository directory is undefined".to_string(),
        ));
    }
    if config.upload_directory_path.is_empty() {
        return Err(Error::Configuration("directory is undefined".to_string()));
    }
    if config.bucket_name.is_empty() {
        return Err(Error::Configuration("bucket is undefined".to_string()));
    }
    if credentials.project_id.is_empty() || credentials.api_key.is_empty() {
        return Err(Error::Configuration(
            "Supabase credentials are undefined".to_string(),
        ));
    }
    Ok(())
}

/// Runs the per-file upload loop against an already-constructed uploader.
pub async fn run_upload<U>(config: &UploadConfig, uploader: &U) -> Result<Outcome>
where
    U: StorageUploader,
{
    let dir = Path::new(&config.repo_directory).join(&config.upload_directory_path);
    debug!(directory = ?dir, "enumerating upload directory");

    let filenames = files::list_filenames(&dir)?;
    if filenames.is_empty() {
        info!(directory = ?dir, "no files to upload");
        return Ok(Outcome::NoFiles {
            directory: config.upload_directory_path.clone(),
        });
    }

    for filename in &filenames {
        debug!(filename = %filename, "uploading");
        let payload = files::read_bytes(&dir.join(filename))?;
        let content_type = content_type::resolve(filename);
        debug!(filename = %filename, content_type, "detected content type");

        if let Err(e) = uploader
            .upload_object(&config.bucket_name, filename, payload, content_type)
            .await
        {
            error!(filename = %filename, error = %e, "upload failed, aborting run");
            return Err(e);
        }
        debug!(filename = %filename, "file uploaded");
    }

    info!(
        count = filenames.len(),
        bucket = %config.bucket_name,
        "all files uploaded"
    );
    Ok(Outcome::Uploaded)
}

/// Full run: validate all five required inputs, construct the client,
/// upload. No filesystem or network activity happens before validation
/// passes.
pub async fn execute(config: &UploadConfig, credentials: &Credentials) -> Result<Outcome> {
    validate(config, credentials)?;
    let client = SupabaseClient::new(&credentials.project_id, &credentials.api_key)?;
    run_upload(config, &client).await
}
