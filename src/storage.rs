//! Supabase Storage client: endpoint construction and object upload.
//!
//! The [`StorageUploader`] trait is the seam between the orchestrator and
//! the network: the real [`SupabaseClient`] implements it against the
//! storage REST API, and tests run against the generated mock. All
//! transport, serialization, and error mapping live in the client
//! implementation; the trait itself is agnostic of authentication details.

use async_trait::async_trait;
use mockall::automock;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::{Error, Result};

const SUPABASE_DOMAIN: &str = "supabase.co";

/// Characters that must be escaped inside a URL path segment; a raw `#` or
/// `?` in an object key would otherwise truncate the path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'\\');

/// Builds the project's service endpoint from its identifier.
///
/// Checked before interpolation: an empty identifier is a configuration
/// error, not a malformed URL.
pub fn build_url(project_id: &str) -> Result<String> {
    if project_id.is_empty() {
        return Err(Error::Configuration(
            "projectId must be longer than 0".to_string(),
        ));
    }
    Ok(format!("https://{project_id}.{SUPABASE_DOMAIN}"))
}

/// Abstraction over the single storage call a run performs.
///
/// Implemented by [`SupabaseClient`] for real use and mocked in tests via
/// `MockStorageUploader`.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait StorageUploader: Send + Sync {
    /// Creates or replaces `key` in `bucket` with `payload`, storing
    /// `content_type` as the object's metadata.
    ///
    /// Backend-reported failures come back as [`Error::Upload`] carrying the
    /// backend's message verbatim; this method never panics.
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

/// Authenticated handle to a Supabase project's storage API.
///
/// Constructed once per run. No network I/O happens at construction;
/// credentials are validated lazily by the backend on the first request.
pub struct SupabaseClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(project_id: &str, api_key: &str) -> Result<Self> {
        let endpoint = build_url(project_id)?;
        info!(endpoint = %endpoint, "initialised Supabase storage client");
        Ok(Self::with_endpoint(endpoint, api_key))
    }

    /// Builds a client against an explicit endpoint, bypassing project-id
    /// derivation.
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.to_string(),
        }
    }

    /// The derived service endpoint, e.g. `https://myproj.supabase.co`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Shape of the storage API's JSON error body.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl StorageUploader for SupabaseClient {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let key_path = utf8_percent_encode(key, PATH_SEGMENT);
        let url = format!("{}/storage/v1/object/{bucket}/{key_path}", self.endpoint);
        debug!(bucket, key, content_type, size = payload.len(), "uploading object");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            // Create-or-replace: an existing object under the same key is
            // overwritten rather than rejected.
            .header("x-upsert", "true")
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            info!(bucket, key, "object uploaded");
            return Ok(());
        }

        // The storage API reports failures as JSON; anything else falls back
        // to the status line.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| format!("storage API returned status {status}"));
        error!(bucket, key, status = %status, message = %message, "upload rejected by storage API");
        Err(Error::Upload {
            key: key.to_string(),
            message,
        })
    }
}
