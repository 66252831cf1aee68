//! Filebin client for resolving uploaded sounds.
//!
//! Every sound id names a bin on the file host. The bin's JSON manifest
//! lists the uploaded files; the first one with an accepted content type is
//! the sound. Each call makes a single request with the transport's default
//! timeout and is never retried.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use audiobind_core::Config;

use crate::error::ResolveError;

/// Content type a bin file must have to be used as a sound.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

const USER_AGENT: &str = concat!("audiobind/", env!("CARGO_PKG_VERSION"));

/// A downloadable sound file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub url: String,
    pub filename: String,
    pub content_type: String,
}

/// Anything that can turn a sound id into a downloadable file.
#[async_trait]
pub trait SoundResolver: Send + Sync {
    async fn resolve(&self, id: Uuid) -> Result<ResolvedAsset, ResolveError>;
}

/// URL of the bin holding `id`, with exactly one `/` between the base and
/// the id.
pub fn bin_url(base_url: &str, id: Uuid) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}

pub struct FilebinClient {
    http: reqwest::Client,
    base_url: String,
}

impl FilebinClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        Self::new(config.filebin_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the bin for `id` and pick its first WAV file.
    pub async fn resolve(&self, id: Uuid) -> Result<ResolvedAsset, ResolveError> {
        let url = bin_url(&self.base_url, id);
        debug!(%id, %url, "resolving sound");

        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if resp.status() != StatusCode::OK {
            warn!(%url, status = %resp.status(), "filebin returned error");
            return Err(ResolveError::Upstream {
                url,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await?;
        select_audio(&url, &body)
    }

    /// Resolve `id` and fetch the file it points to.
    pub async fn download(&self, id: Uuid) -> Result<(ResolvedAsset, Bytes), ResolveError> {
        let asset = self.resolve(id).await?;
        debug!(url = %asset.url, "downloading sound");

        let resp = self.http.get(&asset.url).send().await?;
        if resp.status() != StatusCode::OK {
            warn!(url = %asset.url, status = %resp.status(), "sound download failed");
            return Err(ResolveError::Upstream {
                url: asset.url,
                status: resp.status().as_u16(),
            });
        }

        let data = resp.bytes().await?;
        debug!(url = %asset.url, bytes = data.len(), "sound downloaded");
        Ok((asset, data))
    }
}

#[async_trait]
impl SoundResolver for FilebinClient {
    async fn resolve(&self, id: Uuid) -> Result<ResolvedAsset, ResolveError> {
        FilebinClient::resolve(self, id).await
    }
}

/// Pick the first accepted file from a bin manifest.
///
/// Array entries that are not objects, or whose `content-type` is missing,
/// are skipped.
fn select_audio(bin_url: &str, body: &str) -> Result<ResolvedAsset, ResolveError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| ResolveError::MalformedResponse(format!("body is not JSON: {e}")))?;

    let object = json
        .as_object()
        .ok_or_else(|| ResolveError::MalformedResponse("expected a JSON object".into()))?;
    let files = object
        .get("files")
        .ok_or_else(|| ResolveError::MalformedResponse("no files field".into()))?
        .as_array()
        .ok_or_else(|| ResolveError::MalformedResponse("files is not an array".into()))?;

    let file = files
        .iter()
        .filter_map(Value::as_object)
        .find(|file| file.get("content-type").and_then(Value::as_str) == Some(WAV_CONTENT_TYPE))
        .ok_or_else(|| ResolveError::NoAudioAsset {
            url: bin_url.to_string(),
        })?;

    let filename = file
        .get("filename")
        .and_then(Value::as_str)
        .ok_or_else(|| ResolveError::MalformedResponse("audio file has no filename".into()))?;

    Ok(ResolvedAsset {
        url: format!("{bin_url}/{filename}"),
        filename: filename.to_string(),
        content_type: WAV_CONTENT_TYPE.to_string(),
    })
}
