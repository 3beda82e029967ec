//! Storage client implementation.
//!
//! Uploads go to the storage API with bearer-token auth; retrieves go
//! through a public gateway by CID. Only retrieval retries: transient
//! read-timeouts are absorbed up to a fixed bound with a fixed delay, then
//! surface as `DownloadFailed`. Uploads never retry.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use atelier_core::constants::{
    CONTENT_SECRET_SIZE, DOWNLOAD_RETRY_ATTEMPTS, DOWNLOAD_RETRY_DELAY_SECS,
};
use atelier_core::error::{AtelierError, Result};
use atelier_core::traits::ContentStore;

use crate::crypt::decrypt_bytes;

/// Storage client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StorageConfig {
    /// Upload API base URL (e.g. "https://api.web3.storage")
    pub api_url: String,
    /// Retrieval gateway base URL (e.g. "https://dweb.link")
    pub gateway_url: String,
    /// Bearer token for uploads
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Download attempts before a timeout becomes a hard failure
    pub retry_attempts: u32,
    /// Delay between download attempts, in seconds
    pub retry_delay_secs: u64,
}

impl StorageConfig {
    /// Creates config with API and gateway base URLs.
    pub fn new(api_url: impl Into<String>, gateway_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            gateway_url: gateway_url.into(),
            token: None,
            timeout_secs: 30,
            retry_attempts: DOWNLOAD_RETRY_ATTEMPTS,
            retry_delay_secs: DOWNLOAD_RETRY_DELAY_SECS,
        }
    }

    /// Adds the bearer token required for uploads.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads configuration from the environment.
    ///
    /// `ATELIER_STORAGE_API_URL`, `ATELIER_STORAGE_GATEWAY_URL`, and
    /// `ATELIER_STORAGE_TOKEN`, with public defaults for the URLs.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("ATELIER_STORAGE_API_URL")
                .unwrap_or_else(|_| "https://api.web3.storage".into()),
            std::env::var("ATELIER_STORAGE_GATEWAY_URL")
                .unwrap_or_else(|_| "https://dweb.link".into()),
        );
        if let Ok(token) = std::env::var("ATELIER_STORAGE_TOKEN") {
            config = config.with_token(token);
        }
        config
    }
}

/// Storage client for upload/download operations.
pub struct ContentStorage {
    config: StorageConfig,
    http_client: reqwest::Client,
}

impl ContentStorage {
    /// Creates a new storage client with the given config.
    pub fn with_config(config: StorageConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Uploads data to the storage API.
    ///
    /// Requires a configured token. Never retried: an upload failure is
    /// reported immediately as `UploadFailed`.
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub async fn upload(&self, data: &[u8]) -> Result<String> {
        let token = self
            .config
            .token
            .as_ref()
            .ok_or_else(|| AtelierError::ConfigError("storage token not configured".into()))?;

        let file_part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name("atelier-artifact.bin")
            .mime_str("application/octet-stream")
            .map_err(|e| AtelierError::UploadFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", file_part);

        let base = self.config.api_url.trim_end_matches('/');
        let response = self
            .http_client
            .post(format!("{base}/upload"))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AtelierError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AtelierError::UploadFailed(format!(
                "upload failed with status {status}: {text}"
            )));
        }

        let json: UploadResponse = response
            .json()
            .await
            .map_err(|e| AtelierError::UploadFailed(e.to_string()))?;

        debug!(cid = %json.cid, "uploaded to storage");
        Ok(json.cid)
    }

    /// Downloads content by CID through the gateway.
    ///
    /// Transient read-timeouts are retried up to the configured bound with a
    /// fixed delay between attempts; anything else fails immediately.
    #[instrument(skip(self))]
    pub async fn download(&self, cid: &str) -> Result<Vec<u8>> {
        self.validate_cid(cid)?;

        let base = self.config.gateway_url.trim_end_matches('/');
        let url = format!("{base}/ipfs/{cid}");

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.http_client.get(&url).send().await {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(AtelierError::DownloadFailed {
                            cid: cid.to_string(),
                            reason: format!("HTTP {}", response.status()),
                        });
                    }

                    debug!(cid, attempt, "downloaded from gateway");
                    return response
                        .bytes()
                        .await
                        .map(|b| b.to_vec())
                        .map_err(|e| AtelierError::HttpError(e.to_string()));
                }
                Err(err) if err.is_timeout() && attempt < self.config.retry_attempts => {
                    warn!(cid, attempt, "read timeout, retrying");
                    tokio::time::sleep(Duration::from_secs(self.config.retry_delay_secs)).await;
                }
                Err(err) => {
                    return Err(AtelierError::DownloadFailed {
                        cid: cid.to_string(),
                        reason: err.to_string(),
                    })
                }
            }
        }
    }

    /// Downloads content, optionally decrypting it and persisting it.
    ///
    /// If `secret` is supplied the retrieved bytes are decrypted before
    /// being returned; if `output_path` is supplied the (decrypted) bytes
    /// are also written there.
    #[instrument(skip(self, secret), fields(persist = output_path.is_some()))]
    pub async fn download_to(
        &self,
        cid: &str,
        output_path: Option<&Path>,
        secret: Option<&[u8; CONTENT_SECRET_SIZE]>,
    ) -> Result<Vec<u8>> {
        let mut content = self.download(cid).await?;

        if let Some(secret) = secret {
            content = decrypt_bytes(&content, secret)?;
        }

        if let Some(path) = output_path {
            tokio::fs::write(path, &content).await?;
            debug!(cid, path = %path.display(), "content persisted");
        }

        Ok(content)
    }

    pub(crate) fn validate_cid(&self, cid: &str) -> Result<()> {
        if cid.is_empty() {
            return Err(AtelierError::InvalidCid("CID cannot be empty".into()));
        }

        if cid.starts_with("Qm") {
            if cid.len() != 46 {
                return Err(AtelierError::InvalidCid(format!(
                    "invalid CIDv0 length: expected 46, got {}",
                    cid.len()
                )));
            }
        } else if cid.starts_with("bafy") || cid.starts_with("bafk") {
            if cid.len() < 50 {
                return Err(AtelierError::InvalidCid(format!(
                    "CIDv1 too short: {}",
                    cid.len()
                )));
            }
        } else if !cid.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AtelierError::InvalidCid(
                "CID contains invalid characters".into(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ContentStore for ContentStorage {
    async fn upload(&self, data: &[u8]) -> Result<String> {
        ContentStorage::upload(self, data).await
    }

    async fn download(&self, cid: &str) -> Result<Vec<u8>> {
        ContentStorage::download(self, cid).await
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypt::encrypt_bytes;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

    fn test_config() -> StorageConfig {
        StorageConfig::new("https://api.example.com", "https://gateway.example.com")
    }

    fn fast_retry_client(server: &MockServer) -> ContentStorage {
        let mut config = StorageConfig::new(server.uri(), server.uri());
        config.timeout_secs = 1;
        config.retry_delay_secs = 0;
        ContentStorage::with_config(config)
    }

    #[test]
    fn test_validate_cid_v0() {
        let client = ContentStorage::with_config(test_config());
        assert!(client.validate_cid(TEST_CID).is_ok());
        assert!(client.validate_cid("QmInvalid").is_err());
    }

    #[test]
    fn test_validate_cid_v1() {
        let client = ContentStorage::with_config(test_config());
        assert!(client
            .validate_cid("bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi")
            .is_ok());
    }

    #[test]
    fn test_validate_cid_empty() {
        let client = ContentStorage::with_config(test_config());
        assert!(client.validate_cid("").is_err());
    }

    #[test]
    fn test_config_from_builder() {
        let config = test_config().with_token("secret_token");
        assert_eq!(config.token, Some("secret_token".into()));
        assert_eq!(config.retry_attempts, DOWNLOAD_RETRY_ATTEMPTS);
        assert_eq!(config.retry_delay_secs, DOWNLOAD_RETRY_DELAY_SECS);
    }

    #[tokio::test]
    async fn test_upload_returns_cid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cid": TEST_CID })),
            )
            .mount(&server)
            .await;

        let config = StorageConfig::new(server.uri(), server.uri()).with_token("token");
        let client = ContentStorage::with_config(config);

        let cid = client.upload(b"artifact bytes").await.unwrap();
        assert_eq!(cid, TEST_CID);
    }

    #[tokio::test]
    async fn test_upload_without_token_is_config_error() {
        let client = ContentStorage::with_config(test_config());
        let result = client.upload(b"bytes").await;
        assert!(matches!(result, Err(AtelierError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_upload_failure_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let config = StorageConfig::new(server.uri(), server.uri()).with_token("bad");
        let client = ContentStorage::with_config(config);

        let result = client.upload(b"bytes").await;
        assert!(matches!(result, Err(AtelierError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_download_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{TEST_CID}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"stored bytes".to_vec()))
            .mount(&server)
            .await;

        let client = fast_retry_client(&server);
        let bytes = client.download(TEST_CID).await.unwrap();
        assert_eq!(bytes, b"stored bytes");
    }

    #[tokio::test]
    async fn test_download_retries_timeouts_then_succeeds() {
        let server = MockServer::start().await;

        // first two attempts exceed the 1s client timeout, third responds
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{TEST_CID}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"slow".to_vec())
                    .set_delay(Duration::from_secs(5)),
            )
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{TEST_CID}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"recovered".to_vec()))
            .mount(&server)
            .await;

        let client = fast_retry_client(&server);
        let bytes = client.download(TEST_CID).await.unwrap();
        assert_eq!(bytes, b"recovered");
    }

    #[tokio::test]
    async fn test_download_gives_up_after_bounded_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{TEST_CID}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"never".to_vec())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = StorageConfig::new(server.uri(), server.uri());
        config.timeout_secs = 1;
        config.retry_delay_secs = 0;
        config.retry_attempts = 2;
        let client = ContentStorage::with_config(config);

        let result = client.download(TEST_CID).await;
        assert!(matches!(result, Err(AtelierError::DownloadFailed { .. })));
    }

    #[tokio::test]
    async fn test_download_http_error_is_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{TEST_CID}")))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_retry_client(&server);
        let result = client.download(TEST_CID).await;
        match result {
            Err(AtelierError::DownloadFailed { cid, reason }) => {
                assert_eq!(cid, TEST_CID);
                assert!(reason.contains("404"));
            }
            other => panic!("expected DownloadFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_download_to_decrypts_and_persists() {
        let secret = [3u8; CONTENT_SECRET_SIZE];
        let encrypted = encrypt_bytes(b"private artifact", &secret).unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{TEST_CID}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(encrypted))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("artifact.bin");

        let client = fast_retry_client(&server);
        let bytes = client
            .download_to(TEST_CID, Some(&out), Some(&secret))
            .await
            .unwrap();

        assert_eq!(bytes, b"private artifact");
        assert_eq!(std::fs::read(&out).unwrap(), b"private artifact");
    }

    #[tokio::test]
    async fn test_download_rejects_invalid_cid() {
        let client = ContentStorage::with_config(test_config());
        let result = client.download("not a cid").await;
        assert!(matches!(result, Err(AtelierError::InvalidCid(_))));
    }
}
