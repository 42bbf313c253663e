use crate::keys;
use crate::traits::{CvError, CvResult, CvStore, DeleteError};
use crate::StorageBackend;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cvbox_core::constants::DEFAULT_UPLOAD_CONTENT_TYPE;
use cvbox_core::models::signing::{
    DeleteRequest, DownloadUrlResponse, ListResponse, UploadUrlRequest, UploadUrlResponse,
};
use cvbox_core::{content_type, CvId, CvRecord, NewCv};
use reqwest::header::{CONTENT_TYPE, LAST_MODIFIED};
use reqwest::{Client, Response};

/// Signed-URL storage implementation
///
/// Every operation first asks the signing backend for a short-lived URL and
/// then talks to the object store directly. Signed URLs are used once and
/// never retried after expiry.
#[derive(Clone)]
pub struct SignedUrlStore {
    client: Client,
    api_url: String,
}

impl SignedUrlStore {
    /// Create a new SignedUrlStore instance
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the signing backend (e.g. "http://localhost:8787")
    pub fn new(api_url: impl Into<String>) -> CvResult<Self> {
        Ok(SignedUrlStore {
            client: crate::http_client()?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Reduce a non-success response to `"{status}: {body}"`.
async fn failure(response: Response) -> String {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body)
    }
}

#[async_trait]
impl CvStore for SignedUrlStore {
    async fn add_cv(&self, file: NewCv) -> CvResult<CvId> {
        let start = std::time::Instant::now();
        let size = file.size();
        let content_type = if file.content_type.is_empty() {
            DEFAULT_UPLOAD_CONTENT_TYPE.to_string()
        } else {
            file.content_type.clone()
        };

        let response = self
            .client
            .post(self.endpoint("/api/upload-url"))
            .json(&UploadUrlRequest {
                name: Some(file.name.clone()),
                content_type: Some(content_type.clone()),
            })
            .send()
            .await
            .map_err(|e| CvError::Presign(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CvError::Presign(failure(response).await));
        }

        let signed: UploadUrlResponse = response
            .json()
            .await
            .map_err(|e| CvError::Presign(format!("Invalid upload-url response: {}", e)))?;

        let response = self
            .client
            .put(&signed.url)
            .header(CONTENT_TYPE, content_type)
            .body(file.data)
            .send()
            .await
            .map_err(|e| CvError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let message = failure(response).await;
            tracing::error!(key = %signed.key, error = %message, "Signed upload failed");
            return Err(CvError::Upload(message));
        }

        tracing::info!(
            key = %signed.key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Signed upload successful"
        );

        Ok(CvId::new(signed.key))
    }

    async fn list_cvs(&self) -> CvResult<Vec<CvRecord>> {
        let response = self
            .client
            .get(self.endpoint("/api/list"))
            .send()
            .await
            .map_err(|e| CvError::List(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CvError::List(failure(response).await));
        }

        let listing: ListResponse = response
            .json()
            .await
            .map_err(|e| CvError::List(format!("Invalid list response: {}", e)))?;

        tracing::debug!(count = listing.items.len(), "Signed backend listed objects");

        Ok(listing
            .items
            .into_iter()
            .map(|item| CvRecord {
                id: CvId::new(item.key),
                content_type: content_type::for_listing(&item.name),
                name: item.name,
                size: item.size,
                created_at: item.last_modified,
                blob: None,
                url: None,
            })
            .collect())
    }

    async fn get_cv(&self, id: &CvId) -> CvResult<Option<CvRecord>> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(self.endpoint("/api/download-url"))
            .query(&[("key", id.as_str())])
            .send()
            .await
            .map_err(|e| CvError::Presign(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CvError::Presign(failure(response).await));
        }

        let signed: DownloadUrlResponse = response
            .json()
            .await
            .map_err(|e| CvError::Presign(format!("Invalid download-url response: {}", e)))?;

        let response = self
            .client
            .get(&signed.url)
            .send()
            .await
            .map_err(|e| CvError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CvError::Download(failure(response).await));
        }

        let name = keys::display_name(id.as_str());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| content_type::for_listing(&name));
        let created_at = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        let blob = response
            .bytes()
            .await
            .map_err(|e| CvError::Download(e.to_string()))?;

        tracing::info!(
            key = %id,
            size_bytes = blob.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Signed download successful"
        );

        Ok(Some(CvRecord {
            id: id.clone(),
            name,
            size: blob.len() as u64,
            content_type,
            created_at,
            blob: Some(blob),
            url: None,
        }))
    }

    async fn delete_cv(&self, id: &CvId) -> CvResult<()> {
        let response = self
            .client
            .post(self.endpoint("/api/delete"))
            .json(&DeleteRequest {
                key: Some(id.to_string()),
            })
            .send()
            .await
            .map_err(|e| DeleteError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(key = %id, status = status.as_u16(), "Signed delete refused");
            return Err(DeleteError::Refused {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::info!(key = %id, "Signed delete successful");
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Signed
    }
}
