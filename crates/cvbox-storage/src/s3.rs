use crate::keys;
use crate::listing;
use crate::traits::{CvError, CvResult, CvStore, DeleteError};
use crate::StorageBackend;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cvbox_core::constants::{DEFAULT_UPLOAD_CONTENT_TYPE, MAX_LIST_KEYS};
use cvbox_core::{content_type, CvId, CvRecord, ListingPolicy, NewCv, RemoteBucketConfig};
use reqwest::header::{CONTENT_TYPE, LAST_MODIFIED};
use reqwest::Client;

/// Listing and permission profile of a public bucket.
#[derive(Clone, Copy, Debug)]
pub struct DirectS3Options {
    pub listing_policy: ListingPolicy,
    pub dedupe_listing: bool,
    /// Whether the bucket grants anonymous DELETE
    pub allow_delete: bool,
}

impl Default for DirectS3Options {
    fn default() -> Self {
        DirectS3Options {
            listing_policy: ListingPolicy::default(),
            dedupe_listing: true,
            allow_delete: true,
        }
    }
}

/// Direct S3 storage implementation
///
/// Holds no credentials: every request is unsigned and succeeds only as far
/// as the bucket policy allows anonymous access.
#[derive(Clone)]
pub struct DirectS3Store {
    client: Client,
    bucket: RemoteBucketConfig,
    options: DirectS3Options,
}

impl DirectS3Store {
    /// Create a new DirectS3Store instance
    ///
    /// # Arguments
    /// * `bucket` - Bucket location; with a custom endpoint the bucket is
    ///   addressed path-style (e.g. "http://localhost:9000/cvs" for MinIO)
    /// * `options` - Listing profile and delete permission
    pub fn new(bucket: RemoteBucketConfig, options: DirectS3Options) -> CvResult<Self> {
        Ok(DirectS3Store {
            client: crate::http_client()?,
            bucket,
            options,
        })
    }

    fn base_url(&self) -> String {
        self.bucket.base_url()
    }

    fn object_url(&self, key: &str) -> String {
        keys::object_url(&self.base_url(), key)
    }
}

fn header_str(response: &reqwest::Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

#[async_trait]
impl CvStore for DirectS3Store {
    async fn add_cv(&self, file: NewCv) -> CvResult<CvId> {
        let key = keys::direct_upload_key(&self.bucket.prefix, &file.name, Utc::now());
        let url = self.object_url(&key);
        let size = file.size();
        let start = std::time::Instant::now();
        let content_type = if file.content_type.is_empty() {
            DEFAULT_UPLOAD_CONTENT_TYPE.to_string()
        } else {
            file.content_type.clone()
        };

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(file.data)
            .send()
            .await
            .map_err(|e| CvError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                bucket = %self.bucket.bucket,
                key = %key,
                status = status.as_u16(),
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 direct upload failed"
            );
            return Err(CvError::Upload(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }

        tracing::info!(
            bucket = %self.bucket.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 direct upload successful"
        );

        Ok(CvId::new(key))
    }

    async fn list_cvs(&self) -> CvResult<Vec<CvRecord>> {
        let base = self.base_url();
        let start = std::time::Instant::now();

        let mut query = vec![("list-type", "2".to_string())];
        if !self.bucket.prefix.is_empty() {
            query.push(("prefix", self.bucket.prefix.clone()));
        }
        query.push(("max-keys", MAX_LIST_KEYS.to_string()));

        let response = self
            .client
            .get(&base)
            .query(&query)
            .send()
            .await
            .map_err(|e| CvError::List(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                bucket = %self.bucket.bucket,
                status = status.as_u16(),
                "S3 list failed"
            );
            return Err(CvError::List(format!("S3 list failed: {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CvError::List(e.to_string()))?;
        let objects = listing::parse_list_xml(&body)?;
        let listed = objects.len();

        let records = listing::into_records(
            objects,
            &base,
            self.options.listing_policy,
            self.options.dedupe_listing,
            Utc::now(),
        );

        tracing::info!(
            bucket = %self.bucket.bucket,
            listed,
            kept = records.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 list successful"
        );

        Ok(records)
    }

    async fn get_cv(&self, id: &CvId) -> CvResult<Option<CvRecord>> {
        let key = id.as_str();
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(self.object_url(key))
            .send()
            .await
            .map_err(|e| CvError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                bucket = %self.bucket.bucket,
                key = %key,
                status = status.as_u16(),
                "S3 download failed"
            );
            return Err(CvError::Download(format!(
                "S3 download failed: {}",
                status.as_u16()
            )));
        }

        let name = keys::display_name(key);
        let content_type = header_str(&response, CONTENT_TYPE)
            .unwrap_or_else(|| content_type::for_listing(&name));
        let created_at = header_str(&response, LAST_MODIFIED)
            .and_then(|v| DateTime::parse_from_rfc2822(&v).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        let blob = response
            .bytes()
            .await
            .map_err(|e| CvError::Download(e.to_string()))?;

        tracing::info!(
            bucket = %self.bucket.bucket,
            key = %key,
            size_bytes = blob.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(Some(CvRecord {
            id: id.clone(),
            name,
            size: blob.len() as u64,
            content_type,
            created_at,
            blob: Some(blob),
            url: Some(self.object_url(key)),
        }))
    }

    async fn delete_cv(&self, id: &CvId) -> CvResult<()> {
        if !self.options.allow_delete {
            return Err(DeleteError::Disabled.into());
        }

        let key = id.as_str();
        let start = std::time::Instant::now();

        let response = self
            .client
            .delete(self.object_url(key))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket.bucket,
                    key = %key,
                    "S3 delete never reached the server"
                );
                DeleteError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                bucket = %self.bucket.bucket,
                key = %key,
                status = status.as_u16(),
                body = %message,
                "S3 delete refused"
            );
            return Err(DeleteError::Refused {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::info!(
            bucket = %self.bucket.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::Matcher;

    fn store_for(server: &mockito::ServerGuard, options: DirectS3Options) -> DirectS3Store {
        let bucket = RemoteBucketConfig {
            bucket: "cvs".to_string(),
            region: "eu-north-1".to_string(),
            prefix: String::new(),
            endpoint: Some(server.url()),
        };
        DirectS3Store::new(bucket, options).unwrap()
    }

    const LISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>cvs</Name>
  <Contents><Key>uploads/</Key><LastModified>2026-10-01T08:00:00.000Z</LastModified><Size>0</Size></Contents>
  <Contents><Key>uploads/1-a.txt</Key><LastModified>2026-10-02T08:00:00.000Z</LastModified><Size>12</Size></Contents>
  <Contents><Key>uploads/2-r.pdf</Key><LastModified>2026-10-03T08:00:00.000Z</LastModified><Size>300</Size></Contents>
</ListBucketResult>"#;

    #[tokio::test]
    async fn test_list_sends_bounded_unsigned_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/cvs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("list-type".into(), "2".into()),
                Matcher::UrlEncoded("max-keys".into(), "1000".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/xml")
            .with_body(LISTING)
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        let items = store.list_cvs().await.unwrap();

        mock.assert_async().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "uploads/1-a.txt");
        assert_eq!(items[0].name, "1-a.txt");
        assert_eq!(items[0].size, 12);
        assert_eq!(
            items[1].url.as_deref(),
            Some(format!("{}/cvs/uploads/2-r.pdf", server.url()).as_str())
        );
    }

    #[tokio::test]
    async fn test_list_failure_is_list_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cvs")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        assert!(matches!(store.list_cvs().await, Err(CvError::List(_))));
    }

    #[tokio::test]
    async fn test_upload_puts_timestamped_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", Matcher::Regex(r"^/cvs/uploads/\d+-a\.txt$".to_string()))
            .match_header("content-type", "text/plain")
            .match_body("hello world!")
            .with_status(200)
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        let id = store
            .add_cv(NewCv::new("a.txt", "text/plain", Bytes::from_static(b"hello world!")))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(id.as_str().starts_with("uploads/"));
        assert!(id.as_str().ends_with("-a.txt"));
    }

    #[tokio::test]
    async fn test_upload_rejected_by_policy() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        let result = store
            .add_cv(NewCv::new("a.txt", "text/plain", Bytes::from_static(b"x")))
            .await;
        assert!(matches!(result, Err(CvError::Upload(_))));
    }

    #[tokio::test]
    async fn test_get_fetches_bytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cvs/uploads/1-a.txt")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_header("last-modified", "Fri, 02 Oct 2026 08:00:00 GMT")
            .with_body("hello world!")
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        let record = store
            .get_cv(&CvId::from("uploads/1-a.txt"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.blob.as_deref(), Some(&b"hello world!"[..]));
        assert_eq!(record.size, 12);
        assert_eq!(record.name, "1-a.txt");
        assert_eq!(record.content_type, "text/plain");
        assert_eq!(record.created_at.timestamp(), 1_790_928_000);
    }

    #[tokio::test]
    async fn test_get_missing_is_download_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cvs/nope.pdf")
            .with_status(404)
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        let result = store.get_cv(&CvId::from("nope.pdf")).await;
        assert!(matches!(result, Err(CvError::Download(_))));
    }

    #[tokio::test]
    async fn test_delete_refused_by_server() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/cvs/uploads/1-a.txt")
            .with_status(403)
            .with_body("AccessDenied")
            .create_async()
            .await;

        let store = store_for(&server, DirectS3Options::default());
        let result = store.delete_cv(&CvId::from("uploads/1-a.txt")).await;
        match result {
            Err(CvError::Delete(DeleteError::Refused { status, message })) => {
                assert_eq!(status, 403);
                assert_eq!(message, "AccessDenied");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_unreachable_server() {
        let bucket = RemoteBucketConfig {
            bucket: "cvs".to_string(),
            region: "eu-north-1".to_string(),
            prefix: String::new(),
            endpoint: Some("http://127.0.0.1:1".to_string()),
        };
        let store = DirectS3Store::new(bucket, DirectS3Options::default()).unwrap();
        let result = store.delete_cv(&CvId::from("uploads/1-a.txt")).await;
        assert!(matches!(
            result,
            Err(CvError::Delete(DeleteError::Unreachable(_)))
        ));
    }

    #[tokio::test]
    async fn test_disabled_delete_always_fails_the_same_way() {
        let server = mockito::Server::new_async().await;
        let options = DirectS3Options {
            allow_delete: false,
            ..DirectS3Options::default()
        };
        let store = store_for(&server, options);

        for _ in 0..2 {
            let result = store.delete_cv(&CvId::from("uploads/1-a.txt")).await;
            assert!(matches!(
                result,
                Err(CvError::Delete(DeleteError::Disabled))
            ));
        }
    }
}
