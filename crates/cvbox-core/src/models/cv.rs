use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::content_type;

/// Opaque record identifier, unique within one backend.
///
/// Local records use the decimal text of an auto-assigned integer; remote
/// records use the full object key. Identifiers from different backends are
/// not comparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CvId(String);

impl CvId {
    pub fn new(id: impl Into<String>) -> Self {
        CvId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form used by the local backend, if this id has one.
    pub fn as_local(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<i64> for CvId {
    fn from(id: i64) -> Self {
        CvId(id.to_string())
    }
}

impl From<String> for CvId {
    fn from(id: String) -> Self {
        CvId(id)
    }
}

impl From<&str> for CvId {
    fn from(id: &str) -> Self {
        CvId(id.to_string())
    }
}

impl Display for CvId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// One uploaded file: metadata plus, when fetched, its content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub id: CvId,
    pub name: String,
    pub size: u64,
    /// MIME type, or the generic `file` marker
    #[serde(rename = "type")]
    pub content_type: String,
    /// Upload time for local records, last-modified time for remote ones
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub blob: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A file to upload, read fully into memory.
#[derive(Debug, Clone)]
pub struct NewCv {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl NewCv {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        NewCv {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, inferring its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = content_type::for_upload(&name);
        Ok(NewCv::new(name, content_type, data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
