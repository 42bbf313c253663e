use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::DOCUMENT_EXTENSIONS;

/// Storage backend types
///
/// Selected once at startup from configuration. `Local` is the designated
/// default when the configured value is missing or unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded SQLite database in the local data directory
    #[default]
    Local,
    /// Unsigned requests straight against a public bucket
    S3,
    /// Short-lived URLs issued by the signing backend
    Signed,
}

impl StorageBackend {
    /// Resolve a configuration value, falling back to the default backend.
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => StorageBackend::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    fallback = %StorageBackend::default(),
                    "Unrecognized storage backend, using default"
                );
                StorageBackend::default()
            }),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "s3" => Ok(StorageBackend::S3),
            "signed" | "presigned" => Ok(StorageBackend::Signed),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Signed => write!(f, "signed"),
        }
    }
}

/// Which objects a direct bucket listing keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingPolicy {
    /// Every object except directory markers
    All,
    /// Common document and scan extensions only
    #[default]
    Documents,
    /// `.pdf` only
    PdfOnly,
}

impl ListingPolicy {
    /// Whether an object with this display name passes the filter.
    ///
    /// The extension is everything from the last `.`; names without one never
    /// match the extension-based profiles.
    pub fn allows(&self, name: &str) -> bool {
        let ext = match name.rfind('.') {
            Some(idx) => name[idx..].to_lowercase(),
            None => return matches!(self, ListingPolicy::All),
        };
        match self {
            ListingPolicy::All => true,
            ListingPolicy::Documents => DOCUMENT_EXTENSIONS.contains(&ext.as_str()),
            ListingPolicy::PdfOnly => ext == ".pdf",
        }
    }
}

impl FromStr for ListingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "none" => Ok(ListingPolicy::All),
            "documents" | "docs" => Ok(ListingPolicy::Documents),
            "pdf" => Ok(ListingPolicy::PdfOnly),
            _ => Err(anyhow::anyhow!("Invalid listing policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_backend_falls_back_to_local() {
        assert_eq!(StorageBackend::from_config(Some("ftp")), StorageBackend::Local);
        assert_eq!(StorageBackend::from_config(None), StorageBackend::Local);
        assert_eq!(StorageBackend::from_config(Some("  ")), StorageBackend::Local);
    }

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(StorageBackend::from_config(Some("S3")), StorageBackend::S3);
        assert_eq!(
            StorageBackend::from_config(Some("Signed")),
            StorageBackend::Signed
        );
        assert_eq!(StorageBackend::S3.to_string(), "s3");
    }

    #[test]
    fn documents_policy_filters_by_extension() {
        let policy = ListingPolicy::Documents;
        assert!(policy.allows("cv.PDF"));
        assert!(policy.allows("photo.jpeg"));
        assert!(!policy.allows("archive.zip"));
        assert!(!policy.allows("README"));
    }

    #[test]
    fn pdf_policy_only_keeps_pdfs() {
        assert!(ListingPolicy::PdfOnly.allows("resume.pdf"));
        assert!(!ListingPolicy::PdfOnly.allows("resume.docx"));
        assert!(ListingPolicy::All.allows("README"));
    }
}
