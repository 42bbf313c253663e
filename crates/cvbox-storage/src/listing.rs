//! Parsing of unauthenticated `ListObjectsV2` responses.
//!
//! Only `Contents/{Key,LastModified,Size}` are read. Missing or malformed
//! sizes count as zero and unparsable timestamps are left for the caller to
//! default.

use chrono::{DateTime, Utc};
use cvbox_core::{content_type, CvId, CvRecord, ListingPolicy};
use serde::Deserialize;
use std::collections::HashSet;

use crate::keys;
use crate::traits::{CvError, CvResult};

#[derive(Debug, Deserialize)]
struct ListBucketResult {
    #[serde(rename = "Contents", default)]
    contents: Vec<Contents>,
}

#[derive(Debug, Deserialize)]
struct Contents {
    #[serde(rename = "Key", default)]
    key: String,
    #[serde(rename = "LastModified", default)]
    last_modified: String,
    #[serde(rename = "Size", default)]
    size: String,
}

/// One object entry from a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
}

/// Parse the XML body of a bucket listing.
pub fn parse_list_xml(xml: &str) -> CvResult<Vec<ListedObject>> {
    let result: ListBucketResult = quick_xml::de::from_str(xml)
        .map_err(|e| CvError::List(format!("Invalid listing XML: {}", e)))?;

    Ok(result
        .contents
        .into_iter()
        .map(|c| ListedObject {
            last_modified: DateTime::parse_from_rfc3339(c.last_modified.trim())
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            size: c.size.trim().parse().unwrap_or(0),
            key: c.key,
        })
        .collect())
}

/// Turn listed objects into records, applying the listing profile.
///
/// Directory markers (keys ending in `/`) and empty keys are always dropped.
/// With `dedupe`, the first record for each id wins.
pub fn into_records(
    objects: Vec<ListedObject>,
    base_url: &str,
    policy: ListingPolicy,
    dedupe: bool,
    now: DateTime<Utc>,
) -> Vec<CvRecord> {
    let mut seen = HashSet::new();

    objects
        .into_iter()
        .filter(|o| !o.key.is_empty() && !o.key.ends_with('/'))
        .map(|o| {
            let name = keys::display_name(&o.key);
            CvRecord {
                id: CvId::new(o.key.clone()),
                content_type: content_type::for_listing(&name),
                name,
                size: o.size,
                created_at: o.last_modified.unwrap_or(now),
                blob: None,
                url: Some(keys::object_url(base_url, &o.key)),
            }
        })
        .filter(|r| policy.allows(&r.name))
        .filter(|r| !dedupe || seen.insert(r.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>cv-upload-bucket1</Name>
  <Prefix></Prefix>
  <KeyCount>5</KeyCount>
  <MaxKeys>1000</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>uploads/</Key>
    <LastModified>2026-10-01T08:00:00.000Z</LastModified>
    <Size>0</Size>
  </Contents>
  <Contents>
    <Key>uploads/1-Jane%20Doe.pdf</Key>
    <LastModified>2026-10-02T09:30:00.000Z</LastModified>
    <ETag>"abc"</ETag>
    <Size>2048</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
  <Contents>
    <Key>uploads/2-notes.zip</Key>
    <LastModified>2026-10-03T10:00:00.000Z</LastModified>
    <Size>10</Size>
  </Contents>
  <Contents>
    <Key>uploads/1-Jane%20Doe.pdf</Key>
    <LastModified>2026-10-02T09:30:00.000Z</LastModified>
    <Size>2048</Size>
  </Contents>
  <Contents>
    <Key>resume.txt</Key>
    <LastModified>not-a-date</LastModified>
    <Size>abc</Size>
  </Contents>
</ListBucketResult>"#;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn parses_contents_entries() {
        let objects = parse_list_xml(BODY).unwrap();
        assert_eq!(objects.len(), 5);
        assert_eq!(objects[1].key, "uploads/1-Jane%20Doe.pdf");
        assert_eq!(objects[1].size, 2048);
        assert!(objects[1].last_modified.is_some());
        assert_eq!(objects[4].size, 0);
        assert!(objects[4].last_modified.is_none());
    }

    #[test]
    fn empty_bucket_has_no_contents() {
        let xml = r#"<ListBucketResult><Name>b</Name><KeyCount>0</KeyCount></ListBucketResult>"#;
        assert!(parse_list_xml(xml).unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_a_list_error() {
        assert!(matches!(parse_list_xml("<nope"), Err(CvError::List(_))));
    }

    #[test]
    fn documents_profile_filters_and_dedupes() {
        let objects = parse_list_xml(BODY).unwrap();
        let records = into_records(
            objects,
            "https://b.s3.eu-north-1.amazonaws.com",
            ListingPolicy::Documents,
            true,
            now(),
        );

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["1-Jane Doe.pdf", "resume.txt"]);
        assert_eq!(records[0].content_type, "application/pdf");
        assert_eq!(
            records[0].url.as_deref(),
            Some("https://b.s3.eu-north-1.amazonaws.com/uploads/1-Jane%2520Doe.pdf")
        );
        assert_eq!(records[1].created_at, now());
        assert!(records.iter().all(|r| r.blob.is_none()));
    }

    #[test]
    fn unfiltered_profile_keeps_duplicates_without_dedupe() {
        let objects = parse_list_xml(BODY).unwrap();
        let records = into_records(objects, "http://x/b", ListingPolicy::All, false, now());
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| !r.id.as_str().ends_with('/')));
    }
}
