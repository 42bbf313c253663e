//! Shared key and address generation for the remote backends.
//!
//! Direct uploads use `{prefix}{epoch_ms}-{name}` (prefix defaults to
//! `uploads/`); the signing backend uses `{prefix}{iso_ts}-{name}` where the
//! ISO timestamp has `:` and `.` replaced by `-`.

use chrono::{DateTime, SecondsFormat, Utc};
use cvbox_core::constants::DIRECT_UPLOAD_PREFIX;

/// Reduce a client-supplied name to one safe key segment.
pub fn sanitize_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if last.is_empty() || last == "." || last == ".." {
        "file".to_string()
    } else {
        last.to_string()
    }
}

/// Key for an unauthenticated direct upload.
pub fn direct_upload_key(prefix: &str, name: &str, now: DateTime<Utc>) -> String {
    let prefix = if prefix.is_empty() {
        DIRECT_UPLOAD_PREFIX
    } else {
        prefix
    };
    format!(
        "{}{}-{}",
        prefix,
        now.timestamp_millis(),
        sanitize_name(name)
    )
}

/// Key issued by the signing backend for a new upload.
pub fn signing_key(prefix: &str, name: &str, now: DateTime<Utc>) -> String {
    let ts = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}{}-{}", prefix, ts, sanitize_name(name))
}

/// Percent-encode a key for use in a URL path, keeping `/` separators.
pub fn encode_key(key: &str) -> String {
    urlencoding::encode(key).replace("%2F", "/")
}

/// Per-object address under a bucket base URL.
pub fn object_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), encode_key(key))
}

/// Display name for a key: its final segment, URL-decoded.
pub fn display_name(key: &str) -> String {
    let last = key.rsplit('/').next().unwrap_or(key);
    let last = if last.is_empty() { key } else { last };
    urlencoding::decode(last)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| last.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_noon() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-16T12:34:56.789Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn signing_key_embeds_sanitized_timestamp() {
        let key = signing_key("cv-uploads/", "r.pdf", at_noon());
        assert_eq!(key, "cv-uploads/2026-10-16T12-34-56-789Z-r.pdf");
    }

    #[test]
    fn direct_key_defaults_prefix() {
        let key = direct_upload_key("", "a.txt", at_noon());
        assert_eq!(key, format!("uploads/{}-a.txt", at_noon().timestamp_millis()));
        let key = direct_upload_key("cvs/", "a.txt", at_noon());
        assert!(key.starts_with("cvs/"));
    }

    #[test]
    fn names_cannot_escape_their_segment() {
        assert_eq!(sanitize_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_name("C:\\docs\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_name(""), "file");
        assert_eq!(sanitize_name(".."), "file");
    }

    #[test]
    fn object_urls_keep_slashes() {
        assert_eq!(
            object_url("https://b.s3.eu-north-1.amazonaws.com", "cv uploads/Jane Doe.pdf"),
            "https://b.s3.eu-north-1.amazonaws.com/cv%20uploads/Jane%20Doe.pdf"
        );
    }

    #[test]
    fn display_name_decodes_last_segment() {
        assert_eq!(display_name("uploads/1-Jane%20Doe.pdf"), "1-Jane Doe.pdf");
        assert_eq!(display_name("plain.txt"), "plain.txt");
    }
}
