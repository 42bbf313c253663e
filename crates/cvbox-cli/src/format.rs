//! Human-readable rendering of records.

use chrono::Local;
use cvbox_core::constants::GENERIC_CONTENT_TYPE;
use cvbox_core::CvRecord;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with binary units.
///
/// Two decimals below 10, one below 100, none above.
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let decimals = if size >= 100.0 {
        0
    } else if size >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*} {}", decimals, size, UNITS[unit])
}

/// One list row: `name — size · local time · type`.
pub fn format_row(record: &CvRecord) -> String {
    let content_type = if record.content_type.is_empty() {
        GENERIC_CONTENT_TYPE
    } else {
        record.content_type.as_str()
    };
    format!(
        "{} — {} · {} · {}",
        record.name,
        format_bytes(record.size),
        record
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S"),
        content_type
    )
}
