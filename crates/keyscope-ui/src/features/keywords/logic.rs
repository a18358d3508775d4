//! Pure keyword display helpers.
//!
//! # Design
//! - Every helper is total: unknown statuses, missing counts and odd sizes all
//!   map to a displayable value.
//! - Keyword text is escaped before it reaches markup; scraped result pages
//!   are sanitised before preview.

use crate::services::http::UploadFile;
use keyscope_api_models::{KeywordDto, KeywordStatus};
use thiserror::Error;

/// Display projection of a keyword record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedKeyword {
    /// Record id.
    pub id: i64,
    /// Keyword text.
    pub keyword: String,
    /// Status label as sent by the server.
    pub status: String,
    /// Ads found, 0 when unknown.
    pub ad_count: i64,
    /// Links found, 0 when unknown.
    pub link_count: i64,
    /// Whether a non-empty error message is present.
    pub has_error: bool,
    /// Failure reason.
    pub error_message: Option<String>,
    /// Captured results page.
    pub html_content: Option<String>,
}

/// Project a keyword record for display.
#[must_use]
pub fn format_keyword(keyword: &KeywordDto) -> FormattedKeyword {
    FormattedKeyword {
        id: keyword.id,
        keyword: keyword.keyword.clone(),
        status: keyword.status.clone(),
        ad_count: keyword.ad_count.unwrap_or(0),
        link_count: keyword.link_count.unwrap_or(0),
        has_error: keyword
            .error_message
            .as_deref()
            .is_some_and(|message| !message.is_empty()),
        error_message: keyword.error_message.clone(),
        html_content: keyword.html_content.clone(),
    }
}

/// Badge classes for keyword statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    /// Completed.
    Success,
    /// Processing.
    Warning,
    /// Failed.
    Error,
    /// Pending or unrecognised.
    Pending,
}

impl StatusClass {
    /// CSS class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "status-success",
            Self::Warning => "status-warning",
            Self::Error => "status-error",
            Self::Pending => "status-pending",
        }
    }
}

/// Map a status label to its badge class, case-insensitively.
#[must_use]
pub fn status_class(status: Option<&str>) -> StatusClass {
    match status.and_then(KeywordStatus::from_wire) {
        Some(KeywordStatus::Completed) => StatusClass::Success,
        Some(KeywordStatus::Processing) => StatusClass::Warning,
        Some(KeywordStatus::Failed) => StatusClass::Error,
        Some(KeywordStatus::Pending) | None => StatusClass::Pending,
    }
}

/// Apply the status (exact) and search (case-insensitive substring) filters.
/// Empty filters are ignored.
#[must_use]
pub fn filter_keywords(keywords: &[KeywordDto], status: &str, search: &str) -> Vec<KeywordDto> {
    let needle = search.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| status.is_empty() || keyword.status == status)
        .filter(|keyword| needle.is_empty() || keyword.keyword.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Count records whose status is exactly `status`.
#[must_use]
pub fn count_with_status(keywords: &[KeywordDto], status: KeywordStatus) -> usize {
    keywords
        .iter()
        .filter(|keyword| keyword.status == status.as_str())
        .count()
}

/// Human-readable size using base-1024 units capped at GB.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }
    let rounded = format!("{:.2}", bytes as f64 / divisor as f64);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Upload rejections raised before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Nothing selected.
    #[error("Please select a file to upload")]
    Missing,
    /// Neither a CSV MIME type nor a `.csv` name.
    #[error("Please select a CSV file")]
    NotCsv,
    /// Zero bytes.
    #[error("Selected file is empty")]
    Empty,
    /// Over the configured limit.
    #[error("File size must be less than {}", limit_label(.limit))]
    TooLarge {
        /// Limit in bytes.
        limit: u64,
    },
}

fn limit_label(limit: &u64) -> String {
    format_file_size(*limit).replace(' ', "")
}

/// Check type, emptiness and size of a candidate upload, in that order.
///
/// # Errors
/// Returns the first [`UploadError`] that applies.
pub fn validate_upload(file: Option<&UploadFile>, max_bytes: u64) -> Result<&UploadFile, UploadError> {
    let file = file.ok_or(UploadError::Missing)?;
    if file.mime != "text/csv" && !file.name.ends_with(".csv") {
        return Err(UploadError::NotCsv);
    }
    if file.size == 0 {
        return Err(UploadError::Empty);
    }
    if file.size > max_bytes {
        return Err(UploadError::TooLarge { limit: max_bytes });
    }
    Ok(file)
}

/// Escape text for interpolation into markup.
#[must_use]
pub fn escape_text(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Sanitise a scraped results page for inline preview.
#[must_use]
pub fn sanitize_preview(html: &str) -> String {
    ammonia::clean(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_MAX_UPLOAD_BYTES;

    fn keyword(id: i64, text: &str, status: &str) -> KeywordDto {
        KeywordDto {
            id,
            keyword: text.to_string(),
            status: status.to_string(),
            ad_count: None,
            link_count: None,
            error_message: None,
            html_content: None,
        }
    }

    #[test]
    fn format_keyword_defaults_counts_and_derives_error_flag() {
        let mut dto = keyword(1, "rust", "failed");
        dto.link_count = Some(12);
        dto.error_message = Some("captcha".into());
        let formatted = format_keyword(&dto);
        assert_eq!(formatted.ad_count, 0);
        assert_eq!(formatted.link_count, 12);
        assert!(formatted.has_error);

        dto.error_message = Some(String::new());
        assert!(!format_keyword(&dto).has_error);
    }

    #[test]
    fn status_class_is_total() {
        assert_eq!(status_class(Some("COMPLETED")), StatusClass::Success);
        assert_eq!(status_class(Some("processing")), StatusClass::Warning);
        assert_eq!(status_class(Some("Failed")), StatusClass::Error);
        assert_eq!(status_class(Some("pending")), StatusClass::Pending);
        assert_eq!(status_class(Some("archived")), StatusClass::Pending);
        assert_eq!(status_class(Some("")), StatusClass::Pending);
        assert_eq!(status_class(None), StatusClass::Pending);
    }

    #[test]
    fn filter_keywords_handles_empty_inputs() {
        assert!(filter_keywords(&[], "", "").is_empty());
        let list = vec![keyword(1, "Rust Lang", "completed"), keyword(2, "go", "failed")];
        assert_eq!(filter_keywords(&list, "", "").len(), 2);
        assert!(filter_keywords(&list, "processing", "").is_empty());
    }

    #[test]
    fn filter_keywords_composes_status_and_search() {
        let list = vec![
            keyword(1, "Rust Lang", "completed"),
            keyword(2, "rustacean", "failed"),
            keyword(3, "golang", "completed"),
        ];
        let by_search: Vec<i64> = filter_keywords(&list, "", "RUST")
            .iter()
            .map(|k| k.id)
            .collect();
        assert_eq!(by_search, vec![1, 2]);
        let both: Vec<i64> = filter_keywords(&list, "completed", "rust")
            .iter()
            .map(|k| k.id)
            .collect();
        assert_eq!(both, vec![1]);
        assert!(filter_keywords(&list, "Completed", "").is_empty());
    }

    #[test]
    fn file_sizes_format_like_the_upload_panel() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(100 * 1024), "100 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn upload_validation_order_and_messages() {
        let max = DEFAULT_MAX_UPLOAD_BYTES;
        assert_eq!(validate_upload(None, max).unwrap_err(), UploadError::Missing);

        let txt = UploadFile::from_bytes("notes.txt", "text/plain", vec![]);
        assert_eq!(validate_upload(Some(&txt), max).unwrap_err(), UploadError::NotCsv);

        let empty = UploadFile::from_bytes("k.csv", "", vec![]);
        let err = validate_upload(Some(&empty), max).unwrap_err();
        assert_eq!(err.to_string(), "Selected file is empty");

        let mut big = UploadFile::from_bytes("k", "text/csv", vec![b'a']);
        big.size = max + 1;
        let err = validate_upload(Some(&big), max).unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 10MB");

        let mut at_limit = UploadFile::from_bytes("k.csv", "", vec![b'a']);
        at_limit.size = max;
        assert!(validate_upload(Some(&at_limit), max).is_ok());
    }

    #[test]
    fn escape_text_neutralises_markup() {
        let escaped = escape_text("<b>rust</b>");
        assert!(!escaped.contains('<'));
        assert!(sanitize_preview("<p>ok</p><script>alert(1)</script>").contains("<p>ok</p>"));
        assert!(!sanitize_preview("<script>alert(1)</script>").contains("script"));
    }
}
