//! The flat, form-shaped metadata record supplied by the caller.

use chrono::{Datelike, Local, NaiveDateTime};
use std::path::Path;

/// Rating applied when the field is empty or unparseable.
pub const DEFAULT_RATING: u16 = 5;

/// User-supplied descriptive fields for a batch of images.
///
/// Every text field is a raw form value: it may be empty, and the assembler
/// decides per field whether an empty or malformed value means "omit" or
/// "substitute a default". One record is built per batch and shared
/// read-only across all images.
#[derive(Debug, Clone, Default)]
pub struct MetadataRecord {
    /// Base name for output files (without extension).
    pub file_name_base: String,
    pub title: String,
    pub subject: String,
    pub author: String,
    /// Capture time. `None` means "now" at assembly time.
    pub date_taken: Option<NaiveDateTime>,
    pub copyright: String,
    /// Accepted for form parity but mapped to no EXIF tag.
    pub alt_text: String,
    /// Free-form keyword list, typically comma-separated.
    pub keywords: String,
    pub comments: String,
    /// Star rating 0–5 as entered; parsed with a default of 5.
    pub rating: String,
    /// Decimal degrees as entered. GPS is only written when both latitude
    /// and longitude parse as finite numbers.
    pub latitude: String,
    pub longitude: String,
}

impl MetadataRecord {
    /// Build a record pre-filled the way the form would be for `file_name`:
    /// base name and title from the file stem (separators become spaces),
    /// copyright with the current year, rating 5, date taken now.
    pub fn with_defaults(file_name: &str) -> Self {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let now = Local::now().naive_local();

        Self {
            file_name_base: stem.clone(),
            title: stem.replace(['-', '_'], " "),
            copyright: format!("© {}", now.year()),
            rating: DEFAULT_RATING.to_string(),
            date_taken: Some(now),
            ..Self::default()
        }
    }

    /// The base name used for output file naming, falling back to "image".
    pub fn output_base(&self) -> &str {
        let trimmed = self.file_name_base.trim();
        if trimmed.is_empty() { "image" } else { trimmed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_file_name() {
        let record = MetadataRecord::with_defaults("summer-trip_2024.jpg");
        assert_eq!(record.file_name_base, "summer-trip_2024");
        assert_eq!(record.title, "summer trip 2024");
        assert_eq!(record.rating, "5");
        assert!(record.copyright.starts_with("© "));
        assert!(record.date_taken.is_some());
    }

    #[test]
    fn output_base_falls_back() {
        let record = MetadataRecord::default();
        assert_eq!(record.output_base(), "image");

        let record = MetadataRecord {
            file_name_base: "  ".to_string(),
            ..MetadataRecord::default()
        };
        assert_eq!(record.output_base(), "image");

        let record = MetadataRecord {
            file_name_base: "holiday".to_string(),
            ..MetadataRecord::default()
        };
        assert_eq!(record.output_base(), "holiday");
    }
}
