//! Mapping the flat record into the structured metadata tree.

use chrono::Local;

use super::gps::{latitude_ref, longitude_ref, to_dms_rational};
use super::record::{DEFAULT_RATING, MetadataRecord};
use super::text::encode_utf16le;
use super::timestamp::exif_datetime;
use super::tree::*;

/// Build the metadata tree for one image from the shared record.
///
/// Every field is presence-gated: a text field is written only when it is
/// non-empty after trimming, and GPS only when both coordinates parse as
/// finite numbers. Malformed values degrade to "omitted" or "default
/// substituted" — the assembler itself never fails. All five segments are
/// present in the output even when empty.
pub fn assemble(record: &MetadataRecord) -> MetadataTree {
    let mut tree = MetadataTree::default();

    if let Some(author) = non_empty(&record.author) {
        tree.primary
            .insert(TAG_ARTIST, TagValue::Text(author.to_string()));
    }
    if let Some(copyright) = non_empty(&record.copyright) {
        tree.primary
            .insert(TAG_COPYRIGHT, TagValue::Text(copyright.to_string()));
    }
    if let Some(title) = non_empty(&record.title) {
        tree.primary
            .insert(TAG_IMAGE_DESCRIPTION, TagValue::Text(title.to_string()));
    }

    // Capture time: the record's value, or "now" when absent. Both EXIF
    // datetime tags get the same instant.
    let instant = record
        .date_taken
        .unwrap_or_else(|| Local::now().naive_local());
    let stamp = exif_datetime(&instant);
    tree.capture
        .insert(TAG_DATETIME_ORIGINAL, TagValue::Text(stamp.clone()));
    tree.capture
        .insert(TAG_DATETIME_DIGITIZED, TagValue::Text(stamp));

    let rating = record.rating.trim().parse::<u16>().unwrap_or(DEFAULT_RATING);
    tree.primary.insert(TAG_RATING, TagValue::Short(rating));

    if non_empty(&record.keywords).is_some() {
        tree.primary.insert(
            TAG_XP_KEYWORDS,
            TagValue::Bytes(encode_utf16le(&record.keywords)),
        );
    }

    // UserComment stays plain text; the XP* tags above are the ones that
    // require the UTF-16LE byte layout.
    if let Some(comments) = non_empty(&record.comments) {
        tree.capture
            .insert(TAG_USER_COMMENT, TagValue::Text(comments.to_string()));
    }

    if non_empty(&record.subject).is_some() {
        tree.primary.insert(
            TAG_XP_SUBJECT,
            TagValue::Bytes(encode_utf16le(&record.subject)),
        );
    }

    // GPS is all-or-nothing: partial coordinates are never emitted.
    if let Some((lat, lon)) = parse_coordinates(&record.latitude, &record.longitude) {
        tree.location.insert(
            TAG_GPS_LATITUDE_REF,
            TagValue::Text(latitude_ref(lat).to_string()),
        );
        tree.location.insert(
            TAG_GPS_LATITUDE,
            TagValue::Rationals(to_dms_rational(lat.abs()).components().to_vec()),
        );
        tree.location.insert(
            TAG_GPS_LONGITUDE_REF,
            TagValue::Text(longitude_ref(lon).to_string()),
        );
        tree.location.insert(
            TAG_GPS_LONGITUDE,
            TagValue::Rationals(to_dms_rational(lon.abs()).components().to_vec()),
        );
    }

    tree
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn parse_coordinates(latitude: &str, longitude: &str) -> Option<(f64, f64)> {
    let lat = latitude.trim().parse::<f64>().ok()?;
    let lon = longitude.trim().parse::<f64>().ok()?;
    if lat.is_finite() && lon.is_finite() {
        Some((lat, lon))
    } else {
        None
    }
}
