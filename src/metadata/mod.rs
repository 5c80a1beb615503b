//! Metadata record, encoders, and tree assembly.
//!
//! This module owns the value encodings whose byte layout actually matters:
//!
//! - [`gps`] — signed decimal degrees → unsigned DMS rationals + hemisphere
//! - [`text`] — UTF-16LE byte arrays for the XP* tags
//! - [`timestamp`] — the fixed `YYYY:MM:DD HH:MM:SS` EXIF datetime layout
//!
//! [`assemble`] ties them together, mapping a flat [`MetadataRecord`] into
//! the segment-grouped [`MetadataTree`] the codec serializes.

pub mod gps;
pub mod text;
pub mod timestamp;

mod assembler;
mod record;
mod tree;

pub use assembler::assemble;
pub use record::{DEFAULT_RATING, MetadataRecord};
pub use tree::{MetadataTree, Segment, TagValue};
pub use tree::{
    TAG_ARTIST, TAG_COPYRIGHT, TAG_DATETIME_DIGITIZED, TAG_DATETIME_ORIGINAL,
    TAG_GPS_LATITUDE, TAG_GPS_LATITUDE_REF, TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF,
    TAG_IMAGE_DESCRIPTION, TAG_RATING, TAG_USER_COMMENT, TAG_XP_KEYWORDS, TAG_XP_SUBJECT,
};
