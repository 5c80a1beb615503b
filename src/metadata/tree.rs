//! The structured metadata tree handed to the low-level codec.

use std::collections::BTreeMap;

// IFD0 tags
pub const TAG_IMAGE_DESCRIPTION: u16 = 0x010E;
pub const TAG_ARTIST: u16 = 0x013B;
pub const TAG_COPYRIGHT: u16 = 0x8298;
pub const TAG_RATING: u16 = 0x4746;
pub const TAG_XP_KEYWORDS: u16 = 0x9C9E;
pub const TAG_XP_SUBJECT: u16 = 0x9C9F;

// ExifIFD tags
pub const TAG_DATETIME_ORIGINAL: u16 = 0x9003;
pub const TAG_DATETIME_DIGITIZED: u16 = 0x9004;
pub const TAG_USER_COMMENT: u16 = 0x9286;

// GPS IFD tags
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

/// A single tag value as stored in the tree.
///
/// The variant decides the EXIF wire format the codec will use: `Text`
/// becomes a null-terminated ASCII STRING, `Bytes` a raw BYTE array (the
/// UTF-16LE XP* tags), `Short` a 16-bit SHORT, and `Rationals` a sequence
/// of unsigned RATIONALs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Text(String),
    Bytes(Vec<u8>),
    Short(u16),
    Rationals(Vec<(u32, u32)>),
}

/// The metadata segments an EXIF block is grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// IFD0 — core descriptive fields.
    Primary,
    /// Exif IFD — capture-time fields.
    Capture,
    /// GPS IFD — geolocation.
    Location,
    /// Interoperability IFD.
    Interoperability,
    /// IFD1 — thumbnail fields.
    Thumbnail,
}

/// The assembled metadata tree: one tag map per segment.
///
/// All five segments are always present (possibly empty) because the
/// downstream codec expects the full segment set. Built fresh per image by
/// [`assemble`](super::assemble) and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTree {
    pub primary: BTreeMap<u16, TagValue>,
    pub capture: BTreeMap<u16, TagValue>,
    pub location: BTreeMap<u16, TagValue>,
    pub interoperability: BTreeMap<u16, TagValue>,
    pub thumbnail: BTreeMap<u16, TagValue>,
}

impl MetadataTree {
    /// Iterate the segments in a fixed order.
    pub fn segments(&self) -> [(Segment, &BTreeMap<u16, TagValue>); 5] {
        [
            (Segment::Primary, &self.primary),
            (Segment::Capture, &self.capture),
            (Segment::Location, &self.location),
            (Segment::Interoperability, &self.interoperability),
            (Segment::Thumbnail, &self.thumbnail),
        ]
    }

    /// Total number of tags across all segments.
    pub fn tag_count(&self) -> usize {
        self.segments().iter().map(|(_, m)| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_count() == 0
    }
}
