//! The low-level metadata codec boundary.
//!
//! The pipeline never touches the TIFF/IFD binary format itself. It talks to
//! a [`MetadataCodec`] through two operations: serialize a [`MetadataTree`]
//! to bytes, and splice those bytes into a compressed image stream. The
//! production implementation is [`LittleExifCodec`], backed by `little_exif`
//! for serialization and `img-parts` for the JPEG APP1 splice.

use anyhow::{Context, Result};
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;
use img_parts::Bytes;
use little_exif::endian::Endian;
use little_exif::exif_tag::ExifTag;
use little_exif::exif_tag_format::ExifTagFormat;
use little_exif::filetype::FileExtension;
use little_exif::ifd::ExifTagGroup;
use little_exif::metadata::Metadata;

use crate::metadata::{MetadataTree, Segment, TagValue, TAG_USER_COMMENT};

// little_exif as_u8_vec(JPEG) returns: [APP1 marker 2B][length 2B][Exif\0\0 6B][TIFF data]
// img-parts set_exif() expects just the TIFF data (after Exif\0\0)
const JPEG_EXIF_OVERHEAD: usize = 10; // 2 + 2 + 6

/// Serializes metadata trees and splices them into image byte streams.
///
/// Kept behind a trait so the pipeline can run without a codec (producing
/// metadata-free output) and so tests can substitute a failing or recording
/// implementation.
pub trait MetadataCodec: Send + Sync {
    /// Serialize a metadata tree into codec-native bytes (TIFF payload).
    fn serialize(&self, tree: &MetadataTree) -> Result<Vec<u8>>;

    /// Insert serialized metadata into a compressed image byte stream,
    /// returning the new stream. Fails when `image` is not a recognized
    /// compressed-image format.
    fn splice(&self, metadata: &[u8], image: &[u8]) -> Result<Vec<u8>>;
}

/// The default codec: `little_exif` TIFF serialization + `img-parts` splice.
#[derive(Debug, Default)]
pub struct LittleExifCodec;

impl MetadataCodec for LittleExifCodec {
    fn serialize(&self, tree: &MetadataTree) -> Result<Vec<u8>> {
        let mut metadata = Metadata::new();

        for (segment, tags) in tree.segments() {
            let group = segment_group(segment);
            for (&tag_id, value) in tags {
                if let Some(tag) = build_tag(segment, tag_id, value, &group) {
                    metadata.set_tag(tag);
                } else {
                    log::warn!("Skipping unencodable tag 0x{tag_id:04X} in {segment:?}");
                }
            }
        }

        let exif_bytes = metadata
            .as_u8_vec(FileExtension::JPEG)
            .context("Failed to encode EXIF metadata")?;
        if exif_bytes.len() <= JPEG_EXIF_OVERHEAD {
            anyhow::bail!("Serialized metadata shorter than the APP1 header");
        }
        Ok(exif_bytes[JPEG_EXIF_OVERHEAD..].to_vec())
    }

    fn splice(&self, metadata: &[u8], image: &[u8]) -> Result<Vec<u8>> {
        let mut jpeg = Jpeg::from_bytes(Bytes::copy_from_slice(image))
            .map_err(|e| anyhow::anyhow!("Failed to parse JPEG: {e}"))
            .context("Cannot splice metadata into unrecognized image data")?;

        jpeg.set_exif(Some(Bytes::copy_from_slice(metadata)));

        // set_exif() inserts at position 3; many readers expect the EXIF
        // APP1 right after APP0, so move it forward.
        if let Some(pos) = find_exif_segment_pos(&jpeg) {
            let target = 1usize.min(jpeg.segments().len().saturating_sub(1));
            if pos > target {
                let segments = jpeg.segments_mut();
                let seg = segments.remove(pos);
                segments.insert(target, seg);
            }
        }

        Ok(jpeg.encoder().bytes().to_vec())
    }
}

/// Find the position of the EXIF APP1 segment in a JPEG.
/// EXIF segments have marker 0xE1 (APP1) and contents starting with "Exif\0\0".
fn find_exif_segment_pos(jpeg: &Jpeg) -> Option<usize> {
    const EXIF_PREFIX: &[u8] = b"Exif\0\0";
    jpeg.segments()
        .iter()
        .position(|s| s.marker() == 0xE1 && s.contents().starts_with(EXIF_PREFIX))
}

fn segment_group(segment: Segment) -> ExifTagGroup {
    match segment {
        Segment::Primary => ExifTagGroup::GENERIC,
        Segment::Capture => ExifTagGroup::EXIF,
        Segment::Location => ExifTagGroup::GPS,
        Segment::Interoperability => ExifTagGroup::INTEROP,
        // little_exif has no dedicated IFD1 group; thumbnail IFDs are
        // "generic" IFDs beyond the first.
        Segment::Thumbnail => ExifTagGroup::GENERIC,
    }
}

/// Build a little_exif tag for one tree entry.
///
/// UserComment is the one special case: the EXIF UNDEFINED layout wants a
/// character-set prefix before the text bytes.
fn build_tag(segment: Segment, tag_id: u16, value: &TagValue, group: &ExifTagGroup) -> Option<ExifTag> {
    if segment == Segment::Capture && tag_id == TAG_USER_COMMENT {
        if let TagValue::Text(text) = value {
            let mut comment_bytes = b"ASCII\0\0\0".to_vec();
            comment_bytes.extend_from_slice(text.as_bytes());
            return Some(ExifTag::UserComment(comment_bytes));
        }
    }

    let (format, raw_data): (ExifTagFormat, Vec<u8>) = match value {
        TagValue::Text(text) => (ExifTagFormat::STRING, format!("{text}\0").into_bytes()),
        TagValue::Bytes(bytes) => (ExifTagFormat::INT8U, bytes.clone()),
        TagValue::Short(v) => (ExifTagFormat::INT16U, v.to_le_bytes().to_vec()),
        TagValue::Rationals(pairs) => {
            let mut bytes = Vec::with_capacity(pairs.len() * 8);
            for (num, den) in pairs {
                bytes.extend_from_slice(&num.to_le_bytes());
                bytes.extend_from_slice(&den.to_le_bytes());
            }
            (ExifTagFormat::RATIONAL64U, bytes)
        }
    };

    ExifTag::from_u16_with_data(tag_id, &format, &raw_data, &Endian::Little, group).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{assemble, MetadataRecord};
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;

    fn sample_tree() -> MetadataTree {
        let record = MetadataRecord {
            author: "A. Photographer".to_string(),
            title: "Harbor at dusk".to_string(),
            keywords: "harbor,dusk".to_string(),
            latitude: "51.5074".to_string(),
            longitude: "-0.1278".to_string(),
            ..MetadataRecord::default()
        };
        assemble(&record)
    }

    fn tiny_jpeg() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
            .unwrap();
        buf
    }

    #[test]
    fn serialize_produces_tiff_payload() {
        let bytes = LittleExifCodec.serialize(&sample_tree()).unwrap();
        // little_exif writes little-endian TIFF
        assert_eq!(&bytes[..2], b"II");
        assert!(bytes.len() > 8);
    }

    #[test]
    fn serialize_is_deterministic() {
        let tree = sample_tree();
        let a = LittleExifCodec.serialize(&tree).unwrap();
        let b = LittleExifCodec.serialize(&tree).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn splice_embeds_exif_segment() {
        let codec = LittleExifCodec;
        let tiff = codec.serialize(&sample_tree()).unwrap();
        let spliced = codec.splice(&tiff, &tiny_jpeg()).unwrap();

        let jpeg = Jpeg::from_bytes(Bytes::from(spliced)).unwrap();
        let embedded = jpeg.exif().expect("spliced JPEG should carry EXIF");
        assert_eq!(&embedded[..], &tiff[..]);
    }

    #[test]
    fn splice_rejects_non_jpeg_data() {
        let codec = LittleExifCodec;
        let tiff = codec.serialize(&sample_tree()).unwrap();
        assert!(codec.splice(&tiff, b"definitely not a jpeg").is_err());
    }
}
