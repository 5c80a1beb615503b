//! # exif-stamp
//!
//! Batch EXIF metadata stamper — embed titles, authors, dates, GPS
//! coordinates, tags, and ratings into images as standard EXIF metadata.
//!
//! ## Quick Start
//!
//! The simplest way to use the library is through the pipeline module,
//! which handles the full decode → assemble → encode → splice flow for a
//! batch of images sharing one metadata record:
//!
//! ```rust,no_run
//! use exif_stamp::codec::{LittleExifCodec, MetadataCodec};
//! use exif_stamp::metadata::MetadataRecord;
//! use exif_stamp::pipeline::{process_batch, SourceImage, DEFAULT_JPEG_QUALITY};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let record = MetadataRecord {
//!         author: "A. Photographer".into(),
//!         latitude: "51.5074".into(),
//!         longitude: "-0.1278".into(),
//!         ..MetadataRecord::with_defaults("harbor.jpg")
//!     };
//!
//!     let images = vec![SourceImage {
//!         original_name: "harbor.jpg".into(),
//!         bytes: std::fs::read("harbor.jpg")?,
//!     }];
//!
//!     let codec: Arc<dyn MetadataCodec> = Arc::new(LittleExifCodec);
//!     let outcomes = process_batch(images, &record, Some(codec), DEFAULT_JPEG_QUALITY).await;
//!
//!     for outcome in &outcomes {
//!         match (&outcome.output, &outcome.error) {
//!             (Some(bytes), _) => std::fs::write(&outcome.output_name, bytes)?,
//!             (None, Some(err)) => eprintln!("{}: {err}", outcome.original_name),
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The encoders and the assembler are plain functions over plain values:
//!
//! ```rust
//! use exif_stamp::metadata::{assemble, gps, text, MetadataRecord};
//!
//! // GPS: decimal degrees → DMS rationals + hemisphere letter
//! let dms = gps::to_dms_rational(40.7128);
//! assert_eq!(dms.seconds, (4608, 100));
//! assert_eq!(gps::latitude_ref(40.7128), 'N');
//!
//! // XP* tags: UTF-16LE with a 2-byte terminator
//! assert_eq!(text::encode_utf16le("AB").len(), 6);
//!
//! // Record → segment-grouped tree
//! let record = MetadataRecord {
//!     keywords: "harbor,dusk".into(),
//!     ..MetadataRecord::default()
//! };
//! let tree = assemble(&record);
//! assert!(tree.primary.contains_key(&exif_stamp::metadata::TAG_XP_KEYWORDS));
//! ```
//!
//! ## Modules
//!
//! - [`metadata`] — the record, the encoders (GPS, UTF-16LE, timestamps),
//!   and the assembler producing the segment-grouped metadata tree
//! - [`codec`] — the low-level codec boundary (serialize + splice) and its
//!   `little_exif`/`img-parts` implementation
//! - [`pipeline`] — batch processing and input collection
//! - [`config`] — configuration types and loading/saving

pub mod codec;
pub mod config;
pub mod metadata;
pub mod pipeline;
