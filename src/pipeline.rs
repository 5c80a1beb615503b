//! The per-image processing pipeline and batch driver.
//!
//! One [`MetadataRecord`] is shared read-only across a batch; each image runs
//! its own decode → assemble → encode → splice pipeline in an independent
//! task, owning its buffers exclusively. Results land in a slot indexed by
//! the image's position in the batch, so completion order never matters, and
//! the batch is done exactly when every task has been joined.

use anyhow::{Context, Result};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::codec::MetadataCodec;
use crate::metadata::{assemble, MetadataRecord};

/// Supported input extensions (decodable by the `image` crate with the
/// features this crate enables).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// JPEG re-encode quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// One input image: its original file name and raw (still compressed) bytes.
///
/// The bytes are moved into the image's pipeline task and owned there for
/// the task's entire lifetime.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// The per-image result slot.
///
/// `output` is present on success and absent on failure; `error` carries the
/// reason when absent. A failed image never aborts the rest of the batch.
#[derive(Debug)]
pub struct ImageOutcome {
    pub index: usize,
    pub original_name: String,
    /// Suggested output file name.
    pub output_name: String,
    /// The processed image bytes, ready to write out.
    pub output: Option<Vec<u8>>,
    /// Whether metadata was actually spliced in (false when the codec is
    /// absent and the image went through as a plain re-encode).
    pub metadata_embedded: bool,
    pub error: Option<String>,
}

impl ImageOutcome {
    fn failed(index: usize, original_name: String, output_name: String, error: String) -> Self {
        Self {
            index,
            original_name,
            output_name,
            output: None,
            metadata_embedded: false,
            error: Some(error),
        }
    }
}

/// Suggested output name: `<base>_optimized_<n>.<original extension>`.
/// `n` is the 1-based position of the image in the batch.
pub fn output_file_name(record: &MetadataRecord, index: usize, original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");
    format!("{}_optimized_{}.{extension}", record.output_base(), index + 1)
}

/// Run one image through decode → assemble → encode → splice.
///
/// Returns the output bytes and whether metadata was embedded. With no
/// codec the re-encoded image is returned as-is rather than failing.
pub fn process_image(
    source_bytes: &[u8],
    record: &MetadataRecord,
    codec: Option<&dyn MetadataCodec>,
    quality: u8,
) -> Result<(Vec<u8>, bool)> {
    let pixels = image::load_from_memory(source_bytes).context("Failed to decode image")?;

    // Flatten to RGB: JPEG has no alpha channel.
    let flattened = DynamicImage::ImageRgb8(pixels.to_rgb8());
    let mut jpeg_bytes = Vec::new();
    let mut cursor = Cursor::new(&mut jpeg_bytes);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    flattened
        .write_with_encoder(encoder)
        .context("Failed to encode JPEG")?;

    let tree = assemble(record);

    match codec {
        Some(codec) => {
            let metadata_bytes = codec
                .serialize(&tree)
                .context("Failed to serialize metadata")?;
            let spliced = codec
                .splice(&metadata_bytes, &jpeg_bytes)
                .context("Failed to splice metadata into image")?;
            Ok((spliced, true))
        }
        None => {
            log::debug!("No metadata codec available, returning plain re-encode");
            Ok((jpeg_bytes, false))
        }
    }
}

/// Process a batch of images against one shared record.
///
/// Each image gets its own blocking task; the batch completes when every
/// task has been joined. Per-image failures are logged and recorded in that
/// image's outcome slot, never propagated to the other images.
pub async fn process_batch(
    images: Vec<SourceImage>,
    record: &MetadataRecord,
    codec: Option<Arc<dyn MetadataCodec>>,
    quality: u8,
) -> Vec<ImageOutcome> {
    let total = images.len();
    let record = Arc::new(record.clone());
    let names: Vec<String> = images.iter().map(|i| i.original_name.clone()).collect();

    let mut set = JoinSet::new();
    for (index, image) in images.into_iter().enumerate() {
        let record = Arc::clone(&record);
        let codec = codec.clone();
        set.spawn_blocking(move || {
            let output_name = output_file_name(&record, index, &image.original_name);
            match process_image(&image.bytes, &record, codec.as_deref(), quality) {
                Ok((bytes, embedded)) => ImageOutcome {
                    index,
                    original_name: image.original_name,
                    output_name,
                    output: Some(bytes),
                    metadata_embedded: embedded,
                    error: None,
                },
                Err(e) => {
                    log::warn!("Failed to process {}: {e:#}", image.original_name);
                    ImageOutcome::failed(index, image.original_name, output_name, format!("{e:#}"))
                }
            }
        });
    }

    // Arena of indexed slots; finish order is irrelevant.
    let mut slots: Vec<Option<ImageOutcome>> = (0..total).map(|_| None).collect();
    let mut completed = 0usize;
    while let Some(joined) = set.join_next().await {
        completed += 1;
        match joined {
            Ok(outcome) => {
                log::debug!("Completed {completed}/{total}: {}", outcome.original_name);
                let index = outcome.index;
                slots[index] = Some(outcome);
            }
            Err(e) => {
                log::error!("Image task aborted: {e}");
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                let name = names[index].clone();
                let output_name = output_file_name(&record, index, &name);
                ImageOutcome::failed(index, name, output_name, "image task aborted".to_string())
            })
        })
        .collect()
}

/// Collect supported image files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively (following symlinks); only files with supported image
/// extensions are included.
pub fn collect_images(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                images.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported_image(p) {
                    images.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    images
}

/// Check if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
