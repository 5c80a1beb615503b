use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use exif_stamp::codec::{LittleExifCodec, MetadataCodec};
use exif_stamp::config::Config;
use exif_stamp::metadata::MetadataRecord;
use exif_stamp::pipeline;

#[derive(Parser, Debug)]
#[command(
    name = "exif-stamp",
    version,
    about = "Batch EXIF metadata stamper — embed titles, authors, dates, GPS, tags, and ratings into images"
)]
struct Cli {
    /// Image files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Base name for output files (default: stem of the first image)
    #[arg(long, value_name = "NAME")]
    file_name: Option<String>,

    /// Image title (EXIF ImageDescription)
    #[arg(short, long)]
    title: Option<String>,

    /// Subject (EXIF XPSubject)
    #[arg(long)]
    subject: Option<String>,

    /// Author (EXIF Artist)
    #[arg(short, long)]
    author: Option<String>,

    /// Date taken, e.g. 2024-03-15T10:30 or 2024-03-15T10:30:00 (default: now)
    #[arg(long, value_name = "DATETIME")]
    date_taken: Option<String>,

    /// Copyright notice (default: "© <current year>")
    #[arg(long)]
    copyright: Option<String>,

    /// Alt text (accepted for form parity, not written to EXIF)
    #[arg(long)]
    alt_text: Option<String>,

    /// Comma-separated keywords (EXIF XPKeywords)
    #[arg(short, long)]
    keywords: Option<String>,

    /// Free-form comments (EXIF UserComment)
    #[arg(long)]
    comments: Option<String>,

    /// Star rating 0–5 (default: 5)
    #[arg(short, long)]
    rating: Option<String>,

    /// Latitude in decimal degrees (requires --longitude)
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<String>,

    /// Longitude in decimal degrees (requires --latitude)
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<String>,

    /// Directory to write processed images to (default: next to originals)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Run the pipeline without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Parse the datetime-local style inputs the form accepts.
fn parse_date_taken(value: &str) -> Result<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    anyhow::bail!("Unrecognized date format: {value} (expected e.g. 2024-03-15T10:30)")
}

/// Build the batch record: defaults from the first file name, overridden by
/// whatever was given on the command line.
fn build_record(cli: &Cli, first_file: &str, config: &Config) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::with_defaults(first_file);

    if !config.defaults.title_from_file_name {
        record.title = String::new();
    }
    if !config.defaults.copyright_current_year {
        record.copyright = String::new();
    }
    record.rating = config.defaults.rating.to_string();

    if let Some(ref v) = cli.file_name {
        record.file_name_base = v.clone();
    }
    if let Some(ref v) = cli.title {
        record.title = v.clone();
    }
    if let Some(ref v) = cli.subject {
        record.subject = v.clone();
    }
    if let Some(ref v) = cli.author {
        record.author = v.clone();
    }
    if let Some(ref v) = cli.date_taken {
        record.date_taken = Some(parse_date_taken(v)?);
    }
    if let Some(ref v) = cli.copyright {
        record.copyright = v.clone();
    }
    if let Some(ref v) = cli.alt_text {
        record.alt_text = v.clone();
    }
    if let Some(ref v) = cli.keywords {
        record.keywords = v.clone();
    }
    if let Some(ref v) = cli.comments {
        record.comments = v.clone();
    }
    if let Some(ref v) = cli.rating {
        record.rating = v.clone();
    }
    if let Some(ref v) = cli.latitude {
        record.latitude = v.clone();
    }
    if let Some(ref v) = cli.longitude {
        record.longitude = v.clone();
    }

    Ok(record)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.dry_run {
        config.output.dry_run = true;
    }
    if let Some(ref dir) = cli.output {
        config.output.directory = Some(dir.clone());
    }

    // Validate inputs
    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    let image_paths = pipeline::collect_images(&cli.paths);
    if image_paths.is_empty() {
        anyhow::bail!("No supported image files found in the specified paths.");
    }

    log::info!("Found {} image(s) to process", image_paths.len());
    if config.output.dry_run {
        log::info!("DRY RUN — no files will be written");
    }

    // One record per batch, defaults derived from the first file.
    let first_name = image_paths[0]
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let record = build_record(&cli, &first_name, &config)?;

    // Read the inputs up front; unreadable files become failed slots later
    // rather than aborting the batch.
    let mut images = Vec::with_capacity(image_paths.len());
    for path in &image_paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        match std::fs::read(path) {
            Ok(bytes) => images.push(pipeline::SourceImage { original_name: name, bytes }),
            Err(e) => {
                log::warn!("Failed to read {}: {e}", path.display());
                images.push(pipeline::SourceImage { original_name: name, bytes: Vec::new() });
            }
        }
    }

    let codec: Arc<dyn MetadataCodec> = Arc::new(LittleExifCodec);
    let outcomes = pipeline::process_batch(
        images,
        &record,
        Some(codec),
        config.output.jpeg_quality,
    )
    .await;

    // Write outputs and report
    let total = outcomes.len();
    let mut succeeded = 0usize;
    for outcome in &outcomes {
        match (&outcome.output, &outcome.error) {
            (Some(bytes), _) => {
                let out_path = match config.output.directory {
                    Some(ref dir) => dir.join(&outcome.output_name),
                    None => {
                        let original = &image_paths[outcome.index];
                        original
                            .parent()
                            .map(|p| p.join(&outcome.output_name))
                            .unwrap_or_else(|| PathBuf::from(&outcome.output_name))
                    }
                };

                if config.output.dry_run {
                    log::info!("Would write {}", out_path.display());
                } else {
                    if let Some(parent) = out_path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&out_path, bytes)?;
                    log::info!(
                        "Wrote {}{}",
                        out_path.display(),
                        if outcome.metadata_embedded { "" } else { " (no metadata)" }
                    );
                }
                succeeded += 1;
            }
            (None, Some(err)) => {
                log::error!("{}: {err}", outcome.original_name);
            }
            _ => {}
        }
    }

    log::info!("Done: {succeeded} succeeded, {} failed out of {total} images", total - succeeded);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_local_inputs() {
        assert_eq!(
            parse_date_taken("2024-03-15T10:30").unwrap().to_string(),
            "2024-03-15 10:30:00"
        );
        assert_eq!(
            parse_date_taken("2024-03-15T10:30:45").unwrap().to_string(),
            "2024-03-15 10:30:45"
        );
        assert!(parse_date_taken("yesterday").is_err());
    }
}
