mod config;
mod error;
mod exif_reader;
mod exiftool_reader;
mod metadata;
mod namer;
mod reader;
mod renamer;
mod scanner;

pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths};
pub use error::RenameError;
pub use exif_reader::EmbeddedExifReader;
pub use exiftool_reader::ExifToolReader;
pub use metadata::{ExifRecord, MediaKind, MetadataSource};
pub use namer::{compose_base_name, slugify_model, MISSING_MODEL};
pub use reader::{select_reader, Backend, MetadataReader};
pub use renamer::{RenameAction, RenameOutcome, Renamer, RenamerOptions};
pub use scanner::{process_paths, BatchReport, BatchStats, FileFailure, ScanOptions};
