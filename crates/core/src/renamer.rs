use crate::error::RenameError;
use crate::metadata::{ExifRecord, MediaKind, MetadataSource};
use crate::namer::{compose_base_name, normalized_extension, target_file_name};
use crate::reader::MetadataReader;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenameAction {
    /// The file was renamed on disk.
    Renamed,
    /// Source already carried the computed name.
    Unchanged,
    /// Dry-run: the target was computed but nothing was touched.
    Planned,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameOutcome {
    pub source: PathBuf,
    pub target: PathBuf,
    pub action: RenameAction,
    pub metadata_source: MetadataSource,
}

#[derive(Debug, Clone, Copy)]
pub struct RenamerOptions {
    pub lowercase_extension: bool,
}

impl Default for RenamerOptions {
    fn default() -> Self {
        Self {
            lowercase_extension: true,
        }
    }
}

pub struct Renamer {
    reader: Box<dyn MetadataReader>,
    options: RenamerOptions,
}

impl Renamer {
    pub fn new(reader: Box<dyn MetadataReader>) -> Self {
        Self::with_options(reader, RenamerOptions::default())
    }

    pub fn with_options(reader: Box<dyn MetadataReader>, options: RenamerOptions) -> Self {
        Self { reader, options }
    }

    pub fn backend_name(&self) -> &'static str {
        self.reader.name()
    }

    /// Renames `path` to its mask-derived name, or only reports the
    /// target when `dry_run` is set.
    pub fn rename_file(
        &mut self,
        path: &Path,
        kind: MediaKind,
        dry_run: bool,
    ) -> Result<RenameOutcome, RenameError> {
        if !path.is_file() {
            return Err(RenameError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let record = match self.reader.read(path) {
            Ok(record) => record,
            Err(err) => {
                log::debug!(
                    "{} backend failed on {}: {err:#}",
                    self.reader.name(),
                    path.display()
                );
                ExifRecord::default()
            }
        };

        let (timestamp, metadata_source) = match record.capture_time {
            Some(capture) => (capture, MetadataSource::Exif),
            None => {
                let modified = file_modified_to_local(path).ok_or_else(|| {
                    RenameError::MetadataUnavailable {
                        path: path.to_path_buf(),
                    }
                })?;
                (modified, MetadataSource::FileModified)
            }
        };

        let base = compose_base_name(kind, timestamp, record.normalized_model());
        let extension = normalized_extension(path, self.options.lowercase_extension);
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let target = resolve_collision(parent, path, &base, &extension);

        if target == path {
            return Ok(RenameOutcome {
                source: path.to_path_buf(),
                target,
                action: RenameAction::Unchanged,
                metadata_source,
            });
        }

        if dry_run {
            return Ok(RenameOutcome {
                source: path.to_path_buf(),
                target,
                action: RenameAction::Planned,
                metadata_source,
            });
        }

        fs::rename(path, &target).map_err(|source| RenameError::RenameFailed {
            from: path.to_path_buf(),
            to: target.clone(),
            source,
        })?;

        Ok(RenameOutcome {
            source: path.to_path_buf(),
            target,
            action: RenameAction::Renamed,
            metadata_source,
        })
    }
}

// The source file itself never counts as a collision, so an
// already-correct name resolves to itself.
fn resolve_collision(parent: &Path, original: &Path, base: &str, extension: &str) -> PathBuf {
    let mut n = 0usize;
    loop {
        let candidate = parent.join(target_file_name(base, extension, n));
        if candidate == original || is_same_file(&candidate, original) || !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

// Case-insensitive filesystems report the target as existing when only
// the extension case differs from the source.
fn is_same_file(candidate: &Path, original: &Path) -> bool {
    if !candidate.exists() {
        return false;
    }
    match (fs::canonicalize(candidate), fs::canonicalize(original)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn file_modified_to_local(path: &Path) -> Option<DateTime<Local>> {
    let time = fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::from(time))
}
