use crate::error::RenameError;
use crate::metadata::MediaKind;
use crate::renamer::{RenameAction, RenameOutcome, Renamer};
use anyhow::{Context, Result};
use serde::Serialize;
use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub recursive: bool,
    pub include_hidden: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct BatchStats {
    pub scanned_files: usize,
    pub media_files: usize,
    pub skipped_unsupported: usize,
    pub skipped_hidden: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub planned: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Serialize, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RenameOutcome>,
    pub failures: Vec<FileFailure>,
    pub stats: BatchStats,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Processes explicit files and directories. Per-file failures are
/// recorded and the batch continues.
pub fn process_paths(
    renamer: &mut Renamer,
    paths: &[PathBuf],
    options: &ScanOptions,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in paths {
        if path.is_dir() {
            process_dir(renamer, path, options, &mut report)?;
            continue;
        }

        // Explicit file arguments: an unknown extension is an error
        // rather than a silent skip.
        report.stats.scanned_files += 1;
        if !path.exists() {
            record_failure(
                &mut report,
                path,
                &RenameError::NotFound {
                    path: path.clone(),
                },
            );
            continue;
        }
        match MediaKind::from_path(path) {
            Some(kind) => {
                report.stats.media_files += 1;
                rename_one(renamer, path, kind, options, &mut report);
            }
            None => record_failure(
                &mut report,
                path,
                &RenameError::UnsupportedExtension {
                    path: path.clone(),
                },
            ),
        }
    }

    Ok(report)
}

fn process_dir(
    renamer: &mut Renamer,
    root: &Path,
    options: &ScanOptions,
    report: &mut BatchReport,
) -> Result<()> {
    for (path, kind) in collect_media_files(root, options, &mut report.stats)? {
        rename_one(renamer, &path, kind, options, report);
    }
    Ok(())
}

fn rename_one(
    renamer: &mut Renamer,
    path: &Path,
    kind: MediaKind,
    options: &ScanOptions,
    report: &mut BatchReport,
) {
    match renamer.rename_file(path, kind, options.dry_run) {
        Ok(outcome) => {
            match outcome.action {
                RenameAction::Renamed => {
                    log::info!(
                        "renamed: {} -> {}",
                        outcome.source.display(),
                        outcome.target.display()
                    );
                    report.stats.renamed += 1;
                }
                RenameAction::Unchanged => {
                    log::debug!("unchanged: {}", outcome.source.display());
                    report.stats.unchanged += 1;
                }
                RenameAction::Planned => {
                    log::debug!(
                        "planned: {} -> {}",
                        outcome.source.display(),
                        outcome.target.display()
                    );
                    report.stats.planned += 1;
                }
            }
            report.outcomes.push(outcome);
        }
        Err(err) => record_failure(report, path, &err),
    }
}

fn record_failure(report: &mut BatchReport, path: &Path, err: &RenameError) {
    let mut reason = err.to_string();
    if let Some(source) = err.source() {
        reason.push_str(&format!(": {source}"));
    }
    log::warn!("failed to rename {}: {reason}", path.display());
    report.stats.failed += 1;
    report.failures.push(FileFailure {
        path: path.to_path_buf(),
        reason,
    });
}

fn collect_media_files(
    root: &Path,
    options: &ScanOptions,
    stats: &mut BatchStats,
) -> Result<Vec<(PathBuf, MediaKind)>> {
    let mut out = Vec::new();

    if options.recursive {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("directory walk failed under: {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            consider_file(entry.path(), options, stats, &mut out);
        }
    } else {
        for entry in fs::read_dir(root)
            .with_context(|| format!("could not read directory: {}", root.display()))?
        {
            let entry = entry
                .with_context(|| format!("could not read entry under: {}", root.display()))?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            consider_file(&path, options, stats, &mut out);
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
    }

    Ok(out)
}

fn consider_file(
    path: &Path,
    options: &ScanOptions,
    stats: &mut BatchStats,
    out: &mut Vec<(PathBuf, MediaKind)>,
) {
    stats.scanned_files += 1;

    if is_hidden(path) && !options.include_hidden {
        stats.skipped_hidden += 1;
        return;
    }

    match MediaKind::from_path(path) {
        Some(kind) => {
            stats.media_files += 1;
            out.push((path.to_path_buf(), kind));
        }
        None => stats.skipped_unsupported += 1,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
