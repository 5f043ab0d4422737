use crate::metadata::MediaKind;
use chrono::{DateTime, Local};
use std::path::Path;

/// Placeholder model segment for files without usable EXIF.
pub const MISSING_MODEL: &str = "noEXIF";

/// Composes `<PREFIX>_<YYYYMMDDTHHMMSS>_<model>` without extension.
pub fn compose_base_name(
    kind: MediaKind,
    timestamp: DateTime<Local>,
    model: Option<&str>,
) -> String {
    let slug = model
        .map(slugify_model)
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| MISSING_MODEL.to_string());

    format!(
        "{}_{}_{}",
        kind.prefix(),
        timestamp.format("%Y%m%dT%H%M%S"),
        slug
    )
}

// Suffix 0 means no disambiguator.
pub fn target_file_name(base: &str, extension: &str, suffix: usize) -> String {
    if suffix == 0 {
        format!("{base}{extension}")
    } else {
        format!("{base}_{suffix}{extension}")
    }
}

/// Extension with leading dot, lower-cased unless configured otherwise.
/// Empty string for files without an extension.
pub fn normalized_extension(path: &Path, lowercase: bool) -> String {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            if lowercase {
                format!(".{}", ext.to_lowercase())
            } else {
                format!(".{ext}")
            }
        })
        .unwrap_or_default()
}

/// Makes the camera model filesystem friendly: whitespace runs collapse
/// to a single `-`, characters illegal on common filesystems are dropped.
pub fn slugify_model(model: &str) -> String {
    model
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|ch| !is_disallowed_char(*ch))
        .collect()
}

fn is_disallowed_char(ch: char) -> bool {
    matches!(ch, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        || ch == '\0'
        || ch.is_control()
}
