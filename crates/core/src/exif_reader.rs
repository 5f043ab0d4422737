use crate::metadata::ExifRecord;
use crate::reader::{parse_exif_datetime, MetadataReader};
use anyhow::{Context, Result};
use exif::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// In-process backend built on kamadak-exif. Handles the common still
/// image containers; anything it cannot parse surfaces as an error, which
/// the renamer recovers from with the filesystem-timestamp fallback.
pub struct EmbeddedExifReader;

impl MetadataReader for EmbeddedExifReader {
    fn read(&mut self, path: &Path) -> Result<ExifRecord> {
        let file = File::open(path)
            .with_context(|| format!("could not open for EXIF read: {}", path.display()))?;
        let mut buf = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut buf)
            .with_context(|| format!("could not parse EXIF: {}", path.display()))?;

        let capture_time = find_field_value(
            &exif,
            &["DateTimeOriginal", "DateTimeDigitized", "DateTime"],
        )
        .as_deref()
        .map(unquote)
        .and_then(|raw| parse_exif_datetime(&raw));

        let camera_model = find_field_value(&exif, &["Model"])
            .map(|model| unquote(&model))
            .filter(|model| !model.is_empty());

        Ok(ExifRecord {
            capture_time,
            camera_model,
        })
    }

    fn name(&self) -> &'static str {
        "embedded"
    }
}

// ASCII fields render with surrounding double quotes in kamadak-exif.
fn unquote(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}

fn find_field_value(exif: &exif::Exif, names: &[&str]) -> Option<String> {
    exif.fields().find_map(|field| {
        let tag_name = format!("{:?}", field.tag);
        if names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&tag_name))
        {
            Some(field.display_value().with_unit(exif).to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::unquote;

    #[test]
    fn unquote_strips_ascii_field_quoting() {
        assert_eq!(unquote("\"Canon EOS10D\""), "Canon EOS10D");
        assert_eq!(unquote("  \"2006:03:02 08:00:20\"  "), "2006:03:02 08:00:20");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"  \""), "");
    }
}
