use crate::exif_reader::EmbeddedExifReader;
use crate::exiftool_reader::ExifToolReader;
use crate::metadata::ExifRecord;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One of several interchangeable metadata-reading implementations,
/// picked once at startup.
pub trait MetadataReader {
    fn read(&mut self, path: &Path) -> Result<ExifRecord>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Auto,
    Exiftool,
    Embedded,
}

/// Picks the metadata backend. `Auto` probes for a usable exiftool binary
/// and falls back to the in-process reader when the probe fails.
pub fn select_reader(backend: Backend) -> Result<Box<dyn MetadataReader>> {
    match backend {
        Backend::Exiftool => Ok(Box::new(ExifToolReader::new()?)),
        Backend::Embedded => Ok(Box::new(EmbeddedExifReader)),
        Backend::Auto => match ExifToolReader::new() {
            Ok(reader) => Ok(Box::new(reader)),
            Err(err) => {
                log::debug!("exiftool unavailable, using embedded reader: {err:#}");
                Ok(Box::new(EmbeddedExifReader))
            }
        },
    }
}

/// Parses the date/time shapes the backends produce, e.g.
/// `2016:12:11 13:34:33+13:00` and `2016:11:06 02:59:05`.
pub(crate) fn parse_exif_datetime(input: &str) -> Option<DateTime<Local>> {
    let normalized = input.trim();

    let candidates = [
        "%Y:%m:%d %H:%M:%S",
        "%Y:%m:%d %H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ];

    for fmt in candidates {
        if let Ok(dt) = DateTime::parse_from_str(normalized, fmt) {
            return Some(dt.with_timezone(&Local));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            if let Some(local) = Local.from_local_datetime(&naive).single() {
                return Some(local);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::parse_exif_datetime;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_naive_exif_datetime() {
        let dt = parse_exif_datetime("2006:03:02 08:00:20").expect("must parse");
        assert_eq!(dt.year(), 2006);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.day(), 2);
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.minute(), 0);
        assert_eq!(dt.second(), 20);
    }

    #[test]
    fn parses_zoned_exif_datetime() {
        let dt = parse_exif_datetime("2016:12:11 13:34:33+13:00").expect("must parse");
        assert_eq!(dt.year(), 2016);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_exif_datetime("not a date").is_none());
        assert!(parse_exif_datetime("").is_none());
    }
}
