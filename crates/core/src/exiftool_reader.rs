use crate::metadata::ExifRecord;
use crate::reader::{parse_exif_datetime, MetadataReader};
use anyhow::{Context, Result};
use exiftool::ExifTool;
use serde_json::Value;
use std::path::Path;

// Tag preference mirrors what cameras actually write: still images carry
// DateTimeOriginal, QuickTime containers carry CreationDate/CreateDate.
const DATE_TAGS: &[&str] = &["DateTimeOriginal", "CreationDate", "CreateDate"];
const MODEL_TAGS: &[&str] = &["Model"];

/// Backend driving the external `exiftool` binary through a stay-open
/// process. Construction fails when the binary is not on PATH.
pub struct ExifToolReader {
    tool: ExifTool,
}

impl ExifToolReader {
    pub fn new() -> Result<Self> {
        let tool = ExifTool::new().context("could not start the exiftool process")?;
        Ok(Self { tool })
    }
}

impl MetadataReader for ExifToolReader {
    fn read(&mut self, path: &Path) -> Result<ExifRecord> {
        let value = self
            .tool
            .json(
                path,
                &[
                    "-DateTimeOriginal",
                    "-CreationDate",
                    "-CreateDate",
                    "-Model",
                ],
            )
            .with_context(|| format!("exiftool could not read: {}", path.display()))?;
        Ok(record_from_json(&value))
    }

    fn name(&self) -> &'static str {
        "exiftool"
    }
}

fn record_from_json(value: &Value) -> ExifRecord {
    let capture_time = DATE_TAGS
        .iter()
        .find_map(|tag| value.get(*tag).and_then(Value::as_str))
        .and_then(parse_exif_datetime);

    let camera_model = MODEL_TAGS
        .iter()
        .find_map(|tag| value.get(*tag).and_then(Value::as_str))
        .map(|model| model.trim().to_string())
        .filter(|model| !model.is_empty());

    ExifRecord {
        capture_time,
        camera_model,
    }
}
