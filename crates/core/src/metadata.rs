use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "heic", "png", "tif", "tiff"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "m4v", "mts"];

/// Media category of a file, deciding the `IMG_` / `VID_` name prefix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "IMG",
            MediaKind::Video => "VID",
        }
    }

    /// Infers the kind from the file extension, case-insensitively.
    /// Returns `None` for extensions outside the allow-lists.
    pub fn from_path(path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        if IMAGE_EXTENSIONS.iter().any(|known| *known == ext) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.iter().any(|known| *known == ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MetadataSource {
    Exif,
    FileModified,
}

/// Fields extracted from a file's embedded metadata. Both are optional;
/// the renamer falls back to the filesystem timestamp and `noEXIF`.
#[derive(Debug, Clone, Default)]
pub struct ExifRecord {
    pub capture_time: Option<DateTime<Local>>,
    pub camera_model: Option<String>,
}

impl ExifRecord {
    pub fn normalized_model(&self) -> Option<&str> {
        self.camera_model
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{ExifRecord, MediaKind};
    use std::path::Path;

    #[test]
    fn kind_inference_is_case_insensitive() {
        assert_eq!(
            MediaKind::from_path(Path::new("IMG_4040.JPG")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_path(Path::new("clip.MOV")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            MediaKind::from_path(Path::new("photo.heic")),
            Some(MediaKind::Image)
        );
    }

    #[test]
    fn kind_inference_rejects_unknown_extensions() {
        assert_eq!(MediaKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(MediaKind::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn prefixes_match_kind() {
        assert_eq!(MediaKind::Image.prefix(), "IMG");
        assert_eq!(MediaKind::Video.prefix(), "VID");
    }

    #[test]
    fn normalized_model_trims_and_drops_empty() {
        let mut record = ExifRecord {
            capture_time: None,
            camera_model: Some("  Canon EOS10D  ".to_string()),
        };
        assert_eq!(record.normalized_model(), Some("Canon EOS10D"));

        record.camera_model = Some("   ".to_string());
        assert_eq!(record.normalized_model(), None);

        record.camera_model = None;
        assert_eq!(record.normalized_model(), None);
    }
}
