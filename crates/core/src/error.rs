use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("source file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("no capture date in metadata and no filesystem timestamp: {}", path.display())]
    MetadataUnavailable { path: PathBuf },

    #[error("cannot infer media kind from extension: {}", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("rename failed: {} -> {}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::RenameError;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn messages_name_the_offending_path() {
        let err = RenameError::NotFound {
            path: PathBuf::from("/photos/IMG_4040.JPG"),
        };
        assert!(err.to_string().contains("IMG_4040.JPG"));

        let err = RenameError::UnsupportedExtension {
            path: PathBuf::from("report.pdf"),
        };
        assert!(err.to_string().contains("report.pdf"));
    }

    #[test]
    fn rename_failed_exposes_the_io_source() {
        let err = RenameError::RenameFailed {
            from: PathBuf::from("a.jpg"),
            to: PathBuf::from("b.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("a.jpg"));
        let source = err.source().expect("io source must be chained");
        assert!(source.to_string().contains("denied"));
    }
}
