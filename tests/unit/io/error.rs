//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use hexwalk::AlgorithmError;
    use hexwalk::io::error::invalid_parameter;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/tiles.txt".into(),
            operation: "open input",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("open input"));
        assert!(message.contains("/tmp/tiles.txt"));
    }

    // Tests InvalidSourceData carries its reason and has no source
    // Verified by omitting the reason from the message
    #[test]
    fn test_invalid_source_data() {
        let error = AlgorithmError::InvalidSourceData {
            reason: "no tile has point value 0".to_string(),
        };

        assert!(error.to_string().contains("no tile has point value 0"));
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("render", &"walk.jpg", &"must be a .png file");

        let message = error.to_string();
        assert!(message.contains("render"));
        assert!(message.contains("walk.jpg"));
        assert!(message.contains("must be a .png file"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = AlgorithmError::ImageExport {
            path: PathBuf::from("/restricted/walk.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/walk.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests output errors chain the underlying write failure
    // Verified by returning no source for output errors
    #[test]
    fn test_output_error() {
        let error = AlgorithmError::Output {
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        };

        assert!(error.to_string().contains("pipe closed"));
        assert!(error.source().is_some());
    }

    // Tests conversion from a bare I/O error
    // Verified by mapping to the wrong variant
    #[test]
    fn test_from_io_error() {
        let error: AlgorithmError = std::io::Error::other("boom").into();
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
    }
}
