//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use photocollage::CollageError;
    use photocollage::io::error::{WithPath, computation_error, invalid_parameter};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = CollageError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(
            CollageError::NoImages {
                folder: PathBuf::from("photos")
            }
            .source()
            .is_none()
        );
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("padding", &-1, &"must not be negative");

        let message = error.to_string();
        assert!(message.contains("padding"));
        assert!(message.contains("-1"));
        assert!(message.contains("must not be negative"));
    }

    // Tests output collision message points at the override flag
    // Verified by dropping the hint from the message
    #[test]
    fn test_output_exists_message() {
        let error = CollageError::OutputExists {
            path: PathBuf::from("pic_collage.jpg"),
        };
        let message = error.to_string();
        assert!(message.contains("pic_collage.jpg"));
        assert!(message.contains("--overwrite"));
    }

    // Tests zero-size image message includes index and dimensions
    // Verified by omitting the index
    #[test]
    fn test_invalid_dimensions_message() {
        let error = CollageError::InvalidImageDimensions {
            index: 3,
            width: 0,
            height: 12,
        };
        let message = error.to_string();
        assert!(message.contains("Image 3"));
        assert!(message.contains("0x12"));
    }

    // Tests the path extension attaches path and operation to I/O errors
    // Verified by discarding the path
    #[test]
    fn test_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::other("disk full"));
        match result.with_path(Path::new("out/collage.png"), "write") {
            Err(CollageError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, PathBuf::from("out/collage.png"));
                assert_eq!(operation, "write");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests computation errors and the io conversion
    // Verified by changing the placeholder path
    #[test]
    fn test_computation_and_conversion() {
        let message = computation_error("paste", &"cell overflow").to_string();
        assert!(message.contains("paste"));
        assert!(message.contains("cell overflow"));

        let converted = CollageError::from(std::io::Error::other("boom"));
        assert!(converted.to_string().contains("<unknown>"));
    }
}
