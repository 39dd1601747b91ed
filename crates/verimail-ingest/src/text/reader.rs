//! Text file loading with size and encoding checks.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Maximum file size accepted for address extraction (50 MB).
pub const MAX_TEXT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Reads a text file for parsing.
///
/// The byte-order mark decides the encoding (UTF-8 when there is none) and
/// is stripped. Malformed sequences are replaced rather than rejected.
pub fn read_text_file(path: &Path) -> Result<String> {
    read_text_file_with_limit(path, MAX_TEXT_FILE_SIZE)
}

/// Reads a text file on the blocking pool.
pub async fn read_text_file_async(path: PathBuf) -> Result<String> {
    let join_path = path.clone();
    tokio::task::spawn_blocking(move || read_text_file(&path))
        .await
        .map_err(|e| IngestError::FileRead {
            path: join_path,
            source: std::io::Error::other(e),
        })?
}

pub(crate) fn read_text_file_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "Input contains malformed sequences; they were replaced"
        );
    }
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        encoding = encoding.name(),
        "Read input file"
    );
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_plain_utf8() {
        let file = create_temp_file(b"email\na@example.com\n");
        let text = read_text_file(file.path()).unwrap();
        assert_eq!(text, "email\na@example.com\n");
    }

    #[test]
    fn test_read_strips_utf8_bom() {
        let file = create_temp_file("\u{feff}email\na@example.com".as_bytes());
        let text = read_text_file(file.path()).unwrap();
        assert!(text.starts_with("email"));
    }

    #[test]
    fn test_read_utf16_le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "e-post\nx@y.no".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = create_temp_file(&bytes);
        let text = read_text_file(file.path()).unwrap();
        assert_eq!(text, "e-post\nx@y.no");
    }

    #[test]
    fn test_read_replaces_invalid_bytes() {
        let file = create_temp_file(b"email\n\xffa@example.com");
        let text = read_text_file(file.path()).unwrap();
        assert!(text.contains("a@example.com"));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_text_file(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_over_limit() {
        let file = create_temp_file(b"0123456789");
        let result = read_text_file_with_limit(file.path(), 4);
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge {
                size: 10,
                max_size: 4,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_read_async() {
        let file = create_temp_file(b"email\nb@example.com");
        let text = read_text_file_async(file.path().to_path_buf())
            .await
            .unwrap();
        assert_eq!(text, "email\nb@example.com");
    }
}
