/*!
 * File content reading and binary detection
 */

use std::fs;
use std::io;
use std::path::Path;

/// Result of reading a selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded UTF-8 text ready for emission
    Text(String),
    /// Binary or undecodable content; the file is skipped with a warning
    Binary,
}

/// Common binary file extensions, checked before reading any bytes
static BINARY_EXTENSIONS: &[&str] = &[
    // Executables and libraries
    ".exe", ".dll", ".so", ".dylib", ".bin", ".pyc", ".pyo",
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    // Archives
    ".zip", ".tar", ".gz", ".7z", ".rar",
    // JVM artifacts
    ".class", ".jar", ".war", ".ear",
];

/// Magic numbers (file signatures) for common binary formats
static MAGIC_NUMBERS: &[&[u8]] = &[
    b"\x89PNG\r\n\x1a\n",
    b"\xff\xd8\xff",
    b"GIF8",
    b"PK\x03\x04",
    b"%PDF",
];

const SAMPLE_SIZE: usize = 8192;

/// Read a file and classify it as text or binary
///
/// Classification runs cheapest check first: extension, magic numbers, then
/// a byte-distribution heuristic over the first 8 KiB, and finally a strict
/// UTF-8 decode of the whole file. Any failure classifies the file binary.
pub fn read(path: &Path) -> io::Result<FileContent> {
    let lower = path.to_string_lossy().to_lowercase();
    if BINARY_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Ok(FileContent::Binary);
    }

    let bytes = fs::read(path)?;
    if looks_binary(&bytes) {
        return Ok(FileContent::Binary);
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(FileContent::Text(text)),
        Err(_) => Ok(FileContent::Binary),
    }
}

/// Heuristic binary check over a leading sample of the content
fn looks_binary(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    if MAGIC_NUMBERS.iter().any(|magic| bytes.starts_with(magic)) {
        return true;
    }

    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    if sample.contains(&0) {
        return true;
    }

    // Control characters outside the usual text set (\b \t \n \f \r)
    let non_text = sample
        .iter()
        .filter(|&&b| matches!(b, 0..=7 | 11 | 14..=31 | 127))
        .count();
    non_text as f32 / sample.len() as f32 > 0.30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello\nworld\n").unwrap();
        assert_eq!(
            read(&path).unwrap(),
            FileContent::Text("hello\nworld\n".to_string())
        );
    }

    #[test]
    fn test_empty_file_is_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        File::create(&path).unwrap();
        assert_eq!(read(&path).unwrap(), FileContent::Text(String::new()));
    }

    #[test]
    fn test_binary_extension_fast_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.PNG");
        fs::write(&path, "not actually an image").unwrap();
        assert_eq!(read(&path).unwrap(), FileContent::Binary);
    }

    #[test]
    fn test_magic_number_detection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive");
        fs::write(&path, b"PK\x03\x04rest-of-zip").unwrap();
        assert_eq!(read(&path).unwrap(), FileContent::Binary);
    }

    #[test]
    fn test_nul_byte_is_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[b'a', 0u8, b'b']).unwrap();
        assert_eq!(read(&path).unwrap(), FileContent::Binary);
    }

    #[test]
    fn test_invalid_utf8_is_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        let mut file = File::create(&path).unwrap();
        // High bytes pass the distribution heuristic but fail UTF-8 decoding
        file.write_all(&[0xff, 0xfe, b'A', b'B']).unwrap();
        assert_eq!(read(&path).unwrap(), FileContent::Binary);
    }
}
