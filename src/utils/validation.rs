/// Form-level checks that must reject a request before any storage write
/// happens. An upload with a missing title must not leave an orphaned blob.
use anyhow::{anyhow, Result};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "TITLE_REQUIRED",
            message: "Please provide a title".to_string(),
        }));
    }
    if trimmed.len() > 200 {
        return Err(anyhow!(ValidationError {
            code: "TITLE_TOO_LONG",
            message: "Title must be at most 200 characters".to_string(),
        }));
    }
    Ok(())
}

pub fn validate_upload_size(size: usize, max_size: usize) -> Result<()> {
    if size == 0 {
        return Err(anyhow!(ValidationError {
            code: "FILE_REQUIRED",
            message: "Please provide a file".to_string(),
        }));
    }
    if size > max_size {
        return Err(anyhow!(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size {} bytes exceeds maximum allowed {} bytes ({} MB)",
                size,
                max_size,
                max_size / 1024 / 1024
            ),
        }));
    }
    Ok(())
}

/// Extension of the original filename, lowercased, "bin" when absent.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && *ext != filename)
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_required() {
        assert!(validate_title("Midnight GTR").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_title_length_cap() {
        let long = "a".repeat(201);
        assert!(validate_title(&long).is_err());
        assert!(validate_title(&"a".repeat(200)).is_ok());
    }

    #[test]
    fn test_upload_size_bounds() {
        assert!(validate_upload_size(0, 100).is_err());
        assert!(validate_upload_size(100, 100).is_ok());
        assert!(validate_upload_size(101, 100).is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("gtr.JPG"), "jpg");
        assert_eq!(file_extension("clip.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "bin");
        assert_eq!(file_extension("trailing."), "bin");
    }
}
