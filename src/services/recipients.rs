// src/services/recipients.rs

//! Recipient list loading.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Read recipients from a file, one address per line.
pub fn load_recipients(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_recipients(&content))
}

/// Parse a recipient list. Blank lines and `#` comments are ignored.
pub fn parse_recipients(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_recipients() {
        let content = "a@example.com\n\n  b@example.com  \n# c@example.com\n";
        assert_eq!(
            parse_recipients(content),
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_load_recipients_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a@example.com").unwrap();
        let recipients = load_recipients(file.path()).unwrap();
        assert_eq!(recipients, vec!["a@example.com"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_recipients("/nonexistent/recipients.txt").is_err());
    }
}
