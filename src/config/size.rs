//! Human-readable size strings ("10MB", "512KB", "1048576").

use thiserror::Error;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Error returned when a size string cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid size '{input}': expected a byte count or a number suffixed with B, KB, MB or GB")]
pub struct SizeParseError {
    pub input: String,
}

/// Parse a size string into bytes.
///
/// Suffixes are binary multiples and case-insensitive. A bare integer is a byte count.
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let err = || SizeParseError {
        input: input.to_string(),
    };

    let normalized = input.trim().to_ascii_uppercase();
    let (digits, multiplier) = if let Some(n) = normalized.strip_suffix("GB") {
        (n, GIB)
    } else if let Some(n) = normalized.strip_suffix("MB") {
        (n, MIB)
    } else if let Some(n) = normalized.strip_suffix("KB") {
        (n, KIB)
    } else if let Some(n) = normalized.strip_suffix('B') {
        (n, 1)
    } else {
        (normalized.as_str(), 1)
    };

    let value: u64 = digits.trim().parse().map_err(|_| err())?;
    value.checked_mul(multiplier).ok_or_else(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse_size("10MB").unwrap(), 10 * 1024 * 1024);
        assert_eq!(parse_size("512kb").unwrap(), 512 * 1024);
        assert_eq!(parse_size("1GB").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("300B").unwrap(), 300);
    }

    #[test]
    fn test_parse_bare_bytes_and_whitespace() {
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert_eq!(parse_size("  2 MB ").unwrap(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("ten MB").is_err());
        assert!(parse_size("-5KB").is_err());
        assert!(parse_size("99999999999999999999GB").is_err());

        let err = parse_size("1TB").unwrap_err();
        assert!(err.to_string().contains("1TB"));
    }
}
