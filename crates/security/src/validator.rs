//! Threat-pattern validation
//!
//! Checked in order, first hit wins:
//! - empty input
//! - SQL injection keywords
//! - XSS markers
//! - path traversal (including percent-encoded forms)

use contracts::PerceptionError;
use tracing::{error, warn};

use crate::MAX_DATA_SIZE;

const SQL_PATTERNS: &[&str] = &[
    "drop table",
    "delete from",
    "insert into",
    "update ",
    "union select",
    "exec(",
    "execute(",
    "--",
    ";--",
    "/*",
    "*/",
];

const XSS_PATTERNS: &[&str] = &[
    "<script",
    "javascript:",
    "onerror=",
    "onload=",
    "<iframe",
    "<object",
    "<embed",
];

const TRAVERSAL_PATTERNS: &[&str] = &["../", "..\\", "%2e%2e", "%252e"];

/// Validate a sensor id against injection patterns.
///
/// Returns the matching threat-class error; the input echoed back in the
/// error is sanitized so it is safe to log.
pub fn validate_sensor_id(sensor_id: &str) -> Result<(), PerceptionError> {
    if sensor_id.trim().is_empty() {
        warn!("security: empty sensor id");
        return Err(PerceptionError::invalid_reading(
            "sensor_id",
            "sensor id must be non-empty",
        ));
    }

    let lower = sensor_id.to_lowercase();

    if SQL_PATTERNS.iter().any(|p| lower.contains(p)) {
        error!(sensor_id = %sanitize_for_log(sensor_id), "security: sql injection attempt");
        return Err(PerceptionError::SqlInjection {
            input: sanitize_for_log(sensor_id),
        });
    }

    if XSS_PATTERNS.iter().any(|p| lower.contains(p)) {
        error!(sensor_id = %sanitize_for_log(sensor_id), "security: xss attempt");
        return Err(PerceptionError::Xss {
            input: sanitize_for_log(sensor_id),
        });
    }

    if TRAVERSAL_PATTERNS.iter().any(|p| lower.contains(p)) {
        error!(sensor_id = %sanitize_for_log(sensor_id), "security: path traversal attempt");
        return Err(PerceptionError::PathTraversal {
            input: sanitize_for_log(sensor_id),
        });
    }

    Ok(())
}

/// Validate a declared payload size.
///
/// Negative sizes (possible when the size comes from an external format)
/// and sizes above [`MAX_DATA_SIZE`] are rejected to block memory-exhaustion
/// payloads.
pub fn validate_data_size(size: i64) -> Result<(), PerceptionError> {
    if size < 0 {
        warn!(size, "security: negative data size");
        return Err(PerceptionError::PayloadSize {
            size,
            max: MAX_DATA_SIZE,
        });
    }
    if size as u64 > MAX_DATA_SIZE {
        error!(size, max = MAX_DATA_SIZE, "security: data size exceeds limit");
        return Err(PerceptionError::PayloadSize {
            size,
            max: MAX_DATA_SIZE,
        });
    }
    Ok(())
}

/// Strip markup and script fragments from an untrusted string.
pub fn sanitize_input(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => cleaned.push(c),
            _ => {}
        }
    }

    // Case-insensitive removal of the bare keyword as well. Byte-level
    // scan: dropping whole ASCII sequences keeps UTF-8 boundaries intact.
    let bytes = cleaned.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes.len() - i >= 6 && bytes[i..i + 6].eq_ignore_ascii_case(b"script") {
            i += 6;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Make an externally-sourced string safe to embed in a log line:
/// control characters replaced, length capped at 100.
pub fn sanitize_for_log(input: &str) -> String {
    input
        .chars()
        .take(100)
        .map(|c| if matches!(c, '\r' | '\n' | '\t') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_ids_pass() {
        assert!(validate_sensor_id("LIDAR-01").is_ok());
        assert!(validate_sensor_id("front_camera").is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(validate_sensor_id("").is_err());
        assert!(validate_sensor_id("   ").is_err());
    }

    #[test]
    fn test_sql_injection_detected() {
        let err = validate_sensor_id("sensor'; DROP TABLE readings;--").unwrap_err();
        assert!(matches!(err, PerceptionError::SqlInjection { .. }));
        assert!(err.is_security());
    }

    #[test]
    fn test_xss_detected() {
        let err = validate_sensor_id("<script>alert(1)</script>").unwrap_err();
        assert!(matches!(err, PerceptionError::Xss { .. }));
    }

    #[test]
    fn test_path_traversal_detected() {
        for input in ["../etc/passwd", "..\\windows", "a%2e%2eb", "x%252ey"] {
            let err = validate_sensor_id(input).unwrap_err();
            assert!(matches!(err, PerceptionError::PathTraversal { .. }), "{input}");
        }
    }

    #[test]
    fn test_data_size_bounds() {
        assert!(validate_data_size(0).is_ok());
        assert!(validate_data_size(MAX_DATA_SIZE as i64).is_ok());
        assert!(validate_data_size(-1).is_err());
        assert!(validate_data_size(MAX_DATA_SIZE as i64 + 1).is_err());
    }

    #[test]
    fn test_sanitize_input_strips_markup() {
        assert_eq!(sanitize_input("<b>hello</b>"), "hello");
        assert!(!sanitize_input("java Script scripted").to_lowercase().contains("script"));
    }

    #[test]
    fn test_sanitize_for_log() {
        assert_eq!(sanitize_for_log("a\r\nb\tc"), "a__b_c");
        assert_eq!(sanitize_for_log(&"x".repeat(300)).len(), 100);
    }
}
