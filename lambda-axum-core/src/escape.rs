//! Strict percent-escape decoding for request paths.
//!
//! Gateway payloads deliver the request path in its escaped form. The engine
//! decodes it to recover the logical path, and a malformed escape is a hard
//! error for the invocation rather than something to pass through silently.

/// Error produced when a path's percent-encoding cannot be decoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    /// A `%` not followed by two hex digits.
    #[error("invalid percent-escape {0:?}")]
    InvalidEscape(String),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded path is not valid utf-8")]
    InvalidUtf8,
}

/// Decode the percent-escapes of a request path.
///
/// Unlike form decoding, `+` is left untouched. Every `%` must introduce a
/// two-digit hex escape; truncated or non-hex escapes fail with
/// [`EscapeError::InvalidEscape`] carrying the offending slice.
pub fn path_unescape(path: &str) -> Result<String, EscapeError> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = &bytes[i..(i + 3).min(bytes.len())];
            let invalid = || EscapeError::InvalidEscape(String::from_utf8_lossy(escape).into_owned());
            if i + 2 >= bytes.len() {
                return Err(invalid());
            }
            match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                _ => return Err(invalid()),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| EscapeError::InvalidUtf8)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_plain_path() {
        assert_eq!(path_unescape("/add").unwrap(), "/add");
        assert_eq!(path_unescape("/a+b").unwrap(), "/a+b");
    }

    #[test]
    fn test_unescape_escaped_path() {
        assert_eq!(
            path_unescape("/path/encode%2Ftest%7C").unwrap(),
            "/path/encode/test|"
        );
        assert_eq!(path_unescape("/%41%20b").unwrap(), "/A b");
    }

    #[test]
    fn test_unescape_rejects_bad_hex() {
        assert_eq!(
            path_unescape("/a%zzb"),
            Err(EscapeError::InvalidEscape("%zz".to_string()))
        );
    }

    #[test]
    fn test_unescape_rejects_truncated_escape() {
        assert_eq!(
            path_unescape("/a%2"),
            Err(EscapeError::InvalidEscape("%2".to_string()))
        );
        assert_eq!(
            path_unescape("/a%"),
            Err(EscapeError::InvalidEscape("%".to_string()))
        );
    }

    #[test]
    fn test_unescape_rejects_invalid_utf8() {
        assert_eq!(path_unescape("/%ff%fe"), Err(EscapeError::InvalidUtf8));
    }
}
