use std::fmt;

/// Typed header parse error
///
/// Returned by the numeric and date accessors on `HeaderStore` when a header is
/// present but its value does not parse as the declared type. A malformed value is a
/// client protocol violation and must reach the caller; absence of an optional header
/// is never an error and yields the accessor's typed default instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// A numeric header (`Content-Length`, `Max-Forwards`) carries a value that is
    /// not a base-10 integer of the accessor's width.
    InvalidNumber {
        /// Canonical (lowercase) header name
        name: &'static str,
        /// The offending raw value
        value: String,
    },
    /// A date header carries a value outside the fixed RFC 1123 HTTP-date format
    /// (`Sun, 06 Nov 1994 08:49:37 GMT`).
    InvalidDate {
        /// Canonical (lowercase) header name
        name: &'static str,
        /// The offending raw value
        value: String,
    },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::InvalidNumber { name, value } => {
                write!(f, "header '{name}' is not a valid integer: '{value}'")
            }
            HeaderError::InvalidDate { name, value } => {
                write!(
                    f,
                    "header '{name}' is not a valid HTTP-date: '{value}' \
                    (expected RFC 1123 form, e.g. 'Sun, 06 Nov 1994 08:49:37 GMT')"
                )
            }
        }
    }
}

impl std::error::Error for HeaderError {}
