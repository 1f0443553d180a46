use fixedbuf::FixedBufError;
use packet_utils::CursorError;
use thiserror::Error;

/// Errors raised while decoding or constructing an OPEN message.
///
/// Decoding never substitutes defaults for malformed peer input; every
/// violation surfaces as one of these variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpenParseError {
    #[error("Truncated input: requested {requested} bytes, {available} available")]
    TruncatedInput { requested: usize, available: usize },

    #[error("Unsupported BGP version: {0}")]
    UnsupportedVersion(u8),

    #[error("Malformed capability: code {code}, length {length}")]
    MalformedCapability { code: u8, length: usize },

    #[error("Trailing bytes: declared length {expected}, consumed {actual}")]
    TrailingBytes { expected: usize, actual: usize },

    #[error("Message too large: {length} bytes exceeds maximum {max}")]
    MessageTooLarge { length: usize, max: usize },

    #[error("Invalid AS number: {0}")]
    InvalidAsn(u32),

    #[error("Invalid AFI/SAFI: {afi}/{safi}")]
    InvalidAfiSafi { afi: u16, safi: u8 },

    #[error("{field} value {value} exceeds maximum {max}")]
    ValueOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("Capability value too long: code {code}, length {length}")]
    CapabilityTooLong { code: u8, length: usize },

    #[error("Optional parameter too long: type {typ}, length {length}")]
    ParameterTooLong { typ: u8, length: usize },

    #[error("Optional parameters too long: {length} bytes")]
    OptParamsTooLong { length: usize },

    #[error("Encode buffer overflow: {0}")]
    Overflow(#[from] FixedBufError),
}

impl From<CursorError> for OpenParseError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::Truncated {
                requested,
                available,
            } => Self::TruncatedInput {
                requested,
                available,
            },
        }
    }
}

impl OpenParseError {
    pub fn malformed(code: impl Into<u8>, length: usize) -> Self {
        Self::MalformedCapability {
            code: code.into(),
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_error_conversion() {
        let err: OpenParseError = CursorError::Truncated {
            requested: 4,
            available: 1,
        }
        .into();
        assert_eq!(
            err,
            OpenParseError::TruncatedInput {
                requested: 4,
                available: 1
            }
        );
    }

    #[test]
    fn test_overflow_conversion() {
        let err: OpenParseError = FixedBufError::Overflow {
            need: 2,
            remaining: 0,
        }
        .into();
        assert!(matches!(err, OpenParseError::Overflow(_)));
        assert!(err.to_string().contains("need 2 bytes"));
    }
}
