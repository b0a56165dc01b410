use thiserror::Error;

/// Numeric code reported for argument type mismatches.
pub const TYPE_ERROR: u32 = 401;
/// Numeric code reported for values outside their permitted interval.
pub const RANGE_ERROR: u32 = 10200001;
/// Numeric code reported when a buffer length is not a multiple of a block size.
pub const BUFFER_SIZE_ERROR: u32 = 10200009;
/// Numeric code reported for assignments to read-only properties.
pub const PROPERTY_TYPE_ERROR: u32 = 10200013;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// The coarse classification of this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind().category()
    }

    /// Stable numeric code for programmatic handling.
    pub fn code(&self) -> u32 {
        self.category().code()
    }

    pub fn type_mismatch(
        argument: impl Into<String>,
        expected: &[&str],
        received: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::Type {
                argument: argument.into(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
                received: received.into(),
            }
            .into(),
        )
    }

    pub fn negative_size(
        argument: impl Into<String>,
        expected: &[&str],
        received: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::Size {
                argument: argument.into(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
                received: received.into(),
            }
            .into(),
        )
    }

    pub fn unknown_encoding(argument: impl Into<String>, encoding: impl Into<String>) -> Error {
        Error(
            ErrorKind::UnknownEncoding {
                argument: argument.into(),
                encoding: encoding.into(),
            }
            .into(),
        )
    }

    pub fn invalid_value(argument: impl Into<String>, value: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidValue {
                argument: argument.into(),
                value: value.into(),
            }
            .into(),
        )
    }

    pub fn invalid_choice(
        argument: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::InvalidChoice {
                argument: argument.into(),
                first: first.into(),
                second: second.into(),
            }
            .into(),
        )
    }

    pub fn read_only(property: impl Into<String>) -> Error {
        Error(
            ErrorKind::ReadOnlyProperty {
                property: property.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(
        argument: impl Into<String>,
        min: impl ToString,
        max: impl ToString,
        received: impl ToString,
    ) -> Error {
        Error(
            ErrorKind::Range {
                argument: argument.into(),
                min: min.to_string(),
                max: max.to_string(),
                received: received.to_string(),
            }
            .into(),
        )
    }

    pub fn below_lower_bound(
        argument: impl Into<String>,
        min: impl ToString,
        received: impl ToString,
    ) -> Error {
        Error(
            ErrorKind::RangeLowerBound {
                argument: argument.into(),
                min: min.to_string(),
                received: received.to_string(),
            }
            .into(),
        )
    }

    pub fn buffer_size(block: impl Into<String>) -> Error {
        Error(
            ErrorKind::BufferSize {
                block: block.into(),
            }
            .into(),
        )
    }
}

/// Violation classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wrong argument type, unknown encoding or malformed argument value.
    Type,
    /// Value outside a closed interval.
    Range,
    /// Length not a multiple of a required block size.
    Size,
    /// Assignment to a structurally read-only property.
    Property,
}

impl ErrorCategory {
    pub fn code(self) -> u32 {
        match self {
            ErrorCategory::Type => TYPE_ERROR,
            ErrorCategory::Range => RANGE_ERROR,
            ErrorCategory::Size => BUFFER_SIZE_ERROR,
            ErrorCategory::Property => PROPERTY_TYPE_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error(
        "Parameter error. The type of \"{argument}\" must be {}. Received value is: {received}",
        join_types(expected)
    )]
    Type {
        argument: String,
        expected: Vec<String>,
        received: String,
    },

    #[error(
        "Parameter error. The type of \"{argument}\" must be {} and the value cannot be negative. \
         Received value is: {received}",
        join_types(expected)
    )]
    Size {
        argument: String,
        expected: Vec<String>,
        received: String,
    },

    #[error(
        "Parameter error. The type of \"{argument}\" must be BufferEncoding. \
         the encoding {encoding} is unknown"
    )]
    UnknownEncoding { argument: String, encoding: String },

    #[error("The argument '{argument}' is invalid. Received \"{value}\"")]
    InvalidValue { argument: String, value: String },

    #[error("Parameter error. The value of {argument} is neither \"{first}\" nor \"{second}\"")]
    InvalidChoice {
        argument: String,
        first: String,
        second: String,
    },

    #[error("{property} cannot be set for the buffer that has only a getter")]
    ReadOnlyProperty { property: String },

    #[error(
        "The value of \"{argument}\" is out of range. It must be >= {min} and <= {max}. \
         Received value is: {received}"
    )]
    Range {
        argument: String,
        min: String,
        max: String,
        received: String,
    },

    #[error(
        "The value of \"{argument}\" is out of range. It must be >= {min}. \
         Received value is: {received}"
    )]
    RangeLowerBound {
        argument: String,
        min: String,
        received: String,
    },

    #[error("The buffer size must be a multiple of {block}")]
    BufferSize { block: String },
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::Type { .. }
            | ErrorKind::Size { .. }
            | ErrorKind::UnknownEncoding { .. }
            | ErrorKind::InvalidValue { .. }
            | ErrorKind::InvalidChoice { .. } => ErrorCategory::Type,
            ErrorKind::Range { .. } | ErrorKind::RangeLowerBound { .. } => ErrorCategory::Range,
            ErrorKind::BufferSize { .. } => ErrorCategory::Size,
            ErrorKind::ReadOnlyProperty { .. } => ErrorCategory::Property,
        }
    }

    /// Name of the argument or property the error refers to, if any.
    pub fn argument(&self) -> Option<&str> {
        match self {
            ErrorKind::Type { argument, .. }
            | ErrorKind::Size { argument, .. }
            | ErrorKind::UnknownEncoding { argument, .. }
            | ErrorKind::InvalidValue { argument, .. }
            | ErrorKind::InvalidChoice { argument, .. }
            | ErrorKind::Range { argument, .. }
            | ErrorKind::RangeLowerBound { argument, .. } => Some(argument),
            ErrorKind::ReadOnlyProperty { property } => Some(property),
            ErrorKind::BufferSize { .. } => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

/// Renders an alternatives list: `["A", "B", "C"]` becomes `A or B, C`.
fn join_types(types: &[String]) -> String {
    types.join(", ").replacen(',', " or", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_message() {
        let e = Error::type_mismatch("target", &["Buffer", "Uint8Array"], "string");
        assert_eq!(
            e.to_string(),
            "Parameter error. The type of \"target\" must be Buffer or Uint8Array. \
             Received value is: string"
        );
        assert_eq!(e.code(), TYPE_ERROR);
        assert_eq!(e.kind().argument(), Some("target"));
    }

    #[test]
    fn test_join_types_replaces_first_separator_only() {
        let types = vec!["string".to_string(), "Buffer".to_string(), "number".to_string()];
        assert_eq!(join_types(&types), "string or Buffer, number");
        assert_eq!(join_types(&["number".to_string()]), "number");
    }

    #[test]
    fn test_size_message() {
        let e = Error::negative_size("size", &["number"], "-1");
        assert_eq!(
            e.to_string(),
            "Parameter error. The type of \"size\" must be number and the value cannot be \
             negative. Received value is: -1"
        );
        assert_eq!(e.category(), ErrorCategory::Type);
    }

    #[test]
    fn test_encoding_message() {
        let e = Error::unknown_encoding("encoding", "utf32");
        assert_eq!(
            e.to_string(),
            "Parameter error. The type of \"encoding\" must be BufferEncoding. \
             the encoding utf32 is unknown"
        );
    }

    #[test]
    fn test_range_messages() {
        let e = Error::out_of_range("offset", 0, 3, 7);
        assert_eq!(
            e.to_string(),
            "The value of \"offset\" is out of range. It must be >= 0 and <= 3. \
             Received value is: 7"
        );
        assert_eq!(e.code(), RANGE_ERROR);

        let e = Error::below_lower_bound("targetStart", 0, -2);
        assert_eq!(
            e.to_string(),
            "The value of \"targetStart\" is out of range. It must be >= 0. \
             Received value is: -2"
        );
        assert_eq!(e.category(), ErrorCategory::Range);
    }

    #[test]
    fn test_property_and_size_codes() {
        let e = Error::read_only("length");
        assert_eq!(
            e.to_string(),
            "length cannot be set for the buffer that has only a getter"
        );
        assert_eq!(e.code(), PROPERTY_TYPE_ERROR);

        let e = Error::buffer_size("16-bits");
        assert_eq!(e.to_string(), "The buffer size must be a multiple of 16-bits");
        assert_eq!(e.code(), BUFFER_SIZE_ERROR);
        assert!(e.kind().argument().is_none());
    }

    #[test]
    fn test_into_kind() {
        let e = Error::invalid_value("value", "zz");
        assert!(matches!(e.into_kind(), ErrorKind::InvalidValue { value, .. } if value == "zz"));
    }
}
