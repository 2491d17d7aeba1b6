//! Value normalization error types

use thiserror::Error;

/// Errors raised while normalizing a raw prop value
///
/// Every variant carries the offending raw input so callers can report it
/// without keeping the original value around.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A string that is not a finite numeral (after stripping a trailing `%`)
    #[error("Invalid scalar format: {input:?}")]
    InvalidScalarFormat { input: String },

    /// A channel array with a component outside `[0, 1]`
    #[error("Color channel out of range [0, 1]: {input}")]
    InvalidColorRange { input: String },

    /// A color value whose format could not be recognized
    #[error("Unknown color format: {input:?}")]
    UnknownColorFormat { input: String },

    /// A matrix that does not have exactly six finite entries
    #[error("Transform matrix needs exactly 6 finite entries: {input}")]
    InvalidMatrixLength { input: String },

    /// A transform list naming a function outside the SVG set
    #[error("Unknown transform function `{name}` in {input:?}")]
    UnknownTransformFunction { name: String, input: String },

    /// A transform list with broken syntax or a wrong argument count
    #[error("Malformed transform: {input:?}")]
    MalformedTransform { input: String },
}

impl ValueError {
    /// The raw input that caused the error
    pub fn input(&self) -> &str {
        match self {
            ValueError::InvalidScalarFormat { input }
            | ValueError::InvalidColorRange { input }
            | ValueError::UnknownColorFormat { input }
            | ValueError::InvalidMatrixLength { input }
            | ValueError::UnknownTransformFunction { input, .. }
            | ValueError::MalformedTransform { input } => input,
        }
    }

    pub(crate) fn scalar(input: impl Into<String>) -> Self {
        ValueError::InvalidScalarFormat {
            input: input.into(),
        }
    }

    pub(crate) fn unknown_color(input: impl Into<String>) -> Self {
        ValueError::UnknownColorFormat {
            input: input.into(),
        }
    }

    pub(crate) fn malformed_transform(input: impl Into<String>) -> Self {
        ValueError::MalformedTransform {
            input: input.into(),
        }
    }
}

/// Result type for value normalization
pub type Result<T> = std::result::Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_input() {
        let err = ValueError::UnknownTransformFunction {
            name: "foo".to_string(),
            input: "foo(1)".to_string(),
        };
        assert_eq!(err.input(), "foo(1)");
        assert_eq!(
            err.to_string(),
            "Unknown transform function `foo` in \"foo(1)\""
        );
    }
}
