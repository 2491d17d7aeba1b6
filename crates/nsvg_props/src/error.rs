//! Prop error types

use nsvg_core::ValueError;
use thiserror::Error;

/// Errors that can occur when resolving element props
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropError {
    /// A prop value failed normalization
    #[error("Invalid value for `{prop}`: {source}")]
    Value {
        prop: &'static str,
        #[source]
        source: ValueError,
    },

    /// A keyword outside a prop's vocabulary
    #[error("Unknown {vocabulary} keyword: {value:?}")]
    UnknownKeyword {
        vocabulary: &'static str,
        value: String,
    },
}

/// Result type for prop resolution
pub type Result<T> = std::result::Result<T, PropError>;

/// Attach the prop name to a normalization failure
pub(crate) trait PropContext<T> {
    fn prop(self, name: &'static str) -> Result<T>;
}

impl<T> PropContext<T> for std::result::Result<T, ValueError> {
    fn prop(self, name: &'static str) -> Result<T> {
        self.map_err(|source| PropError::Value { prop: name, source })
    }
}
