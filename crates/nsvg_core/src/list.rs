//! List coercion for points and dash arrays

use std::ops::Deref;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::scalar::NumberProp;

static LIST_SEPARATOR: OnceLock<Regex> = OnceLock::new();

/// One or more spaces or commas
fn list_separator() -> &'static Regex {
    LIST_SEPARATOR.get_or_init(|| Regex::new(r"[\s,]+").expect("list separator pattern is valid"))
}

/// A raw list prop value (`points`, `strokeDasharray`)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    /// A single number, e.g. `strokeDasharray={4}`
    Single(f64),
    /// A whitespace/comma delimited string
    Text(String),
    /// An array of numbers or numeric strings
    Items(Vec<NumberProp>),
}

impl ListInput {
    /// Normalize into an ordered list of absolute numbers
    ///
    /// Percentage flags are dropped: point lists and dash patterns are
    /// absolute by convention.
    pub fn normalize(&self) -> Result<NormalizedList> {
        let values = match self {
            ListInput::Single(n) => vec![NumberProp::Number(*n).normalize()?.value],
            ListInput::Text(text) => list_separator()
                .split(text.trim())
                .filter(|token| !token.is_empty())
                .map(parse_token)
                .collect::<Result<Vec<_>>>()?,
            ListInput::Items(items) => items
                .iter()
                .map(|item| item.normalize().map(|s| s.value))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(NormalizedList(values))
    }
}

fn parse_token(token: &str) -> Result<f64> {
    NumberProp::Text(token.to_string())
        .normalize()
        .map(|s| s.value)
}

impl From<f64> for ListInput {
    fn from(n: f64) -> Self {
        ListInput::Single(n)
    }
}

impl From<&str> for ListInput {
    fn from(s: &str) -> Self {
        ListInput::Text(s.to_string())
    }
}

impl From<String> for ListInput {
    fn from(s: String) -> Self {
        ListInput::Text(s)
    }
}

impl From<Vec<NumberProp>> for ListInput {
    fn from(items: Vec<NumberProp>) -> Self {
        ListInput::Items(items)
    }
}

impl From<Vec<f64>> for ListInput {
    fn from(items: Vec<f64>) -> Self {
        ListInput::Items(items.into_iter().map(NumberProp::Number).collect())
    }
}

/// An ordered list of finite numbers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedList(Vec<f64>);

impl NormalizedList {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Pair coordinates into `(x, y)` points
    ///
    /// An odd trailing coordinate is dropped, matching how SVG renderers
    /// recover from a malformed `points` attribute.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        if self.0.len() % 2 != 0 {
            debug!(len = self.0.len(), "Dropping odd trailing coordinate");
        }
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
    }
}

impl Deref for NormalizedList {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<NormalizedList> for Vec<f64> {
    fn from(list: NormalizedList) -> Self {
        list.0
    }
}

/// Normalize a list prop
///
/// ```rust
/// use nsvg_core::normalize_list;
///
/// assert_eq!(normalize_list("1,2 3").unwrap().as_slice(), &[1.0, 2.0, 3.0]);
/// ```
pub fn normalize_list(input: impl Into<ListInput>) -> Result<NormalizedList> {
    input.into().normalize()
}
