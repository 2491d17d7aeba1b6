//! nsvg value normalization
//!
//! SVG element props arrive in loose, union-typed forms: numbers or strings,
//! colors as names, hex strings, packed integers or channel arrays, transforms
//! as matrices, strings or objects. This crate turns each of them into one
//! canonical value a rendering backend can consume directly:
//!
//! - **Scalars**: [`normalize_scalar`] → [`NormalizedScalar`]
//! - **Colors**: [`normalize_color`] → [`NormalizedColor`]
//! - **Lists**: [`normalize_list`] → [`NormalizedList`]
//! - **Transforms**: [`normalize_transform`] → [`NormalizedMatrix`]
//!
//! All coercers are pure functions; they hold no state and are safe to call
//! from any thread.
//!
//! # Example
//!
//! ```rust
//! use nsvg_core::{normalize_color, normalize_transform, NormalizedColor};
//!
//! let red = normalize_color("#ff0000").unwrap();
//! assert_eq!(red, NormalizedColor::rgb(1.0, 0.0, 0.0));
//!
//! let m = normalize_transform("translate(10, 0)").unwrap();
//! assert_eq!(m.transform_point((0.0, 0.0)), (10.0, 0.0));
//! ```

mod color;
mod error;
mod list;
mod matrix;
mod named;
mod parse;
mod scalar;
mod transform;

pub use color::{normalize_color, ColorFormat, ColorFunction, ColorInput, NormalizedColor};
pub use error::{Result, ValueError};
pub use list::{normalize_list, ListInput, NormalizedList};
pub use matrix::NormalizedMatrix;
pub use scalar::{normalize_scalar, NormalizedScalar, NumberProp};
pub use transform::{normalize_transform, TransformFunction, TransformInput, TransformObject};
