//! Typed SVG element props
//!
//! Prop records for every element, the keyword vocabularies their string
//! props accept, and the [`Resolve`] trait that runs them through the
//! `nsvg_core` coercers to produce render-ready values.
//!
//! # Example
//!
//! ```rust
//! use nsvg_props::{Element, Resolve};
//!
//! let element: Element = serde_json::from_str(
//!     r##"{"type": "rect", "width": 100, "height": "50%", "fill": "#0af", "rotation": 45}"##,
//! )
//! .unwrap();
//!
//! let resolved = element.resolve().unwrap();
//! assert_eq!(resolved.kind, "rect");
//! assert!(resolved.length("height").unwrap().is_percentage);
//! ```

pub mod elements;
pub mod error;
pub mod groups;
pub mod paint;
pub mod resolve;
pub mod vocabulary;

pub use elements::{Element, ImageSource, ResolvedElement};
pub use error::{PropError, Result};
pub use groups::{
    ClipProps, ColorProp, CommonMaskProps, CommonPathProps, DefinitionProps, FillProps,
    FontObject, FontProps, ListProp, ResponderProps, StrokeProps, TouchableProps, TransformProp,
    TransformProps, VectorEffectProps,
};
pub use paint::Paint;
pub use resolve::{
    Resolve, ResolvedFill, ResolvedFont, ResolvedPresentation, ResolvedStop, ResolvedStroke,
};
pub use vocabulary::*;
