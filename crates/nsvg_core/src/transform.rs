//! Transform coercion
//!
//! Three input forms resolve to one [`NormalizedMatrix`]:
//!
//! - a six element column-major matrix `[a, b, c, d, tx, ty]`
//! - an SVG transform list such as `"translate(10, 20) rotate(45)"`,
//!   composed left to right
//! - a [`TransformObject`], composed in a fixed order (see
//!   [`TransformObject::normalize`])

use nom::{
    bytes::complete::take_while,
    character::complete::{alpha1, char},
    combinator::{all_consuming, opt, recognize},
    error::ParseError,
    multi::many0,
    sequence::{delimited, pair, preceded},
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ValueError};
use crate::list::normalize_list;
use crate::matrix::NormalizedMatrix;
use crate::parse::{number_list, separator, ws, ParseResult};
use crate::scalar::NumberProp;

/// A raw transform prop value
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TransformInput {
    /// `[a, b, c, d, tx, ty]`
    Matrix(Vec<f64>),
    /// SVG transform list
    Text(String),
    /// Individual transform fields
    Object(TransformObject),
}

impl TransformInput {
    pub fn normalize(&self) -> Result<NormalizedMatrix> {
        match self {
            TransformInput::Matrix(elements) => matrix_from_elements(elements),
            TransformInput::Text(text) => parse_transform_list(text),
            TransformInput::Object(object) => object.normalize(),
        }
    }
}

impl From<[f64; 6]> for TransformInput {
    fn from(elements: [f64; 6]) -> Self {
        TransformInput::Matrix(elements.to_vec())
    }
}

impl From<Vec<f64>> for TransformInput {
    fn from(elements: Vec<f64>) -> Self {
        TransformInput::Matrix(elements)
    }
}

impl From<&str> for TransformInput {
    fn from(s: &str) -> Self {
        TransformInput::Text(s.to_string())
    }
}

impl From<String> for TransformInput {
    fn from(s: String) -> Self {
        TransformInput::Text(s)
    }
}

impl From<TransformObject> for TransformInput {
    fn from(object: TransformObject) -> Self {
        TransformInput::Object(object)
    }
}

/// Transform fields as they appear on an element
///
/// Angles are in degrees. `rotate` and `rotation` are aliases; `rotate` wins
/// when both are set. The universal fields (`translate`, `scale`, `skew`,
/// `origin`) accept a number for both axes or a `"x, y"` string, and the
/// per-axis fields override them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformObject {
    pub scale: Option<NumberProp>,
    pub scale_x: Option<NumberProp>,
    pub scale_y: Option<NumberProp>,
    pub rotate: Option<NumberProp>,
    pub rotation: Option<NumberProp>,
    pub translate: Option<NumberProp>,
    pub translate_x: Option<NumberProp>,
    pub translate_y: Option<NumberProp>,
    pub x: Option<NumberProp>,
    pub y: Option<NumberProp>,
    pub origin: Option<NumberProp>,
    pub origin_x: Option<NumberProp>,
    pub origin_y: Option<NumberProp>,
    pub skew: Option<NumberProp>,
    pub skew_x: Option<NumberProp>,
    pub skew_y: Option<NumberProp>,
}

impl TransformObject {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == TransformObject::default()
    }

    /// Compose the fields into one matrix
    ///
    /// The product, applied to column vectors, is
    ///
    /// ```text
    /// T(x, y) · T(translate) · T(origin) · R(rotate) · S(scale) · K(skew) · T(-origin)
    /// ```
    ///
    /// so `x`/`y` is the first translation of the chain, and rotation, scale
    /// and skew all happen about the origin.
    pub fn normalize(&self) -> Result<NormalizedMatrix> {
        let x = axis(self.x.as_ref(), 0.0)?;
        let y = axis(self.y.as_ref(), 0.0)?;
        let (tx, ty) = axis_pair(
            self.translate.as_ref(),
            self.translate_x.as_ref(),
            self.translate_y.as_ref(),
            0.0,
        )?;
        let (ox, oy) = axis_pair(
            self.origin.as_ref(),
            self.origin_x.as_ref(),
            self.origin_y.as_ref(),
            0.0,
        )?;
        let (sx, sy) = axis_pair(
            self.scale.as_ref(),
            self.scale_x.as_ref(),
            self.scale_y.as_ref(),
            1.0,
        )?;
        let (kx, ky) = axis_pair(
            self.skew.as_ref(),
            self.skew_x.as_ref(),
            self.skew_y.as_ref(),
            0.0,
        )?;
        let rotation = axis(self.rotate.as_ref().or(self.rotation.as_ref()), 0.0)?;

        Ok(NormalizedMatrix::translation(x, y)
            .then(&NormalizedMatrix::translation(tx, ty))
            .then(&NormalizedMatrix::translation(ox, oy))
            .then(&NormalizedMatrix::rotation(rotation))
            .then(&NormalizedMatrix::scale(sx, sy))
            .then(&NormalizedMatrix::skew(kx, ky))
            .then(&NormalizedMatrix::translation(-ox, -oy)))
    }
}

fn axis(value: Option<&NumberProp>, default: f64) -> Result<f64> {
    value.map_or(Ok(default), |v| v.normalize().map(|s| s.value))
}

fn axis_pair(
    universal: Option<&NumberProp>,
    x: Option<&NumberProp>,
    y: Option<&NumberProp>,
    default: f64,
) -> Result<(f64, f64)> {
    let (ux, uy) = match universal {
        None => (default, default),
        Some(n @ NumberProp::Number(_)) => {
            let v = n.normalize()?.value;
            (v, v)
        }
        Some(NumberProp::Text(text)) => match normalize_list(text.as_str())?.as_slice() {
            [v] => (*v, *v),
            [vx, vy] => (*vx, *vy),
            _ => {
                debug!(input = text.as_str(), "Axis pair needs one or two values");
                return Err(ValueError::scalar(text.as_str()));
            }
        },
    };
    Ok((axis(x, ux)?, axis(y, uy)?))
}

/// SVG transform list functions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformFunction {
    Matrix,
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

impl TransformFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "matrix" => Some(TransformFunction::Matrix),
            "translate" => Some(TransformFunction::Translate),
            "scale" => Some(TransformFunction::Scale),
            "rotate" => Some(TransformFunction::Rotate),
            "skewX" => Some(TransformFunction::SkewX),
            "skewY" => Some(TransformFunction::SkewY),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformFunction::Matrix => "matrix",
            TransformFunction::Translate => "translate",
            TransformFunction::Scale => "scale",
            TransformFunction::Rotate => "rotate",
            TransformFunction::SkewX => "skewX",
            TransformFunction::SkewY => "skewY",
        }
    }

    /// Build the matrix for one call; `input` is the whole list, for errors
    fn to_matrix(self, args: &[f64], input: &str) -> Result<NormalizedMatrix> {
        let matrix = match (self, args) {
            (TransformFunction::Matrix, &[a, b, c, d, tx, ty]) => {
                NormalizedMatrix::new(a, b, c, d, tx, ty)
            }
            (TransformFunction::Matrix, _) => {
                return Err(ValueError::InvalidMatrixLength {
                    input: input.to_string(),
                });
            }
            (TransformFunction::Translate, &[tx]) => NormalizedMatrix::translation(tx, 0.0),
            (TransformFunction::Translate, &[tx, ty]) => NormalizedMatrix::translation(tx, ty),
            (TransformFunction::Scale, &[s]) => NormalizedMatrix::scale(s, s),
            (TransformFunction::Scale, &[sx, sy]) => NormalizedMatrix::scale(sx, sy),
            (TransformFunction::Rotate, &[angle]) => NormalizedMatrix::rotation(angle),
            (TransformFunction::Rotate, &[angle, cx, cy]) => NormalizedMatrix::translation(cx, cy)
                .then(&NormalizedMatrix::rotation(angle))
                .then(&NormalizedMatrix::translation(-cx, -cy)),
            (TransformFunction::SkewX, &[angle]) => NormalizedMatrix::skew(angle, 0.0),
            (TransformFunction::SkewY, &[angle]) => NormalizedMatrix::skew(0.0, angle),
            _ => {
                debug!(
                    function = self.name(),
                    count = args.len(),
                    "Wrong transform argument count"
                );
                return Err(ValueError::malformed_transform(input));
            }
        };
        Ok(matrix)
    }
}

/// Normalize any transform input
///
/// ```rust
/// use nsvg_core::normalize_transform;
///
/// let m = normalize_transform("translate(10) scale(2)").unwrap();
/// assert_eq!(m.transform_point((1.0, 1.0)), (12.0, 2.0));
/// ```
pub fn normalize_transform(input: impl Into<TransformInput>) -> Result<NormalizedMatrix> {
    input.into().normalize()
}

fn matrix_from_elements(elements: &[f64]) -> Result<NormalizedMatrix> {
    match *elements {
        [a, b, c, d, tx, ty] if elements.iter().all(|v| v.is_finite()) => {
            Ok(NormalizedMatrix::new(a, b, c, d, tx, ty))
        }
        _ => {
            debug!(len = elements.len(), "Rejected transform matrix");
            Err(ValueError::InvalidMatrixLength {
                input: format!("{:?}", elements),
            })
        }
    }
}

/// A function name such as `rotate`, `translate3d` or `rotate-x`
fn function_name<'a, E: ParseError<&'a str>>(input: &'a str) -> ParseResult<'a, &'a str, E> {
    recognize(pair(
        alpha1,
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '-'),
    ))(input)
}

/// Parse `name(args)`, keeping the argument text raw
fn transform_call<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> ParseResult<'a, (&'a str, &'a str), E> {
    let (input, name) = function_name(input)?;
    let (input, _) = ws(input)?;
    let (input, args) = delimited(
        char('('),
        take_while(|c: char| c != '(' && c != ')'),
        char(')'),
    )(input)?;
    Ok((input, (name, args)))
}

fn transform_calls<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> ParseResult<'a, Vec<(&'a str, &'a str)>, E> {
    let (input, _) = ws(input)?;
    let (input, first) = opt(transform_call)(input)?;
    let Some(first) = first else {
        return Ok((input, Vec::new()));
    };
    let (input, rest) = many0(preceded(separator, transform_call))(input)?;
    let (input, _) = ws(input)?;

    let mut calls = Vec::with_capacity(rest.len() + 1);
    calls.push(first);
    calls.extend(rest);
    Ok((input, calls))
}

fn parse_transform_list(input: &str) -> Result<NormalizedMatrix> {
    let calls = match all_consuming(transform_calls::<nom::error::Error<&str>>)(input) {
        Ok((_, calls)) => calls,
        Err(_) => {
            debug!(input = input, "Failed to parse transform");
            return Err(ValueError::malformed_transform(input));
        }
    };

    calls
        .into_iter()
        .try_fold(NormalizedMatrix::IDENTITY, |acc, (name, raw_args)| {
            let Some(function) = TransformFunction::from_name(name) else {
                debug!(name = name, input = input, "Unknown transform function");
                return Err(ValueError::UnknownTransformFunction {
                    name: name.to_string(),
                    input: input.to_string(),
                });
            };
            let args = all_consuming(delimited(
                ws::<nom::error::Error<&str>>,
                number_list,
                ws,
            ))(raw_args)
            .map(|(_, args)| args)
            .map_err(|_| {
                debug!(function = function.name(), args = raw_args, "Bad transform arguments");
                ValueError::malformed_transform(input)
            })?;
            Ok(acc.then(&function.to_matrix(&args, input)?))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_point(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    fn object() -> TransformObject {
        TransformObject::default()
    }

    #[test]
    fn test_matrix_passthrough() {
        let m = normalize_transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
        assert!(m.is_identity());
        let m = normalize_transform([2.0, 0.0, 0.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(m.to_array(), [2.0, 0.0, 0.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_matrix_wrong_length() {
        let err = normalize_transform(vec![1.0, 0.0, 0.0, 1.0]).unwrap_err();
        assert!(matches!(err, ValueError::InvalidMatrixLength { .. }));
        let err = normalize_transform(vec![1.0, 0.0, 0.0, 1.0, 0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ValueError::InvalidMatrixLength { .. }));
    }

    #[test]
    fn test_string_primitives() {
        let m = normalize_transform("translate(10, 20)").unwrap();
        assert_eq!(m.transform_point((0.0, 0.0)), (10.0, 20.0));

        let m = normalize_transform("translate(10)").unwrap();
        assert_eq!(m.transform_point((0.0, 0.0)), (10.0, 0.0));

        let m = normalize_transform("scale(2)").unwrap();
        assert_eq!(m.transform_point((1.0, 3.0)), (2.0, 6.0));

        let m = normalize_transform("scale(2 4)").unwrap();
        assert_eq!(m.transform_point((1.0, 1.0)), (2.0, 4.0));

        let m = normalize_transform("matrix(1 0 0 1 5 6)").unwrap();
        assert_eq!(m.to_array(), [1.0, 0.0, 0.0, 1.0, 5.0, 6.0]);

        let m = normalize_transform("rotate(90)").unwrap();
        assert!(approx_point(m.transform_point((1.0, 0.0)), (0.0, 1.0)));

        let m = normalize_transform("skewX(45)").unwrap();
        assert!(approx_point(m.transform_point((0.0, 1.0)), (1.0, 1.0)));

        let m = normalize_transform("skewY(45)").unwrap();
        assert!(approx_point(m.transform_point((1.0, 0.0)), (1.0, 1.0)));
    }

    #[test]
    fn test_rotate_about_center() {
        let m = normalize_transform("rotate(180, 5, 5)").unwrap();
        assert!(approx_point(m.transform_point((5.0, 5.0)), (5.0, 5.0)));
        assert!(approx_point(m.transform_point((0.0, 0.0)), (10.0, 10.0)));
    }

    #[test]
    fn test_string_composes_left_to_right() {
        let m = normalize_transform("translate(10) scale(2)").unwrap();
        assert_eq!(m.transform_point((1.0, 1.0)), (12.0, 2.0));

        let m = normalize_transform("scale(2),translate(10)").unwrap();
        assert_eq!(m.transform_point((1.0, 1.0)), (22.0, 2.0));
    }

    #[test]
    fn test_empty_string_is_identity() {
        assert!(normalize_transform("").unwrap().is_identity());
        assert!(normalize_transform("   ").unwrap().is_identity());
    }

    #[test]
    fn test_unknown_function() {
        let err = normalize_transform("foo(1)").unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownTransformFunction {
                name: "foo".to_string(),
                input: "foo(1)".to_string(),
            }
        );

        let err = normalize_transform("translate(1) perspective(10px)").unwrap_err();
        assert!(matches!(err, ValueError::UnknownTransformFunction { .. }));
    }

    #[test]
    fn test_unknown_function_with_digits_or_dashes() {
        for (input, expected) in [
            ("translate3d(1, 2, 3)", "translate3d"),
            ("matrix3d(1)", "matrix3d"),
            ("rotate-x(1)", "rotate-x"),
            ("scale(2) translate3d(0, 0, 1)", "translate3d"),
        ] {
            match normalize_transform(input).unwrap_err() {
                ValueError::UnknownTransformFunction { name, input: text } => {
                    assert_eq!(name, expected);
                    assert_eq!(text, input);
                }
                other => panic!("expected unknown function for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_malformed() {
        for bad in [
            "translate(",
            "translate(1, 2, 3)",
            "scale()",
            "rotate(1, 2)",
            "skewX(a)",
            "translate(1) garbage",
            "translate 10",
        ] {
            let err = normalize_transform(bad).unwrap_err();
            assert_eq!(err, ValueError::malformed_transform(bad), "input {:?}", bad);
        }
    }

    #[test]
    fn test_matrix_function_wrong_length() {
        let err = normalize_transform("matrix(1 0 0 1)").unwrap_err();
        assert!(matches!(err, ValueError::InvalidMatrixLength { .. }));
    }

    #[test]
    fn test_object_translate_x() {
        let m = normalize_transform(TransformObject {
            translate_x: Some(10.0.into()),
            ..object()
        })
        .unwrap();
        assert_eq!(m.transform_point((0.0, 0.0)), (10.0, 0.0));
    }

    #[test]
    fn test_object_empty_is_identity() {
        assert!(object().is_empty());
        assert!(normalize_transform(object()).unwrap().is_identity());
    }

    #[test]
    fn test_object_rotation_about_origin() {
        let m = normalize_transform(TransformObject {
            rotation: Some(90.0.into()),
            origin: Some("10, 10".into()),
            ..object()
        })
        .unwrap();
        assert!(approx_point(m.transform_point((10.0, 10.0)), (10.0, 10.0)));
        assert!(approx_point(m.transform_point((20.0, 10.0)), (10.0, 20.0)));
    }

    #[test]
    fn test_object_rotate_wins_over_rotation() {
        let m = normalize_transform(TransformObject {
            rotate: Some(90.0.into()),
            rotation: Some(180.0.into()),
            ..object()
        })
        .unwrap();
        assert!(approx_point(m.transform_point((1.0, 0.0)), (0.0, 1.0)));
    }

    #[test]
    fn test_object_axis_overrides() {
        let m = normalize_transform(TransformObject {
            scale: Some(2.0.into()),
            scale_y: Some(3.0.into()),
            ..object()
        })
        .unwrap();
        assert_eq!(m.transform_point((1.0, 1.0)), (2.0, 3.0));

        let m = normalize_transform(TransformObject {
            translate: Some("5 7".into()),
            ..object()
        })
        .unwrap();
        assert_eq!(m.transform_point((0.0, 0.0)), (5.0, 7.0));
    }

    #[test]
    fn test_object_canonical_order() {
        // translate, then rotate, then scale about the origin
        let m = normalize_transform(TransformObject {
            x: Some(1.0.into()),
            translate_x: Some(10.0.into()),
            rotation: Some(90.0.into()),
            scale: Some(2.0.into()),
            ..object()
        })
        .unwrap();
        // (1, 0) -> scale (2, 0) -> rotate (0, 2) -> translate (11, 2)
        assert!(approx_point(m.transform_point((1.0, 0.0)), (11.0, 2.0)));
    }

    #[test]
    fn test_object_bad_axis_string() {
        let err = normalize_transform(TransformObject {
            origin: Some("1 2 3".into()),
            ..object()
        })
        .unwrap_err();
        assert!(matches!(err, ValueError::InvalidScalarFormat { .. }));
    }

    #[test]
    fn test_deserialize_transform_input() {
        let m: TransformInput = serde_json::from_str("[1, 0, 0, 1, 0, 0]").unwrap();
        assert!(matches!(m, TransformInput::Matrix(_)));
        let s: TransformInput = serde_json::from_str("\"rotate(45)\"").unwrap();
        assert!(matches!(s, TransformInput::Text(_)));
        let o: TransformInput =
            serde_json::from_str(r#"{"translateX": 10, "originY": "5"}"#).unwrap();
        let TransformInput::Object(object) = o else {
            panic!("expected object form");
        };
        assert_eq!(object.translate_x, Some(NumberProp::Number(10.0)));
        assert_eq!(object.origin_y, Some(NumberProp::Text("5".to_string())));
    }
}
