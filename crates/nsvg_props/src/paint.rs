//! Paint servers for `fill`, `stroke` and `color`

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, opt, rest},
    sequence::{delimited, preceded, tuple},
    IResult,
};
use nsvg_core::{ColorInput, NormalizedColor, NumberProp, ValueError};
use serde::Serialize;
use tracing::debug;

use crate::error::{PropContext, Result};

/// What an element is painted with
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Paint {
    /// `"none"`
    None,
    /// A concrete color
    Color { color: NormalizedColor },
    /// `"currentColor"`, resolved against the nearest `color` prop by the renderer
    CurrentColor,
    /// `url(#id)` with an optional fallback for a missing reference
    Reference {
        id: String,
        fallback: Option<Box<Paint>>,
    },
}

impl Paint {
    /// Resolve a color prop into a paint
    pub fn from_prop(prop: &'static str, value: &ColorInput) -> Result<Paint> {
        let ColorInput::Text(text) = value else {
            return value.normalize().prop(prop).map(|color| Paint::Color { color });
        };

        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(Paint::None);
        }
        if trimmed.eq_ignore_ascii_case("currentColor") {
            return Ok(Paint::CurrentColor);
        }
        if trimmed.starts_with("url(") {
            return parse_reference(prop, trimmed);
        }

        value.normalize().prop(prop).map(|color| Paint::Color { color })
    }

    /// The concrete color, if this paint is one
    pub fn color(&self) -> Option<NormalizedColor> {
        match self {
            Paint::Color { color } => Some(*color),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }
}

/// `url(#id)` followed by the remaining fallback text
fn reference(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, id) = delimited(
        tuple((tag("url("), multispace0, opt(char('#')))),
        take_while1(|c: char| c != ')' && !c.is_whitespace()),
        tuple((multispace0, char(')'))),
    )(input)?;
    let (input, fallback) = preceded(multispace0, rest)(input)?;
    Ok((input, (id, fallback)))
}

fn parse_reference(prop: &'static str, input: &str) -> Result<Paint> {
    let Ok((_, (id, fallback))) = all_consuming(reference)(input) else {
        debug!(prop = prop, input = input, "Malformed paint reference");
        return Err(ValueError::UnknownColorFormat {
            input: input.to_string(),
        })
        .prop(prop);
    };

    let fallback = if fallback.is_empty() {
        None
    } else {
        let fallback = Paint::from_prop(prop, &ColorInput::Text(fallback.to_string()))?;
        Some(Box::new(fallback))
    };

    Ok(Paint::Reference {
        id: id.to_string(),
        fallback,
    })
}

/// Opacity props: numbers or percentages, clamped to `[0, 1]`, default 1
pub fn resolve_opacity(prop: &'static str, value: Option<&NumberProp>) -> Result<f64> {
    match value {
        None => Ok(1.0),
        Some(v) => v
            .normalize()
            .prop(prop)
            .map(|s| s.fraction().clamp(0.0, 1.0)),
    }
}
