//! Color coercion
//!
//! Accepted inputs:
//!
//! - packed integers `0xAARRGGBB` (signed platform ints are reinterpreted bitwise)
//! - channel arrays `[r, g, b, a]` or `[r, g, b]` with every channel in `[0, 1]`
//! - strings: named keywords, `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
//!   `rgb()`, `rgba()`, `hsl()` and `hsla()`
//!
//! Strings are first classified with [`ColorFormat::detect`]; only then is the
//! matching channel parser run.

use nom::{
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, opt},
    error::{ErrorKind, ParseError},
    multi::many0,
    sequence::preceded,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValueError};
use crate::named;
use crate::parse::{number, separator, ws, ParseResult};

/// RGBA color with every channel in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl NormalizedColor {
    pub const BLACK: NormalizedColor = NormalizedColor::rgb(0.0, 0.0, 0.0);
    pub const WHITE: NormalizedColor = NormalizedColor::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: NormalizedColor = NormalizedColor::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    /// Decode a packed `0xAARRGGBB` integer
    pub fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as u8;
        let r = ((argb >> 16) & 0xFF) as u8;
        let g = ((argb >> 8) & 0xFF) as u8;
        let b = (argb & 0xFF) as u8;
        Self::from_rgba8(r, g, b, a)
    }

    /// Encode as a packed `0xAARRGGBB` integer, rounding each channel
    pub fn to_argb(&self) -> u32 {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.a) << 24) | (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// `#rrggbbaa` form
    pub fn to_hex(&self) -> String {
        let argb = self.to_argb();
        format!("#{:06x}{:02x}", argb & 0x00FF_FFFF, argb >> 24)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for NormalizedColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A raw color prop value
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawColorInput")]
pub enum ColorInput {
    /// Packed `0xAARRGGBB`
    Packed(u32),
    /// `[r, g, b, a]` in `[0, 1]`
    Channels(Vec<f64>),
    /// Any string form
    Text(String),
}

impl ColorInput {
    /// Normalize into four `[0, 1]` channels
    pub fn normalize(&self) -> Result<NormalizedColor> {
        match self {
            ColorInput::Packed(argb) => Ok(NormalizedColor::from_argb(*argb)),
            ColorInput::Channels(channels) => from_channels(channels),
            ColorInput::Text(text) => parse_color(text),
        }
    }
}

impl From<u32> for ColorInput {
    fn from(argb: u32) -> Self {
        ColorInput::Packed(argb)
    }
}

impl From<i32> for ColorInput {
    fn from(argb: i32) -> Self {
        ColorInput::Packed(argb as u32)
    }
}

impl From<[f64; 4]> for ColorInput {
    fn from(channels: [f64; 4]) -> Self {
        ColorInput::Channels(channels.to_vec())
    }
}

impl From<[f64; 3]> for ColorInput {
    fn from(channels: [f64; 3]) -> Self {
        ColorInput::Channels(channels.to_vec())
    }
}

impl From<Vec<f64>> for ColorInput {
    fn from(channels: Vec<f64>) -> Self {
        ColorInput::Channels(channels)
    }
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        ColorInput::Text(s.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(s: String) -> Self {
        ColorInput::Text(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColorInput {
    Int(i64),
    Channels(Vec<f64>),
    Text(String),
}

impl TryFrom<RawColorInput> for ColorInput {
    type Error = String;

    fn try_from(raw: RawColorInput) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawColorInput::Int(v) if (i32::MIN as i64..=u32::MAX as i64).contains(&v) => {
                Ok(ColorInput::Packed(v as u32))
            }
            RawColorInput::Int(v) => Err(format!("packed color {} does not fit in 32 bits", v)),
            RawColorInput::Channels(channels) => Ok(ColorInput::Channels(channels)),
            RawColorInput::Text(text) => Ok(ColorInput::Text(text)),
        }
    }
}

/// Functional notation families
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFunction {
    /// `rgb()` / `rgba()`
    Rgb,
    /// `hsl()` / `hsla()`
    Hsl,
}

/// String color formats, detected before any channel parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFormat {
    Named,
    Hex,
    Functional(ColorFunction),
}

impl ColorFormat {
    /// Classify a color string without parsing its channels
    pub fn detect(input: &str) -> Option<ColorFormat> {
        let s = input.trim();
        if s.starts_with('#') {
            return Some(ColorFormat::Hex);
        }

        let lower = s.to_ascii_lowercase();
        for (name, function) in [
            ("rgba", ColorFunction::Rgb),
            ("rgb", ColorFunction::Rgb),
            ("hsla", ColorFunction::Hsl),
            ("hsl", ColorFunction::Hsl),
        ] {
            if let Some(rest) = lower.strip_prefix(name) {
                if rest.trim_start().starts_with('(') {
                    return Some(ColorFormat::Functional(function));
                }
            }
        }

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(ColorFormat::Named);
        }

        None
    }
}

/// Normalize any color input
///
/// ```rust
/// use nsvg_core::{normalize_color, NormalizedColor};
///
/// let red = NormalizedColor::rgb(1.0, 0.0, 0.0);
/// assert_eq!(normalize_color("#ff0000").unwrap(), red);
/// assert_eq!(normalize_color(0xFFFF0000u32).unwrap(), red);
/// assert_eq!(normalize_color([1.0, 0.0, 0.0, 1.0]).unwrap(), red);
/// ```
pub fn normalize_color(input: impl Into<ColorInput>) -> Result<NormalizedColor> {
    input.into().normalize()
}

fn from_channels(channels: &[f64]) -> Result<NormalizedColor> {
    if channels.len() != 3 && channels.len() != 4 {
        debug!(len = channels.len(), "Color array has wrong length");
        return Err(ValueError::unknown_color(format!("{:?}", channels)));
    }
    if channels
        .iter()
        .any(|c| !c.is_finite() || !(0.0..=1.0).contains(c))
    {
        debug!(channels = ?channels, "Color array channel out of range");
        return Err(ValueError::InvalidColorRange {
            input: format!("{:?}", channels),
        });
    }

    let a = channels.get(3).copied().unwrap_or(1.0);
    Ok(NormalizedColor::rgba(channels[0], channels[1], channels[2], a))
}

fn parse_color(raw: &str) -> Result<NormalizedColor> {
    let input = raw.trim();
    let parsed = match ColorFormat::detect(input) {
        Some(ColorFormat::Named) => {
            named::lookup(&input.to_ascii_lowercase()).map(NormalizedColor::from_argb)
        }
        Some(ColorFormat::Hex) => all_consuming(hex_color::<nom::error::Error<&str>>)(input)
            .ok()
            .map(|(_, color)| color),
        Some(ColorFormat::Functional(function)) => {
            all_consuming(function_call::<nom::error::Error<&str>>)(input)
                .ok()
                .and_then(|(_, (_, args))| match function {
                    ColorFunction::Rgb => rgb_channels(&args),
                    ColorFunction::Hsl => hsl_channels(&args),
                })
        }
        None => None,
    };

    parsed.ok_or_else(|| {
        debug!(input = raw, "Failed to parse color");
        ValueError::unknown_color(raw)
    })
}

/// Parse hex color: #RGB, #RGBA, #RRGGBB, or #RRGGBBAA
fn hex_color<'a, E: ParseError<&'a str>>(input: &'a str) -> ParseResult<'a, NormalizedColor, E> {
    let (input, _) = char('#')(input)?;
    let (input, digits) = take_while_m_n(3, 8, |c: char| c.is_ascii_hexdigit())(input)?;

    let v = u32::from_str_radix(digits, 16)
        .map_err(|_| nom::Err::Error(E::from_error_kind(digits, ErrorKind::HexDigit)))?;
    let nibble = |shift: u32| (((v >> shift) & 0xF) * 17) as u8;
    let byte = |shift: u32| ((v >> shift) & 0xFF) as u8;

    let color = match digits.len() {
        3 => NormalizedColor::from_rgba8(nibble(8), nibble(4), nibble(0), 0xFF),
        4 => NormalizedColor::from_rgba8(nibble(12), nibble(8), nibble(4), nibble(0)),
        6 => NormalizedColor::from_rgba8(byte(16), byte(8), byte(0), 0xFF),
        8 => NormalizedColor::from_rgba8(byte(24), byte(16), byte(8), byte(0)),
        _ => {
            return Err(nom::Err::Error(E::from_error_kind(
                digits,
                ErrorKind::LengthValue,
            )));
        }
    };

    Ok((input, color))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Component {
    Number(f64),
    Percent(f64),
}

impl Component {
    /// Map onto `[0, 1]`, treating bare numbers as out of `scale`
    fn unit(self, scale: f64) -> f64 {
        let v = match self {
            Component::Number(n) => n / scale,
            Component::Percent(p) => p / 100.0,
        };
        v.clamp(0.0, 1.0)
    }
}

fn component<'a, E: ParseError<&'a str>>(input: &'a str) -> ParseResult<'a, Component, E> {
    let (input, v) = number(input)?;
    let (input, pct) = opt(char('%'))(input)?;
    let c = match pct {
        Some(_) => Component::Percent(v),
        None => Component::Number(v),
    };
    Ok((input, c))
}

/// Parse `name(c1, c2, ...)` with comma or whitespace separated components
fn function_call<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> ParseResult<'a, (&'a str, Vec<Component>), E> {
    let (input, name) = take_while1(|c: char| c.is_ascii_alphabetic())(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, first) = component(input)?;
    let (input, rest) = many0(preceded(separator, component))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;

    let mut args = Vec::with_capacity(rest.len() + 1);
    args.push(first);
    args.extend(rest);
    Ok((input, (name, args)))
}

fn alpha_channel(args: &[Component]) -> f64 {
    args.get(3).map_or(1.0, |a| a.unit(1.0))
}

fn rgb_channels(args: &[Component]) -> Option<NormalizedColor> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    Some(NormalizedColor::rgba(
        args[0].unit(255.0),
        args[1].unit(255.0),
        args[2].unit(255.0),
        alpha_channel(args),
    ))
}

fn hsl_channels(args: &[Component]) -> Option<NormalizedColor> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let Component::Number(hue) = args[0] else {
        return None;
    };
    let s = args[1].unit(100.0);
    let l = args[2].unit(100.0);
    let (r, g, b) = hsl_to_rgb(hue, s, l);
    Some(NormalizedColor::rgba(r, g, b, alpha_channel(args)))
}

fn hsl_to_rgb(hue: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let h = hue.rem_euclid(360.0) / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
