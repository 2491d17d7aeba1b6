//! Keyword vocabularies for string-valued enum props
//!
//! Spellings match the component declarations exactly, including the mixed
//! `camelCase` / `kebab-case` conventions they inherited from SVG.

use std::fmt;
use std::str::FromStr;

use nsvg_core::{NormalizedList, NormalizedScalar, NumberProp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PropError;

/// Declare a keyword enum with `FromStr`, `Display` and serde support
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $text:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = PropError;

            fn from_str(s: &str) -> Result<Self, PropError> {
                match s {
                    $($text $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(PropError::UnknownKeyword {
                        vocabulary: $label,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

vocabulary! {
    #[derive(Default)]
    FillRule("fill rule") {
        EvenOdd => "evenodd",
        #[default]
        NonZero => "nonzero",
    }
}

vocabulary! {
    /// Coordinate system for gradients, patterns and masks
    #[derive(Default)]
    Units("units") {
        #[default]
        UserSpaceOnUse => "userSpaceOnUse",
        ObjectBoundingBox => "objectBoundingBox",
    }
}

vocabulary! {
    /// Mask coordinate system, same spellings as [`Units`]
    #[derive(Default)]
    MaskUnits("mask units") {
        #[default]
        UserSpaceOnUse => "userSpaceOnUse",
        ObjectBoundingBox => "objectBoundingBox",
    }
}

vocabulary! {
    #[derive(Default)]
    TextAnchor("text anchor") {
        #[default]
        Start => "start",
        Middle => "middle",
        End => "end",
    }
}

vocabulary! {
    #[derive(Default)]
    FontStyle("font style") {
        #[default]
        Normal => "normal",
        Italic => "italic",
        Oblique => "oblique",
    }
}

vocabulary! {
    #[derive(Default)]
    FontVariant("font variant") {
        #[default]
        Normal => "normal",
        SmallCaps => "small-caps",
    }
}

vocabulary! {
    #[derive(Default)]
    FontWeight("font weight") {
        #[default]
        Normal => "normal",
        Bold => "bold",
        Bolder => "bolder",
        Lighter => "lighter",
        W100 => "100",
        W200 => "200",
        W300 => "300",
        W400 => "400",
        W500 => "500",
        W600 => "600",
        W700 => "700",
        W800 => "800",
        W900 => "900",
    }
}

impl FontWeight {
    /// Numeric weight, `None` for the relative keywords
    pub fn numeric(&self) -> Option<u16> {
        match self {
            FontWeight::Normal | FontWeight::W400 => Some(400),
            FontWeight::Bold | FontWeight::W700 => Some(700),
            FontWeight::Bolder | FontWeight::Lighter => None,
            FontWeight::W100 => Some(100),
            FontWeight::W200 => Some(200),
            FontWeight::W300 => Some(300),
            FontWeight::W500 => Some(500),
            FontWeight::W600 => Some(600),
            FontWeight::W800 => Some(800),
            FontWeight::W900 => Some(900),
        }
    }
}

vocabulary! {
    #[derive(Default)]
    FontStretch("font stretch") {
        #[default]
        Normal => "normal",
        Wider => "wider",
        Narrower => "narrower",
        UltraCondensed => "ultra-condensed",
        ExtraCondensed => "extra-condensed",
        Condensed => "condensed",
        SemiCondensed => "semi-condensed",
        SemiExpanded => "semi-expanded",
        Expanded => "expanded",
        ExtraExpanded => "extra-expanded",
        UltraExpanded => "ultra-expanded",
    }
}

vocabulary! {
    #[derive(Default)]
    TextDecoration("text decoration") {
        #[default]
        None => "none",
        Underline => "underline",
        Overline => "overline",
        LineThrough => "line-through",
        Blink => "blink",
    }
}

vocabulary! {
    #[derive(Default)]
    FontVariantLigatures("font variant ligatures") {
        #[default]
        Normal => "normal",
        None => "none",
    }
}

vocabulary! {
    #[derive(Default)]
    AlignmentBaseline("alignment baseline") {
        #[default]
        Baseline => "baseline",
        TextBottom => "text-bottom",
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Middle => "middle",
        Central => "central",
        Mathematical => "mathematical",
        TextTop => "text-top",
        Bottom => "bottom",
        Center => "center",
        Top => "top",
        TextBeforeEdge => "text-before-edge",
        TextAfterEdge => "text-after-edge",
        BeforeEdge => "before-edge",
        AfterEdge => "after-edge",
        Hanging => "hanging",
    }
}

vocabulary! {
    #[derive(Default)]
    LengthAdjust("length adjust") {
        #[default]
        Spacing => "spacing",
        SpacingAndGlyphs => "spacingAndGlyphs",
    }
}

vocabulary! {
    #[derive(Default)]
    TextPathMethod("text path method") {
        #[default]
        Align => "align",
        Stretch => "stretch",
    }
}

vocabulary! {
    #[derive(Default)]
    TextPathSpacing("text path spacing") {
        Auto => "auto",
        #[default]
        Exact => "exact",
    }
}

vocabulary! {
    #[derive(Default)]
    TextPathMidLine("text path mid line") {
        #[default]
        Sharp => "sharp",
        Smooth => "smooth",
    }
}

vocabulary! {
    #[derive(Default)]
    Linecap("line cap") {
        #[default]
        Butt => "butt",
        Square => "square",
        Round => "round",
    }
}

vocabulary! {
    #[derive(Default)]
    Linejoin("line join") {
        #[default]
        Miter => "miter",
        Bevel => "bevel",
        Round => "round",
    }
}

vocabulary! {
    #[derive(Default)]
    PointerEvents("pointer events") {
        BoxNone => "box-none",
        None => "none",
        BoxOnly => "box-only",
        #[default]
        Auto => "auto",
    }
}

vocabulary! {
    /// `nonScalingStroke` is accepted as a spelling of `non-scaling-stroke`
    #[derive(Default)]
    VectorEffect("vector effect") {
        #[default]
        None => "none",
        NonScalingStroke => "non-scaling-stroke" | "nonScalingStroke",
        Default => "default",
        Inherit => "inherit",
        Uri => "uri",
    }
}

/// `baselineShift`: a keyword, one length, or a list of lengths
#[derive(Clone, Debug, PartialEq)]
pub enum BaselineShift {
    Sub,
    Super,
    Baseline,
    Length(NumberProp),
    Lengths(Vec<NumberProp>),
}

/// Normalized `baselineShift`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolvedBaselineShift {
    Sub,
    Super,
    Baseline,
    Length(NormalizedScalar),
    Lengths(NormalizedList),
}

impl BaselineShift {
    pub fn normalize(&self) -> nsvg_core::Result<ResolvedBaselineShift> {
        Ok(match self {
            BaselineShift::Sub => ResolvedBaselineShift::Sub,
            BaselineShift::Super => ResolvedBaselineShift::Super,
            BaselineShift::Baseline => ResolvedBaselineShift::Baseline,
            BaselineShift::Length(length) => ResolvedBaselineShift::Length(length.normalize()?),
            BaselineShift::Lengths(lengths) => {
                ResolvedBaselineShift::Lengths(nsvg_core::normalize_list(lengths.clone())?)
            }
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBaselineShift {
    Number(f64),
    Text(String),
    Items(Vec<NumberProp>),
}

impl From<RawBaselineShift> for BaselineShift {
    fn from(raw: RawBaselineShift) -> Self {
        match raw {
            RawBaselineShift::Number(n) => BaselineShift::Length(NumberProp::Number(n)),
            RawBaselineShift::Text(text) => match text.as_str() {
                "sub" => BaselineShift::Sub,
                "super" => BaselineShift::Super,
                "baseline" => BaselineShift::Baseline,
                _ => BaselineShift::Length(NumberProp::Text(text)),
            },
            RawBaselineShift::Items(items) => BaselineShift::Lengths(items),
        }
    }
}

impl<'de> Deserialize<'de> for BaselineShift {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawBaselineShift::deserialize(deserializer).map(BaselineShift::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_spellings() {
        for rule in FillRule::ALL {
            assert_eq!(rule.as_str().parse::<FillRule>().unwrap(), *rule);
        }
        for stretch in FontStretch::ALL {
            assert_eq!(stretch.to_string().parse::<FontStretch>().unwrap(), *stretch);
        }
        for baseline in AlignmentBaseline::ALL {
            assert_eq!(
                baseline.as_str().parse::<AlignmentBaseline>().unwrap(),
                *baseline
            );
        }
    }

    #[test]
    fn test_exact_spellings() {
        assert_eq!("evenodd".parse::<FillRule>().unwrap(), FillRule::EvenOdd);
        assert_eq!(
            "spacingAndGlyphs".parse::<LengthAdjust>().unwrap(),
            LengthAdjust::SpacingAndGlyphs
        );
        assert_eq!("small-caps".parse::<FontVariant>().unwrap(), FontVariant::SmallCaps);
        assert_eq!("box-none".parse::<PointerEvents>().unwrap(), PointerEvents::BoxNone);
        assert_eq!(Units::ObjectBoundingBox.to_string(), "objectBoundingBox");
    }

    #[test]
    fn test_unknown_keyword() {
        let err = "even-odd".parse::<FillRule>().unwrap_err();
        assert_eq!(
            err,
            PropError::UnknownKeyword {
                vocabulary: "fill rule",
                value: "even-odd".to_string(),
            }
        );
        // Case matters
        assert!("Round".parse::<Linecap>().is_err());
    }

    #[test]
    fn test_vector_effect_alias() {
        assert_eq!(
            "nonScalingStroke".parse::<VectorEffect>().unwrap(),
            VectorEffect::NonScalingStroke
        );
        assert_eq!(VectorEffect::NonScalingStroke.as_str(), "non-scaling-stroke");
    }

    #[test]
    fn test_font_weight_numeric() {
        assert_eq!(FontWeight::Bold.numeric(), Some(700));
        assert_eq!("300".parse::<FontWeight>().unwrap().numeric(), Some(300));
        assert_eq!(FontWeight::Bolder.numeric(), None);
    }

    #[test]
    fn test_serde() {
        let join: Linejoin = serde_json::from_str("\"bevel\"").unwrap();
        assert_eq!(join, Linejoin::Bevel);
        assert_eq!(serde_json::to_string(&Linecap::Square).unwrap(), "\"square\"");
        assert!(serde_json::from_str::<Linejoin>("\"sharp\"").is_err());
    }

    #[test]
    fn test_baseline_shift() {
        let shift: BaselineShift = serde_json::from_str("\"super\"").unwrap();
        assert_eq!(shift, BaselineShift::Super);

        let shift: BaselineShift = serde_json::from_str("\"20%\"").unwrap();
        assert_eq!(
            shift.normalize().unwrap(),
            ResolvedBaselineShift::Length(NormalizedScalar::percentage(20.0))
        );

        let shift: BaselineShift = serde_json::from_str("[1, \"2\"]").unwrap();
        assert_eq!(
            shift.normalize().unwrap(),
            ResolvedBaselineShift::Lengths(NormalizedList::new(vec![1.0, 2.0]))
        );

        let shift: BaselineShift = serde_json::from_str("\"high\"").unwrap();
        assert!(shift.normalize().is_err());
    }
}
