//! Resolution of prop groups into render-ready records

use nsvg_core::{
    ColorInput, NormalizedColor, NormalizedList, NormalizedMatrix, NormalizedScalar, NumberProp,
};
use serde::Serialize;
use tracing::trace;

use crate::error::{PropContext, Result};
use crate::groups::{
    CommonPathProps, FillProps, FontObject, FontProps, ListProp, StrokeProps, TransformProps,
};
use crate::paint::{resolve_opacity, Paint};
use crate::vocabulary::{
    FillRule, FontStretch, FontStyle, FontVariant, FontVariantLigatures, FontWeight, Linecap,
    Linejoin, PointerEvents, TextAnchor, TextDecoration, VectorEffect,
};

/// Font size used when neither the element nor its `font` object sets one
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

const DEFAULT_STROKE_WIDTH: f64 = 1.0;
const DEFAULT_MITERLIMIT: f64 = 4.0;

/// Turn a prop record into its render-ready form
pub trait Resolve {
    type Output;

    fn resolve(&self) -> Result<Self::Output>;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedFill {
    pub paint: Paint,
    pub opacity: f64,
    pub rule: FillRule,
}

impl Default for ResolvedFill {
    fn default() -> Self {
        Self {
            paint: Paint::Color {
                color: NormalizedColor::BLACK,
            },
            opacity: 1.0,
            rule: FillRule::NonZero,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStroke {
    pub paint: Paint,
    pub width: NormalizedScalar,
    pub opacity: f64,
    pub dasharray: Option<NormalizedList>,
    pub dashoffset: NormalizedScalar,
    pub linecap: Linecap,
    pub linejoin: Linejoin,
    pub miterlimit: f64,
}

impl Resolve for FillProps {
    type Output = ResolvedFill;

    fn resolve(&self) -> Result<ResolvedFill> {
        let paint = match &self.fill {
            Some(fill) => Paint::from_prop("fill", fill)?,
            None => ResolvedFill::default().paint,
        };

        Ok(ResolvedFill {
            paint,
            opacity: resolve_opacity("fillOpacity", self.fill_opacity.as_ref())?,
            rule: self.fill_rule.unwrap_or_default(),
        })
    }
}

impl Resolve for StrokeProps {
    /// `None` when the element is not stroked
    type Output = Option<ResolvedStroke>;

    fn resolve(&self) -> Result<Option<ResolvedStroke>> {
        let Some(stroke) = &self.stroke else {
            return Ok(None);
        };
        let paint = Paint::from_prop("stroke", stroke)?;
        if paint.is_none() {
            return Ok(None);
        }

        let width = scalar_or("strokeWidth", self.stroke_width.as_ref(), DEFAULT_STROKE_WIDTH)?;
        let dashoffset = scalar_or("strokeDashoffset", self.stroke_dashoffset.as_ref(), 0.0)?;
        let miterlimit = scalar_or(
            "strokeMiterlimit",
            self.stroke_miterlimit.as_ref(),
            DEFAULT_MITERLIMIT,
        )?;

        Ok(Some(ResolvedStroke {
            paint,
            width,
            opacity: resolve_opacity("strokeOpacity", self.stroke_opacity.as_ref())?,
            dasharray: resolve_dasharray(self.stroke_dasharray.as_ref())?,
            dashoffset,
            linecap: self.stroke_linecap.unwrap_or_default(),
            linejoin: self.stroke_linejoin.unwrap_or_default(),
            miterlimit: miterlimit.value,
        }))
    }
}

fn resolve_dasharray(value: Option<&ListProp>) -> Result<Option<NormalizedList>> {
    match value {
        None => Ok(None),
        Some(ListProp::Text(text)) if text.trim().eq_ignore_ascii_case("none") => Ok(None),
        Some(list) => {
            let list = list.normalize().prop("strokeDasharray")?;
            Ok((!list.is_empty()).then_some(list))
        }
    }
}

impl Resolve for TransformProps {
    type Output = NormalizedMatrix;

    /// Object fields form the base, the `transform` prop is applied inside it
    fn resolve(&self) -> Result<NormalizedMatrix> {
        let base = self.fields.normalize().prop("transform")?;
        match &self.transform {
            Some(transform) => {
                let inner = transform.normalize().prop("transform")?;
                Ok(base.then(&inner))
            }
            None => Ok(base),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFont {
    pub style: FontStyle,
    pub variant: FontVariant,
    pub weight: FontWeight,
    pub stretch: FontStretch,
    pub size: NormalizedScalar,
    pub family: Option<String>,
    pub anchor: TextAnchor,
    pub decoration: TextDecoration,
    pub letter_spacing: Option<NormalizedScalar>,
    pub word_spacing: Option<NormalizedScalar>,
    pub kerning: Option<NormalizedScalar>,
    pub ligatures: FontVariantLigatures,
}

impl Resolve for FontObject {
    type Output = ResolvedFont;

    fn resolve(&self) -> Result<ResolvedFont> {
        Ok(ResolvedFont {
            style: self.font_style.unwrap_or_default(),
            variant: self.font_variant.unwrap_or_default(),
            weight: self.font_weight.unwrap_or_default(),
            stretch: self.font_stretch.unwrap_or_default(),
            size: scalar_or("fontSize", self.font_size.as_ref(), DEFAULT_FONT_SIZE)?,
            family: self.font_family.clone(),
            anchor: self.text_anchor.unwrap_or_default(),
            decoration: self.text_decoration.unwrap_or_default(),
            letter_spacing: optional_scalar("letterSpacing", self.letter_spacing.as_ref())?,
            word_spacing: optional_scalar("wordSpacing", self.word_spacing.as_ref())?,
            kerning: optional_scalar("kerning", self.kerning.as_ref())?,
            ligatures: self.font_variant_ligatures.unwrap_or_default(),
        })
    }
}

impl Resolve for FontProps {
    type Output = ResolvedFont;

    fn resolve(&self) -> Result<ResolvedFont> {
        match &self.font {
            Some(base) => self.own.merged_over(base).resolve(),
            None => self.own.resolve(),
        }
    }
}

/// Presentation shared by every drawable element
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPresentation {
    pub fill: ResolvedFill,
    pub stroke: Option<ResolvedStroke>,
    pub transform: NormalizedMatrix,
    pub clip_rule: FillRule,
    pub clip_path: Option<String>,
    pub mask: Option<String>,
    pub vector_effect: VectorEffect,
    pub pointer_events: PointerEvents,
}

impl Resolve for CommonPathProps {
    type Output = ResolvedPresentation;

    fn resolve(&self) -> Result<ResolvedPresentation> {
        let presentation = ResolvedPresentation {
            fill: self.fill.resolve()?,
            stroke: self.stroke.resolve()?,
            transform: self.transform.resolve()?,
            clip_rule: self.clip.clip_rule.unwrap_or_default(),
            clip_path: self.clip.clip_path.clone(),
            mask: self.mask.mask.clone(),
            vector_effect: self.vector_effect.vector_effect.unwrap_or_default(),
            pointer_events: self.responder.pointer_events.unwrap_or_default(),
        };
        trace!(
            stroked = presentation.stroke.is_some(),
            transformed = !presentation.transform.is_identity(),
            "Resolved presentation"
        );
        Ok(presentation)
    }
}

/// A gradient stop with `stopOpacity` folded into the color's alpha
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedStop {
    pub offset: f64,
    pub color: NormalizedColor,
}

pub(crate) fn resolve_stop(
    offset: Option<&NumberProp>,
    color: Option<&ColorInput>,
    opacity: Option<&NumberProp>,
) -> Result<ResolvedStop> {
    let offset = match offset {
        Some(offset) => offset.normalize().prop("offset")?.fraction().clamp(0.0, 1.0),
        None => 0.0,
    };
    let color = match color {
        Some(color) => color.normalize().prop("stopColor")?,
        None => NormalizedColor::BLACK,
    };
    let opacity = resolve_opacity("stopOpacity", opacity)?;

    Ok(ResolvedStop {
        offset,
        color: color.with_alpha(color.a * opacity),
    })
}

/// `points` as `(x, y)` pairs
pub(crate) fn resolve_points(points: &ListProp) -> Result<Vec<(f64, f64)>> {
    Ok(points.normalize().prop("points")?.into_points())
}

pub(crate) fn optional_scalar(
    prop: &'static str,
    value: Option<&NumberProp>,
) -> Result<Option<NormalizedScalar>> {
    value.map(|v| v.normalize().prop(prop)).transpose()
}

fn scalar_or(
    prop: &'static str,
    value: Option<&NumberProp>,
    default: f64,
) -> Result<NormalizedScalar> {
    Ok(optional_scalar(prop, value)?.unwrap_or(NormalizedScalar::absolute(default)))
}
