//! Element prop records and their resolution
//!
//! Each element struct accepts the same flat camelCase keys as the component
//! it describes. [`Element`] wraps them all behind a `"type"` tag so whole
//! documents can be read from JSON.

use std::collections::BTreeMap;

use nsvg_core::{NormalizedColor, NormalizedMatrix, NormalizedScalar, NumberProp};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PropContext, Result};
use crate::groups::{
    ClipProps, ColorProp, CommonMaskProps, CommonPathProps, FontProps, ListProp, ResponderProps,
    TouchableProps, TransformProp,
};
use crate::paint::resolve_opacity;
use crate::resolve::{
    optional_scalar, resolve_points, resolve_stop, Resolve, ResolvedFont, ResolvedPresentation,
    ResolvedStop,
};
use crate::vocabulary::{
    AlignmentBaseline, BaselineShift, LengthAdjust, MaskUnits, ResolvedBaselineShift,
    TextPathMethod, TextPathMidLine, TextPathSpacing, Units,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Circle {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub cx: Option<NumberProp>,
    pub cy: Option<NumberProp>,
    pub r: Option<NumberProp>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClipPath {
    pub id: String,
}

/// Container for referenced definitions; carries no props
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Defs {}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Ellipse {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub cx: Option<NumberProp>,
    pub cy: Option<NumberProp>,
    pub rx: Option<NumberProp>,
    pub ry: Option<NumberProp>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct G {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub opacity: Option<NumberProp>,
}

/// Image source: a URI, a `{ uri }` object, or a bundled asset id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    Uri(String),
    Source {
        uri: String,
        width: Option<f64>,
        height: Option<f64>,
    },
    Asset(u64),
}

impl ImageSource {
    fn describe(&self) -> String {
        match self {
            ImageSource::Uri(uri) | ImageSource::Source { uri, .. } => uri.clone(),
            ImageSource::Asset(id) => format!("asset:{}", id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(flatten)]
    pub responder: ResponderProps,
    #[serde(flatten)]
    pub mask: CommonMaskProps,
    #[serde(flatten)]
    pub clip: ClipProps,
    #[serde(flatten)]
    pub touchable: TouchableProps,
    pub x: Option<NumberProp>,
    pub y: Option<NumberProp>,
    pub width: Option<NumberProp>,
    pub height: Option<NumberProp>,
    pub xlink_href: Option<ImageSource>,
    pub href: ImageSource,
    pub preserve_aspect_ratio: Option<String>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Line {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub x1: Option<NumberProp>,
    pub x2: Option<NumberProp>,
    pub y1: Option<NumberProp>,
    pub y2: Option<NumberProp>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradient {
    pub id: String,
    pub x1: Option<NumberProp>,
    pub x2: Option<NumberProp>,
    pub y1: Option<NumberProp>,
    pub y2: Option<NumberProp>,
    pub gradient_units: Option<Units>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Path {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub d: String,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: String,
    pub x: Option<NumberProp>,
    pub y: Option<NumberProp>,
    pub width: Option<NumberProp>,
    pub height: Option<NumberProp>,
    pub pattern_transform: Option<TransformProp>,
    pub pattern_units: Option<Units>,
    pub pattern_content_units: Option<Units>,
    pub view_box: Option<String>,
    pub preserve_aspect_ratio: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Polygon {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub points: ListProp,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Polyline {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub points: ListProp,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialGradient {
    pub id: String,
    pub fx: Option<NumberProp>,
    pub fy: Option<NumberProp>,
    pub rx: Option<NumberProp>,
    pub ry: Option<NumberProp>,
    pub cx: Option<NumberProp>,
    pub cy: Option<NumberProp>,
    pub r: Option<NumberProp>,
    pub gradient_units: Option<Units>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Rect {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub x: Option<NumberProp>,
    pub y: Option<NumberProp>,
    pub width: Option<NumberProp>,
    pub height: Option<NumberProp>,
    pub rx: Option<NumberProp>,
    pub ry: Option<NumberProp>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub stop_color: Option<ColorProp>,
    pub stop_opacity: Option<NumberProp>,
    pub offset: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Svg {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub opacity: Option<NumberProp>,
    pub width: Option<NumberProp>,
    pub height: Option<NumberProp>,
    pub view_box: Option<String>,
    pub preserve_aspect_ratio: Option<String>,
    pub color: Option<ColorProp>,
    pub title: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub id: String,
    pub view_box: Option<String>,
    pub preserve_aspect_ratio: Option<String>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TSpan {
    #[serde(flatten)]
    pub common: CommonPathProps,
    #[serde(flatten)]
    pub font: FontProps,
    pub dx: Option<NumberProp>,
    pub dy: Option<NumberProp>,
}

/// Props shared by `Text` and `TextPath`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpecificProps {
    #[serde(flatten)]
    pub common: CommonPathProps,
    #[serde(flatten)]
    pub font: FontProps,
    pub alignment_baseline: Option<AlignmentBaseline>,
    pub baseline_shift: Option<BaselineShift>,
    pub vertical_align: Option<NumberProp>,
    pub length_adjust: Option<LengthAdjust>,
    pub text_length: Option<NumberProp>,
    pub font_feature_settings: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Text {
    #[serde(flatten)]
    pub text: TextSpecificProps,
    pub dx: Option<NumberProp>,
    pub dy: Option<NumberProp>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPath {
    #[serde(flatten)]
    pub text: TextSpecificProps,
    pub xlink_href: Option<String>,
    pub href: String,
    pub start_offset: Option<NumberProp>,
    pub method: Option<TextPathMethod>,
    pub spacing: Option<TextPathSpacing>,
    pub mid_line: TextPathMidLine,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Use {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub xlink_href: Option<String>,
    pub href: String,
    pub width: Option<NumberProp>,
    pub height: Option<NumberProp>,
    pub x: Option<NumberProp>,
    pub y: Option<NumberProp>,
    pub opacity: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mask {
    #[serde(flatten)]
    pub common: CommonPathProps,
    pub id: String,
    pub x: Option<NumberProp>,
    pub y: Option<NumberProp>,
    pub width: Option<NumberProp>,
    pub height: Option<NumberProp>,
    pub mask_transform: Option<TransformProp>,
    pub mask_units: Option<MaskUnits>,
    pub mask_content_units: Option<MaskUnits>,
}

/// Any element, tagged by its `type`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Circle(Circle),
    ClipPath(ClipPath),
    Defs(Defs),
    Ellipse(Ellipse),
    G(G),
    Image(Image),
    Line(Line),
    LinearGradient(LinearGradient),
    Path(Path),
    Pattern(Pattern),
    Polygon(Polygon),
    Polyline(Polyline),
    RadialGradient(RadialGradient),
    Rect(Rect),
    Stop(Stop),
    Svg(Svg),
    Symbol(Symbol),
    #[serde(rename = "tspan")]
    TSpan(TSpan),
    Text(Text),
    TextPath(TextPath),
    Use(Use),
    Mask(Mask),
}

impl Element {
    /// Tag name as it appears in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Circle(_) => "circle",
            Element::ClipPath(_) => "clipPath",
            Element::Defs(_) => "defs",
            Element::Ellipse(_) => "ellipse",
            Element::G(_) => "g",
            Element::Image(_) => "image",
            Element::Line(_) => "line",
            Element::LinearGradient(_) => "linearGradient",
            Element::Path(_) => "path",
            Element::Pattern(_) => "pattern",
            Element::Polygon(_) => "polygon",
            Element::Polyline(_) => "polyline",
            Element::RadialGradient(_) => "radialGradient",
            Element::Rect(_) => "rect",
            Element::Stop(_) => "stop",
            Element::Svg(_) => "svg",
            Element::Symbol(_) => "symbol",
            Element::TSpan(_) => "tspan",
            Element::Text(_) => "text",
            Element::TextPath(_) => "textPath",
            Element::Use(_) => "use",
            Element::Mask(_) => "mask",
        }
    }
}

/// Render-ready view of one element
///
/// Lengths stay as [`NormalizedScalar`]s because percentages can only be
/// resolved against a viewport the renderer owns.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedElement {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub opacity: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub lengths: BTreeMap<&'static str, NormalizedScalar>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation: Option<ResolvedPresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<ResolvedFont>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_shift: Option<ResolvedBaselineShift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<(f64, f64)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<ResolvedStop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NormalizedColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_transform: Option<NormalizedMatrix>,
}

impl ResolvedElement {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            id: None,
            opacity: 1.0,
            lengths: BTreeMap::new(),
            attributes: BTreeMap::new(),
            presentation: None,
            font: None,
            baseline_shift: None,
            points: None,
            stop: None,
            color: None,
            content_transform: None,
        }
    }

    /// Look up a resolved length by prop name
    pub fn length(&self, name: &str) -> Option<NormalizedScalar> {
        self.lengths.get(name).copied()
    }

    fn with_length(&mut self, name: &'static str, value: &Option<NumberProp>) -> Result<&mut Self> {
        if let Some(length) = optional_scalar(name, value.as_ref())? {
            self.lengths.insert(name, length);
        }
        Ok(self)
    }

    fn with_attribute(&mut self, name: &'static str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.attributes.insert(name, value.to_string());
        }
        self
    }

    fn with_opacity(&mut self, value: &Option<NumberProp>) -> Result<&mut Self> {
        self.opacity = resolve_opacity("opacity", value.as_ref())?;
        Ok(self)
    }

    fn with_common(&mut self, common: &CommonPathProps) -> Result<&mut Self> {
        if self.id.is_none() {
            self.id = common.definition.id.clone();
        }
        self.presentation = Some(common.resolve()?);
        Ok(self)
    }

    fn with_text(&mut self, text: &TextSpecificProps) -> Result<&mut Self> {
        self.with_common(&text.common)?
            .with_length("verticalAlign", &text.vertical_align)?
            .with_length("textLength", &text.text_length)?
            .with_attribute("alignmentBaseline", text.alignment_baseline)
            .with_attribute("lengthAdjust", text.length_adjust)
            .with_attribute("fontFeatureSettings", text.font_feature_settings.as_deref());
        self.font = Some(text.font.resolve()?);
        self.baseline_shift = text
            .baseline_shift
            .as_ref()
            .map(|shift| shift.normalize().prop("baselineShift"))
            .transpose()?;
        Ok(self)
    }

    fn with_content_transform(
        &mut self,
        prop: &'static str,
        value: &Option<TransformProp>,
    ) -> Result<&mut Self> {
        self.content_transform = value
            .as_ref()
            .map(|t| t.normalize().prop(prop))
            .transpose()?;
        Ok(self)
    }
}

impl Resolve for Element {
    type Output = ResolvedElement;

    fn resolve(&self) -> Result<ResolvedElement> {
        let mut out = ResolvedElement::new(self.kind());

        match self {
            Element::Circle(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_length("cx", &e.cx)?
                    .with_length("cy", &e.cy)?
                    .with_length("r", &e.r)?;
            }
            Element::ClipPath(e) => {
                out.id = Some(e.id.clone());
            }
            Element::Defs(_) => {}
            Element::Ellipse(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_length("cx", &e.cx)?
                    .with_length("cy", &e.cy)?
                    .with_length("rx", &e.rx)?
                    .with_length("ry", &e.ry)?;
            }
            Element::G(e) => {
                out.with_common(&e.common)?.with_opacity(&e.opacity)?;
            }
            Element::Image(e) => {
                out.with_opacity(&e.opacity)?
                    .with_length("x", &e.x)?
                    .with_length("y", &e.y)?
                    .with_length("width", &e.width)?
                    .with_length("height", &e.height)?
                    .with_attribute("href", Some(e.href.describe()))
                    .with_attribute("xlinkHref", e.xlink_href.as_ref().map(ImageSource::describe))
                    .with_attribute("preserveAspectRatio", e.preserve_aspect_ratio.as_deref())
                    .with_attribute("clipPath", e.clip.clip_path.as_deref())
                    .with_attribute("clipRule", e.clip.clip_rule)
                    .with_attribute("mask", e.mask.mask.as_deref())
                    .with_attribute("pointerEvents", e.responder.pointer_events);
            }
            Element::Line(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_length("x1", &e.x1)?
                    .with_length("x2", &e.x2)?
                    .with_length("y1", &e.y1)?
                    .with_length("y2", &e.y2)?;
            }
            Element::LinearGradient(e) => {
                out.id = Some(e.id.clone());
                out.with_length("x1", &e.x1)?
                    .with_length("x2", &e.x2)?
                    .with_length("y1", &e.y1)?
                    .with_length("y2", &e.y2)?
                    .with_attribute("gradientUnits", Some(e.gradient_units.unwrap_or_default()));
            }
            Element::Path(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_attribute("d", Some(&e.d));
            }
            Element::Pattern(e) => {
                out.id = Some(e.id.clone());
                out.with_length("x", &e.x)?
                    .with_length("y", &e.y)?
                    .with_length("width", &e.width)?
                    .with_length("height", &e.height)?
                    .with_content_transform("patternTransform", &e.pattern_transform)?
                    .with_attribute("patternUnits", Some(e.pattern_units.unwrap_or_default()))
                    .with_attribute(
                        "patternContentUnits",
                        Some(e.pattern_content_units.unwrap_or_default()),
                    )
                    .with_attribute("viewBox", e.view_box.as_deref())
                    .with_attribute("preserveAspectRatio", e.preserve_aspect_ratio.as_deref());
            }
            Element::Polygon(e) => {
                out.with_common(&e.common)?.with_opacity(&e.opacity)?;
                out.points = Some(resolve_points(&e.points)?);
            }
            Element::Polyline(e) => {
                out.with_common(&e.common)?.with_opacity(&e.opacity)?;
                out.points = Some(resolve_points(&e.points)?);
            }
            Element::RadialGradient(e) => {
                out.id = Some(e.id.clone());
                out.with_length("fx", &e.fx)?
                    .with_length("fy", &e.fy)?
                    .with_length("rx", &e.rx)?
                    .with_length("ry", &e.ry)?
                    .with_length("cx", &e.cx)?
                    .with_length("cy", &e.cy)?
                    .with_length("r", &e.r)?
                    .with_attribute("gradientUnits", Some(e.gradient_units.unwrap_or_default()));
            }
            Element::Rect(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_length("x", &e.x)?
                    .with_length("y", &e.y)?
                    .with_length("width", &e.width)?
                    .with_length("height", &e.height)?
                    .with_length("rx", &e.rx)?
                    .with_length("ry", &e.ry)?;
            }
            Element::Stop(e) => {
                out.stop = Some(resolve_stop(
                    e.offset.as_ref(),
                    e.stop_color.as_ref(),
                    e.stop_opacity.as_ref(),
                )?);
            }
            Element::Svg(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_length("width", &e.width)?
                    .with_length("height", &e.height)?
                    .with_attribute("viewBox", e.view_box.as_deref())
                    .with_attribute("preserveAspectRatio", e.preserve_aspect_ratio.as_deref())
                    .with_attribute("title", e.title.as_deref());
                out.color = e
                    .color
                    .as_ref()
                    .map(|c| c.normalize().prop("color"))
                    .transpose()?;
            }
            Element::Symbol(e) => {
                out.id = Some(e.id.clone());
                out.with_opacity(&e.opacity)?
                    .with_attribute("viewBox", e.view_box.as_deref())
                    .with_attribute("preserveAspectRatio", e.preserve_aspect_ratio.as_deref());
            }
            Element::TSpan(e) => {
                out.with_common(&e.common)?
                    .with_length("dx", &e.dx)?
                    .with_length("dy", &e.dy)?;
                out.font = Some(e.font.resolve()?);
            }
            Element::Text(e) => {
                out.with_text(&e.text)?
                    .with_opacity(&e.opacity)?
                    .with_length("dx", &e.dx)?
                    .with_length("dy", &e.dy)?;
            }
            Element::TextPath(e) => {
                out.with_text(&e.text)?
                    .with_length("startOffset", &e.start_offset)?
                    .with_attribute("href", Some(&e.href))
                    .with_attribute("xlinkHref", e.xlink_href.as_deref())
                    .with_attribute("method", Some(e.method.unwrap_or_default()))
                    .with_attribute("spacing", Some(e.spacing.unwrap_or_default()))
                    .with_attribute("midLine", Some(e.mid_line));
            }
            Element::Use(e) => {
                out.with_common(&e.common)?
                    .with_opacity(&e.opacity)?
                    .with_length("x", &e.x)?
                    .with_length("y", &e.y)?
                    .with_length("width", &e.width)?
                    .with_length("height", &e.height)?
                    .with_attribute("href", Some(&e.href))
                    .with_attribute("xlinkHref", e.xlink_href.as_deref());
            }
            Element::Mask(e) => {
                out.id = Some(e.id.clone());
                out.with_common(&e.common)?
                    .with_length("x", &e.x)?
                    .with_length("y", &e.y)?
                    .with_length("width", &e.width)?
                    .with_length("height", &e.height)?
                    .with_content_transform("maskTransform", &e.mask_transform)?
                    .with_attribute("maskUnits", Some(e.mask_units.unwrap_or_default()))
                    .with_attribute(
                        "maskContentUnits",
                        Some(e.mask_content_units.unwrap_or_default()),
                    );
            }
        }

        debug!(
            kind = out.kind,
            id = out.id.as_deref().unwrap_or(""),
            lengths = out.lengths.len(),
            "Resolved element"
        );
        Ok(out)
    }
}
