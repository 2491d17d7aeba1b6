//! Prop groups shared between elements
//!
//! Each group mirrors one of the declaration interfaces that element props
//! extend. Elements compose them with `#[serde(flatten)]`, so a JSON prop
//! object uses the same flat camelCase keys as the component API.

use nsvg_core::{ColorInput, ListInput, NumberProp, TransformInput, TransformObject};
use serde::Deserialize;

use crate::vocabulary::{
    FillRule, FontStretch, FontStyle, FontVariant, FontVariantLigatures, FontWeight, Linecap,
    Linejoin, PointerEvents, TextAnchor, TextDecoration, VectorEffect,
};

/// Color props: packed ARGB int, `[r, g, b, a]` array, or string
pub type ColorProp = ColorInput;

/// Transform prop: matrix, transform list string, or object
pub type TransformProp = TransformInput;

/// List props: `points`, `strokeDasharray`
pub type ListProp = ListInput;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillProps {
    pub fill: Option<ColorProp>,
    pub fill_opacity: Option<NumberProp>,
    pub fill_rule: Option<FillRule>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeProps {
    pub stroke: Option<ColorProp>,
    pub stroke_width: Option<NumberProp>,
    pub stroke_opacity: Option<NumberProp>,
    pub stroke_dasharray: Option<ListProp>,
    pub stroke_dashoffset: Option<NumberProp>,
    pub stroke_linecap: Option<Linecap>,
    pub stroke_linejoin: Option<Linejoin>,
    pub stroke_miterlimit: Option<NumberProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipProps {
    pub clip_rule: Option<FillRule>,
    pub clip_path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorEffectProps {
    pub vector_effect: Option<VectorEffect>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DefinitionProps {
    pub id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CommonMaskProps {
    pub mask: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderProps {
    pub pointer_events: Option<PointerEvents>,
}

/// Touch configuration; the callbacks themselves live with the host
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchableProps {
    pub disabled: Option<bool>,
    pub delay_press_in: Option<f64>,
    pub delay_press_out: Option<f64>,
    pub delay_long_press: Option<f64>,
}

/// Object-form transform fields plus the `transform` prop itself
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TransformProps {
    #[serde(flatten)]
    pub fields: TransformObject,
    pub transform: Option<TransformProp>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontObject {
    pub font_style: Option<FontStyle>,
    pub font_variant: Option<FontVariant>,
    pub font_weight: Option<FontWeight>,
    pub font_stretch: Option<FontStretch>,
    pub font_size: Option<NumberProp>,
    pub font_family: Option<String>,
    pub text_anchor: Option<TextAnchor>,
    pub text_decoration: Option<TextDecoration>,
    pub letter_spacing: Option<NumberProp>,
    pub word_spacing: Option<NumberProp>,
    pub kerning: Option<NumberProp>,
    pub font_variant_ligatures: Option<FontVariantLigatures>,
}

impl FontObject {
    /// Fields set on `self` win over those on `base`
    pub fn merged_over(&self, base: &FontObject) -> FontObject {
        FontObject {
            font_style: self.font_style.or(base.font_style),
            font_variant: self.font_variant.or(base.font_variant),
            font_weight: self.font_weight.or(base.font_weight),
            font_stretch: self.font_stretch.or(base.font_stretch),
            font_size: self.font_size.clone().or_else(|| base.font_size.clone()),
            font_family: self.font_family.clone().or_else(|| base.font_family.clone()),
            text_anchor: self.text_anchor.or(base.text_anchor),
            text_decoration: self.text_decoration.or(base.text_decoration),
            letter_spacing: self
                .letter_spacing
                .clone()
                .or_else(|| base.letter_spacing.clone()),
            word_spacing: self
                .word_spacing
                .clone()
                .or_else(|| base.word_spacing.clone()),
            kerning: self.kerning.clone().or_else(|| base.kerning.clone()),
            font_variant_ligatures: self.font_variant_ligatures.or(base.font_variant_ligatures),
        }
    }
}

/// Font fields set directly on an element plus an optional `font` object
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FontProps {
    #[serde(flatten)]
    pub own: FontObject,
    pub font: Option<FontObject>,
}

/// Everything a drawable element accepts
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CommonPathProps {
    #[serde(flatten)]
    pub fill: FillProps,
    #[serde(flatten)]
    pub stroke: StrokeProps,
    #[serde(flatten)]
    pub clip: ClipProps,
    #[serde(flatten)]
    pub transform: TransformProps,
    #[serde(flatten)]
    pub vector_effect: VectorEffectProps,
    #[serde(flatten)]
    pub responder: ResponderProps,
    #[serde(flatten)]
    pub touchable: TouchableProps,
    #[serde(flatten)]
    pub definition: DefinitionProps,
    #[serde(flatten)]
    pub mask: CommonMaskProps,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_props_from_flat_json() {
        let props: CommonPathProps = serde_json::from_str(
            r##"{
                "fill": "#ff0000",
                "fillRule": "evenodd",
                "stroke": [0, 0, 1, 1],
                "strokeWidth": "2",
                "strokeDasharray": "4 2",
                "strokeLinecap": "round",
                "clipPath": "url(#clip)",
                "rotation": 45,
                "transform": "scale(2)",
                "vectorEffect": "nonScalingStroke",
                "pointerEvents": "box-only",
                "disabled": true,
                "id": "shape",
                "mask": "url(#m)"
            }"##,
        )
        .unwrap();

        assert_eq!(props.fill.fill, Some(ColorProp::Text("#ff0000".to_string())));
        assert_eq!(props.fill.fill_rule, Some(FillRule::EvenOdd));
        assert_eq!(
            props.stroke.stroke,
            Some(ColorProp::Channels(vec![0.0, 0.0, 1.0, 1.0]))
        );
        assert_eq!(props.stroke.stroke_linecap, Some(Linecap::Round));
        assert_eq!(props.clip.clip_path.as_deref(), Some("url(#clip)"));
        assert_eq!(
            props.transform.fields.rotation,
            Some(NumberProp::Number(45.0))
        );
        assert_eq!(
            props.transform.transform,
            Some(TransformProp::Text("scale(2)".to_string()))
        );
        assert_eq!(
            props.vector_effect.vector_effect,
            Some(VectorEffect::NonScalingStroke)
        );
        assert_eq!(props.responder.pointer_events, Some(PointerEvents::BoxOnly));
        assert_eq!(props.touchable.disabled, Some(true));
        assert_eq!(props.definition.id.as_deref(), Some("shape"));
        assert_eq!(props.mask.mask.as_deref(), Some("url(#m)"));
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let result = serde_json::from_str::<FillProps>(r#"{"fillRule": "odd"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_font_merge() {
        let base = FontObject {
            font_size: Some(12.0.into()),
            font_family: Some("Inter".to_string()),
            font_weight: Some(FontWeight::Bold),
            ..Default::default()
        };
        let own = FontObject {
            font_size: Some(16.0.into()),
            ..Default::default()
        };
        let merged = own.merged_over(&base);
        assert_eq!(merged.font_size, Some(NumberProp::Number(16.0)));
        assert_eq!(merged.font_family.as_deref(), Some("Inter"));
        assert_eq!(merged.font_weight, Some(FontWeight::Bold));
    }
}
