//! Whole elements read from JSON and resolved

use nsvg_core::{NormalizedColor, NormalizedScalar};
use nsvg_props::{
    Element, FontWeight, Linecap, Paint, PropError, Resolve, ResolvedBaselineShift, TextAnchor,
};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn resolve(json: &str) -> nsvg_props::ResolvedElement {
    let element: Element = serde_json::from_str(json).unwrap();
    element.resolve().unwrap()
}

#[test]
fn test_document() {
    let elements: Vec<Element> = serde_json::from_str(
        r##"[
            {"type": "svg", "width": "100%", "height": 200, "viewBox": "0 0 100 100", "color": "teal"},
            {"type": "defs"},
            {"type": "linearGradient", "id": "fade", "x2": "100%", "gradientUnits": "objectBoundingBox"},
            {"type": "stop", "offset": "0%", "stopColor": "#fff"},
            {"type": "stop", "offset": 1, "stopColor": "black", "stopOpacity": "50%"},
            {"type": "g", "opacity": 0.5, "transform": "translate(10 20)"},
            {"type": "path", "d": "M0 0 L10 10", "stroke": "url(#fade) red", "strokeLinecap": "round"}
        ]"##,
    )
    .unwrap();

    let resolved: Vec<_> = elements
        .iter()
        .map(|e| e.resolve())
        .collect::<Result<_, PropError>>()
        .unwrap();

    let kinds: Vec<_> = resolved.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        ["svg", "defs", "linearGradient", "stop", "stop", "g", "path"]
    );

    assert_eq!(resolved[0].color, Some(NormalizedColor::from_rgba8(0, 128, 128, 255)));
    assert_eq!(resolved[0].length("width"), Some(NormalizedScalar::percentage(100.0)));
    assert_eq!(resolved[2].attributes["gradientUnits"], "objectBoundingBox");

    let last_stop = resolved[4].stop.unwrap();
    assert_eq!(last_stop.offset, 1.0);
    assert_eq!(last_stop.color, NormalizedColor::rgba(0.0, 0.0, 0.0, 0.5));

    assert_eq!(resolved[5].opacity, 0.5);
    let group = resolved[5].presentation.as_ref().unwrap();
    assert_eq!(group.transform.transform_point((0.0, 0.0)), (10.0, 20.0));

    let path = resolved[6].presentation.as_ref().unwrap();
    let stroke = path.stroke.as_ref().unwrap();
    assert_eq!(stroke.linecap, Linecap::Round);
    assert!(matches!(&stroke.paint, Paint::Reference { id, fallback: Some(_) } if id == "fade"));
    assert_eq!(resolved[6].attributes["d"], "M0 0 L10 10");
}

#[test]
fn test_polygon_points() {
    let resolved = resolve(r#"{"type": "polygon", "points": [0, 0, "10", 0, 10, 10]}"#);
    assert_eq!(
        resolved.points,
        Some(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
    );

    let resolved = resolve(r#"{"type": "polyline", "points": "0,0 5,5 10,0"}"#);
    assert_eq!(resolved.points.unwrap().len(), 3);
}

#[test]
fn test_text_font_and_baseline() {
    let resolved = resolve(
        r#"{
            "type": "text",
            "fontSize": 20,
            "font": {"fontFamily": "Inter", "fontSize": 12, "fontWeight": "700"},
            "textAnchor": "middle",
            "baselineShift": "super",
            "dx": "2",
            "y": 30
        }"#,
    );
    let font = resolved.font.as_ref().unwrap();
    assert_eq!(font.size, NormalizedScalar::absolute(20.0));
    assert_eq!(font.family.as_deref(), Some("Inter"));
    assert_eq!(font.weight, FontWeight::W700);
    assert_eq!(font.anchor, TextAnchor::Middle);
    assert_eq!(resolved.baseline_shift, Some(ResolvedBaselineShift::Super));
    assert_eq!(resolved.length("dx"), Some(NormalizedScalar::absolute(2.0)));

    let transform = resolved.presentation.unwrap().transform;
    assert_eq!(transform.transform_point((0.0, 0.0)), (0.0, 30.0));
}

#[test]
fn test_text_path_and_tspan() {
    let resolved = resolve(
        r##"{"type": "textPath", "href": "#curve", "midLine": "smooth", "startOffset": "25%"}"##,
    );
    assert_eq!(resolved.attributes["href"], "#curve");
    assert_eq!(resolved.attributes["midLine"], "smooth");
    assert_eq!(resolved.attributes["spacing"], "exact");
    assert_eq!(
        resolved.length("startOffset"),
        Some(NormalizedScalar::percentage(25.0))
    );

    let resolved = resolve(r#"{"type": "tspan", "dy": 4, "fontStyle": "italic"}"#);
    assert_eq!(resolved.kind, "tspan");
    assert_eq!(resolved.font.unwrap().style, nsvg_props::FontStyle::Italic);
}

#[test]
fn test_image_and_use() {
    let resolved = resolve(
        r#"{"type": "image", "href": {"uri": "https://example.com/a.png"}, "x": 4, "width": "50%"}"#,
    );
    assert_eq!(resolved.attributes["href"], "https://example.com/a.png");
    assert_eq!(resolved.length("x"), Some(NormalizedScalar::absolute(4.0)));
    assert!(resolved.presentation.is_none());

    let resolved = resolve(r##"{"type": "use", "href": "#shape", "x": 10, "y": 10}"##);
    assert_eq!(resolved.length("x"), Some(NormalizedScalar::absolute(10.0)));
    assert!(resolved.presentation.unwrap().transform.is_identity());
}

#[test]
fn test_pattern_transform() {
    let resolved = resolve(
        r#"{"type": "pattern", "id": "p", "patternTransform": "rotate(90)", "width": 8, "height": 8}"#,
    );
    let m = resolved.content_transform.unwrap();
    let (x, y) = m.transform_point((1.0, 0.0));
    assert!(approx_eq(x, 0.0) && approx_eq(y, 1.0));
    assert_eq!(resolved.attributes["patternUnits"], "userSpaceOnUse");
}

#[test]
fn test_errors_carry_prop_name() {
    let element: Element =
        serde_json::from_str(r#"{"type": "circle", "r": "ten"}"#).unwrap();
    match element.resolve() {
        Err(PropError::Value { prop, source }) => {
            assert_eq!(prop, "r");
            assert_eq!(source.input(), "ten");
        }
        other => panic!("expected a value error, got {:?}", other),
    }

    let element: Element =
        serde_json::from_str(r#"{"type": "rect", "fill": [1.5, 0, 0, 1]}"#).unwrap();
    let err = element.resolve().unwrap_err();
    assert!(err.to_string().starts_with("Invalid value for `fill`"));
}

#[test]
fn test_unknown_keyword_in_document() {
    let err = serde_json::from_str::<Element>(r#"{"type": "rect", "strokeLinejoin": "pointy"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("pointy"));
}

#[test]
fn test_serialized_output() {
    let resolved = resolve(r#"{"type": "circle", "r": 4}"#);
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(json["kind"], "circle");
    assert_eq!(json["lengths"]["r"]["value"], 4.0);
    assert_eq!(json["lengths"]["r"]["isPercentage"], false);
    assert!(json.get("points").is_none());
}
