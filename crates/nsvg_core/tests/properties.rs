//! Cross-coercer behavior checked through the public API

use nsvg_core::{
    normalize_color, normalize_list, normalize_scalar, normalize_transform, ColorInput,
    NormalizedColor, NormalizedScalar, TransformObject, ValueError,
};

#[test]
fn test_finite_numbers_pass_through() {
    for n in [0.0, 1.0, -1.0, 0.125, 1e-12, 123456.789, -9e15] {
        assert_eq!(
            normalize_scalar(n).unwrap(),
            NormalizedScalar {
                value: n,
                is_percentage: false
            }
        );
    }
}

#[test]
fn test_percent_strings() {
    for x in ["0", "12.5", "-3", "100", "1e2"] {
        let expected: f64 = x.parse().unwrap();
        assert_eq!(
            normalize_scalar(format!("{}%", x)).unwrap(),
            NormalizedScalar {
                value: expected,
                is_percentage: true
            }
        );
    }
}

#[test]
fn test_opaque_red_from_every_form() {
    let red = NormalizedColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    let inputs: Vec<ColorInput> = vec![
        0xFFFF0000u32.into(),
        "#ff0000".into(),
        "#f00".into(),
        "red".into(),
        "rgb(255, 0, 0)".into(),
        [1.0, 0.0, 0.0, 1.0].into(),
    ];
    for input in inputs {
        assert_eq!(normalize_color(input.clone()).unwrap(), red, "{:?}", input);
    }
}

#[test]
fn test_lists() {
    assert_eq!(normalize_list("1,2 3").unwrap().as_slice(), &[1.0, 2.0, 3.0]);
    assert!(normalize_list(Vec::<f64>::new()).unwrap().is_empty());
}

#[test]
fn test_identity_and_translate() {
    assert!(normalize_transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
        .unwrap()
        .is_identity());

    let m = normalize_transform(TransformObject {
        translate_x: Some(10.0.into()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(m.transform_point((0.0, 0.0)), (10.0, 0.0));
}

#[test]
fn test_failures() {
    assert!(matches!(
        normalize_color([1.5, 0.0, 0.0, 1.0]),
        Err(ValueError::InvalidColorRange { .. })
    ));
    assert!(matches!(
        normalize_transform("foo(1)"),
        Err(ValueError::UnknownTransformFunction { .. })
    ));
}

#[test]
fn test_coercers_are_thread_safe() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let list = normalize_list(format!("{} {}", i, i + 1)).unwrap();
                let color = normalize_color("rebeccapurple").unwrap();
                (list.into_inner(), color)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (list, color) = handle.join().unwrap();
        assert_eq!(list, vec![i as f64, i as f64 + 1.0]);
        assert_eq!(color, NormalizedColor::from_rgba8(0x66, 0x33, 0x99, 0xFF));
    }
}
