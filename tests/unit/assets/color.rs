use super::*;
use serde_json::json;

fn close(c: ColorDef, want: [f64; 4]) -> bool {
    let got = [c.r, c.g, c.b, c.a];
    got.iter().zip(want).all(|(g, w)| (g - w).abs() < 1e-6)
}

#[test]
fn parses_default_mask_css_form() {
    let c: ColorDef = "rgba(0,0,0,.5)".parse().unwrap();
    assert!(close(c, [0.0, 0.0, 0.0, 0.5]));
    assert_eq!(c.to_rgba8_premul().to_array(), [0, 0, 0, 128]);
}

#[test]
fn parses_rgb_function_variants() {
    let c: ColorDef = "rgb(255, 0, 0)".parse().unwrap();
    assert!(close(c, [1.0, 0.0, 0.0, 1.0]));

    let c: ColorDef = "RGBA(0 0 255 / 25%)".parse().unwrap();
    assert!(close(c, [0.0, 0.0, 1.0, 0.25]));

    assert!("rgba(1,2)".parse::<ColorDef>().is_err());
    assert!("rgba(1,2,3".parse::<ColorDef>().is_err());
}

#[test]
fn parses_short_and_long_hex() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert!(close(c, [1.0, 0.0, 0.0, 1.0]));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!(close(c, [0.0, 0.0, 1.0, 128.0 / 255.0]));

    let c: ColorDef = "#000".parse().unwrap();
    assert!(close(c, [0.0, 0.0, 0.0, 1.0]));

    let c: ColorDef = "#0008".parse().unwrap();
    assert!(close(c, [0.0, 0.0, 0.0, 136.0 / 255.0]));
}

#[test]
fn parses_named_and_hsl_colors() {
    let c: ColorDef = "red".parse().unwrap();
    assert!(close(c, [1.0, 0.0, 0.0, 1.0]));

    let c: ColorDef = "White".parse().unwrap();
    assert!(close(c, [1.0, 1.0, 1.0, 1.0]));

    let c: ColorDef = "hsl(0 0% 0% / 0.5)".parse().unwrap();
    assert!(close(c, [0.0, 0.0, 0.0, 0.5]));
    assert_eq!(c.to_rgba8_premul().to_array(), [0, 0, 0, 128]);

    let c: ColorDef = "hsl(120, 100%, 50%)".parse().unwrap();
    assert!(close(c, [0.0, 1.0, 0.0, 1.0]));
}

#[test]
fn parses_rgba_object_array_and_names() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    let c: ColorDef = serde_json::from_value(json!("transparent")).unwrap();
    assert_eq!(c.to_rgba8_premul().to_array(), [0, 0, 0, 0]);

    assert!(serde_json::from_value::<ColorDef>(json!("chartreuse-ish")).is_err());
}
