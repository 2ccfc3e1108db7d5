use super::*;
use serde_json::json;

#[test]
fn parses_hex_long_short_and_array() {
    let c: Rgb8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgb8::new(255, 0, 0));

    let c: Rgb8 = serde_json::from_value(json!("0A0b0C")).unwrap();
    assert_eq!(c, Rgb8::new(10, 11, 12));

    let c: Rgb8 = serde_json::from_value(json!("#fff")).unwrap();
    assert_eq!(c, Rgb8::WHITE);

    let c: Rgb8 = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["#ff00", "#gg0000", "#ff0000ff", ""] {
        assert!(parse_hex(bad).is_err(), "{bad:?} should be rejected");
    }
    assert!("nope".parse::<Rgb8>().is_err());
}

#[test]
fn serializes_as_hex_string() {
    let v = serde_json::to_value(Rgb8::new(0x12, 0xab, 0x00)).unwrap();
    assert_eq!(v, json!("#12ab00"));
}

#[test]
fn color_ref_accepts_index_or_literal() {
    let r: ColorRef = serde_json::from_value(json!(3)).unwrap();
    assert_eq!(r, ColorRef::Index(3));
    let r: ColorRef = serde_json::from_value(json!("#00ff00")).unwrap();
    assert_eq!(r, ColorRef::Rgb(Rgb8::new(0, 255, 0)));
}

#[test]
fn palette_resolves_indices_and_reports_out_of_range() {
    let palette: Palette = serde_json::from_value(json!(["#000000", "#ffffff"])).unwrap();
    assert_eq!(palette.len(), 2);
    assert_eq!(palette.resolve(ColorRef::Index(1)).unwrap(), Rgb8::WHITE);
    assert_eq!(
        palette.resolve(ColorRef::Rgb(Rgb8::new(1, 2, 3))).unwrap(),
        Rgb8::new(1, 2, 3)
    );

    let err = palette.resolve(ColorRef::Index(2)).unwrap_err();
    assert!(matches!(err, PaintlapseError::Validation(_)));
}
