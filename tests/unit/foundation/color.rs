use super::*;

#[test]
fn parses_hex_with_and_without_alpha() {
    let c: Rgba8 = serde_json::from_str("\"#FFFF00\"").unwrap();
    assert_eq!(c, Rgba8::rgb(255, 255, 0));

    let c: Rgba8 = serde_json::from_str("\"a0a0a080\"").unwrap();
    assert_eq!(
        c,
        Rgba8 {
            r: 160,
            g: 160,
            b: 160,
            a: 128
        }
    );
}

#[test]
fn parses_byte_arrays() {
    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
}

#[test]
fn rejects_bad_hex() {
    assert!(serde_json::from_str::<Rgba8>("\"#12345\"").is_err());
    assert!(serde_json::from_str::<Rgba8>("\"#zz0000\"").is_err());
}

#[test]
fn serializes_to_hex() {
    let json = serde_json::to_string(&Rgba8::rgb(255, 0, 16)).unwrap();
    assert_eq!(json, "\"#ff0010ff\"");
}

#[test]
fn premul_scales_by_alpha() {
    let c = Rgba8 {
        r: 255,
        g: 100,
        b: 0,
        a: 0,
    };
    assert_eq!(c.to_premul_bytes(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::rgb(10, 20, 30).to_premul_bytes(), [10, 20, 30, 255]);
}
