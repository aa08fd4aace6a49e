use super::*;

#[test]
fn filled_frame_has_expected_bytes() {
    let f = FrameRGBA::filled(
        Canvas {
            width: 2,
            height: 2,
        },
        Rgba8::rgb(1, 2, 3),
    );
    assert_eq!(f.data, vec![1, 2, 3, 255, 1, 2, 3, 255, 1, 2, 3, 255, 1, 2, 3, 255]);
    assert!(f.premultiplied);
}

#[test]
fn straight_conversion_unpremultiplies_partial_alpha() {
    let f = FrameRGBA {
        width: 1,
        height: 2,
        data: vec![64, 0, 128, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let out = f.to_straight_rgba8();
    assert_eq!(&out[4..], &[10, 20, 30, 255]);
    assert_eq!(out[3], 128);
    assert!((i32::from(out[0]) - 127).abs() <= 1);
    assert_eq!(out[2], 255);
}

#[test]
fn content_canvas_checks_length_and_exposes_rows() {
    assert!(ContentCanvas::from_premul(2, 2, vec![0; 15]).is_err());
    let data: Vec<u8> = (0..16).collect();
    let c = ContentCanvas::from_premul(2, 2, data).unwrap();
    assert_eq!(c.row(1), &[8, 9, 10, 11, 12, 13, 14, 15]);
}
