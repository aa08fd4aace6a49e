use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ReelError::validation("x").to_string().contains("validation error:"));
    assert!(ReelError::fetch("x").to_string().contains("fetch error:"));
    assert!(ReelError::parse("x").to_string().contains("parse error:"));
    assert!(ReelError::render("x").to_string().contains("render error:"));
    assert!(ReelError::encode("x").to_string().contains("encode error:"));
    assert!(ReelError::publish("x").to_string().contains("publish error:"));
}

#[test]
fn stage_names_follow_variant() {
    assert_eq!(ReelError::fetch("timeout").stage(), "fetch");
    assert_eq!(ReelError::render("font").stage(), "render");
    assert_eq!(ReelError::encode("ffmpeg").stage(), "encode");
    assert_eq!(ReelError::publish("rename").stage(), "publish");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.stage(), "other");
}
