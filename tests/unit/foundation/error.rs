use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        IsoskinError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        IsoskinError::unsupported_mode("spin")
            .to_string()
            .contains("unsupported mode: 'spin'")
    );
    assert!(
        IsoskinError::InvalidDimensions {
            width: 32,
            height: 32
        }
        .to_string()
        .contains("got 32x32")
    );
    assert!(
        IsoskinError::UnknownRegion {
            region: "head_top/overlay".to_string(),
            layout: "legacy",
            arms: "wide",
        }
        .to_string()
        .starts_with("unknown region:")
    );
    assert!(
        IsoskinError::InvalidScale(0)
            .to_string()
            .contains("1..=64")
    );
}

#[test]
fn decode_wraps_image_error() {
    let err: IsoskinError = image::load_from_memory(b"not a png").unwrap_err().into();
    assert!(matches!(err, IsoskinError::Decode(_)));
    assert!(err.to_string().starts_with("decode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = IsoskinError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
