use super::*;

#[test]
fn defaults_match_the_studio() {
    let cfg = StudioConfig::default();
    assert_eq!(cfg.pixel_density, 2);
    assert_eq!(cfg.jpeg_quality, 95);
    assert_eq!(cfg.intro_target, 5290);
    assert!(cfg.font.is_none());
    cfg.validate().unwrap();
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg = StudioConfig::from_json_str(r#"{ "video_fps": 24 }"#).unwrap();
    assert_eq!(cfg.video_fps, 24);
    assert_eq!(cfg.pixel_density, 2);
    assert_eq!(cfg.record_config().unwrap().fps, Fps::new(24, 1).unwrap());
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let err = StudioConfig::from_json_str(r#"{ "pixel_densty": 2 }"#).unwrap_err();
    assert!(matches!(err, SyntropyError::Serde(_)));
    assert!(StudioConfig::from_json_str(r#"{ "jpeg_quality": 0 }"#).is_err());
    assert!(StudioConfig::from_json_str(r#"{ "intro_target": 8192 }"#).is_err());
    assert!(StudioConfig::from_json_str(r#"{ "pixel_density": 9 }"#).is_err());
}

#[test]
fn env_overrides_apply_and_invalid_density_is_ignored() {
    let cfg = StudioConfig::default().with_overrides_from(|key| match key {
        ENV_FONT => Some("/fonts/mono.ttf".to_string()),
        ENV_PIXEL_DENSITY => Some("3".to_string()),
        _ => None,
    });
    assert_eq!(cfg.font.as_deref(), Some(Path::new("/fonts/mono.ttf")));
    assert_eq!(cfg.pixel_density, 3);

    let cfg = StudioConfig::default().with_overrides_from(|key| match key {
        ENV_PIXEL_DENSITY => Some("lots".to_string()),
        ENV_FONT => Some("  ".to_string()),
        _ => None,
    });
    assert_eq!(cfg.pixel_density, 2);
    assert!(cfg.font.is_none());
}

#[test]
fn render_settings_without_font() {
    let settings = StudioConfig::default().render_settings().unwrap();
    assert_eq!(settings.pixel_density, 2);
    assert!(settings.font.is_none());
}

#[test]
fn render_settings_reports_missing_font_file() {
    let cfg = StudioConfig {
        font: Some(PathBuf::from("/definitely/not/here.ttf")),
        ..StudioConfig::default()
    };
    assert!(cfg.render_settings().is_err());
}
