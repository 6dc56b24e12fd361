use super::*;
use crate::effects::blend::{BlendMode, ToneMap};
use crate::effects::scan::BrightnessVariation;
use crate::render::layout::Fit;

#[test]
fn minimal_json_takes_defaults() {
    let cfg =
        SceneConfig::from_reader(r#"{"color_image":"a.png","depth_image":"b.png"}"#.as_bytes())
            .unwrap();
    assert_eq!(cfg, SceneConfig::with_images("a.png", "b.png"));
    assert_eq!((cfg.viewport.width, cfg.viewport.height), (640, 360));
    assert_eq!(cfg.duration, 90);
    assert_eq!(cfg.background, [0, 0, 0, 255]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.frame_range().unwrap().len_frames(), 90);
}

#[test]
fn variants_parse_from_snake_case() {
    let json = r#"{
        "color_image": "a.png",
        "depth_image": "b.png",
        "surface": { "design_width": 400, "design_height": 200, "fit": "contain" },
        "effect": { "blend": "screen", "brightness": "flat", "tone_map": "reinhard" },
        "pointer": { "orbit": { "radius": 0.5, "period_secs": 4.0 } }
    }"#;
    let cfg = SceneConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.surface.fit, Fit::Contain);
    assert_eq!(cfg.surface.scale, 0.3);
    assert_eq!(cfg.effect.blend, BlendMode::Screen);
    assert_eq!(cfg.effect.brightness, BrightnessVariation::Flat);
    assert_eq!(cfg.effect.tone_map, ToneMap::Reinhard);
    assert_eq!(cfg.effect.tiling_density, 120.0);
    assert_eq!(
        cfg.pointer,
        PointerPath::Orbit {
            radius: 0.5,
            period_secs: 4.0
        }
    );
    assert_eq!(cfg.effect_params().aspect, 2.0);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, ScanError::Serde(_)));

    let err = SceneConfig::from_reader(r#"{"color_image":"a.png"}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, ScanError::Serde(_)));
    assert!(err.to_string().contains("depth_image"));

    let err = SceneConfig::from_reader(
        r#"{"color_image":"a.png","depth_image":"b.png","colour":1}"#.as_bytes(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("colour"));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = SceneConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn validate_reports_bad_fields() {
    let base = SceneConfig::with_images("a.png", "b.png");

    let mut cfg = base.clone();
    cfg.viewport.width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.fps = Fps { num: 30, den: 0 };
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.duration = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.effect.tiling_density = -1.0;
    assert!(cfg.validate().is_err());
    assert!(cfg.rasterizer().is_err());

    let mut cfg = base.clone();
    cfg.pointer = PointerPath::Orbit {
        radius: 1.0,
        period_secs: 0.0,
    };
    assert!(cfg.validate().is_err());

    let mut cfg = base;
    cfg.color_image = PathBuf::new();
    assert!(cfg.validate().is_err());
}

#[test]
fn rasterizer_uses_viewport() {
    let mut cfg = SceneConfig::with_images("a.png", "b.png");
    cfg.viewport = Canvas {
        width: 32,
        height: 16,
    };
    let r = cfg.rasterizer().unwrap();
    assert_eq!(r.canvas(), cfg.viewport);
}
