use super::*;

#[test]
fn pixel_mapping_puts_origin_at_center_with_y_up() {
    assert_eq!(pointer_from_pixel(50.0, 50.0, 100, 100), Vec2::ZERO);
    assert_eq!(pointer_from_pixel(0.0, 0.0, 100, 100), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_from_pixel(100.0, 100.0, 100, 100), Vec2::new(1.0, -1.0));
    assert_eq!(pointer_from_pixel(150.0, 50.0, 100, 100), Vec2::new(2.0, 0.0));
}

#[test]
fn fixed_path_is_constant() {
    let p = PointerPath::Fixed([0.25, -0.5]);
    assert_eq!(p.sample(0.0), Vec2::new(0.25, -0.5));
    assert_eq!(p.sample(123.0), Vec2::new(0.25, -0.5));
    assert_eq!(PointerPath::default().sample(1.0), Vec2::ZERO);
}

#[test]
fn orbit_path_returns_to_start_each_period() {
    let p = PointerPath::Orbit {
        radius: 0.5,
        period_secs: 4.0,
    };
    let start = p.sample(0.0);
    assert_eq!(start, Vec2::new(0.5, 0.0));
    let quarter = p.sample(1.0);
    assert!(quarter.x.abs() < 1e-12 && (quarter.y - 0.5).abs() < 1e-12);
    let again = p.sample(4.0);
    assert!((again - start).hypot() < 1e-12);
}

#[test]
fn path_validation() {
    assert!(PointerPath::Fixed([0.0, f64::NAN]).validate().is_err());
    assert!(
        PointerPath::Orbit {
            radius: 0.5,
            period_secs: 0.0
        }
        .validate()
        .is_err()
    );
    assert!(PointerPath::default().validate().is_ok());
}

#[test]
fn path_json_shape() {
    let p: PointerPath = serde_json::from_str(r#"{ "fixed": [0.1, 0.2] }"#).unwrap();
    assert_eq!(p, PointerPath::Fixed([0.1, 0.2]));
    let p: PointerPath =
        serde_json::from_str(r#"{ "orbit": { "radius": 0.3, "period_secs": 6.0 } }"#).unwrap();
    assert_eq!(
        p,
        PointerPath::Orbit {
            radius: 0.3,
            period_secs: 6.0
        }
    );
}
