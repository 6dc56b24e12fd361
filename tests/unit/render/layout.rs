use super::*;

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

fn square(side: f64, scale: f64, fit: Fit) -> SurfaceLayout {
    SurfaceLayout {
        design_width: side,
        design_height: side,
        scale,
        fit,
    }
}

#[test]
fn cover_scales_by_the_larger_axis() {
    let p = square(100.0, 0.25, Fit::Cover).place(canvas(1000, 500));
    assert_eq!(p.rect, Rect::new(375.0, 125.0, 625.0, 375.0));
}

#[test]
fn contain_scales_by_the_smaller_axis() {
    let p = square(100.0, 1.0, Fit::Contain).place(canvas(1000, 500));
    assert_eq!(p.rect, Rect::new(250.0, 0.0, 750.0, 500.0));
}

#[test]
fn uv_runs_left_to_right_and_bottom_to_top() {
    let p = square(4.0, 1.0, Fit::Cover).place(canvas(4, 4));
    assert_eq!(p.uv_at(0, 0), Some(Point::new(0.125, 0.875)));
    assert_eq!(p.uv_at(3, 3), Some(Point::new(0.875, 0.125)));
}

#[test]
fn pixels_outside_surface_have_no_uv() {
    let p = square(100.0, 0.5, Fit::Cover).place(canvas(100, 100));
    assert_eq!(p.rect, Rect::new(25.0, 25.0, 75.0, 75.0));
    assert!(p.uv_at(0, 0).is_none());
    assert!(p.uv_at(24, 50).is_none());
    assert!(p.uv_at(25, 50).is_some());
    assert!(p.uv_at(75, 50).is_none());
    assert_eq!(p.row_span(), 25..75);
    assert_eq!(p.col_span(), 25..75);
}

#[test]
fn oversized_surface_is_clipped_to_canvas() {
    let p = square(10.0, 2.0, Fit::Cover).place(canvas(10, 10));
    assert_eq!(p.row_span(), 0..10);
    assert_eq!(p.col_span(), 0..10);
    let uv = p.uv_at(0, 0).unwrap();
    assert!((uv.x - 0.275).abs() < 1e-12);
    assert!((uv.y - 0.725).abs() < 1e-12);
}

#[test]
fn default_layout_is_a_centered_square_at_thirty_percent() {
    let layout = SurfaceLayout::default();
    assert_eq!(layout.aspect(), 1.0);
    let p = layout.place(canvas(1000, 500));
    assert!((p.rect.width() - 300.0).abs() < 1e-9);
    assert!((p.rect.height() - 300.0).abs() < 1e-9);
    assert!((p.rect.center().x - 500.0).abs() < 1e-9);
    assert!((p.rect.center().y - 250.0).abs() < 1e-9);
}

#[test]
fn validation_rejects_non_positive_sizes() {
    assert!(SurfaceLayout::default().validate().is_ok());
    assert!(square(100.0, 0.0, Fit::Cover).validate().is_err());
    assert!(
        SurfaceLayout {
            design_height: f64::NAN,
            ..SurfaceLayout::default()
        }
        .validate()
        .is_err()
    );
}
