use super::*;

fn black_white_row() -> ColorImage {
    ColorImage::from_rgba8(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap()
}

#[test]
fn bilinear_hits_texel_centers_exactly() {
    let img = black_white_row();
    assert_eq!(
        img.sample(Point::new(0.25, 0.5), SampleFilter::Bilinear),
        [0.0, 0.0, 0.0, 1.0]
    );
    assert_eq!(
        img.sample(Point::new(0.75, 0.5), SampleFilter::Bilinear),
        [1.0, 1.0, 1.0, 1.0]
    );
    let mid = img.sample(Point::new(0.5, 0.5), SampleFilter::Bilinear);
    assert!((mid[0] - 0.5).abs() < 1e-6);
    assert_eq!(mid[3], 1.0);
}

#[test]
fn sampling_clamps_to_edge() {
    let img = black_white_row();
    for filter in [SampleFilter::Bilinear, SampleFilter::Nearest] {
        assert_eq!(img.sample(Point::new(-1.0, 0.5), filter)[0], 0.0);
        assert_eq!(img.sample(Point::new(2.0, 0.5), filter)[0], 1.0);
        assert_eq!(img.sample(Point::new(0.25, -3.0), filter)[0], 0.0);
        assert_eq!(img.sample(Point::new(0.75, 7.0), filter)[0], 1.0);
    }
}

#[test]
fn v_axis_points_up() {
    // Row 0 (top) red, row 1 (bottom) blue.
    let img = ColorImage::from_rgba8(1, 2, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    assert_eq!(
        img.sample(Point::new(0.5, 0.75), SampleFilter::Bilinear),
        [1.0, 0.0, 0.0, 1.0]
    );
    assert_eq!(
        img.sample(Point::new(0.5, 0.25), SampleFilter::Bilinear),
        [0.0, 0.0, 1.0, 1.0]
    );
    assert_eq!(
        img.sample(Point::new(0.5, 0.9), SampleFilter::Nearest),
        [1.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn nearest_picks_containing_texel() {
    let img = black_white_row();
    assert_eq!(img.sample(Point::new(0.49, 0.5), SampleFilter::Nearest)[0], 0.0);
    assert_eq!(img.sample(Point::new(0.51, 0.5), SampleFilter::Nearest)[0], 1.0);
}

#[test]
fn depth_keeps_red_channel() {
    let depth = DepthImage::from_rgba8_red(2, 1, &[51, 200, 200, 255, 255, 0, 0, 0]).unwrap();
    assert_eq!(depth.texel(0, 0), 0.2);
    assert_eq!(depth.texel(1, 0), 1.0);
    assert_eq!(depth.sample(Point::new(0.25, 0.5), SampleFilter::Bilinear), 0.2);
}

#[test]
fn uniform_depth_is_exact_everywhere() {
    let depth = DepthImage::uniform(3, 3, 0.5).unwrap();
    for (u, v) in [(0.0, 0.0), (0.37, 0.81), (1.0, 1.0), (-0.2, 1.4)] {
        assert_eq!(depth.sample(Point::new(u, v), SampleFilter::Bilinear), 0.5);
    }
}

#[test]
fn rejects_bad_dimensions() {
    assert!(ColorImage::from_rgba8(0, 1, vec![]).is_err());
    assert!(ColorImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(DepthImage::from_values(2, 2, vec![0.0; 3]).is_err());
    assert!(DepthImage::uniform(1, 0, 0.0).is_err());
}

#[test]
fn huge_coordinates_clamp_without_overflow() {
    let img = black_white_row();
    let depth = DepthImage::uniform(3, 2, 0.5).unwrap();
    for filter in [SampleFilter::Bilinear, SampleFilter::Nearest] {
        assert_eq!(img.sample(Point::new(1e30, -1e30), filter)[0], 1.0);
        assert_eq!(img.sample(Point::new(-1e30, 1e30), filter)[0], 0.0);
        assert_eq!(depth.sample(Point::new(1e30, -1e30), filter), 0.5);
    }
}
