use super::*;
use crate::assets::texture::{ColorImage, DepthImage};
use crate::effects::scan::{BrightnessVariation, EffectParams};
use crate::foundation::core::Vec2;
use crate::render::layout::Fit;

fn images(rgba: [u8; 4], depth: f32) -> SourceImages {
    SourceImages::new(
        ColorImage::solid(4, 4, rgba).unwrap(),
        DepthImage::uniform(4, 4, depth).unwrap(),
    )
}

fn gradient_images() -> SourceImages {
    let (w, h) = (16u32, 16u32);
    let mut rgba = Vec::with_capacity((w * h * 4) as usize);
    let mut depth = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            rgba.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 90, 255]);
            depth.push((x + y) as f32 / 30.0);
        }
    }
    SourceImages::new(
        ColorImage::from_rgba8(w, h, rgba).unwrap(),
        DepthImage::from_values(w, h, depth).unwrap(),
    )
}

fn layout(side: f64, scale: f64) -> SurfaceLayout {
    SurfaceLayout {
        design_width: side,
        design_height: side,
        scale,
        fit: Fit::Cover,
    }
}

fn rasterizer(params: EffectParams, canvas: Canvas, surface: SurfaceLayout) -> CpuRasterizer {
    CpuRasterizer::new(
        DistortionEffect::new(params).unwrap(),
        surface,
        canvas,
        [0, 0, 0, 255],
    )
    .unwrap()
}

#[test]
fn unlit_surface_shows_base_color_over_background() {
    let r = rasterizer(
        EffectParams::default(),
        Canvas {
            width: 8,
            height: 8,
        },
        layout(4.0, 0.5),
    );
    let frame = r
        .render(
            &images([128, 64, 32, 255], 0.0),
            Uniforms {
                pointer: Vec2::ZERO,
                progress: 1.0,
            },
            None,
        )
        .unwrap();

    assert!(frame.premultiplied);
    assert_eq!((frame.width, frame.height), (8, 8));
    assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(frame.pixel(7, 7), [0, 0, 0, 255]);
    assert_eq!(frame.pixel(3, 3), [128, 64, 32, 255]);
    assert_eq!(frame.pixel(5, 2), [128, 64, 32, 255]);
    assert_eq!(frame.pixel(6, 2), [0, 0, 0, 255]);
}

#[test]
fn transparent_source_keeps_background() {
    let r = CpuRasterizer::new(
        DistortionEffect::new(EffectParams::default()).unwrap(),
        layout(4.0, 1.0),
        Canvas {
            width: 4,
            height: 4,
        },
        [10, 20, 30, 255],
    )
    .unwrap();
    let frame = r
        .render(
            &images([200, 200, 200, 0], 0.0),
            Uniforms {
                pointer: Vec2::ZERO,
                progress: 1.0,
            },
            None,
        )
        .unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn lit_band_saturates_red() {
    let params = EffectParams {
        brightness: BrightnessVariation::Flat,
        ..EffectParams::default()
    };
    let r = rasterizer(
        params,
        Canvas {
            width: 64,
            height: 64,
        },
        layout(1.0, 1.0),
    );
    let frame = r
        .render(
            &images([0, 0, 0, 255], 0.5),
            Uniforms {
                pointer: Vec2::ZERO,
                progress: 0.5,
            },
            None,
        )
        .unwrap();

    assert_eq!(frame.pixel(0, 0), [255, 0, 0, 255]);
    assert!(frame.data.chunks_exact(4).all(|px| px[1] == 0 && px[2] == 0));
}

#[test]
fn parallel_rows_match_sequential() {
    let r = rasterizer(
        EffectParams::default(),
        Canvas {
            width: 48,
            height: 32,
        },
        layout(1.0, 0.8),
    );
    let imgs = gradient_images();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(3)
        .build()
        .unwrap();

    for (pointer, progress) in [(Vec2::new(0.3, -0.7), 0.4), (Vec2::new(-1.0, 1.0), 0.9)] {
        let u = Uniforms { pointer, progress };
        let seq = r.render(&imgs, u, None).unwrap();
        let par = r.render(&imgs, u, Some(&pool)).unwrap();
        assert_eq!(seq, par);
    }
}

#[test]
fn rejects_empty_canvas_and_bad_layout() {
    let effect = DistortionEffect::new(EffectParams::default()).unwrap();
    assert!(
        CpuRasterizer::new(
            effect.clone(),
            SurfaceLayout::default(),
            Canvas {
                width: 0,
                height: 10,
            },
            [0, 0, 0, 255],
        )
        .is_err()
    );
    assert!(
        CpuRasterizer::new(
            effect,
            layout(1.0, -1.0),
            Canvas {
                width: 10,
                height: 10,
            },
            [0, 0, 0, 255],
        )
        .is_err()
    );
}
