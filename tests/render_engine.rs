mod common;

use std::sync::Arc;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use zaplink_core::domain::entities::{BodyShape, EyeShape, LogoConfig, QrConfig};
use zaplink_core::domain::providers::NullLogoSource;
use zaplink_core::engine::{QrRenderer, RenderError, RenderedImage, finder_anchors};
use zaplink_core::infrastructure::DefaultLogoSource;

fn renderer() -> QrRenderer<NullLogoSource> {
    QrRenderer::new(Arc::new(NullLogoSource::new()))
}

fn config(size: u32, margin: u32) -> QrConfig {
    QrConfig {
        size,
        margin,
        ..QrConfig::for_data("https://zaplink.io")
    }
}

#[test]
fn test_exact_fit_has_no_offset() {
    let matrix = common::random_matrix(21, 0, 1);
    let image = renderer().render(&matrix, &config(210, 0)).unwrap();

    assert_eq!(image.size(), 210);
    assert_eq!(image.as_image().width(), 210);
    assert_eq!(image.as_image().height(), 210);
    assert_eq!(image.layout().module_size, 10);
    assert_eq!(image.layout().offset_x, 0);
}

#[test]
fn test_leftover_pixels_are_split() {
    let matrix = common::random_matrix(29, 2, 2);
    let image = renderer().render(&matrix, &config(512, 2)).unwrap();

    assert_eq!(image.as_image().width(), 512);
    assert_eq!(image.layout().module_size, 17);
    assert_eq!(image.layout().offset_x, 9);
    assert_eq!(image.layout().offset_y, 9);

    // The 9px band in front of the grid stays background.
    assert_eq!(image.pixel(4, 256), [255, 255, 255, 255]);
}

#[test]
fn test_size_smaller_than_matrix_is_rejected() {
    let matrix = common::random_matrix(25, 0, 3);
    let err = renderer().render(&matrix, &config(24, 0)).unwrap_err();

    assert!(matches!(err, RenderError::InvalidDimensions { matrix_size: 25, size: 24 }));
}

#[test]
fn test_square_render_follows_matrix() {
    let matrix = common::random_matrix(25, 2, 4);
    let image = renderer().render(&matrix, &config(250, 2)).unwrap();

    for y in 0..25 {
        for x in 0..25 {
            assert_eq!(
                common::is_dark(common::module_center(&image, x, y)),
                matrix.get(x, y),
                "module ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_styled_bodies_keep_module_centers() {
    let matrix = common::random_matrix(25, 1, 5);

    for shape in BodyShape::ALL {
        let mut config = config(250, 1);
        config.body.shape = shape;
        let image = renderer().render(&matrix, &config).unwrap();

        for y in 0..25 {
            for x in 0..25 {
                let dark = common::is_dark(common::module_center(&image, x, y));
                assert_eq!(dark, matrix.get(x, y), "{shape} module ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_every_style_is_deterministic() {
    let matrix = common::random_matrix(33, 2, 6);

    for body in BodyShape::ALL {
        for eye in EyeShape::ALL {
            let mut config = config(400, 2);
            config.body.shape = body;
            config.body.color_dark = Some("#7C3AED".to_string());
            config.eye.shape = eye;

            let first = renderer().render(&matrix, &config).unwrap();
            let second = renderer().render(&matrix, &config).unwrap();

            assert_eq!(
                first.as_image().as_bytes(),
                second.as_image().as_bytes(),
                "{body}/{eye} differs between runs"
            );
        }
    }
}

#[test]
fn test_custom_eyes_replace_finder_modules() {
    let matrix = common::dark_matrix(25, 0);
    let mut config = config(250, 0);
    config.eye.shape = EyeShape::Rounded;
    config.eye.color_outer = "#FF0000".to_string();
    config.eye.color_inner = "#0000FF".to_string();

    let image = renderer().render(&matrix, &config).unwrap();

    for (ax, ay) in [(0, 0), (18, 0), (0, 18)] {
        // Middle of the top wall, the light gap, and the dot.
        assert_eq!(common::module_center(&image, ax + 3, ay), [255, 0, 0, 255]);
        assert_eq!(common::module_center(&image, ax + 3, ay + 1), [255, 255, 255, 255]);
        assert_eq!(common::module_center(&image, ax + 3, ay + 3), [0, 0, 255, 255]);
    }

    // Data modules keep the body color.
    assert_eq!(common::module_center(&image, 12, 12), [0, 0, 0, 255]);
}

fn in_finder_box(image: &RenderedImage, margin: u32, x: u32, y: u32) -> bool {
    let layout = image.layout();
    let side = i64::from(7 * layout.module_size);
    finder_anchors(layout.matrix_size, margin)
        .into_iter()
        .any(|(ax, ay)| {
            let (ox, oy) = layout.module_origin(ax, ay);
            let (ox, oy) = (ox as i64, oy as i64);
            let (x, y) = (i64::from(x), i64::from(y));
            x >= ox && x < ox + side && y >= oy && y < oy + side
        })
}

#[test]
fn test_custom_eyes_only_change_finder_regions() {
    let matrix = common::random_matrix(29, 2, 8);

    for body in BodyShape::ALL {
        let mut config = config(320, 2);
        config.body.shape = body;
        config.eye.color_outer = "#DC2626".to_string();
        config.eye.color_inner = "#2563EB".to_string();
        let plain = renderer().render(&matrix, &config).unwrap();

        for eye in [EyeShape::Rounded, EyeShape::Circle, EyeShape::Leaf] {
            config.eye.shape = eye;
            let styled = renderer().render(&matrix, &config).unwrap();

            let mut finder_pixels_changed = false;
            for y in 0..320 {
                for x in 0..320 {
                    let same = plain.pixel(x, y) == styled.pixel(x, y);
                    if in_finder_box(&plain, 2, x, y) {
                        finder_pixels_changed |= !same;
                    } else {
                        assert!(same, "{body}/{eye} changed pixel ({x}, {y}) outside the eyes");
                    }
                }
            }
            assert!(finder_pixels_changed, "{body}/{eye} left the eyes untouched");
        }
    }
}

#[test]
fn test_square_eyes_are_painted_by_body_pass() {
    let matrix = common::dark_matrix(25, 0);
    let mut config = config(250, 0);
    config.body.color = "#00FF00".to_string();
    config.eye.color_outer = "#FF0000".to_string();

    let image = renderer().render(&matrix, &config).unwrap();

    assert_eq!(common::module_center(&image, 3, 0), [0, 255, 0, 255]);
}

#[test]
fn test_linear_gradient_runs_corner_to_corner() {
    let matrix = common::dark_matrix(25, 0);
    let mut config = config(250, 0);
    config.body.color = "#000000".to_string();
    config.body.color_dark = Some("#0000FF".to_string());
    config.body.gradient_linear = true;

    let image = renderer().render(&matrix, &config).unwrap();

    let [_, _, start_blue, _] = image.pixel(0, 0);
    let [_, _, end_blue, _] = image.pixel(249, 249);
    assert!(start_blue <= 2, "start was {start_blue}");
    assert!(end_blue >= 253, "end was {end_blue}");
}

#[test]
fn test_invalid_colors_fall_back_to_black() {
    let matrix = common::dark_matrix(25, 0);
    let mut config = config(250, 0);
    config.body.color = "not-a-color".to_string();

    let image = renderer().render(&matrix, &config).unwrap();
    assert_eq!(common::module_center(&image, 12, 12), [0, 0, 0, 255]);
}

#[test]
fn test_transparent_background() {
    let matrix = common::random_matrix(21, 0, 7);
    let mut config = config(210, 0);
    config.transparent_background = true;

    let image = renderer().render(&matrix, &config).unwrap();

    assert!(image.has_alpha());
    for y in 0..21 {
        for x in 0..21 {
            let alpha = common::module_center(&image, x, y)[3];
            assert_eq!(alpha == 255, matrix.get(x, y), "module ({x}, {y})");
        }
    }
}

fn logo_renderer(dir: &std::path::Path) -> QrRenderer<DefaultLogoSource> {
    QrRenderer::new(Arc::new(
        DefaultLogoSource::new(dir, Duration::from_secs(1)).unwrap(),
    ))
}

fn logo_config(remove_quiet_zone: bool) -> LogoConfig {
    LogoConfig {
        logo_path: Some("logo.png".to_string()),
        size_ratio: 0.2,
        padding: 0,
        background_enabled: false,
        margin_size: 1,
        remove_quiet_zone,
        ..LogoConfig::default()
    }
}

#[test]
fn test_logo_clearance_removes_intersecting_modules() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]))
        .save(dir.path().join("logo.png"))
        .unwrap();

    let matrix = common::dark_matrix(25, 0);
    let mut config = config(500, 0);
    config.logo = Some(logo_config(true));

    let image = logo_renderer(dir.path()).render(&matrix, &config).unwrap();

    // Logo occupies 200..300; clearance adds one 20px module: 180..320.
    for y in 160..340 {
        for x in 160..340 {
            let pixel = image.pixel(x, y);
            let in_logo = (200..300).contains(&x) && (200..300).contains(&y);
            let in_clearance = (180..320).contains(&x) && (180..320).contains(&y);

            if in_logo {
                assert_eq!(pixel, [255, 0, 0, 255], "logo pixel ({x}, {y})");
            } else if in_clearance {
                assert_eq!(pixel, [255, 255, 255, 255], "cleared pixel ({x}, {y})");
            } else {
                assert_eq!(pixel, [0, 0, 0, 255], "module pixel ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_logo_without_clearance_keeps_modules_around_it() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]))
        .save(dir.path().join("logo.png"))
        .unwrap();

    let matrix = common::dark_matrix(25, 0);
    let mut config = config(500, 0);
    config.logo = Some(logo_config(false));

    let image = logo_renderer(dir.path()).render(&matrix, &config).unwrap();

    assert_eq!(image.pixel(250, 250), [255, 0, 0, 255]);
    assert_eq!(common::module_center(&image, 9, 9), [0, 0, 0, 255]);
}

#[test]
fn test_missing_logo_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let matrix = common::dark_matrix(25, 0);
    let mut config = config(500, 0);
    config.logo = Some(logo_config(true));

    let image = logo_renderer(dir.path()).render(&matrix, &config).unwrap();

    // No logo means no clearance either.
    assert_eq!(common::module_center(&image, 12, 12), [0, 0, 0, 255]);
}
