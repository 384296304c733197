// 端到端：模板 + Logo → 自定义测试图
use std::path::Path;

use image::{Rgba, RgbaImage};
use panel_assets::AssetError;
use panel_assets::compositor::{self, CompositorConfig, FontSource, TextLine};

const CANVAS: Rgba<u8> = Rgba([30, 160, 90, 255]);

fn write_template(path: &Path, holes: &[(u32, u32, u32, u32)]) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(240, 180, CANVAS);
    for &(x0, y0, x1, y1) in holes {
        for y in y0..=y1 {
            for x in x0..=x1 {
                image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }
    image.save(path).expect("save template failed");
    image
}

fn write_logo(path: &Path) {
    RgbaImage::from_pixel(64, 64, Rgba([250, 250, 10, 255]))
        .save(path)
        .expect("save logo failed");
}

fn project(dir: &Path) -> CompositorConfig {
    std::fs::create_dir_all(dir.join("assets")).expect("mkdir failed");
    CompositorConfig::with_root(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_writes_opaque_rgb_output() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let config = project(dir.path())
            .with_text("PRO", "Self Test")
            .with_font(FontSource::File(dir.path().join("missing-font.ttf")));

        let template = write_template(
            &config.template_path,
            &[(20, 20, 99, 99), (120, 120, 229, 169), (150, 20, 179, 49)],
        );
        write_logo(&config.logo_path);

        let report = compositor::run(&config).expect("run failed");

        assert_eq!((report.width, report.height), (240, 180));
        assert_eq!(report.placeholders.logo_circle.area, 80 * 80);
        assert_eq!(report.placeholders.text_block.area, 110 * 50);
        assert_eq!(report.placeholders.badge.area, 30 * 30);

        let output = image::open(&config.output_path).expect("open output failed");
        assert_eq!(output.color(), image::ColorType::Rgb8);
        let output = output.to_rgb8();

        // 圆心附近是 Logo
        let center = output.get_pixel(59, 59).0;
        assert!(center[0] > 240 && center[1] > 240 && center[2] < 30, "{center:?}");

        // Logo 圆盘之外且不在任何区域内的像素保持不变
        let circle = report.placeholders.logo_circle.circle();
        let radius = report.logo_size as f32 / 2.0;
        let (cx, cy) = (
            report.logo_origin.0 as f32 + radius,
            report.logo_origin.1 as f32 + radius,
        );
        for (x, y, pixel) in output.enumerate_pixels() {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let in_disk = dx * dx + dy * dy <= radius * radius;
            let original = template.get_pixel(x, y);
            if !in_disk && original.0[3] == 255 {
                assert_eq!(pixel.0, [original.0[0], original.0[1], original.0[2]], "({x}, {y})");
            }
        }
        assert_eq!(circle.radius, 39);

        // 文字块背景：内置字体下 "PRO" 宽 68px，左上角与右上角都不会落在笔画上
        assert_eq!(output.get_pixel(120, 120).0, [128, 128, 128]);
        assert_eq!(output.get_pixel(229, 120).0, [128, 128, 128]);
        assert_eq!(output.get_pixel(150, 20).0, [128, 128, 128]);
    }

    #[test]
    fn template_with_two_holes_writes_no_output() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let config = project(dir.path());
        write_template(&config.template_path, &[(20, 20, 99, 99), (150, 20, 179, 49)]);
        write_logo(&config.logo_path);

        let result = compositor::run(&config);

        assert!(matches!(
            result,
            Err(AssetError::RegionCount { expected: 3, found: 2 })
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn missing_logo_is_a_filesystem_error() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let config = project(dir.path());
        write_template(
            &config.template_path,
            &[(20, 20, 99, 99), (120, 120, 229, 169), (150, 20, 179, 49)],
        );

        let result = compositor::run(&config);

        assert!(matches!(result, Err(AssetError::FileSystem(_))));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn opaque_template_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let config = project(dir.path());
        image::RgbImage::from_pixel(40, 40, image::Rgb([1, 2, 3]))
            .save(&config.template_path)
            .expect("save failed");
        write_logo(&config.logo_path);

        let result = compositor::run(&config);

        assert!(matches!(result, Err(AssetError::InvalidFormat(_))));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn badge_text_is_centered_in_its_square() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let mut config = project(dir.path()).with_font(FontSource::Builtin);
        config.badge = TextLine::new("ADA", 8.0);
        let template = write_template(
            &config.template_path,
            &[(20, 20, 99, 99), (120, 120, 229, 169), (150, 20, 179, 49)],
        );
        write_logo(&config.logo_path);

        let logo = image::open(&config.logo_path).expect("open logo failed").to_rgba8();
        let (output, report) = compositor::compose(&template, &logo, &config).expect("compose failed");

        let badge = report.placeholders.badge;
        let ink: Vec<u32> = (badge.min_y..=badge.max_y)
            .flat_map(|y| (badge.min_x..=badge.max_x).map(move |x| (x, y)))
            .filter(|&(x, y)| output.get_pixel(x, y).0 != [128, 128, 128])
            .map(|(x, _)| x)
            .collect();
        let min_x = *ink.iter().min().expect("no ink");
        let max_x = *ink.iter().max().expect("no ink");

        let ink_center = (min_x + max_x + 1) as f32 / 2.0;
        let badge_center = badge.min_x as f32 + badge.width() as f32 / 2.0;
        assert!((ink_center - badge_center).abs() <= 1.0);
    }
}
