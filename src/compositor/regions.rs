//! # 透明占位区域检测
//!
//! ## 设计思路
//!
//! 模板图中 alpha < 255 的像素视为“占位孔”。对整张图做 4 连通域标记，
//! 每个连通域汇总为包围盒与面积，按面积从大到小排序。
//!
//! 角色按面积排名分配：最大 → 圆形 Logo，第二 → 大文字矩形，第三 → 小方块徽标。
//! 这一映射不做形状校验，模板设计时需保证三者面积严格有序。
//!
//! ## 实现思路
//!
//! - 行优先扫描，遇到未访问的孔像素即以显式栈做洪泛填充，避免递归栈溢出。
//! - 访问标记使用 `FixedBitSet`，每像素 1 bit。

use fixedbitset::FixedBitSet;
use image::RgbaImage;

use crate::error::AssetError;

/// 需要的占位区域数量。
pub const REQUIRED_REGIONS: usize = 3;

/// 一个连通的透明区域。
///
/// 包围盒坐标为闭区间像素坐标。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// 区域内的像素数。
    pub area: usize,
}

/// 圆心与半径（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center_x: u32,
    pub center_y: u32,
    pub radius: u32,
}

impl Region {
    /// 包围盒覆盖的列数。
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// 包围盒覆盖的行数。
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// 把包围盒视为圆的外接正方形：中心取中点，半径取较短边跨度的一半。
    pub fn circle(&self) -> Circle {
        let span_x = self.max_x - self.min_x;
        let span_y = self.max_y - self.min_y;
        Circle {
            center_x: (self.min_x + self.max_x) / 2,
            center_y: (self.min_y + self.max_y) / 2,
            radius: (span_x / 2).min(span_y / 2),
        }
    }
}

/// 按角色分配后的三个占位区域。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    /// 面积最大：圆形 Logo 区域。
    pub logo_circle: Region,
    /// 面积第二：大文字矩形。
    pub text_block: Region,
    /// 面积第三：小方块徽标。
    pub badge: Region,
}

fn is_hole(image: &RgbaImage, x: u32, y: u32) -> bool {
    image.get_pixel(x, y).0[3] < u8::MAX
}

/// 标记所有 4 连通的透明区域，按面积降序返回。
///
/// 面积相同的区域保持扫描顺序。
pub fn label_transparent_regions(image: &RgbaImage) -> Vec<Region> {
    let (width, height) = image.dimensions();
    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;

    let mut visited = FixedBitSet::with_capacity(width as usize * height as usize);
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited.contains(index(x, y)) || !is_hole(image, x, y) {
                continue;
            }

            let mut region = Region {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                area: 0,
            };

            visited.insert(index(x, y));
            stack.push((x, y));

            while let Some((px, py)) = stack.pop() {
                region.area += 1;
                region.min_x = region.min_x.min(px);
                region.max_x = region.max_x.max(px);
                region.min_y = region.min_y.min(py);
                region.max_y = region.max_y.max(py);

                let neighbours = [
                    (px.checked_sub(1), Some(py)),
                    (px.checked_add(1).filter(|&nx| nx < width), Some(py)),
                    (Some(px), py.checked_sub(1)),
                    (Some(px), py.checked_add(1).filter(|&ny| ny < height)),
                ];

                for (nx, ny) in neighbours {
                    let (Some(nx), Some(ny)) = (nx, ny) else {
                        continue;
                    };
                    let slot = index(nx, ny);
                    if !visited.contains(slot) && is_hole(image, nx, ny) {
                        visited.insert(slot);
                        stack.push((nx, ny));
                    }
                }
            }

            log::debug!(
                "🔍 透明区域 #{}: ({}, {}) - ({}, {}) 面积 {}",
                regions.len() + 1,
                region.min_x,
                region.min_y,
                region.max_x,
                region.max_y,
                region.area
            );
            regions.push(region);
        }
    }

    regions.sort_by(|a, b| b.area.cmp(&a.area));
    regions
}

/// 检测三个占位区域并按面积排名分配角色。
///
/// 少于三个区域时返回 `AssetError::RegionCount`，调用方不得继续合成。
pub fn detect_placeholders(image: &RgbaImage) -> Result<Placeholders, AssetError> {
    let regions = label_transparent_regions(image);

    if regions.len() < REQUIRED_REGIONS {
        return Err(AssetError::RegionCount {
            expected: REQUIRED_REGIONS,
            found: regions.len(),
        });
    }

    if regions.len() > REQUIRED_REGIONS {
        log::warn!(
            "⚠️ 模板中有 {} 个透明区域，仅使用面积最大的 {} 个",
            regions.len(),
            REQUIRED_REGIONS
        );
    }

    Ok(Placeholders {
        logo_circle: regions[0],
        text_block: regions[1],
        badge: regions[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
    }

    fn punch(image: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, alpha: u8) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                image.put_pixel(x, y, Rgba([0, 0, 0, alpha]));
            }
        }
    }

    #[test]
    fn fully_opaque_image_has_no_regions() {
        assert!(label_transparent_regions(&opaque(10, 10)).is_empty());
    }

    #[test]
    fn partial_alpha_counts_as_hole() {
        let mut image = opaque(5, 5);
        image.put_pixel(2, 2, Rgba([0, 0, 0, 254]));

        let regions = label_transparent_regions(&image);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 1);
    }

    #[test]
    fn diagonal_neighbours_are_separate_regions() {
        let mut image = opaque(4, 4);
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        image.put_pixel(2, 2, Rgba([0, 0, 0, 0]));

        assert_eq!(label_transparent_regions(&image).len(), 2);
    }

    #[test]
    fn regions_touching_edges_are_labelled() {
        let mut image = opaque(6, 6);
        punch(&mut image, 0, 0, 5, 0, 0);

        let regions = label_transparent_regions(&image);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].width(), 6);
        assert_eq!(regions[0].height(), 1);
    }

    #[test]
    fn l_shaped_region_reports_box_and_true_area() {
        let mut image = opaque(10, 10);
        punch(&mut image, 2, 2, 2, 6, 0);
        punch(&mut image, 2, 6, 6, 6, 0);

        let regions = label_transparent_regions(&image);

        assert_eq!(regions.len(), 1);
        let region = regions[0];
        assert_eq!((region.min_x, region.min_y, region.max_x, region.max_y), (2, 2, 6, 6));
        assert_eq!(region.area, 9);
    }

    #[test]
    fn three_rectangles_are_sorted_by_area() {
        let mut image = opaque(100, 60);
        punch(&mut image, 70, 5, 79, 14, 0);
        punch(&mut image, 5, 5, 44, 44, 0);
        punch(&mut image, 5, 50, 64, 57, 0);

        let placeholders = detect_placeholders(&image).expect("detection failed");

        assert_eq!(
            placeholders.logo_circle,
            Region { min_x: 5, min_y: 5, max_x: 44, max_y: 44, area: 1600 }
        );
        assert_eq!(
            placeholders.text_block,
            Region { min_x: 5, min_y: 50, max_x: 64, max_y: 57, area: 480 }
        );
        assert_eq!(
            placeholders.badge,
            Region { min_x: 70, min_y: 5, max_x: 79, max_y: 14, area: 100 }
        );
    }

    #[test]
    fn fewer_than_three_regions_is_an_error() {
        let mut image = opaque(40, 40);
        punch(&mut image, 2, 2, 10, 10, 0);
        punch(&mut image, 20, 20, 30, 30, 0);

        let result = detect_placeholders(&image);

        assert!(matches!(
            result,
            Err(AssetError::RegionCount { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn circle_uses_midpoint_and_shorter_half_span() {
        let region = Region { min_x: 10, min_y: 20, max_x: 50, max_y: 56, area: 0 };

        assert_eq!(
            region.circle(),
            Circle { center_x: 30, center_y: 38, radius: 18 }
        );
    }
}
