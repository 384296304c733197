//! # RGB565 像素格式转换
//!
//! 将 8 位/通道的 RGB888 压缩为 16 位 RGB565：
//! 红色取高 5 位放在 bit 11–15，绿色取高 6 位放在 bit 5–10，蓝色取高 5 位放在 bit 0–4。
//!
//! 输出字节序固定为小端（低字节在前），下游 LVGL 按此顺序读取，不可调整。

use image::{Rgb, RgbImage};

/// 16 位打包颜色值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const BLACK: Rgb565 = Rgb565(0x0000);

    /// 截断低位后拼接三个通道。
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r >> 3) as u16 & 0x1F;
        let g6 = (g >> 2) as u16 & 0x3F;
        let b5 = (b >> 3) as u16 & 0x1F;
        Rgb565((r5 << 11) | (g6 << 5) | b5)
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// 按位左移还原为 8 位通道，丢失的低位补零。
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        (self.red() << 3, self.green() << 2, self.blue() << 3)
    }

    /// 小端字节对：`[低字节, 高字节]`。
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl From<Rgb<u8>> for Rgb565 {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Rgb565::from_rgb888(r, g, b)
    }
}

/// 按行优先顺序把整张图编码为 RGB565 小端字节流。
///
/// 输出长度恒为 `2 * width * height`。
pub fn encode_rgb565(image: &RgbImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.width() as usize * image.height() as usize * 2);
    for pixel in image.pixels() {
        out.extend_from_slice(&Rgb565::from(*pixel).to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn white_packs_to_all_ones() {
        let packed = Rgb565::from_rgb888(255, 255, 255);

        assert_eq!(packed, Rgb565::WHITE);
        assert_eq!(packed.to_le_bytes(), [0xFF, 0xFF]);
    }

    #[test]
    fn pure_red_is_emitted_low_byte_first() {
        let packed = Rgb565::from_rgb888(255, 0, 0);

        assert_eq!(packed.0, 0xF800);
        assert_eq!(packed.to_le_bytes(), [0x00, 0xF8]);
    }

    #[test]
    fn pure_green_and_blue_land_in_their_fields() {
        assert_eq!(Rgb565::from_rgb888(0, 255, 0).0, 0x07E0);
        assert_eq!(Rgb565::from_rgb888(0, 0, 255).0, 0x001F);
        assert_eq!(Rgb565::from_rgb888(0, 0, 0), Rgb565::BLACK);
    }

    #[test]
    fn encode_rgb565_is_row_major() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 1, Rgb([255, 255, 255]));

        let bytes = encode_rgb565(&image);

        assert_eq!(
            bytes,
            vec![0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF, 0xFF]
        );
    }

    proptest! {
        #[test]
        fn round_trip_keeps_top_bits(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let packed = Rgb565::from_rgb888(r, g, b);
            let (r2, g2, b2) = packed.to_rgb888();

            prop_assert_eq!(r2, r & 0xF8);
            prop_assert_eq!(g2, g & 0xFC);
            prop_assert_eq!(b2, b & 0xF8);
            prop_assert_eq!(Rgb565::from_rgb888(r2, g2, b2), packed);
        }

        #[test]
        fn byte_length_is_twice_pixel_count(w in 1u32..16, h in 1u32..16) {
            let image = RgbImage::new(w, h);
            prop_assert_eq!(encode_rgb565(&image).len(), (2 * w * h) as usize);
        }
    }
}
