use bytebox_common::Color;

use super::map::{PALETTE_ADDR, VIDEO_ADDR, VIDEO_SIZE};
use super::AddressSpace;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Power-on palette, darkest to lightest.
pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::from_hex(0x0F0F1B),
    Color::from_hex(0x565A75),
    Color::from_hex(0xC6B7BE),
    Color::from_hex(0xFAFBF6),
];

/// Byte address and bit shift of pixel `(x, y)` in the packed framebuffer.
///
/// Four pixels share a byte; pixel `x % 4 == 0` sits in the two lowest
/// bits. Coordinates outside the screen are not rejected: the arithmetic
/// wraps and lands on some byte of the address space, mirroring the
/// permissive `poke` contract.
#[inline]
pub fn pixel_location(x: usize, y: usize) -> (u16, u8) {
    let index = y.wrapping_mul(SCREEN_WIDTH).wrapping_add(x);
    let address = VIDEO_ADDR.wrapping_add((index / 4) as u16);
    let shift = ((x % 4) * 2) as u8;
    (address, shift)
}

impl AddressSpace {
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u8) {
        let (address, shift) = pixel_location(x, y);
        let byte = self.read(address);
        let cleared = byte & !(0b11 << shift);
        self.write(address, cleared | ((color & 0b11) << shift));
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let (address, shift) = pixel_location(x, y);
        (self.read(address) >> shift) & 0b11
    }

    /// Blanks the whole framebuffer to color index 0.
    pub fn clear_video(&mut self) {
        self.fill(VIDEO_ADDR, VIDEO_SIZE, 0x00);
    }

    pub fn video(&self) -> &[u8] {
        self.slice(VIDEO_ADDR, VIDEO_SIZE)
    }

    pub fn palette(&self) -> [Color; 4] {
        let raw = self.slice(PALETTE_ADDR, 12);
        std::array::from_fn(|i| Color::from_bytes([raw[i * 3], raw[i * 3 + 1], raw[i * 3 + 2]]))
    }

    pub fn set_palette(&mut self, palette: &[Color; 4]) {
        for (i, color) in palette.iter().enumerate() {
            self.load(PALETTE_ADDR + (i as u16) * 3, &color.to_bytes());
        }
    }

    /// Expands the framebuffer through the current palette into `buffer`
    /// as RGB24 (3 bytes per pixel, row-major).
    ///
    /// A short buffer receives as many whole pixels as fit.
    pub fn render_rgb24(&self, buffer: &mut [u8]) {
        let palette = self.palette().map(|c| c.to_bytes());
        let pixels = (buffer.len() / 3).min(SCREEN_WIDTH * SCREEN_HEIGHT);

        for (i, rgb) in buffer.chunks_exact_mut(3).take(pixels).enumerate() {
            let color = self.pixel(i % SCREEN_WIDTH, i / SCREEN_WIDTH);
            rgb.copy_from_slice(&palette[color as usize]);
        }
    }
}
