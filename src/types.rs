// Core types shared by the compositor and the display backends.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // logical width in pixels
    pub height: usize,     // logical height in pixels
    pub pixels: Vec<u32>,  // each entry is 0xAARRGGBB; minifb ignores the top byte
}

impl FrameBuffer {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Where one tile landed in the composite pass (top-left corner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

pub const OPAQUE_BLACK: u32 = 0xFF_00_00_00;

#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split 0xAARRGGBB into (a, r, g, b).
#[inline]
pub fn unpack_argb(px: u32) -> (u8, u8, u8, u8) {
    ((px >> 24) as u8, (px >> 16) as u8, (px >> 8) as u8, px as u8)
}
