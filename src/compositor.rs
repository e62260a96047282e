// One-shot compositor.
// `Canvas` is the composite buffer while it is still writable; running the
// pass consumes it and yields a read-only `Composite`, so the tiles can only
// ever be drawn once per run.

use crate::error::Error;
use crate::memory::TextureMemory;
use crate::tiles::Tile;
use crate::types::{FrameBuffer, OPAQUE_BLACK, Placement, pack_argb, unpack_argb};
use image::Rgba;
use log::{debug, info};
use rand::Rng;

pub struct Canvas {
    buffer: FrameBuffer,
}

impl Canvas {
    /// Allocate the off-screen buffer and clear it to opaque black.
    pub fn new(width: u32, height: u32, memory: &mut TextureMemory) -> Result<Self, Error> {
        let mut pixels: Vec<u32> = memory.allocate("composite buffer", width, height, 1)?;
        pixels.resize(width as usize * height as usize, OPAQUE_BLACK);
        Ok(Self {
            buffer: FrameBuffer {
                width: width as usize,
                height: height as usize,
                pixels,
            },
        })
    }

    /// The single composite pass with random positions: for each tile in
    /// order, X then Y uniform over [0, extent - tile extent]. A tile larger
    /// than the buffer has no valid position and fails the pass.
    pub fn composite<R: Rng + ?Sized>(
        self,
        tiles: &[Tile],
        rng: &mut R,
    ) -> Result<Composite, Error> {
        let origin = Placement { x: 0, y: 0 };
        if let Some((index, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(_, tile)| !fits(&self.buffer, tile, origin))
        {
            return Err(Error::Placement(format!(
                "tile #{index} {}x{} is larger than the {}x{} buffer",
                tile.width(),
                tile.height(),
                self.buffer.width,
                self.buffer.height
            )));
        }

        let max_x = self.buffer.width as u32;
        let max_y = self.buffer.height as u32;
        let placements: Vec<Placement> = tiles
            .iter()
            .map(|tile| {
                let x = rng.random_range(0..=max_x - tile.width());
                let y = rng.random_range(0..=max_y - tile.height());
                Placement { x, y }
            })
            .collect();
        Ok(self.blit_all(tiles, placements))
    }

    /// Same pass with caller-chosen positions.
    pub fn composite_at(
        self,
        tiles: &[Tile],
        placements: &[Placement],
    ) -> Result<Composite, Error> {
        if tiles.len() != placements.len() {
            return Err(Error::Placement(format!(
                "{} tiles but {} placements",
                tiles.len(),
                placements.len()
            )));
        }
        for (index, (tile, at)) in tiles.iter().zip(placements).enumerate() {
            if !fits(&self.buffer, tile, *at) {
                return Err(Error::Placement(format!(
                    "tile #{index} {}x{} at ({}, {}) leaves the {}x{} buffer",
                    tile.width(),
                    tile.height(),
                    at.x,
                    at.y,
                    self.buffer.width,
                    self.buffer.height
                )));
            }
        }
        Ok(self.blit_all(tiles, placements.to_vec()))
    }

    fn blit_all(mut self, tiles: &[Tile], placements: Vec<Placement>) -> Composite {
        for (index, (tile, at)) in tiles.iter().zip(&placements).enumerate() {
            debug!("tile #{index} -> ({}, {})", at.x, at.y);
            blend_tile(&mut self.buffer, tile, *at);
        }
        info!("composited {} tiles", placements.len());
        Composite { buffer: self.buffer, placements }
    }
}

/// The finished composite. Never written again.
pub struct Composite {
    buffer: FrameBuffer,
    placements: Vec<Placement>,
}

impl Composite {
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

fn fits(buffer: &FrameBuffer, tile: &Tile, at: Placement) -> bool {
    at.x as usize + tile.width() as usize <= buffer.width
        && at.y as usize + tile.height() as usize <= buffer.height
}

/// Source-over blend of every tile pixel into the buffer at `at`.
/// Callers guarantee the tile fits.
fn blend_tile(buffer: &mut FrameBuffer, tile: &Tile, at: Placement) {
    let (x0, y0) = (at.x as usize, at.y as usize);
    for (tx, ty, px) in tile.image().enumerate_pixels() {
        let idx = (y0 + ty as usize) * buffer.width + x0 + tx as usize;
        buffer.pixels[idx] = blend_over(buffer.pixels[idx], *px);
    }
}

/// dstRGB = srcRGB*srcA + dstRGB*(1-srcA); dstA = srcA + dstA*(1-srcA)
/// on 0..=255 integers, rounded to nearest.
#[inline]
pub fn blend_over(dst: u32, src: Rgba<u8>) -> u32 {
    let [sr, sg, sb, sa] = src.0;
    let (da, dr, dg, db) = unpack_argb(dst);
    let sa16 = sa as u32;
    let inv = 255 - sa16;
    let mix = |s: u8, d: u8| ((s as u32 * sa16 + d as u32 * inv + 127) / 255) as u8;
    let a = (sa16 + (da as u32 * inv + 127) / 255) as u8;
    pack_argb(a, mix(sr, dr), mix(sg, dg), mix(sb, db))
}
