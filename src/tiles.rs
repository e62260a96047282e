// Texture generator: a fixed number of small single-color RGBA tiles.
// Each channel (R, G, B, A) is drawn independently from [channel_min, 255]
// so no tile ends up fully transparent or invisible.

use crate::config::DemoConfig;
use crate::error::Error;
use crate::memory::TextureMemory;
use image::{Rgba, RgbaImage};
use log::debug;
use rand::Rng;

/// One generated tile. Immutable once built.
#[derive(Clone, Debug)]
pub struct Tile {
    image: RgbaImage,
    color: Rgba<u8>,
}

impl Tile {
    /// Allocate a `width` x `height` image through `memory` and flood it with `color`.
    pub fn filled(
        width: u32,
        height: u32,
        color: Rgba<u8>,
        memory: &mut TextureMemory,
    ) -> Result<Self, Error> {
        let mut raw: Vec<u8> = memory.allocate("tile", width, height, 4)?;
        for _ in 0..(width as usize * height as usize) {
            raw.extend_from_slice(&color.0);
        }
        let image = RgbaImage::from_raw(width, height, raw).ok_or_else(|| {
            Error::TextureAlloc(format!("tile {width}x{height}: short pixel storage"))
        })?;
        Ok(Self { image, color })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The fill color as straight (non-premultiplied) RGBA.
    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

pub struct TileGenerator {
    count: usize,
    width: u32,
    height: u32,
    channel_min: u8,
}

impl TileGenerator {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            count: config.num_tiles,
            width: config.tile_width,
            height: config.tile_height,
            channel_min: config.channel_min,
        }
    }

    /// Draw one color: R, G, B, then A, each uniform over [channel_min, 255].
    pub fn sample_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba<u8> {
        let r = rng.random_range(self.channel_min..=u8::MAX);
        let g = rng.random_range(self.channel_min..=u8::MAX);
        let b = rng.random_range(self.channel_min..=u8::MAX);
        let a = rng.random_range(self.channel_min..=u8::MAX);
        Rgba([r, g, b, a])
    }

    /// Build all tiles in order. The first allocation failure aborts the whole
    /// step; tiles built so far are dropped with the partial vector.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        memory: &mut TextureMemory,
    ) -> Result<Vec<Tile>, Error> {
        let mut tiles = Vec::with_capacity(self.count);
        for index in 0..self.count {
            let color = self.sample_color(rng);
            let tile = Tile::filled(self.width, self.height, color, memory).map_err(|e| match e {
                Error::TextureAlloc(s) => Error::TextureAlloc(format!("tile #{index}: {s}")),
                other => other,
            })?;
            debug!("tile #{index}: rgba{:?}", color.0);
            tiles.push(tile);
        }
        Ok(tiles)
    }
}
