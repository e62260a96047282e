// Fixed demo constants. Nothing here is read from the environment or disk;
// the struct only exists so setup code and tests share one source of truth.

use crate::error::Error;

pub const NUM_TILES: usize = 120;
pub const TILE_WIDTH: u32 = 90;
pub const TILE_HEIGHT: u32 = 60;
/// Lowest value any color channel may take (keeps tiles visible).
pub const CHANNEL_MIN: u8 = 10;
pub const LOGICAL_WIDTH: u32 = 1024;
pub const LOGICAL_HEIGHT: u32 = 768;
pub const WINDOW_TITLE: &str = "Demo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub num_tiles: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    pub channel_min: u8,
    pub logical_width: u32,
    pub logical_height: u32,
    pub title: &'static str,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            num_tiles: NUM_TILES,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            channel_min: CHANNEL_MIN,
            logical_width: LOGICAL_WIDTH,
            logical_height: LOGICAL_HEIGHT,
            title: WINDOW_TITLE,
        }
    }
}

impl DemoConfig {
    /// Reject constant combinations the composite pass cannot honor
    /// (a tile must fit entirely inside the logical buffer).
    pub fn validate(&self) -> Result<(), Error> {
        if self.num_tiles == 0 {
            return Err(Error::Config("tile count must be positive".into()));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(Error::Config(format!(
                "tile extent {}x{} is empty",
                self.tile_width, self.tile_height
            )));
        }
        if self.tile_width > self.logical_width || self.tile_height > self.logical_height {
            return Err(Error::Config(format!(
                "tile {}x{} does not fit the {}x{} buffer",
                self.tile_width, self.tile_height, self.logical_width, self.logical_height
            )));
        }
        Ok(())
    }
}
