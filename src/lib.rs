// Random translucent tiles, composited once, shown full screen until
// the window is closed or Escape is pressed.

pub mod app;
pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod memory;
pub mod tiles;
pub mod types;

#[cfg(test)]
mod headless;
