// Display surface: where the composite buffer ends up every loop iteration.
// The real backend is a minifb window; tests use `headless::HeadlessDisplay`.

use crate::config::DemoConfig;
use crate::error::Error;
use crate::memory::TextureMemory;
use crate::types::FrameBuffer;
use display_info::DisplayInfo;
pub use minifb::Key;
use minifb::{Scale, ScaleMode, Window, WindowOptions};

/// Resolution of one host monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub primary: bool,
}

impl DisplayMode {
    /// Current mode of the primary monitor.
    pub fn query() -> Result<Self, Error> {
        let displays = DisplayInfo::all().map_err(|e| Error::DisplayMode(e.to_string()))?;
        let modes: Vec<DisplayMode> = displays
            .iter()
            .map(|d| DisplayMode { width: d.width, height: d.height, primary: d.is_primary })
            .collect();
        Self::pick(&modes)
    }

    /// The primary monitor, else the first one listed. Empty modes are rejected.
    pub fn pick(modes: &[DisplayMode]) -> Result<Self, Error> {
        let mode = modes
            .iter()
            .find(|m| m.primary)
            .or_else(|| modes.first())
            .copied()
            .ok_or_else(|| Error::DisplayMode("no display attached".into()))?;
        if mode.width == 0 || mode.height == 0 {
            return Err(Error::DisplayMode(format!(
                "display reports {}x{}",
                mode.width, mode.height
            )));
        }
        Ok(mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    CloseRequested,
    KeyDown(Key),
}

impl DisplayEvent {
    /// Only a close request or Escape ends the demo; everything else is ignored.
    pub fn is_exit_trigger(&self) -> bool {
        matches!(self, DisplayEvent::CloseRequested | DisplayEvent::KeyDown(Key::Escape))
    }
}

pub trait Display {
    /// At most one pending event. Must not block.
    fn poll_event(&mut self) -> Option<DisplayEvent>;

    /// Copy `frame` over the whole surface (no blending) and show it.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error>;

    /// Memory the backend lets the demo spend on the buffer and tiles.
    fn texture_memory(&self) -> TextureMemory;
}

/// `set_target_fps` value that turns minifb's default update cap off.
const UNCAPPED_FPS: usize = 0;

/// Window chrome for a full-monitor surface: no border, drawn 1:1 at the
/// monitor size, with the logical buffer stretched inside it.
fn window_options() -> WindowOptions {
    WindowOptions {
        borderless: true,
        title: false,
        resize: false,
        topmost: true,
        scale: Scale::X1,
        scale_mode: ScaleMode::AspectRatioStretch,
        ..WindowOptions::default()
    }
}

pub struct MinifbDisplay {
    window: Window, // the on-screen window you see
}

impl MinifbDisplay {
    /// Borderless window covering the whole monitor. The logical buffer keeps
    /// its fixed size and minifb stretches it to the window (keeping aspect).
    pub fn open(config: &DemoConfig, mode: DisplayMode) -> Result<Self, Error> {
        let mut window = Window::new(
            config.title,
            mode.width as usize,
            mode.height as usize,
            window_options(),
        )
        .map_err(|e| Error::WindowInit(e.to_string()))?;
        // minifb sleeps in every update unless the cap is lifted.
        window.set_target_fps(UNCAPPED_FPS);
        window.set_position(0, 0);
        Ok(Self { window })
    }
}

impl Display for MinifbDisplay {
    fn poll_event(&mut self) -> Option<DisplayEvent> {
        // minifb keeps no queue; window state is refreshed by each present.
        if !self.window.is_open() {
            Some(DisplayEvent::CloseRequested)
        } else if self.window.is_key_down(Key::Escape) {
            Some(DisplayEvent::KeyDown(Key::Escape))
        } else {
            None
        }
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    fn texture_memory(&self) -> TextureMemory {
        TextureMemory::unbounded()
    }
}
