// Application context: everything the demo owns between setup and shutdown.
// Two phases: `setup` (buffer, tiles, the single composite pass) and `run`
// (present the same buffer until a close request or Escape).

use crate::compositor::{Canvas, Composite};
use crate::config::DemoConfig;
use crate::display::Display;
use crate::error::Error;
use crate::tiles::{Tile, TileGenerator};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// The run's only random engine, seeded once from the OS.
pub fn seeded_engine() -> Xoshiro256StarStar {
    let seed: u64 = rand::random();
    debug!("random seed {seed:#018x}");
    Xoshiro256StarStar::seed_from_u64(seed)
}

pub struct App<D: Display> {
    // Fields drop in declaration order: buffer, tiles, then the window.
    composite: Composite,
    tiles: Vec<Tile>,
    display: D,
    frames: u64,
}

impl<D: Display> App<D> {
    /// Allocate the composite buffer, generate every tile and composite them
    /// once. Any failure drops whatever was built so far (display last).
    pub fn setup<R: Rng + ?Sized>(
        display: D,
        config: &DemoConfig,
        rng: &mut R,
    ) -> Result<Self, Error> {
        config.validate()?;
        let mut memory = display.texture_memory();

        let canvas = Canvas::new(config.logical_width, config.logical_height, &mut memory)?;
        info!(
            "composite buffer {}x{} allocated",
            config.logical_width, config.logical_height
        );

        let tiles = TileGenerator::new(config).generate(rng, &mut memory)?;
        info!(
            "generated {} tiles of {}x{} ({} bytes of texture memory)",
            tiles.len(),
            config.tile_width,
            config.tile_height,
            memory.used()
        );

        let composite = canvas.composite(&tiles, rng)?;
        Ok(Self { composite, tiles, display, frames: 0 })
    }

    /// Present the static composite every iteration until an exit trigger.
    /// Returns how many frames were presented by this call.
    pub fn run(&mut self) -> Result<u64, Error> {
        let start = self.frames;
        loop {
            if let Some(event) = self.display.poll_event() {
                if event.is_exit_trigger() {
                    info!("{event:?}: leaving after {} frames", self.frames);
                    break;
                }
                debug!("ignored {event:?}");
            }
            self.display.present(self.composite.buffer())?;
            self.frames += 1;
        }
        Ok(self.frames - start)
    }

    /// Release the buffer, the tiles and finally the display, in that order.
    pub fn shutdown(self) {
        let App { composite, tiles, display, frames } = self;
        drop(composite);
        drop(tiles);
        drop(display);
        info!("shut down after {frames} frames");
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayEvent, Key};
    use crate::headless::{DropLog, HeadlessDisplay};
    use crate::memory::TextureMemory;

    fn setup(display: HeadlessDisplay, seed: u64) -> Result<App<HeadlessDisplay>, Error> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        App::setup(display, &DemoConfig::default(), &mut rng)
    }

    #[test_log::test]
    fn close_on_first_poll_presents_nothing() {
        let mut display = HeadlessDisplay::new();
        display.push_event(DisplayEvent::CloseRequested);
        let mut app = setup(display, 1).unwrap();

        assert_eq!(app.run().unwrap(), 0);
        assert!(app.display().frames().is_empty());
    }

    #[test]
    fn every_present_shows_the_same_composite() {
        let mut app = setup(HeadlessDisplay::new().close_after(5), 2).unwrap();
        assert_eq!(app.run().unwrap(), 5);

        let frames = app.display().frames();
        assert_eq!(frames.len(), 5);
        for frame in frames {
            assert_eq!(frame, app.composite().buffer());
        }
    }

    #[test]
    fn other_keys_are_ignored_and_escape_exits() {
        let mut display = HeadlessDisplay::new();
        display.push_event(DisplayEvent::KeyDown(Key::Space));
        display.push_event(DisplayEvent::KeyDown(Key::A));
        display.push_event(DisplayEvent::KeyDown(Key::Escape));
        let mut app = setup(display, 3).unwrap();

        // Space and A each let one frame through; Escape stops before the third.
        assert_eq!(app.run().unwrap(), 2);
    }

    #[test]
    fn setup_builds_every_tile_and_places_it() {
        let app = setup(HeadlessDisplay::new(), 4).unwrap();
        assert_eq!(app.tiles().len(), 120);
        assert_eq!(app.composite().placements().len(), 120);
    }

    #[test]
    fn zero_texture_memory_fails_before_any_tile() {
        let log = DropLog::default();
        let display = HeadlessDisplay::new()
            .with_memory(TextureMemory::with_budget(0))
            .log_drop_to(log.clone());

        match setup(display, 5) {
            Err(Error::TextureAlloc(msg)) => assert!(msg.starts_with("composite buffer"), "{msg}"),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("setup must fail with no texture memory"),
        }
        assert_eq!(*log.borrow(), vec!["display"]);
    }

    #[test]
    fn running_out_during_generation_is_fatal() {
        // Enough for the buffer plus a single tile.
        let budget = 1024 * 768 * 4 + 90 * 60 * 4;
        let display = HeadlessDisplay::new().with_memory(TextureMemory::with_budget(budget));
        match setup(display, 6) {
            Err(Error::TextureAlloc(msg)) => assert!(msg.starts_with("tile #1"), "{msg}"),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("setup must fail when tiles do not fit"),
        }
    }

    #[test]
    fn shutdown_releases_the_display() {
        let log = DropLog::default();
        let display = HeadlessDisplay::new().close_after(1).log_drop_to(log.clone());
        let mut app = setup(display, 7).unwrap();
        app.run().unwrap();
        assert!(log.borrow().is_empty());

        app.shutdown();
        assert_eq!(*log.borrow(), vec!["display"]);
    }

    #[test]
    fn present_failure_propagates() {
        let mut app = setup(HeadlessDisplay::new().failing_present(), 8).unwrap();
        assert!(matches!(app.run(), Err(Error::WindowUpdate(_))));
    }

    #[test]
    fn same_seed_same_screen() {
        let a = setup(HeadlessDisplay::new(), 99).unwrap();
        let b = setup(HeadlessDisplay::new(), 99).unwrap();
        assert_eq!(a.composite().buffer(), b.composite().buffer());
    }

    #[test]
    fn invalid_constants_stop_setup() {
        let config = DemoConfig { tile_height: 1000, ..DemoConfig::default() };
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let result = App::setup(HeadlessDisplay::new(), &config, &mut rng);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
