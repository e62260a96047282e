// What you SEE:
// • 120 translucent colored rectangles scattered over black, full screen.
// • The picture is drawn once and never changes.
// • ESC or closing the window quits.

use log::{error, info};
use std::process::ExitCode;
use tile_mosaic::app::{App, seeded_engine};
use tile_mosaic::config::DemoConfig;
use tile_mosaic::display::{DisplayMode, MinifbDisplay};
use tile_mosaic::error::Error;

fn main() -> ExitCode {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let outcome = run();
    match &outcome {
        Ok(frames) => info!("presented {frames} frames"),
        Err(e) => error!("{e}"),
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 after a clean shutdown, 1 for any failure.
fn exit_status(outcome: &Result<u64, Error>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn run() -> Result<u64, Error> {
    let config = DemoConfig::default();
    let mut rng = seeded_engine();

    /* --- Window ---
       Visual: a borderless window covering the whole monitor, still empty. */
    let mode = DisplayMode::query()?;
    let display = MinifbDisplay::open(&config, mode)?;
    info!(
        "window open at {}x{} ({}x{} logical)",
        mode.width, mode.height, config.logical_width, config.logical_height
    );

    /* --- Buffer, tiles, the one composite pass --- */
    let mut app = App::setup(display, &config, &mut rng)?;

    /* --- Present until ESC / close --- */
    let frames = app.run()?;
    app.shutdown();
    Ok(frames)
}
