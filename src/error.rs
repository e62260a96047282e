// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    DisplayMode(String),  // Querying the host monitor resolution failed
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Presenting a frame to the window failed
    TextureAlloc(String), // The composite buffer or a tile could not be allocated
    Placement(String),    // A tile position falls outside the buffer
    Config(String),       // The built-in constants are inconsistent
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DisplayMode(s) => write!(f, "Display mode error: {s}"),
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::TextureAlloc(s) => write!(f, "Texture allocation error: {s}"),
            Error::Placement(s) => write!(f, "Tile placement error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
