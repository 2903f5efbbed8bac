use thiserror::Error;

/// The ways that creating, configuring or writing out a backend can fail.  Drawing itself never
/// fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid canvas dimensions {width}x{height}: both must be finite and non-negative")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Invalid colour {0:?}: expected #RGB, #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
