// Crate error type. Every variant states *where* things went wrong.
// Drawing itself never fails (bad geometry is clipped away); only the
// contracts below and the window/screenshot plumbing can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Two point lists that must pair up vertex-for-vertex had different lengths.
    #[error("point lists must have same length: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A sink was handed a buffer that does not match the stated dimensions.
    #[error("snapshot size mismatch: expected {expected} bytes, got {actual}")]
    InvalidSnapshot { expected: usize, actual: usize },

    #[cfg(feature = "sim")]
    #[error("window init error: {0}")]
    WindowInit(String),

    #[cfg(feature = "sim")]
    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[cfg(feature = "sim")]
    #[error("screenshot error: {0}")]
    Screenshot(String),
}

pub type Result<T> = std::result::Result<T, Error>;
