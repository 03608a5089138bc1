//! Boundary error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("frame parameter buffer too short: got {got} values, need {need}")]
    ParamBufferTooShort { got: usize, need: usize },

    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("output buffer too small: got {got} bytes, need {need}")]
    OutputBufferTooSmall { got: usize, need: usize },
}
