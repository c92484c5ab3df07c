use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Error class reported to callers, independent of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad index, empty required argument, non-finite value or inverted range.
    Param,
    /// Chart or column counts outside the compile-time ceilings.
    Range,
    /// Window, display, surface or thread failure.
    System,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("{what} out of range: {value} (allowed 1..={max})")]
    OutOfRange {
        what: &'static str,
        value: usize,
        max: usize,
    },

    #[error("system error: {0}")]
    System(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParam(_) | Self::InvalidViewport { .. } | Self::InvalidData(_) => {
                ErrorKind::Param
            }
            Self::OutOfRange { .. } => ErrorKind::Range,
            Self::System(_) => ErrorKind::System,
        }
    }
}
