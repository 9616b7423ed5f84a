use thiserror::Error;

/// Everything that can stop the formatter mid-chain.
///
/// Parse failures from `sthw-model`/`sthw-codec` are folded in directly:
/// a re-parse triggered by forward/backward navigation can fail just as
/// the initial parse could, and the caller handles both the same way.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("parse error: {0}")]
    Parse(#[from] sthw_codec::ParseError),
    #[error("continuation stack exhausted")]
    StackOverflow,
    #[error("caption or value buffer too small for this field")]
    BufferOverflow,
    #[error("plugin query failed")]
    PluginError,
    #[error("no more data in this chain")]
    EndOfChain,
}

impl From<sthw_display::Overflow> for FormatError {
    fn from(_: sthw_display::Overflow) -> Self {
        FormatError::BufferOverflow
    }
}

impl From<std::fmt::Error> for FormatError {
    fn from(_: std::fmt::Error) -> Self {
        FormatError::BufferOverflow
    }
}

impl From<sthw_display::TimeFormatError> for FormatError {
    fn from(_: sthw_display::TimeFormatError) -> Self {
        FormatError::BufferOverflow
    }
}

pub type FormatResult<T> = Result<T, FormatError>;
