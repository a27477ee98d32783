use thiserror::Error;

/// The underlying formatting engine reported an error.
///
/// Returned by [`BufStr::set_format`](crate::BufStr::set_format) and
/// friends when a `Display` implementation fails mid-write. The handle is
/// reset to the empty state before this is returned, so no stale or
/// partially-written content is ever observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("formatting failed")]
pub struct FormatError;

impl From<core::fmt::Error> for FormatError {
    fn from(_: core::fmt::Error) -> Self {
        FormatError
    }
}
