//! Growth-aware formatted writes.
//!
//! The growing variants follow a two-phase discipline: a measure-only pass
//! through a counting sink computes the exact required length, the buffer
//! is grown once (discarding for `set`, preserving for `append`), and the
//! write pass is then guaranteed to fit. The non-growing variant writes
//! through a truncating sink over the existing capacity and never
//! allocates.
//!
//! A failed format — a `Display` implementation returning an error — resets
//! the handle to the empty state before the failure is reported, so stale
//! or partially-written content is never observable.

use core::fmt::{self, Write};

use crate::{BufStr, FormatError};

/// Measure-only sink: counts bytes, writes nothing.
struct CountingSink(usize);

impl Write for CountingSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Sink over a fixed slice that silently drops whatever does not fit.
struct TruncatingSink<'b> {
    dst: &'b mut [u8],
    written: usize,
}

impl Write for TruncatingSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        debug_assert!(!s.as_bytes().contains(&0), "content must not contain interior NUL bytes");

        let room = self.dst.len() - self.written;
        let take = s.len().min(room);
        self.dst[self.written..self.written + take].copy_from_slice(&s.as_bytes()[..take]);
        self.written += take;
        Ok(())
    }
}

fn measure(args: fmt::Arguments<'_>) -> Result<usize, FormatError> {
    let mut counter = CountingSink(0);
    fmt::write(&mut counter, args)?;
    Ok(counter.0)
}

impl<const N: usize> BufStr<'_, N> {
    /// Replaces the content with the formatted text, growing (discarding)
    /// when the current capacity is insufficient. Returns the new length.
    ///
    /// ```rust
    /// use bufstr::BufStr0;
    ///
    /// let mut s = BufStr0::new();
    /// s.set_format(format_args!("{} {}", "hello", "world")).unwrap();
    /// assert_eq!(s, "hello world");
    /// assert_eq!(s.len(), 11);
    /// ```
    ///
    /// # Errors
    ///
    /// [`FormatError`] when the formatting engine fails; the handle is
    /// empty afterwards.
    pub fn set_format(&mut self, args: fmt::Arguments<'_>) -> Result<usize, FormatError> {
        if let Some(s) = args.as_str() {
            self.set(s);
            return Ok(s.len());
        }
        let needed = match measure(args) {
            Ok(needed) => needed,
            Err(err) => {
                self.clear_no_free();
                return Err(err);
            }
        };
        if self.capacity() < needed + 1 {
            self.reserve_discard(needed + 1);
        } else {
            self.clear_no_free();
        }
        self.write_measured(args, needed)
    }

    /// Appends the formatted text after the current content, growing
    /// (preserving) when needed. Returns the appended length.
    ///
    /// # Errors
    ///
    /// [`FormatError`] when the formatting engine fails; the handle is
    /// empty afterwards.
    pub fn append_format(&mut self, args: fmt::Arguments<'_>) -> Result<usize, FormatError> {
        if let Some(s) = args.as_str() {
            self.append(s);
            return Ok(s.len());
        }
        let added = match measure(args) {
            Ok(added) => added,
            Err(err) => {
                self.clear_no_free();
                return Err(err);
            }
        };
        let needed = self.len() + added + 1;
        if self.capacity() < needed {
            self.reserve(needed);
        }
        self.write_measured(args, added)
    }

    /// Writes the formatted text into the existing capacity only: never
    /// allocates, silently truncates to `capacity() - 1` content bytes.
    /// Returns the length actually written — truncation is not an error.
    ///
    /// A handle with no writable storage (sentinel or reference mode) ends
    /// up empty with a returned length of 0.
    ///
    /// ```rust
    /// use bufstr::BufStr16;
    ///
    /// let mut s = BufStr16::new();
    /// let wrote = s.set_format_no_grow(format_args!("{:>20}", "x")).unwrap();
    /// assert_eq!(wrote, 15);
    /// assert!(s.is_inline());
    /// ```
    ///
    /// # Errors
    ///
    /// [`FormatError`] when the formatting engine itself fails; the handle
    /// is empty afterwards.
    pub fn set_format_no_grow(&mut self, args: fmt::Arguments<'_>) -> Result<usize, FormatError> {
        let Some((buf, len)) = self.owned_parts() else {
            self.clear_no_free();
            return Ok(0);
        };
        let room = buf.len() - 1;
        let mut sink = TruncatingSink { dst: &mut buf[..room], written: 0 };
        let result = fmt::write(&mut sink, args);
        let wrote = sink.written;
        buf[wrote] = 0;
        *len = wrote;
        if result.is_err() {
            self.clear_no_free();
            return Err(FormatError);
        }
        Ok(wrote)
    }

    /// Write pass of the two-phase discipline; capacity for `expected` more
    /// bytes has already been reserved.
    fn write_measured(&mut self, args: fmt::Arguments<'_>, expected: usize) -> Result<usize, FormatError> {
        let before = self.len();
        if fmt::write(self, args).is_err() {
            self.clear_no_free();
            return Err(FormatError);
        }
        debug_assert_eq!(self.len() - before, expected, "format output diverged between passes");
        Ok(self.len() - before)
    }
}

/// Appending `fmt::Write`, so `write!(&mut s, ...)` works directly; grows
/// as needed and never reports an error of its own.
impl<const N: usize> Write for BufStr<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}
