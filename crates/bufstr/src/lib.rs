//! A small-string-optimized, null-terminated string buffer.
//!
//! [`BufStr`] is a drop-in replacement for heap-allocating string types in
//! performance-sensitive code. Each use-site picks one of three storage
//! strategies:
//!
//! - an **inline buffer** of `N` bytes embedded directly in the handle, so
//!   short strings never touch the heap:
//!
//!   ```rust
//!   use bufstr::BufStr16;
//!
//!   let mut name = BufStr16::new();
//!   name.set("filename.h");
//!   assert!(name.is_inline());
//!   ```
//!
//! - a **heap buffer** that the handle owns exclusively, entered
//!   automatically whenever content outgrows the inline region (or when the
//!   handle was built without one):
//!
//!   ```rust
//!   use bufstr::BufStr16;
//!
//!   let mut name = BufStr16::new();
//!   name.set("long_filename_not_very_long_but_longer_than_expected.h");
//!   assert!(name.is_heap_allocated());
//!   ```
//!
//! - a **borrowed reference** to externally-owned, null-terminated memory,
//!   performing no allocation or copy:
//!
//!   ```rust
//!   use bufstr::BufStr0;
//!
//!   let s = BufStr0::from_ref(c"hey!");
//!   assert!(!s.owns_buffer());
//!   ```
//!
//! The content is always exposed as a valid, null-terminated, contiguous
//! byte sequence of known length ([`BufStr::as_c_str`]), which makes the
//! type convenient at FFI boundaries. Content bytes must not contain an
//! interior `NUL`; this is a debug-checked caller contract.
//!
//! The free-standing C-string helpers the handle is built on (truncating
//! copy/append, tokenizing, whitespace skipping) live in [`cstr`] and are
//! usable on raw buffers directly.
//!
//! Content is treated as plain bytes: comparisons are byte-wise, case
//! conversion and trimming are ASCII-only, and no Unicode or locale
//! awareness is provided.
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod buf;
pub mod cstr;
mod error;
mod format;
mod traits;

#[cfg(test)]
mod tests;

pub use buf::{BufStr, BufStr0, BufStr16, BufStr32, BufStr64, BufStr128, BufStr256, BufStr512};
pub use error::FormatError;

/// Maximum capacity, in bytes, a handle will ever allocate.
///
/// The type targets short-to-medium strings; a request beyond this bound
/// is treated as a logic error and panics rather than being honored.
pub const MAX_CAPACITY: usize = 2 * 1024 * 1024;

/// Maximum size, in bytes, of the inline buffer (`N` in [`BufStr`]).
///
/// Checked at compile time when a sized handle is constructed.
pub const MAX_INLINE: usize = 1023;

/// Replaces the contents of a [`BufStr`] with formatted text.
///
/// Thin wrapper over [`BufStr::set_format`] and [`core::format_args!`].
///
/// ```rust
/// use bufstr::{BufStr0, set_format};
///
/// let mut s = BufStr0::new();
/// set_format!(s, "{} {}", "hello", "world").unwrap();
/// assert_eq!(s, "hello world");
/// ```
#[macro_export]
macro_rules! set_format {
    ($dst:expr, $($arg:tt)*) => {
        $dst.set_format(core::format_args!($($arg)*))
    };
}

/// Appends formatted text to a [`BufStr`].
///
/// Thin wrapper over [`BufStr::append_format`] and [`core::format_args!`].
///
/// ```rust
/// use bufstr::{BufStr0, append_format, set_format};
///
/// let mut s = BufStr0::new();
/// set_format!(s, "hello").unwrap();
/// append_format!(s, " world {}", 42).unwrap();
/// assert_eq!(s, "hello world 42");
/// ```
#[macro_export]
macro_rules! append_format {
    ($dst:expr, $($arg:tt)*) => {
        $dst.append_format(core::format_args!($($arg)*))
    };
}
