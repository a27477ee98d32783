//! Free-standing helpers for raw, NUL-terminated byte buffers.
//!
//! These operate on plain `[u8]` slices and are reused by the
//! [`BufStr`](crate::BufStr) methods; they are exposed because they are
//! occasionally useful on fixed buffers that never go through a handle
//! (stack scratch space, FFI staging buffers, and so on).
//!
//! Truncation is never an error here: [`copy`] and [`append`] silently clip
//! to the destination and report the length actually written. Passing a
//! destination with no room for the terminator, or an `append` destination
//! that is not NUL-terminated, is a contract violation and panics.

use core::cmp::Ordering;

use bstr::ByteSlice;

/// Returns the offset of the first NUL byte in `buf`, if any.
#[inline]
#[must_use]
pub fn nul_position(buf: &[u8]) -> Option<usize> {
    buf.find_byte(0)
}

/// Copies `src` into `dest`, truncating to `dest.len() - 1` content bytes,
/// and always writes a terminating NUL.
///
/// Returns the number of content bytes written, not counting the
/// terminator.
///
/// # Panics
///
/// Panics if `dest` is empty (no room for the terminator).
///
/// ```rust
/// let mut buf = [0u8; 6];
/// assert_eq!(bufstr::cstr::copy(&mut buf, b"hello world"), 5);
/// assert_eq!(&buf, b"hello\0");
/// ```
pub fn copy(dest: &mut [u8], src: &[u8]) -> usize {
    assert!(!dest.is_empty(), "copy: destination has no room for the terminator");

    let take = src.len().min(dest.len() - 1);
    dest[..take].copy_from_slice(&src[..take]);
    dest[take] = 0;
    take
}

/// Appends `src` after the NUL-terminated content already in `dest`,
/// truncating to fit, and re-terminates.
///
/// Returns the resulting total content length.
///
/// # Panics
///
/// Panics if `dest` contains no NUL terminator to append after.
///
/// ```rust
/// let mut buf = [0u8; 10];
/// bufstr::cstr::copy(&mut buf, b"foo");
/// assert_eq!(bufstr::cstr::append(&mut buf, b"-bar-baz"), 9);
/// assert_eq!(&buf, b"foo-bar-b\0");
/// ```
pub fn append(dest: &mut [u8], src: &[u8]) -> usize {
    let dest_len = nul_position(dest).expect("append: destination is not NUL-terminated");

    let room = dest.len() - 1 - dest_len;
    let take = src.len().min(room);
    dest[dest_len..dest_len + take].copy_from_slice(&src[..take]);
    dest[dest_len + take] = 0;
    dest_len + take
}

/// Byte-wise ordering with ASCII case folded, `strcasecmp` style.
#[must_use]
pub fn compare_ignore_ascii_case(a: &[u8], b: &[u8]) -> Ordering {
    let fold = |byte: &u8| byte.to_ascii_lowercase();
    a.iter().map(fold).cmp(b.iter().map(fold))
}

/// Returns `bytes` with any leading ASCII whitespace removed.
#[must_use]
pub fn skip_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Number of trailing ASCII whitespace bytes in `bytes`.
#[must_use]
pub fn trailing_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

/// First index in `haystack` of any byte from `charset`.
///
/// Returns `None` when either slice is empty; emptiness never matches.
#[must_use]
pub fn find_any(haystack: &[u8], charset: &[u8]) -> Option<usize> {
    if haystack.is_empty() || charset.is_empty() {
        return None;
    }
    haystack.iter().position(|b| charset.contains(b))
}

/// Uppercases ASCII letters in place, up to the first NUL (or the whole
/// slice if there is none).
pub fn make_ascii_uppercase(buf: &mut [u8]) {
    let end = nul_position(buf).unwrap_or(buf.len());
    buf[..end].make_ascii_uppercase();
}

/// Lowercases ASCII letters in place, up to the first NUL (or the whole
/// slice if there is none).
pub fn make_ascii_lowercase(buf: &mut [u8]) {
    let end = nul_position(buf).unwrap_or(buf.len());
    buf[..end].make_ascii_lowercase();
}

/// Tokenizes `bytes`, splitting on any byte from `delimiters`.
///
/// `strtok`-style: runs of delimiters are skipped, so the iterator never
/// yields an empty token — but unlike `strtok` it keeps no global state and
/// does not mutate the input.
///
/// ```rust
/// let tokens: Vec<&[u8]> = bufstr::cstr::split(b"/usr//local/bin/", b"/").collect();
/// assert_eq!(tokens, [&b"usr"[..], b"local", b"bin"]);
/// ```
#[must_use]
pub fn split<'h, 'd>(bytes: &'h [u8], delimiters: &'d [u8]) -> Split<'h, 'd> {
    Split {
        rest: bytes,
        delimiters,
    }
}

/// Iterator returned by [`split`].
#[derive(Debug, Clone)]
pub struct Split<'h, 'd> {
    rest: &'h [u8],
    delimiters: &'d [u8],
}

impl<'h> Iterator for Split<'h, '_> {
    type Item = &'h [u8];

    fn next(&mut self) -> Option<&'h [u8]> {
        let begin = self
            .rest
            .iter()
            .position(|b| !self.delimiters.contains(b))?;
        let tail = &self.rest[begin..];
        let end = tail
            .iter()
            .position(|b| self.delimiters.contains(b))
            .unwrap_or(tail.len());
        self.rest = &tail[end..];
        Some(&tail[..end])
    }
}
