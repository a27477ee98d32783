use alloc::{boxed::Box, vec};
use core::{cmp::Ordering, ffi::CStr, mem};

use bstr::ByteSlice;

use crate::{MAX_CAPACITY, MAX_INLINE, cstr};

/// Shared empty buffer used while a handle has no storage of its own.
const EMPTY: &CStr = c"";

/// Extra bytes added to every heap growth to amortize repeated appends.
const GROW_SLACK: usize = 16;

/// A mutable, null-terminated string buffer with an optional inline buffer
/// of `N` bytes.
///
/// The handle is always in exactly one of four storage modes:
///
/// - **sentinel** — no storage at all; the empty string backed by a shared
///   static buffer. The default for `N == 0`.
/// - **inline** — the fixed `N`-byte region embedded in the handle itself,
///   holding up to `N - 1` content bytes plus the terminator. The default
///   for `N > 0`.
/// - **heap** — an exclusively owned allocation, entered whenever content
///   outgrows the inline region (or there is none). Released on drop and on
///   [`clear`](Self::clear).
/// - **reference** — a borrow of caller-owned null-terminated memory, bound
///   with [`set_ref`](Self::set_ref); no copy, no ownership, capacity 0.
///
/// Content is plain bytes and must not contain an interior NUL; ingest
/// points check this with debug assertions only, matching a trusted-caller
/// discipline.
///
/// ```rust
/// use bufstr::BufStr16;
///
/// let mut s = BufStr16::new();
/// s.set("hello");
/// s.append(" world");
/// assert_eq!(s, "hello world");
/// assert_eq!(s.as_c_str(), c"hello world");
/// ```
#[derive(Clone)]
pub struct BufStr<'a, const N: usize = 0> {
    storage: Storage<'a, N>,
}

#[derive(Clone)]
enum Storage<'a, const N: usize> {
    /// No storage; reads are served from a shared static empty string.
    Sentinel,
    /// Fixed-size region embedded in the handle. `buf[len] == 0`.
    Inline { buf: [u8; N], len: usize },
    /// Exclusively owned allocation. `buf.len()` is the capacity,
    /// `buf[len] == 0`.
    Heap { buf: Box<[u8]>, len: usize },
    /// Borrowed external memory. Never written through.
    Ref(&'a CStr),
}

impl<'a, const N: usize> Storage<'a, N> {
    fn content(&self) -> &[u8] {
        match self {
            Storage::Sentinel => &[],
            Storage::Inline { buf, len } => &buf[..*len],
            Storage::Heap { buf, len } => &buf[..*len],
            Storage::Ref(cstr) => cstr.to_bytes(),
        }
    }
}

/// Views `bytes_with_nul` as a `CStr`.
///
/// Callers uphold the buffer invariant: exactly one NUL, at the end.
fn cstr_view(bytes_with_nul: &[u8]) -> &CStr {
    debug_assert_eq!(cstr::nul_position(bytes_with_nul), Some(bytes_with_nul.len() - 1));
    // SAFETY: every ingest point rejects interior NULs and the handle keeps
    // the terminator at `len`, so the slice is a well-formed C string.
    unsafe { CStr::from_bytes_with_nul_unchecked(bytes_with_nul) }
}

impl<'a, const N: usize> BufStr<'a, N> {
    /// Creates an empty handle: inline mode when `N > 0`, otherwise the
    /// storage-less sentinel mode.
    ///
    /// A defaulted const parameter is not inferred in expression position,
    /// so construction goes through the sized aliases (`BufStr0::new()`,
    /// `BufStr16::new()`, ...) or an explicit `BufStr::<'_, N>` path.
    #[must_use]
    pub fn new() -> Self {
        const {
            assert!(N <= MAX_INLINE, "inline buffer size is limited to 1023 bytes");
        }
        let storage = if N > 0 {
            Storage::Inline { buf: [0; N], len: 0 }
        } else {
            Storage::Sentinel
        };
        Self { storage }
    }

    /// Creates a handle referencing `src` without allocating or copying.
    ///
    /// Equivalent to [`new`](Self::new) followed by
    /// [`set_ref`](Self::set_ref).
    #[must_use]
    pub fn from_ref(src: &'a CStr) -> Self {
        let mut handle = Self::new();
        handle.set_ref(src);
        handle
    }

    /// Creates a handle owning a copy of `src`.
    #[must_use]
    pub fn from_bytes(src: impl AsRef<[u8]>) -> Self {
        let mut handle = Self::new();
        handle.set(src);
        handle
    }

    // ---- Queries -------------------------------------------------------

    /// Content length in bytes, not counting the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.content().len()
    }

    /// Whether the content is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total size in bytes of the active buffer, including the terminator
    /// slot. Zero in sentinel and reference modes. The longest content that
    /// fits without regrowing is `capacity() - 1` bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Sentinel | Storage::Ref(_) => 0,
            Storage::Inline { .. } => N,
            Storage::Heap { buf, .. } => buf.len(),
        }
    }

    /// Size of the inline buffer this handle was constructed with; fixed
    /// for the handle's whole lifetime.
    #[must_use]
    pub fn inline_capacity(&self) -> usize {
        N
    }

    /// Whether the active buffer is owned (and released) by this handle.
    /// False in sentinel and reference modes.
    #[must_use]
    pub fn owns_buffer(&self) -> bool {
        matches!(self.storage, Storage::Inline { .. } | Storage::Heap { .. })
    }

    /// Whether the content currently lives in the inline buffer.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline { .. })
    }

    /// Whether the content currently lives in an owned heap allocation.
    #[must_use]
    pub fn is_heap_allocated(&self) -> bool {
        matches!(self.storage, Storage::Heap { .. })
    }

    /// The content bytes, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.content()
    }

    /// The content as a null-terminated C string.
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        match &self.storage {
            Storage::Sentinel => EMPTY,
            Storage::Inline { buf, len } => cstr_view(&buf[..=*len]),
            Storage::Heap { buf, len } => cstr_view(&buf[..=*len]),
            Storage::Ref(cstr) => cstr,
        }
    }

    /// The content as UTF-8, if it is valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`Utf8Error`](core::str::Utf8Error) when the
    /// content is not valid UTF-8 (content is arbitrary bytes; nothing in
    /// this type enforces an encoding).
    pub fn to_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Double-ended iteration over the content bytes.
    ///
    /// The iterator borrows the handle, so mutating during a traversal is
    /// rejected at compile time.
    pub fn bytes(&self) -> impl DoubleEndedIterator<Item = u8> + ExactSizeIterator + '_ {
        self.as_bytes().iter().copied()
    }

    /// Tokenizes the content on any byte from `delimiters`; see
    /// [`cstr::split`].
    #[must_use]
    pub fn tokens<'d>(&self, delimiters: &'d [u8]) -> cstr::Split<'_, 'd> {
        cstr::split(self.as_bytes(), delimiters)
    }

    // ---- Assignment ----------------------------------------------------

    /// Copies `src` into owned storage, growing (content-discarding) when
    /// the current capacity is insufficient.
    ///
    /// Setting the empty string is deliberately cheap: it behaves like
    /// [`clear_no_free`](Self::clear_no_free) and keeps the current
    /// capacity, in contrast with [`clear`](Self::clear).
    pub fn set(&mut self, src: impl AsRef<[u8]>) {
        let src = src.as_ref();
        debug_assert!(!src.contains(&0), "content must not contain interior NUL bytes");

        if src.is_empty() {
            self.clear_no_free();
            return;
        }
        let needed = src.len() + 1;
        if self.capacity() < needed {
            self.reserve_discard(needed);
        }
        self.splice_owned(0, src);
    }

    /// Binds this handle to externally-owned null-terminated memory.
    ///
    /// No copy is performed and any owned heap buffer is released. The
    /// resulting handle has capacity 0 and does not own its buffer; the
    /// borrow checker holds `src` alive and immutable for as long as the
    /// handle references it. Binding the empty string behaves like
    /// [`clear_no_free`](Self::clear_no_free).
    pub fn set_ref(&mut self, src: &'a CStr) {
        if src.is_empty() {
            self.clear_no_free();
            return;
        }
        self.storage = Storage::Ref(src);
    }

    /// Appends `src` after the current content, growing (preserving) when
    /// needed.
    pub fn append(&mut self, src: impl AsRef<[u8]>) {
        let src = src.as_ref();
        debug_assert!(!src.contains(&0), "content must not contain interior NUL bytes");

        if src.is_empty() {
            return;
        }
        let at = self.len();
        let needed = at + src.len() + 1;
        if self.capacity() < needed {
            self.reserve(needed);
        }
        self.splice_owned(at, src);
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.append([byte]);
    }

    /// Removes and returns the last content byte, if any.
    pub fn pop(&mut self) -> Option<u8> {
        let last = self.as_bytes().last().copied()?;
        self.truncate(self.len() - 1);
        Some(last)
    }

    /// Shortens the content to at most `max_len` bytes. Longer requests are
    /// a no-op; capacity is unchanged.
    pub fn truncate(&mut self, max_len: usize) {
        if max_len >= self.len() {
            return;
        }
        self.make_owned();
        if let Some((buf, len)) = self.owned_parts() {
            buf[max_len] = 0;
            *len = max_len;
        }
    }

    /// Grows or shrinks the content to exactly `new_len` bytes, padding
    /// with `fill` when growing. Growth preserves existing content.
    pub fn resize(&mut self, new_len: usize, fill: u8) {
        debug_assert_ne!(fill, 0, "fill byte must not be NUL");

        if new_len == 0 {
            self.clear_no_free();
            return;
        }
        if new_len <= self.len() {
            self.truncate(new_len);
            return;
        }
        let cur = self.len();
        self.reserve(new_len + 1);
        if let Some((buf, len)) = self.owned_parts() {
            buf[cur..new_len].fill(fill);
            buf[new_len] = 0;
            *len = new_len;
        }
    }

    /// Like [`resize`](Self::resize) but discards the existing content
    /// instead of preserving it: the result is `new_len` copies of `fill`.
    pub fn resize_discard(&mut self, new_len: usize, fill: u8) {
        debug_assert_ne!(fill, 0, "fill byte must not be NUL");

        if new_len == 0 {
            self.clear_no_free();
            return;
        }
        self.reserve_discard(new_len + 1);
        if let Some((buf, len)) = self.owned_parts() {
            buf[..new_len].fill(fill);
            buf[new_len] = 0;
            *len = new_len;
        }
    }

    // ---- Memory management ---------------------------------------------

    /// Ensures the active buffer holds at least `cap` bytes (terminator
    /// included), preserving content. No-op when the capacity is already
    /// sufficient; after the call, writing up to `cap - 1` content bytes
    /// will not reallocate.
    ///
    /// Growth out of reference mode copies the referenced content into
    /// owned storage.
    ///
    /// # Panics
    ///
    /// Panics when `cap` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn reserve(&mut self, cap: usize) {
        assert!(cap <= MAX_CAPACITY, "requested capacity {cap} exceeds MAX_CAPACITY");
        if cap <= self.capacity() {
            return;
        }
        // Growing out of reference mode must still hold the whole content.
        self.regrow(cap.max(self.len() + 1), true);
    }

    /// Like [`reserve`](Self::reserve) but discards the content instead of
    /// copying it: the handle is left holding the empty string, always,
    /// which makes it the cheap path when the caller is about to fully
    /// overwrite the buffer.
    ///
    /// # Panics
    ///
    /// Panics when `cap` exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn reserve_discard(&mut self, cap: usize) {
        assert!(cap <= MAX_CAPACITY, "requested capacity {cap} exceeds MAX_CAPACITY");
        if cap <= self.capacity() {
            self.clear_no_free();
        } else {
            self.regrow(cap, false);
        }
    }

    /// Reallocates a heap buffer down to exactly `len() + 1` bytes,
    /// preserving content. No-op in inline, sentinel and reference modes,
    /// or when the heap buffer is already exact.
    pub fn shrink_to_fit(&mut self) {
        let Storage::Heap { buf, len } = &self.storage else {
            return;
        };
        let len = *len;
        if buf.len() <= len + 1 {
            return;
        }
        let mut exact = vec![0; len + 1].into_boxed_slice();
        exact[..len].copy_from_slice(&buf[..len]);
        self.storage = Storage::Heap { buf: exact, len };
    }

    /// Empties the handle and releases any owned heap buffer, landing in
    /// inline mode (for `N > 0`) or sentinel mode. Idempotent.
    pub fn clear(&mut self) {
        self.storage = if N > 0 {
            Storage::Inline { buf: [0; N], len: 0 }
        } else {
            Storage::Sentinel
        };
    }

    /// Empties the content without releasing or changing the active owned
    /// buffer, keeping its capacity for an upcoming rewrite.
    ///
    /// A handle in reference mode cannot write a terminator into the
    /// borrowed memory, so it detaches to sentinel mode instead (the
    /// capacity is 0 either way).
    pub fn clear_no_free(&mut self) {
        if matches!(self.storage, Storage::Ref(_)) {
            self.storage = Storage::Sentinel;
            return;
        }
        if let Some((buf, len)) = self.owned_parts() {
            buf[0] = 0;
            *len = 0;
        }
    }

    /// Exchanges the contents of two handles.
    ///
    /// Inline regions are moved by value along with the rest of the
    /// storage, so unlike pointer-based designs this needs no special case
    /// when either side is inline.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // ---- Search and comparison -----------------------------------------

    /// `strcmp`-style byte-wise ordering against `other`.
    #[must_use]
    pub fn compare(&self, other: impl AsRef<[u8]>) -> Ordering {
        self.as_bytes().cmp(other.as_ref())
    }

    /// Byte-wise ordering with ASCII case folded.
    #[must_use]
    pub fn compare_ignore_ascii_case(&self, other: impl AsRef<[u8]>) -> Ordering {
        cstr::compare_ignore_ascii_case(self.as_bytes(), other.as_ref())
    }

    /// Whether the content starts with `prefix`.
    ///
    /// Emptiness never matches: this is `false` whenever the content or the
    /// prefix is empty, even if both are.
    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        let prefix = prefix.as_ref();
        !prefix.is_empty() && !self.is_empty() && self.as_bytes().starts_with(prefix)
    }

    /// Whether the last `suffix.len()` content bytes equal `suffix`.
    ///
    /// Emptiness never matches, exactly as with
    /// [`starts_with`](Self::starts_with).
    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        let suffix = suffix.as_ref();
        !suffix.is_empty() && !self.is_empty() && self.as_bytes().ends_with(suffix)
    }

    /// First index of `byte` in the content.
    ///
    /// Searching for the terminator (`0`) is defined to find it: the result
    /// is `Some(len())`, never `None`.
    #[must_use]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        if byte == 0 {
            return Some(self.len());
        }
        self.as_bytes().find_byte(byte)
    }

    /// Last index of `byte` in the content, with the same terminator rule
    /// as [`find_byte`](Self::find_byte).
    #[must_use]
    pub fn rfind_byte(&self, byte: u8) -> Option<usize> {
        if byte == 0 {
            return Some(self.len());
        }
        self.as_bytes().rfind_byte(byte)
    }

    /// First starting index of `needle` in the content; `None` when either
    /// the content or the needle is empty.
    #[must_use]
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if self.is_empty() || needle.is_empty() {
            return None;
        }
        self.as_bytes().find(needle)
    }

    /// Last starting index of `needle` in the content; `None` when either
    /// the content or the needle is empty.
    #[must_use]
    pub fn rfind(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if self.is_empty() || needle.is_empty() {
            return None;
        }
        self.as_bytes().rfind(needle)
    }

    /// First index of any byte from `charset`; see [`cstr::find_any`].
    #[must_use]
    pub fn find_any(&self, charset: impl AsRef<[u8]>) -> Option<usize> {
        cstr::find_any(self.as_bytes(), charset.as_ref())
    }

    // ---- In-place rewrites ---------------------------------------------

    /// Removes leading ASCII whitespace, shifting the remaining bytes left.
    pub fn trim_start(&mut self) {
        let skip = self.len() - cstr::skip_leading_whitespace(self.as_bytes()).len();
        if skip == 0 {
            return;
        }
        self.make_owned();
        if let Some((buf, len)) = self.owned_parts() {
            let new_len = *len - skip;
            buf.copy_within(skip..skip + new_len, 0);
            buf[new_len] = 0;
            *len = new_len;
        }
    }

    /// Removes trailing ASCII whitespace by truncating in place.
    pub fn trim_end(&mut self) {
        let trailing = cstr::trailing_whitespace(self.as_bytes());
        if trailing > 0 {
            self.truncate(self.len() - trailing);
        }
    }

    /// Removes ASCII whitespace from both ends.
    pub fn trim(&mut self) {
        self.trim_end();
        self.trim_start();
    }

    /// Uppercases ASCII letters in place.
    pub fn make_ascii_uppercase(&mut self) {
        if self.is_empty() {
            return;
        }
        self.make_owned();
        if let Some((buf, _)) = self.owned_parts() {
            cstr::make_ascii_uppercase(buf);
        }
    }

    /// Lowercases ASCII letters in place.
    pub fn make_ascii_lowercase(&mut self) {
        if self.is_empty() {
            return;
        }
        self.make_owned();
        if let Some((buf, _)) = self.owned_parts() {
            cstr::make_ascii_lowercase(buf);
        }
    }

    // ---- Internals -----------------------------------------------------

    /// The writable buffer (terminator space included) and the length slot,
    /// for the owned modes only.
    pub(crate) fn owned_parts(&mut self) -> Option<(&mut [u8], &mut usize)> {
        match &mut self.storage {
            Storage::Inline { buf, len } => Some((buf.as_mut_slice(), len)),
            Storage::Heap { buf, len } => Some((&mut buf[..], len)),
            Storage::Sentinel | Storage::Ref(_) => None,
        }
    }

    /// Copies referenced content into owned storage; no-op in the other
    /// modes. In-place mutators call this before writing, since reference
    /// memory must never be written through.
    pub(crate) fn make_owned(&mut self) {
        let src: &'a CStr = match &self.storage {
            Storage::Ref(src) => *src,
            _ => return,
        };
        let bytes = src.to_bytes();
        self.storage = Storage::Sentinel;
        self.reserve_discard(bytes.len() + 1);
        self.splice_owned(0, bytes);
    }

    /// Writes `src` at offset `at` in the owned buffer and re-terminates.
    /// Callers reserve `at + src.len() + 1` bytes first.
    pub(crate) fn splice_owned(&mut self, at: usize, src: &[u8]) {
        let (buf, len) = match &mut self.storage {
            Storage::Inline { buf, len } => (&mut buf[..], len),
            Storage::Heap { buf, len } => (&mut buf[..], len),
            Storage::Sentinel | Storage::Ref(_) => {
                unreachable!("writable capacity was reserved before splicing")
            }
        };
        let wrote = cstr::copy(&mut buf[at..], src);
        debug_assert_eq!(wrote, src.len());
        *len = at + wrote;
    }

    /// Rebuilds the storage with room for `cap` bytes: the inline region
    /// when it is large enough, a fresh heap allocation (with growth slack)
    /// otherwise. The previous owned buffer, if any, is released when the
    /// old storage is dropped.
    fn regrow(&mut self, cap: usize, preserve: bool) {
        let old = mem::replace(&mut self.storage, Storage::Sentinel);
        let content = if preserve { old.content() } else { &[] };
        debug_assert!(content.len() < cap);

        if N > 0 && cap <= N {
            let mut buf = [0; N];
            buf[..content.len()].copy_from_slice(content);
            self.storage = Storage::Inline { buf, len: content.len() };
        } else {
            let total = (cap + GROW_SLACK).min(MAX_CAPACITY);
            let mut buf = vec![0; total].into_boxed_slice();
            buf[..content.len()].copy_from_slice(content);
            self.storage = Storage::Heap { buf, len: content.len() };
        }
    }
}

/// Handle with no inline buffer: owned content is always heap-allocated.
pub type BufStr0<'a> = BufStr<'a, 0>;
/// Handle with a 16-byte inline buffer (15 content bytes).
pub type BufStr16<'a> = BufStr<'a, 16>;
/// Handle with a 32-byte inline buffer (31 content bytes).
pub type BufStr32<'a> = BufStr<'a, 32>;
/// Handle with a 64-byte inline buffer (63 content bytes).
pub type BufStr64<'a> = BufStr<'a, 64>;
/// Handle with a 128-byte inline buffer (127 content bytes).
pub type BufStr128<'a> = BufStr<'a, 128>;
/// Handle with a 256-byte inline buffer (255 content bytes).
pub type BufStr256<'a> = BufStr<'a, 256>;
/// Handle with a 512-byte inline buffer (511 content bytes).
pub type BufStr512<'a> = BufStr<'a, 512>;
