//! Operator and conversion surface for [`BufStr`].
//!
//! Equality and ordering compare content bytes only — two handles with the
//! same content are equal regardless of storage mode or inline size, which
//! is why `Eq`/`Hash`/`Ord` are hand-written rather than derived on the
//! storage representation.

use core::{
    cmp::Ordering,
    ffi::CStr,
    fmt,
    hash::{Hash, Hasher},
    ops::{Index, IndexMut},
};

use bstr::BStr;

use crate::BufStr;

impl<const N: usize> Default for BufStr<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> From<&str> for BufStr<'a, N> {
    fn from(src: &str) -> Self {
        Self::from_bytes(src)
    }
}

impl<'b, const N: usize, const M: usize> PartialEq<BufStr<'b, M>> for BufStr<'_, N> {
    fn eq(&self, other: &BufStr<'b, M>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for BufStr<'_, N> {}

impl<const N: usize> PartialEq<str> for BufStr<'_, N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for BufStr<'_, N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<[u8]> for BufStr<'_, N> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<&[u8]> for BufStr<'_, N> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const N: usize> PartialEq<&CStr> for BufStr<'_, N> {
    fn eq(&self, other: &&CStr) -> bool {
        self.as_bytes() == other.to_bytes()
    }
}

impl<const N: usize> PartialOrd for BufStr<'_, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for BufStr<'_, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl<const N: usize> Hash for BufStr<'_, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

/// Bounds-checked byte access; indexing at or past `len()` panics.
impl<const N: usize> Index<usize> for BufStr<'_, N> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.as_bytes()[index]
    }
}

/// Bounds-checked mutable byte access. A handle in reference mode copies
/// the referenced content into owned storage first. Writing a NUL through
/// the returned reference is a contract violation.
impl<const N: usize> IndexMut<usize> for BufStr<'_, N> {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        let length = self.len();
        assert!(index < length, "index {index} out of bounds (length {length})");
        self.make_owned();
        let (buf, _) = self.owned_parts().expect("owned storage after make_owned");
        &mut buf[index]
    }
}

impl<const N: usize> fmt::Display for BufStr<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.as_bytes()), f)
    }
}

impl<const N: usize> fmt::Debug for BufStr<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(self.as_bytes()), f)
    }
}
