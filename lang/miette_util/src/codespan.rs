//! The types in this module were originally part of the codespan library
//! <https://github.com/brendanzab/codespan>, which is licensed under the
//! Apache-2.0 license.
use std::ops::{Add, Sub};

/// A byte position in a source file.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteIndex(pub u32);

impl ByteIndex {
    /// Convert the position into a `usize`, for use in array indexing
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Sub for ByteIndex {
    type Output = ByteOffset;

    #[inline]
    fn sub(self, rhs: ByteIndex) -> ByteOffset {
        ByteOffset(self.0 as i64 - rhs.0 as i64)
    }
}

impl Add<ByteOffset> for ByteIndex {
    type Output = ByteIndex;

    #[inline]
    fn add(self, rhs: ByteOffset) -> ByteIndex {
        ByteIndex((self.0 as i64 + rhs.0) as u32)
    }
}

/// A byte offset in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteOffset(pub i64);

impl ByteOffset {
    /// Convert the offset into a `usize`, for use in array indexing
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

/// A region of a source file, delimited by a pair of byte positions.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: ByteIndex,
    pub end: ByteIndex,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Span {
        Span { start: ByteIndex(start), end: ByteIndex(end) }
    }

    /// Gives an empty span at the start of a source.
    pub const fn initial() -> Span {
        Span { start: ByteIndex(0), end: ByteIndex(0) }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Span {
        Span::new(range.start as u32, range.end as u32)
    }
}
