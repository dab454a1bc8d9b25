// Shared byte buffer
// Reference-counted, copy-on-write arrays of plain cells, plus a borrowed
// zero-copy view for data owned elsewhere.
mod array;
mod raw;

pub use array::SharedArray;
pub use raw::RawArray;

use thiserror::Error;

/// Shared array of bytes. The storage behind every `SharedString`.
pub type ByteArray = SharedArray<u8>;

/// Errors reported by the fallible buffer operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// The allocator refused to hand out a block of this many cells.
    #[error("Failed to allocate {requested} cells")]
    Alloc { requested: usize },
    /// `reset_raw_data` was given a slice other than the one it was created from.
    #[error("Raw data mismatch: reset with a different pointer or length")]
    RawDataMismatch,
}

/// Read access shared by the owned (`SharedArray`) and borrowed (`RawArray`) arrays.
///
/// Only reading lives here, so a borrowed view can never be mutated.
pub trait ArrayData<T: Copy + PartialEq> {
    fn data(&self) -> &[T];

    #[inline]
    fn size(&self) -> usize {
        self.data().len()
    }

    /// Cell at `index`. Out-of-range access is logged and yields `None`.
    fn at(&self, index: usize) -> Option<T> {
        let data = self.data();
        match data.get(index) {
            Some(value) => Some(*value),
            None => {
                log::warn!("ArrayData::at: index {} out of range (size {})", index, data.len());
                None
            }
        }
    }

    /// Index of the first cell equal to `value` at or after `from`.
    /// The cell width is that of `T`.
    fn find(&self, value: &T, from: usize) -> Option<usize> {
        let data = self.data();
        if from > data.len() {
            log::warn!("ArrayData::find: index {} out of range (size {})", from, data.len());
            return None;
        }
        data[from..]
            .iter()
            .position(|cell| cell == value)
            .map(|pos| pos + from)
    }

    /// Index of the first run of cells equal to `needle` at or after `from`.
    /// An empty needle never matches.
    fn find_slice(&self, needle: &[T], from: usize) -> Option<usize> {
        let data = self.data();
        if needle.is_empty() || from > data.len() || needle.len() > data.len() - from {
            return None;
        }
        data[from..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|pos| pos + from)
    }

    /// Number of cells equal to `value`.
    fn contains(&self, value: &T) -> usize {
        self.data().iter().filter(|cell| *cell == value).count()
    }

    fn is_equal<A>(&self, other: &A) -> bool
    where
        A: ArrayData<T> + ?Sized,
        Self: Sized,
    {
        let (a, b) = (self.data(), other.data());
        a.len() == b.len() && (std::ptr::eq(a.as_ptr(), b.as_ptr()) || a == b)
    }
}
