use std::fmt;
use std::ops::Deref;

use super::{ArrayData, ArrayError, SharedArray};

/// Zero-copy, read-only view of cells owned elsewhere.
///
/// This is the raw-data mode of a shared array: nothing is copied and
/// nothing is owned, and since the type has no mutating methods the aliased
/// memory cannot be written through it. `reset_raw_data` turns it back into
/// a (null) `SharedArray`.
#[derive(Clone, Copy)]
pub struct RawArray<'a, T> {
    data: &'a [T],
}

impl<'a, T: Copy + PartialEq + Default> RawArray<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Leave raw-data mode. `data` must be the very slice (same pointer and
    /// length) the view was created from; anything else is logged and the
    /// view is handed back unchanged.
    pub fn reset_raw_data(self, data: &[T]) -> Result<SharedArray<T>, (Self, ArrayError)> {
        if !std::ptr::eq(self.data, data) {
            log::warn!(
                "RawArray::reset_raw_data: expected {:p}+{}, got {:p}+{}",
                self.data.as_ptr(),
                self.data.len(),
                data.as_ptr(),
                data.len()
            );
            return Err((self, ArrayError::RawDataMismatch));
        }
        Ok(SharedArray::new())
    }

    /// Copy the aliased cells into a new, owned array.
    pub fn to_shared(&self) -> SharedArray<T> {
        SharedArray::from_slice(self.data)
    }
}

impl<T: Copy + PartialEq> ArrayData<T> for RawArray<'_, T> {
    #[inline]
    fn data(&self) -> &[T] {
        self.data
    }
}

impl<T> Deref for RawArray<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for RawArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawArray")
            .field("ptr", &self.data.as_ptr())
            .field("data", &self.data)
            .finish()
    }
}
