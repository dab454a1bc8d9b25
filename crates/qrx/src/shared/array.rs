// Copy-on-write array
//
// A handle owns one reference to a shared block. Cloning bumps the reference
// count; the first mutation through a shared handle deep-copies the block
// (detach), so writers never disturb other handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use super::{ArrayData, ArrayError, RawArray};

/// Reference-counted, copy-on-write array of plain cells.
///
/// A handle is either null (no block) or points at a block that may be
/// shared with other handles. `Rc` keeps the count, so handles stay on the
/// thread that created them.
pub struct SharedArray<T> {
    block: Option<Rc<Vec<T>>>,
}

/// Allocate a block of `len` cells, failing instead of aborting.
fn alloc_block<T: Copy + Default>(len: usize, prefix: &[T]) -> Result<Vec<T>, ArrayError> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| ArrayError::Alloc { requested: len })?;
    let keep = prefix.len().min(len);
    cells.extend_from_slice(&prefix[..keep]);
    cells.resize(len, T::default());
    Ok(cells)
}

impl<T: Copy + PartialEq + Default> SharedArray<T> {
    /// A null array: no block, size zero.
    pub const fn new() -> Self {
        Self { block: None }
    }

    /// An exclusively owned array of `size` default cells.
    /// Returns a null array when the allocation fails.
    pub fn with_size(size: usize) -> Self {
        match alloc_block(size, &[]) {
            Ok(cells) => Self {
                block: Some(Rc::new(cells)),
            },
            Err(e) => {
                log::warn!("SharedArray::with_size: {}", e);
                Self::new()
            }
        }
    }

    pub fn from_slice(cells: &[T]) -> Self {
        Self {
            block: Some(Rc::new(cells.to_vec())),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.block.is_none()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Number of handles referencing this block; zero for a null array.
    pub fn nrefs(&self) -> usize {
        self.block.as_ref().map_or(0, Rc::strong_count)
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.nrefs() > 1
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.block {
            Some(block) => block.as_slice(),
            None => &[],
        }
    }

    /// Mutable access to the cells, detaching first when shared.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.block {
            Some(block) => Rc::make_mut(block).as_mut_slice(),
            None => &mut [],
        }
    }

    /// Make sure this handle is the only one referencing its block.
    pub fn detach(&mut self) {
        if let Some(block) = &mut self.block {
            Rc::make_mut(block);
        }
    }

    /// Shallow assignment: share `other`'s block.
    pub fn assign(&mut self, other: &Self) {
        self.block.clone_from(&other.block);
    }

    /// A new, exclusively owned array with the same cells.
    pub fn deep_copy(&self) -> Self {
        match &self.block {
            Some(block) => Self {
                block: Some(Rc::new(block.as_ref().clone())),
            },
            None => Self::new(),
        }
    }

    /// Grow or shrink to `len` cells, keeping the first `min(old, len)`.
    /// On failure the handle is left untouched.
    pub fn try_resize(&mut self, len: usize) -> Result<(), ArrayError> {
        if let Some(cells) = self.block.as_mut().and_then(Rc::get_mut) {
            if len > cells.len() {
                cells
                    .try_reserve_exact(len - cells.len())
                    .map_err(|_| ArrayError::Alloc { requested: len })?;
            }
            cells.resize(len, T::default());
            return Ok(());
        }
        // Shared or null: build the new block directly at its final size
        // instead of copying and then growing.
        let cells = alloc_block(len, self.as_slice())?;
        self.block = Some(Rc::new(cells));
        Ok(())
    }

    pub fn resize(&mut self, len: usize) -> bool {
        match self.try_resize(len) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("SharedArray::resize: {}", e);
                false
            }
        }
    }

    /// Cut the array down to `len` cells. Longer lengths are a no-op.
    pub fn truncate(&mut self, len: usize) -> bool {
        if len < self.size() { self.resize(len) } else { true }
    }

    /// Set every cell to `value`, resizing to `len` first when given.
    pub fn fill(&mut self, value: T, len: Option<usize>) -> bool {
        if let Some(len) = len
            && !self.resize(len)
        {
            return false;
        }
        self.as_mut_slice().fill(value);
        true
    }

    /// Overwrite one cell. Out-of-range writes are logged and ignored.
    pub fn set_at(&mut self, index: usize, value: T) -> bool {
        let size = self.size();
        if index >= size {
            log::warn!("SharedArray::set_at: index {} out of range (size {})", index, size);
            return false;
        }
        self.as_mut_slice()[index] = value;
        true
    }

    /// Deep copy `src` into this handle, which ends up exclusively owning
    /// its block. The current block is reused when it is unshared and
    /// already the right length.
    pub fn duplicate(&mut self, src: &[T]) -> bool {
        if let Some(cells) = self.block.as_mut().and_then(Rc::get_mut)
            && cells.len() == src.len()
        {
            cells.copy_from_slice(src);
            return true;
        }
        match alloc_block(src.len(), src) {
            Ok(cells) => {
                self.block = Some(Rc::new(cells));
                true
            }
            Err(e) => {
                log::warn!("SharedArray::duplicate: {}", e);
                false
            }
        }
    }

    /// Resize to `src.len()` and copy `src` in.
    ///
    /// Unlike `duplicate` this never reallocates an unshared block of a
    /// different length up front; it resizes in place and overwrites.
    pub fn store(&mut self, src: &[T]) -> bool {
        if !self.resize(src.len()) {
            return false;
        }
        self.as_mut_slice().copy_from_slice(src);
        true
    }

    /// Give up this handle's block and alias `data` instead, without copying.
    /// The returned view is read-only.
    pub fn set_raw_data(self, data: &[T]) -> RawArray<'_, T> {
        drop(self);
        RawArray::new(data)
    }

    /// Exclusive access to the backing vector, creating an empty block for
    /// a null array.
    pub(crate) fn make_mut_vec(&mut self) -> &mut Vec<T> {
        Rc::make_mut(self.block.get_or_insert_with(|| Rc::new(Vec::new())))
    }
}

impl<T: Copy + PartialEq> ArrayData<T> for SharedArray<T> {
    #[inline]
    fn data(&self) -> &[T] {
        match &self.block {
            Some(block) => block.as_slice(),
            None => &[],
        }
    }
}

impl<T> Clone for SharedArray<T> {
    fn clone(&self) -> Self {
        Self {
            block: self.block.clone(),
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for SharedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq + Default> Deref for SharedArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy + PartialEq> PartialEq for SharedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.block, &other.block) {
            (Some(a), Some(b)) if Rc::ptr_eq(a, b) => true,
            _ => self.data() == other.data(),
        }
    }
}

impl<T: Copy + Eq> Eq for SharedArray<T> {}

impl<T: Copy + PartialEq + Hash> Hash for SharedArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data().hash(state);
    }
}

impl<T: Copy + PartialEq + fmt::Debug> fmt::Debug for SharedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data()).finish()
    }
}

impl<T> From<Vec<T>> for SharedArray<T> {
    fn from(cells: Vec<T>) -> Self {
        Self {
            block: Some(Rc::new(cells)),
        }
    }
}

impl<T: Copy + PartialEq + Default> From<&[T]> for SharedArray<T> {
    fn from(cells: &[T]) -> Self {
        Self::from_slice(cells)
    }
}
