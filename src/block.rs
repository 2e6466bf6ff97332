//! Raw block storage backing the segment directory of a [`Deque`](crate::Deque).

use crate::{DequeError, Position};
use std::alloc::Layout;
use std::ptr::NonNull;

/// Number of element slots in every block.
pub const BLOCK_SIZE: usize = 64;

/// Owning handle to one block of `BLOCK_SIZE` uninitialized slots.
///
/// The handle only owns the storage. Constructing and destroying the values living in the
/// slots is the job of the deque that owns the handle; dropping a `RawBlock` never runs
/// element destructors. Zero-sized types never allocate.
pub(crate) struct RawBlock<T> {
    ptr: NonNull<T>,
}

impl<T> RawBlock<T> {
    #[inline]
    fn layout() -> Result<Layout, DequeError> {
        // only fails for absurdly large T; report it the same way the allocator would
        Layout::array::<T>(BLOCK_SIZE).map_err(|_| DequeError::AllocFailed {
            layout: Layout::new::<T>(),
        })
    }

    /// Allocates fresh uninitialized storage for one block.
    pub(crate) fn allocate() -> Result<Self, DequeError> {
        if std::mem::size_of::<T>() == 0 {
            return Ok(RawBlock {
                ptr: NonNull::dangling(),
            });
        }
        let layout = Self::layout()?;
        // Ensure that the new allocation doesn't exceed `isize::MAX` bytes.
        if layout.size() > isize::MAX as usize {
            return Err(DequeError::AllocFailed { layout });
        }
        let ptr = unsafe { std::alloc::alloc(layout) };
        match NonNull::new(ptr as *mut T) {
            Some(ptr) => Ok(RawBlock { ptr }),
            None => Err(DequeError::AllocFailed { layout }),
        }
    }

    /// Returns a pointer to the slot at `offset`.
    ///
    /// The slot may or may not hold a live value; the caller tracks that.
    #[inline]
    pub(crate) fn slot(&self, offset: usize) -> *mut T {
        debug_assert!(offset < BLOCK_SIZE, "slot offset {offset} outside of block");
        unsafe { self.ptr.as_ptr().add(offset) }
    }
}

impl<T> Drop for RawBlock<T> {
    #[inline]
    fn drop(&mut self) {
        if std::mem::size_of::<T>() == 0 {
            return;
        }
        if let Ok(layout) = Self::layout() {
            unsafe {
                std::alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

/// Resolves a position against a segment directory.
///
/// # Panics
/// Panics if the directory has no allocated block at the position's segment.
#[inline]
pub(crate) fn slot_in<T>(blocks: &[Option<RawBlock<T>>], pos: Position) -> *mut T {
    match blocks.get(pos.segment) {
        Some(Some(block)) => block.slot(pos.offset),
        _ => unreachable!("no block allocated for segment {}", pos.segment),
    }
}

/// Routes a failed block allocation to the global allocation error handler.
///
/// Used by the infallible operations, which have no way to report the failure.
#[cold]
pub(crate) fn alloc_failure(error: DequeError) -> ! {
    match error {
        DequeError::AllocFailed { layout } => std::alloc::handle_alloc_error(layout),
        other => panic!("unexpected block allocation error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_writable() {
        let block = RawBlock::<String>::allocate().unwrap();
        unsafe {
            std::ptr::write(block.slot(0), String::from("first"));
            std::ptr::write(block.slot(BLOCK_SIZE - 1), String::from("last"));
            assert_eq!(&*block.slot(0), "first");
            assert_eq!(&*block.slot(BLOCK_SIZE - 1), "last");
            std::ptr::drop_in_place(block.slot(0));
            std::ptr::drop_in_place(block.slot(BLOCK_SIZE - 1));
        }
    }

    #[test]
    fn zst_blocks_do_not_allocate() {
        let block = RawBlock::<()>::allocate().unwrap();
        assert_eq!(block.slot(3), NonNull::<()>::dangling().as_ptr());
    }
}
