use core::cmp;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::alloc::{Allocator, Global};
use crate::error::Error;
use crate::lifecycle;

/// The factor by which capacity grows when a vector runs out of room.
pub(crate) const GROWTH_FACTOR: usize = 2;

/// A low-level utility for managing a buffer of memory for `T`.
///
/// * A capacity of zero means no memory is owned and no allocator call has
///   been made. The pointer is then a well-aligned dangling sentinel.
/// * Storage is only ever acquired and released through the allocator's
///   [`acquire`] and [`release`], and every acquired block is released
///   exactly once with the capacity it was acquired for.
///
/// A `RawVec` never looks at the contents of its memory. Growing moves the
/// first `len` elements as instructed by the caller and the caller is
/// responsible for dropping live elements before the buffer is dropped.
///
/// [`acquire`]: Allocator::acquire
/// [`release`]: Allocator::release
pub(crate) struct RawVec<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `RawVec` uniquely owns its block, so it is as thread-safe as the
// values and the allocator it holds.
unsafe impl<T: Send, A: Allocator + Send> Send for RawVec<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawVec<T, A> {}

impl<T> RawVec<T, Global> {
    pub(crate) const NEW: Self = Self::new_in(Global);
}

impl<T, A: Allocator> RawVec<T, A> {
    /// Creates an empty buffer which does not allocate.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Creates a buffer with exactly the requested capacity.
    pub(crate) fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        if capacity == 0 {
            return Ok(Self::new_in(alloc));
        }

        let ptr = alloc.acquire::<T>(capacity)?;

        Ok(Self {
            ptr,
            cap: capacity,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Gets a raw pointer to the start of the allocation. Note that this is
    /// dangling if `capacity == 0`.
    #[inline]
    pub(crate) const fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Gets the capacity of the allocation.
    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a shared reference to the allocator backing this `RawVec`.
    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Ensures that the buffer contains at least enough space to hold
    /// `len + additional` elements, growing geometrically if it doesn't.
    ///
    /// On error the buffer and its contents are left untouched.
    pub(crate) fn try_reserve(&mut self, len: usize, additional: usize) -> Result<(), Error> {
        if self.needs_to_grow(len, additional) {
            self.grow_amortized(len, additional)?;
        }

        Ok(())
    }

    /// A specialized version of `try_reserve` for the common push case.
    #[inline(never)]
    pub(crate) fn try_reserve_for_push(&mut self, len: usize) -> Result<(), Error> {
        self.grow_amortized(len, 1)
    }

    /// The same as `try_reserve`, but does not over-allocate.
    pub(crate) fn try_reserve_exact(&mut self, len: usize, additional: usize) -> Result<(), Error> {
        if self.needs_to_grow(len, additional) {
            let cap = len
                .checked_add(additional)
                .ok_or(Error::CapacityOverflow)?;
            self.relocate(len, cap)?;
        }

        Ok(())
    }

    /// Shrinks the buffer down to exactly `cap` elements, keeping the first
    /// `len` of them.
    ///
    /// # Panics
    ///
    /// Panics if `len > cap` or if `cap` is larger than the current capacity.
    pub(crate) fn try_shrink_to(&mut self, len: usize, cap: usize) -> Result<(), Error> {
        assert!(len <= cap, "Tried to shrink below the length");
        assert!(cap <= self.cap, "Tried to shrink to a larger capacity");

        if cap == self.cap {
            return Ok(());
        }

        if cap == 0 {
            // SAFETY: the block is not used again, the dangling sentinel takes
            // its place.
            unsafe {
                self.release_block();
            }

            self.ptr = NonNull::dangling();
            self.cap = 0;
            return Ok(());
        }

        self.relocate(len, cap)
    }

    fn needs_to_grow(&self, len: usize, additional: usize) -> bool {
        additional > self.cap.wrapping_sub(len)
    }

    fn grow_amortized(&mut self, len: usize, additional: usize) -> Result<(), Error> {
        debug_assert!(additional > 0);

        let required = len
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;

        // Geometric growth, starting out at a single element.
        let cap = cmp::max(self.cap.saturating_mul(GROWTH_FACTOR), required);
        let cap = cmp::max(cap, 1);
        self.relocate(len, cap)
    }

    /// Move the first `len` elements into a freshly acquired block of `cap`
    /// elements and release the old block.
    ///
    /// The new block is acquired before anything is touched, so a failure
    /// leaves `self` as it was.
    fn relocate(&mut self, len: usize, cap: usize) -> Result<(), Error> {
        debug_assert!(len <= cap);
        debug_assert!(len <= self.cap);

        let ptr = self.alloc.acquire::<T>(cap)?;

        // SAFETY: the new block is valid for `cap >= len` writes and is
        // distinct from the old one, which holds `len` live elements.
        unsafe {
            lifecycle::relocate(self.ptr.as_ptr(), ptr.as_ptr(), len);
            self.release_block();
        }

        tracing::trace!(from = self.cap, to = cap, len, "reallocated");
        self.ptr = ptr;
        self.cap = cap;
        Ok(())
    }

    /// Release the current block, if any.
    ///
    /// # Safety
    ///
    /// The caller must replace `ptr` and `cap` before the buffer is used
    /// again.
    unsafe fn release_block(&mut self) {
        if self.cap != 0 {
            unsafe {
                self.alloc.release(self.ptr, self.cap);
            }
        }
    }
}

impl<T, A: Allocator> Drop for RawVec<T, A> {
    /// Frees the memory owned by the `RawVec` *without* trying to drop its
    /// contents.
    fn drop(&mut self) {
        // SAFETY: the buffer is not used again.
        unsafe {
            self.release_block();
        }
    }
}
