//! Allocated storage.
//!
//! The [`Allocator`] trait is the only capability a [`Vec`] needs from its
//! environment: hand out a block of memory for a layout and take it back
//! again. Allocators never construct or destroy the values stored in the
//! memory they hand out.
//!
//! [`Vec`]: crate::Vec

pub use self::global::Global;
mod global;

pub use self::pool::{Pool, PoolStats};
mod pool;

use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

use crate::error::Error;

/// Error raised while allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    pub(crate) layout: Layout,
}

impl AllocError {
    /// The layout which could not be allocated.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to allocate {} bytes of memory",
            self.layout.size()
        )
    }
}

impl std::error::Error for AllocError {}

/// An implementation of `Allocator` can allocate and deallocate arbitrary
/// blocks of data described via [`Layout`].
///
/// # Safety
///
/// Memory blocks returned from an allocator must point to valid memory and
/// retain their validity until the block is passed to [`deallocate`], or the
/// allocator and every clone of it is dropped.
///
/// Cloning an allocator must produce an allocator which can deallocate the
/// blocks handed out by the original.
///
/// [`deallocate`]: Allocator::deallocate
pub unsafe trait Allocator {
    /// Attempts to allocate a block of memory.
    ///
    /// On success, returns a [`NonNull<[u8]>`][NonNull] meeting the size and
    /// alignment guarantees of `layout`. The contents of the block are
    /// uninitialized.
    ///
    /// # Errors
    ///
    /// Returning `Err` indicates that either memory is exhausted or `layout`
    /// does not meet the allocator's size or alignment constraints.
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError>;

    /// Deallocates the memory referenced by `ptr`.
    ///
    /// # Safety
    ///
    /// * `ptr` must denote a block of memory currently allocated via this
    ///   allocator, and
    /// * `layout` must be the same layout that was used to allocate that block
    ///   of memory.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Acquire uninitialized storage for `n` values of type `T`.
    ///
    /// Requests which amount to zero bytes never reach [`allocate`] and
    /// return a well-aligned dangling pointer instead.
    ///
    /// [`allocate`]: Allocator::allocate
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{Allocator, Global};
    ///
    /// let ptr = Global.acquire::<u64>(4)?;
    ///
    /// unsafe {
    ///     ptr.as_ptr().write(42);
    ///     assert_eq!(ptr.as_ptr().read(), 42);
    ///     Global.release(ptr, 4);
    /// }
    /// # Ok::<_, kvec::Error>(())
    /// ```
    fn acquire<T>(&self, n: usize) -> Result<NonNull<T>, Error>
    where
        Self: Sized,
    {
        let layout = array_layout::<T>(n)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        Ok(self.allocate(layout)?.cast())
    }

    /// Release storage previously returned by [`acquire`] for the same `n`.
    ///
    /// Values stored in the block are not dropped.
    ///
    /// [`acquire`]: Allocator::acquire
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `acquire::<T>(n)` on this allocator
    /// (or a clone of it) and must not have been released since.
    unsafe fn release<T>(&self, ptr: NonNull<T>, n: usize)
    where
        Self: Sized,
    {
        let Ok(layout) = Layout::array::<T>(n) else {
            return;
        };

        if layout.size() != 0 {
            unsafe {
                self.deallocate(ptr.cast(), layout);
            }
        }
    }
}

unsafe impl<A> Allocator for &A
where
    A: Allocator + ?Sized,
{
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// Compute the layout of an array of `n` values of type `T`, guarding
/// against sizes which would exceed `isize::MAX` bytes.
#[inline]
pub(crate) fn array_layout<T>(n: usize) -> Result<Layout, Error> {
    Layout::array::<T>(n).map_err(|_| Error::CapacityOverflow)
}
