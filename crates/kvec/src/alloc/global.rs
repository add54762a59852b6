use core::alloc::Layout;
use core::ptr::NonNull;

use std::alloc::{alloc, dealloc};

use crate::alloc::{AllocError, Allocator};

/// The default allocator, backed by the platform's general purpose allocator.
///
/// This supports enforcing thread-local memory limits through the [`limit`]
/// module.
///
/// [`limit`]: crate::limit
///
/// ```
/// use kvec::{limit, Vec};
///
/// let f = limit::with(1024, || {
///     assert!(Vec::<u8>::try_with_capacity(1024).is_ok());
///     assert!(Vec::<u8>::try_with_capacity(1025).is_err());
/// });
///
/// f.call();
/// ```
#[derive(Default, Debug, Clone, Copy)]
pub struct Global;

impl Global {
    /// Release the specified memory from being accounted for.
    pub(crate) fn release_budget(&self, layout: Layout) {
        crate::limit::release(layout.size());
    }

    /// Acquire the specified memory from the current budget.
    pub(crate) fn take_budget(&self, layout: Layout) -> Result<(), AllocError> {
        if !crate::limit::take(layout.size()) {
            return Err(AllocError { layout });
        }

        Ok(())
    }

    /// Return a block to the platform allocator without crediting the budget.
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by `Global` with `layout`, which must be
    /// non-zero in size.
    pub(crate) unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: upheld by the caller.
        unsafe {
            dealloc(ptr.as_ptr(), layout);
        }
    }
}

unsafe impl Allocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.take_budget(layout)?;

        match layout.size() {
            0 => Ok(NonNull::slice_from_raw_parts(dangling(&layout), 0)),
            // SAFETY: `layout` is non-zero in size.
            size => unsafe {
                let Some(ptr) = NonNull::new(alloc(layout)) else {
                    self.release_budget(layout);
                    return Err(AllocError { layout });
                };

                Ok(NonNull::slice_from_raw_parts(ptr, size))
            },
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: `layout` is non-zero in size, other conditions must be
            // upheld by the caller.
            unsafe {
                self.free(ptr, layout);
            }

            self.release_budget(layout);
        }
    }
}

/// Creates a `NonNull` that is dangling, but well-aligned for this Layout.
///
/// The pointer value may represent a valid pointer, so it must not be used as
/// a "not yet initialized" sentinel value.
const fn dangling(layout: &Layout) -> NonNull<u8> {
    // SAFETY: alignments are never zero.
    unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
}
