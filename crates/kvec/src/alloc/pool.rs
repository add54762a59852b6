use core::alloc::Layout;
use core::cell::{Cell, RefCell};
use core::hash::BuildHasherDefault;
use core::ptr::NonNull;

use std::collections::HashMap;
use std::rc::Rc;

use ahash::AHasher;

use crate::alloc::{AllocError, Allocator, Global};

type FreeLists = HashMap<Layout, std::vec::Vec<NonNull<u8>>, BuildHasherDefault<AHasher>>;

/// Counters describing how a [`Pool`] has been used.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct PoolStats {
    /// Allocations served from a previously released block.
    pub hits: usize,
    /// Allocations which had to go to the global allocator.
    pub misses: usize,
    /// Blocks currently held in the free lists.
    pub cached: usize,
}

/// A pooling allocator which keeps released blocks around and hands them out
/// again for requests with an identical layout.
///
/// Fresh blocks are obtained from [`Global`], so the [`limit`] module applies
/// to them as well. A block only counts against the memory limit while it is
/// handed out: releasing it into the pool credits the budget and handing it
/// out again charges it anew, so a cached block can fail to be reused when
/// the budget is exhausted.
///
/// Cloning a pool produces another handle to the same free lists, cached
/// blocks are returned to [`Global`] when the last handle is dropped or when
/// [`Pool::purge`] is called.
///
/// [`limit`]: crate::limit
///
/// # Examples
///
/// ```
/// use kvec::{Pool, Vec};
///
/// let pool = Pool::new();
///
/// let a = Vec::<u32, _>::try_with_capacity_in(16, pool.clone())?;
/// drop(a);
///
/// let b = Vec::<u32, _>::try_with_capacity_in(16, pool.clone())?;
/// assert_eq!(b.capacity(), 16);
///
/// let stats = pool.stats();
/// assert_eq!(stats.misses, 1);
/// assert_eq!(stats.hits, 1);
/// # Ok::<_, kvec::Error>(())
/// ```
#[derive(Default, Clone)]
pub struct Pool {
    inner: Rc<PoolInner>,
}

#[derive(Default)]
struct PoolInner {
    free: RefCell<FreeLists>,
    stats: Cell<PoolStats>,
}

impl Pool {
    /// Construct a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of the usage counters of this pool.
    pub fn stats(&self) -> PoolStats {
        self.inner.stats.get()
    }

    /// Return every cached block to the global allocator.
    pub fn purge(&self) {
        self.inner.purge();
    }

    fn update(&self, f: impl FnOnce(&mut PoolStats)) {
        let mut stats = self.inner.stats.get();
        f(&mut stats);
        self.inner.stats.set(stats);
    }
}

impl PoolInner {
    fn purge(&self) {
        let mut free = self.free.borrow_mut();
        let mut released = 0usize;

        for (layout, blocks) in free.drain() {
            for ptr in blocks {
                // SAFETY: every cached block was allocated by `Global` with
                // this non-zero layout, and its budget was credited when it
                // was cached.
                unsafe {
                    Global.free(ptr, layout);
                }

                released += 1;
            }
        }

        let mut stats = self.stats.get();
        stats.cached = 0;
        self.stats.set(stats);

        if released > 0 {
            tracing::trace!(released, "purged pool");
        }
    }
}

impl Drop for PoolInner {
    fn drop(&mut self) {
        self.purge();
    }
}

unsafe impl Allocator for Pool {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if layout.size() == 0 {
            return Global.allocate(layout);
        }

        let cached = match self.inner.free.borrow_mut().get_mut(&layout) {
            Some(blocks) if !blocks.is_empty() => {
                Global.take_budget(layout)?;
                blocks.pop()
            }
            _ => None,
        };

        if let Some(ptr) = cached {
            self.update(|stats| {
                stats.hits += 1;
                stats.cached -= 1;
            });

            tracing::trace!(size = layout.size(), "pool hit");
            return Ok(NonNull::slice_from_raw_parts(ptr, layout.size()));
        }

        let block = Global.allocate(layout)?;
        self.update(|stats| stats.misses += 1);
        tracing::trace!(size = layout.size(), "pool miss");
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        self.inner
            .free
            .borrow_mut()
            .entry(layout)
            .or_default()
            .push(ptr);

        Global.release_budget(layout);
        self.update(|stats| stats.cached += 1);
    }
}

impl core::fmt::Debug for Pool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pool").field("stats", &self.stats()).finish()
    }
}
