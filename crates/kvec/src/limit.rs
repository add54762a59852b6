//! Memory limits for the [`Global`] allocator.
//!
//! Every allocation made through [`Global`] is charged against a thread-local
//! budget. By default the budget is unlimited.
//!
//! [`Global`]: crate::Global

use core::cell::Cell;

std::thread_local!(static MEMORY: Cell<usize> = const { Cell::new(usize::MAX) });

/// Something being budgeted.
///
/// See [`with`].
#[must_use = "The memory limit is only enforced once `call` is invoked"]
pub struct Memory<T> {
    memory: usize,
    value: T,
}

/// Wrap the given value with a memory limit. Using a value of [`usize::MAX`]
/// effectively disables the memory limit.
///
/// The memory limit is a thread-local budget of how many bytes may be live
/// through [`Global`] while the wrapped closure runs. Memory already
/// allocated before the closure is invoked is not counted, but memory
/// released during it is credited back.
///
/// [`Global`]: crate::Global
///
/// # Examples
///
/// ```
/// use kvec::{limit, Vec};
///
/// let f = limit::with(1024, || {
///     let mut vec = Vec::<u32>::try_with_capacity(128)?;
///
///     for n in 0..128 {
///         vec.try_push(n)?;
///     }
///
///     // 512 bytes are live, doubling would need another 1024.
///     assert!(vec.try_push(128).is_err());
///     assert_eq!(vec.len(), 128);
///     Ok::<_, kvec::Error>(())
/// });
///
/// f.call()?;
/// # Ok::<_, kvec::Error>(())
/// ```
pub fn with<T>(memory: usize, value: T) -> Memory<T> {
    Memory { memory, value }
}

/// Get the remaining memory budget for the current thread.
///
/// # Examples
///
/// ```
/// use kvec::{limit, Vec};
///
/// let f = limit::with(1024, || {
///     let before = limit::get();
///     let vec = Vec::<u8>::try_with_capacity(256)?;
///     assert_eq!(before - limit::get(), 256);
///     drop(vec);
///     assert_eq!(limit::get(), before);
///     Ok::<_, kvec::Error>(())
/// });
///
/// f.call()?;
/// # Ok::<_, kvec::Error>(())
/// ```
pub fn get() -> usize {
    MEMORY.with(|tls| tls.get())
}

/// Take the given amount of memory from the current budget. Returns `false`
/// if the budget would be breached, `true` otherwise.
pub(crate) fn take(amount: usize) -> bool {
    MEMORY.with(|tls| {
        let v = tls.get();

        if v >= amount {
            tls.set(v.wrapping_sub(amount));
            true
        } else {
            false
        }
    })
}

/// Release the given amount of memory to the current budget.
pub(crate) fn release(amount: usize) {
    MEMORY.with(|tls| {
        let v = tls.get();
        tls.set(v.saturating_add(amount));
    })
}

fn replace(value: usize) -> usize {
    MEMORY.with(|tls| tls.replace(value))
}

#[repr(transparent)]
struct MemoryGuard(usize);

impl Drop for MemoryGuard {
    fn drop(&mut self) {
        let _ = replace(self.0);
    }
}

impl<T, O> Memory<T>
where
    T: FnOnce() -> O,
{
    /// Call the wrapped function with the memory limit installed, restoring
    /// the previous limit once it returns.
    pub fn call(self) -> O {
        tracing::debug!(memory = self.memory, "installing memory limit");
        let _guard = MemoryGuard(replace(self.memory));
        (self.value)()
    }
}
