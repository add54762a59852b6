use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use crate::alloc::{Allocator, Global};
use crate::lifecycle;
use crate::raw_vec::RawVec;

/// An iterator that moves out of a vector.
///
/// This `struct` is created by the `into_iter` method on [`Vec`](super::Vec)
/// (provided by the [`IntoIterator`] trait).
///
/// Elements which are not consumed are dropped together with the iterator,
/// after which the storage is released.
///
/// # Example
///
/// ```
/// use kvec::try_vec;
///
/// let v = try_vec![0, 1, 2];
/// let iter = v.into_iter();
/// assert_eq!(iter.len(), 3);
/// # Ok::<_, kvec::Error>(())
/// ```
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawVec<T, A>,
    // Elements in `head..tail` are live.
    head: usize,
    tail: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(super) fn new(buf: RawVec<T, A>, len: usize) -> Self {
        Self {
            buf,
            head: 0,
            tail: len,
        }
    }

    /// Returns the remaining items of this iterator as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let vec = try_vec!['a', 'b', 'c'];
    /// let mut into_iter = vec.into_iter();
    /// assert_eq!(into_iter.as_slice(), &['a', 'b', 'c']);
    /// let _ = into_iter.next();
    /// assert_eq!(into_iter.as_slice(), &['b', 'c']);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `head..tail` is live.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.head), self.tail - self.head) }
    }

    /// Returns a reference to the underlying allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }

        // SAFETY: the element at `head` is live and is moved out exactly once.
        unsafe {
            let value = ptr::read(self.buf.ptr().add(self.head));
            self.head += 1;
            Some(value)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }

        // SAFETY: the element at `tail - 1` is live and is moved out exactly
        // once.
        unsafe {
            self.tail -= 1;
            Some(ptr::read(self.buf.ptr().add(self.tail)))
        }
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: the remaining elements are live, the block itself is
        // released when `buf` is dropped.
        unsafe {
            let remaining = self.tail - self.head;
            let ptr = self.buf.ptr().add(self.head);
            self.head = self.tail;
            lifecycle::destroy_slice(ptr, remaining);
        }
    }
}
