use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops;
use core::ptr;

/// A random-access position within the live elements of a [`Vec`].
///
/// Cursors are created with [`Vec::begin`], [`Vec::end`] and
/// [`Vec::cursor_at`]. A cursor borrows the vector it was created from, so
/// the vector cannot be modified while a cursor into it is alive.
///
/// A cursor can be moved anywhere with arithmetic, but it can only be
/// dereferenced while it points at a live element. The [`Iterator`]
/// implementation walks from the current position up to the end.
///
/// [`Vec`]: crate::Vec
/// [`Vec::begin`]: crate::Vec::begin
/// [`Vec::end`]: crate::Vec::end
/// [`Vec::cursor_at`]: crate::Vec::cursor_at
///
/// # Examples
///
/// ```
/// use kvec::try_vec;
///
/// let v = try_vec![10, 20, 30, 40];
///
/// let mut it = v.begin() + 1;
/// assert_eq!(*it, 20);
/// assert_eq!(it.step().get(), Some(&30));
/// assert_eq!(it.next(), Some(&30));
/// assert_eq!(it.get(), Some(&40));
///
/// it -= 3;
/// assert_eq!(it, v.begin());
/// assert!(it < v.end());
/// # Ok::<_, kvec::Error>(())
/// ```
pub struct Cursor<'a, T> {
    slice: &'a [T],
    index: usize,
    end: usize,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(slice: &'a [T], index: usize) -> Self {
        Self {
            slice,
            index,
            end: slice.len(),
        }
    }

    /// Returns the element at the current position, or [`None`] if the cursor
    /// does not point at a live element.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.index)
    }

    /// The offset of the cursor from the beginning of the vector.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Test if the cursor is at or past the end of the vector.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index >= self.slice.len()
    }

    /// Advance the cursor by one position and return it.
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let v = try_vec![1, 2];
    /// let mut it = v.begin();
    /// assert_eq!(it.step().get(), Some(&2));
    /// assert!(it.step().is_end());
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn step(&mut self) -> &mut Self {
        self.index = self.index.wrapping_add(1);
        self
    }

    fn same_slice(&self, other: &Self) -> bool {
        ptr::eq(self.slice, other.slice)
    }
}

impl<T> Clone for Cursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }

        let value = self.slice.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end.saturating_sub(self.index);
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Cursor<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }

        self.end -= 1;
        self.slice.get(self.end)
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

impl<T> ops::Deref for Cursor<'_, T> {
    type Target = T;

    /// Dereference the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor does not point at a live element.
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn deref_failed(index: usize, len: usize) -> ! {
            panic!("cursor at {index} is not dereferenceable in vector of length {len}");
        }

        match self.slice.get(self.index) {
            Some(value) => value,
            None => deref_failed(self.index, self.slice.len()),
        }
    }
}

impl<T> ops::Add<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: usize) -> Self {
        self += n;
        self
    }
}

impl<T> ops::Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: usize) -> Self {
        self -= n;
        self
    }
}

impl<T> ops::AddAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        self.index = self.index.wrapping_add(n);
    }
}

impl<T> ops::SubAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        self.index = self.index.wrapping_sub(n);
    }
}

/// The signed distance between two cursors.
///
/// ```
/// use kvec::try_vec;
///
/// let v = try_vec![1, 2, 3, 4];
/// assert_eq!(v.end() - v.begin(), 4);
/// assert_eq!(v.begin() - v.end(), -4);
/// # Ok::<_, kvec::Error>(())
/// ```
impl<'a, T> ops::Sub<Cursor<'a, T>> for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Cursor<'a, T>) -> isize {
        (self.index as isize).wrapping_sub(other.index as isize)
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_slice(other) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    /// Cursors into different vectors are unordered.
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_slice(other) {
            return None;
        }

        Some(self.index.cmp(&other.index))
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}
