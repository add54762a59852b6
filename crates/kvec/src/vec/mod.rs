//! A contiguous growable array type with allocator-provided contents,
//! written `Vec<T, A>`.
//!
//! Vectors have *O*(1) indexing, amortized *O*(1) push (to the end) and *O*(1)
//! pop (from the end).
//!
//! # Examples
//!
//! You can explicitly create a [`Vec`] with [`Vec::new`]:
//!
//! ```
//! use kvec::Vec;
//!
//! let v: Vec<i32> = Vec::new();
//! assert_eq!(v.capacity(), 0);
//! ```
//!
//! ...or by using the [`try_vec!`][crate::try_vec!] macro:
//!
//! ```
//! use kvec::{try_vec, Vec};
//!
//! let v: Vec<i32> = try_vec![];
//! let v = try_vec![1, 2, 3, 4, 5];
//! let v = try_vec![0; 10]; // ten zeroes
//! # Ok::<_, kvec::Error>(())
//! ```
//!
//! You can [`try_push`] values onto the end of a vector (which will grow the
//! vector as needed):
//!
//! ```
//! use kvec::try_vec;
//!
//! let mut v = try_vec![1, 2];
//! v.try_push(3)?;
//! # Ok::<_, kvec::Error>(())
//! ```
//!
//! [`try_push`]: Vec::try_push

pub use self::cursor::Cursor;
mod cursor;

pub use self::into_iter::IntoIter;
mod into_iter;

mod partial_eq;

#[cfg(feature = "serde")]
mod serde;

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};
use core::ops::{self, Index, IndexMut, Range, RangeBounds};
use core::ptr;
use core::slice::{self, SliceIndex};

use crate::alloc::{Allocator, Global};
use crate::clone::TryClone;
use crate::error::Error;
use crate::iter::{TryExtend, TryFromIteratorIn};
use crate::lifecycle;
use crate::raw_vec::RawVec;
use crate::slice::range as slice_range;

/// Construct a vector from an element that can be cloned.
#[doc(hidden)]
pub fn try_from_elem<T: TryClone>(elem: T, n: usize) -> Result<Vec<T>, Error> {
    Vec::try_from_elem_in(elem, n, Global)
}

/// A contiguous growable array type, written as `Vec<T, A>`, short for
/// 'vector'.
///
/// # Examples
///
/// ```
/// use kvec::Vec;
///
/// let mut vec = Vec::new();
/// vec.try_push(1)?;
/// vec.try_push(2)?;
///
/// assert_eq!(vec.len(), 2);
/// assert_eq!(vec[0], 1);
///
/// assert_eq!(vec.pop(), Some(2));
/// assert_eq!(vec.len(), 1);
///
/// vec[0] = 7;
/// assert_eq!(vec[0], 7);
///
/// vec.try_extend_from_slice(&[1, 2, 3])?;
///
/// for x in &vec {
///     println!("{x}");
/// }
///
/// assert_eq!(vec, [7, 1, 2, 3]);
/// # Ok::<_, kvec::Error>(())
/// ```
///
/// # Capacity and reallocation
///
/// The capacity of a vector is the amount of space allocated for any future
/// elements that will be added onto the vector. This is not to be confused
/// with the *length* of a vector, which specifies the number of actual
/// elements within the vector.
///
/// When an element is added to a full vector its capacity doubles (starting
/// from one for an empty vector), or grows to exactly what is needed if that
/// is more. Growing acquires a new block from the allocator, moves the live
/// elements over in order and releases the old block. If acquiring the new
/// block fails the vector is left exactly as it was.
///
/// A vector never shrinks by itself. [`clear`], [`remove`] and [`erase`]
/// keep the storage around, use [`try_shrink_to_fit`] to give it back.
///
/// [`clear`]: Vec::clear
/// [`remove`]: Vec::remove
/// [`erase`]: Vec::erase
/// [`try_shrink_to_fit`]: Vec::try_shrink_to_fit
///
/// # Guarantees
///
/// `Vec` is a (pointer, capacity, length) triplet plus its allocator. Elements
/// `[0, len)` are live, elements `[len, capacity)` are uninitialized. A vector
/// with capacity zero owns no memory and has never called its allocator.
pub struct Vec<T, A: Allocator = Global> {
    buf: RawVec<T, A>,
    len: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Inherent methods
////////////////////////////////////////////////////////////////////////////////

impl<T> Vec<T> {
    /// Constructs a new, empty `Vec<T>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let vec: Vec<i32> = Vec::new();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Vec {
            buf: RawVec::NEW,
            len: 0,
        }
    }

    /// Constructs a new, empty `Vec<T>` with exactly the specified capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let mut vec = Vec::try_with_capacity(10)?;
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 10);
    ///
    /// for i in 0..10 {
    ///     vec.try_push(i)?;
    /// }
    ///
    /// assert_eq!(vec.capacity(), 10);
    ///
    /// vec.try_push(11)?;
    /// assert_eq!(vec.capacity(), 20);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::try_with_capacity_in(capacity, Global)
    }

    /// Constructs a vector holding `n` clones of `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let vec = Vec::try_from_elem(5, 10)?;
    /// assert_eq!(vec.len(), 10);
    /// assert_eq!(vec.capacity(), 10);
    /// assert!(vec.iter().all(|&n| n == 5));
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_from_elem(elem: T, n: usize) -> Result<Self, Error>
    where
        T: TryClone,
    {
        Self::try_from_elem_in(elem, n, Global)
    }
}

impl<T, A: Allocator> Vec<T, A> {
    /// Constructs a new, empty `Vec<T, A>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{Pool, Vec};
    ///
    /// let vec: Vec<i32, Pool> = Vec::new_in(Pool::new());
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Vec {
            buf: RawVec::new_in(alloc),
            len: 0,
        }
    }

    /// Constructs a new, empty `Vec<T, A>` with exactly the specified capacity
    /// with the provided allocator.
    ///
    /// If `capacity` is 0, the vector will not allocate.
    ///
    /// # Errors
    ///
    /// Errors with [`Error::CapacityOverflow`] if the new capacity exceeds
    /// `isize::MAX` bytes, or with [`Error::AllocError`] if the allocator
    /// fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{Global, Vec};
    ///
    /// let vec = Vec::<u32, _>::try_with_capacity_in(10, Global)?;
    /// assert_eq!(vec.capacity(), 10);
    ///
    /// assert!(Vec::<u64, _>::try_with_capacity_in(usize::MAX, Global).is_err());
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        Ok(Vec {
            buf: RawVec::try_with_capacity_in(capacity, alloc)?,
            len: 0,
        })
    }

    /// Constructs a vector holding `n` clones of `elem` with the provided
    /// allocator. The last slot receives `elem` itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{Pool, Vec};
    ///
    /// let vec = Vec::try_from_elem_in(5.5, 6, Pool::new())?;
    /// assert_eq!(vec, [5.5; 6]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_from_elem_in(elem: T, n: usize, alloc: A) -> Result<Self, Error>
    where
        T: TryClone,
    {
        let mut vec = Self::try_with_capacity_in(n, alloc)?;
        vec.try_extend_with(n, elem)?;
        Ok(vec)
    }

    /// Constructs a vector from an array by moving its elements, using the
    /// provided allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{Pool, Vec};
    ///
    /// let vec = Vec::try_from_array_in(['a', 'b', 'c', 'd'], Pool::new())?;
    /// assert_eq!(vec, ['a', 'b', 'c', 'd']);
    /// assert_eq!(vec.capacity(), 4);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_from_array_in<const N: usize>(arr: [T; N], alloc: A) -> Result<Self, Error> {
        let mut vec = Self::try_with_capacity_in(N, alloc)?;
        let arr = ManuallyDrop::new(arr);

        // SAFETY: the vector has room for exactly `N` elements and the array
        // is never dropped, so ownership of its elements moves over.
        unsafe {
            lifecycle::relocate(arr.as_ptr(), vec.as_mut_ptr(), N);
            vec.set_len(N);
        }

        Ok(vec)
    }

    /// Returns a reference to the underlying allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    pub(crate) fn into_raw_vec(self) -> (RawVec<T, A>, usize) {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped so the buffer is read out exactly
        // once.
        let buf = unsafe { ptr::read(&me.buf) };
        (buf, me.len)
    }

    /// Returns the total number of elements the vector can hold without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let mut vec: Vec<i32> = Vec::try_with_capacity(10)?;
    /// vec.try_push(42)?;
    /// assert_eq!(vec.capacity(), 10);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Tries to reserve capacity for at least `additional` more elements. The
    /// vector grows geometrically, so it may reserve more than requested.
    /// Does nothing if capacity is already sufficient.
    ///
    /// # Errors
    ///
    /// If the capacity overflows, or the allocator reports a failure, then an
    /// error is returned and the vector is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{Error, Vec};
    ///
    /// fn process_data(data: &[u32]) -> Result<Vec<u32>, Error> {
    ///     let mut output = Vec::new();
    ///
    ///     // Pre-reserve the memory, exiting if we can't
    ///     output.try_reserve(data.len())?;
    ///
    ///     for value in data {
    ///        output.try_push(*value)?;
    ///     }
    ///
    ///     Ok(output)
    /// }
    ///
    /// assert_eq!(process_data(&[1, 2, 3])?, [1, 2, 3]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.buf.try_reserve(self.len, additional)
    }

    /// Tries to reserve the minimum capacity for at least `additional`
    /// elements. Unlike [`try_reserve`], this will not deliberately
    /// over-allocate.
    ///
    /// [`try_reserve`]: Vec::try_reserve
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let mut vec = Vec::<u8>::new();
    /// vec.try_reserve_exact(7)?;
    /// assert_eq!(vec.capacity(), 7);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), Error> {
        self.buf.try_reserve_exact(self.len, additional)
    }

    /// Shrinks the capacity of the vector to exactly its length.
    ///
    /// An empty vector gives its storage back entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let mut vec = Vec::try_with_capacity(10)?;
    /// vec.try_extend_from_slice(&[1, 2, 3])?;
    /// assert_eq!(vec.capacity(), 10);
    /// vec.try_shrink_to_fit()?;
    /// assert_eq!(vec.capacity(), 3);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_shrink_to_fit(&mut self) -> Result<(), Error> {
        if self.capacity() > self.len {
            self.buf.try_shrink_to(self.len, self.len)?;
        }

        Ok(())
    }

    /// Shortens the vector, keeping the first `len` elements and dropping
    /// the rest.
    ///
    /// If `len` is greater than the vector's current length, this has no
    /// effect. The capacity is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut vec = try_vec![1, 2, 3, 4, 5];
    /// vec.truncate(2);
    /// assert_eq!(vec, [1, 2]);
    ///
    /// vec.truncate(8);
    /// assert_eq!(vec, [1, 2]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len > self.len {
            return;
        }

        let remaining_len = self.len - len;

        // SAFETY: the length is shrunk before the elements are dropped so that
        // a panicking destructor cannot cause a double drop.
        unsafe {
            let tail = self.as_mut_ptr().add(len);
            self.len = len;
            lifecycle::destroy_slice(tail, remaining_len);
        }
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns a raw pointer to the vector's buffer, or a dangling raw pointer
    /// valid for zero sized reads if the vector didn't allocate.
    ///
    /// Modifying the vector may cause its buffer to be reallocated, which
    /// would also make any pointers to it invalid.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Returns an unsafe mutable pointer to the vector's buffer, or a dangling
    /// raw pointer valid for zero sized reads if the vector didn't allocate.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    ///
    /// - `new_len` must be less than or equal to [`capacity()`].
    /// - The elements at `old_len..new_len` must be initialized.
    ///
    /// [`capacity()`]: Vec::capacity
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Appends an element to the back of the vector.
    ///
    /// If the vector is full its capacity doubles first, see [Capacity and
    /// reallocation].
    ///
    /// [Capacity and reallocation]: Vec#capacity-and-reallocation
    ///
    /// # Errors
    ///
    /// Fails if growing fails, in which case the vector is unchanged and
    /// `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// let mut vec = Vec::new();
    /// vec.try_push(1)?;
    /// assert_eq!(vec.capacity(), 1);
    /// vec.try_push(2)?;
    /// assert_eq!(vec.capacity(), 2);
    /// vec.try_push(3)?;
    /// assert_eq!(vec.capacity(), 4);
    /// assert_eq!(vec, [1, 2, 3]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        if self.len == self.buf.capacity() {
            self.buf.try_reserve_for_push(self.len)?;
        }

        // SAFETY: there is room for at least one more element.
        unsafe {
            lifecycle::construct(self.as_mut_ptr().add(self.len), value);
            self.len += 1;
        }

        Ok(())
    }

    /// Removes the last element from a vector and returns it, or [`None`] if
    /// it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut vec = try_vec![1, 2, 3];
    /// assert_eq!(vec.pop(), Some(3));
    /// assert_eq!(vec, [1, 2]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        // SAFETY: the element at `len - 1` is live and stops being so once the
        // length is decremented.
        unsafe {
            self.len -= 1;
            Some(ptr::read(self.as_ptr().add(self.len)))
        }
    }

    /// Inserts an element at position `index` within the vector, shifting all
    /// elements after it one slot towards the end.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut vec = try_vec![1, 2, 3];
    /// vec.try_insert(1, 8)?;
    /// assert_eq!(vec, [1, 8, 2, 3]);
    /// vec.try_insert(4, 5)?;
    /// assert_eq!(vec, [1, 8, 2, 3, 5]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<(), Error> {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len;

        if index > len {
            assert_failed(index, len);
        }

        // space for the new element
        if len == self.buf.capacity() {
            self.buf.try_reserve_for_push(len)?;
        }

        // SAFETY: `index <= len < capacity`.
        unsafe {
            let p = self.as_mut_ptr().add(index);

            if index < len {
                // Shift everything over to make space. (Duplicating the
                // `index`th element into two consecutive places.)
                lifecycle::shift(p, p.add(1), len - index);
            }

            // Overwrite the first copy of the `index`th element.
            lifecycle::construct(p, element);
            self.len = len + 1;
        }

        Ok(())
    }

    /// Removes and returns the element at position `index` within the vector,
    /// shifting all elements after it one slot towards the beginning.
    ///
    /// The capacity is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut v = try_vec![1, 2, 3];
    /// assert_eq!(v.remove(1), 2);
    /// assert_eq!(v, [1, 3]);
    /// assert_eq!(v.capacity(), 3);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("removal index (is {index}) should be < len (is {len})");
        }

        let len = self.len;

        if index >= len {
            assert_failed(index, len);
        }

        // SAFETY: `index < len`, the element is read out exactly once before
        // the tail is shifted over it.
        unsafe {
            let p = self.as_mut_ptr().add(index);
            let ret = ptr::read(p);
            lifecycle::shift(p.add(1), p, len - index - 1);
            self.len = len - 1;
            ret
        }
    }

    /// Removes an element from the vector and returns it.
    ///
    /// The removed element is replaced by the last element of the vector. This
    /// does not preserve ordering, but is *O*(1).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut v = try_vec!["foo", "bar", "baz", "qux"];
    ///
    /// assert_eq!(v.swap_remove(1), "bar");
    /// assert_eq!(v, ["foo", "qux", "baz"]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[track_caller]
    pub fn swap_remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("swap_remove index (is {index}) should be < len (is {len})");
        }

        let len = self.len;

        if index >= len {
            assert_failed(index, len);
        }

        // SAFETY: there is a last element since `index < len`, which may be
        // the element at `index` itself.
        unsafe {
            let base = self.as_mut_ptr();
            let value = ptr::read(base.add(index));
            lifecycle::shift(base.add(len - 1), base.add(index), 1);
            self.len = len - 1;
            value
        }
    }

    /// Removes the elements in `range`, shifting the elements after it
    /// towards the beginning to close the gap.
    ///
    /// The capacity is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if the
    /// end point is greater than the length of the vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut v = try_vec![1, 0, 0, 0, 8, 2, 3];
    /// v.erase(0..1);
    /// assert_eq!(v, [0, 0, 0, 8, 2, 3]);
    ///
    /// v.erase(..3);
    /// assert_eq!(v, [8, 2, 3]);
    /// assert_eq!(v.capacity(), 7);
    ///
    /// v.erase(..);
    /// assert!(v.is_empty());
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[track_caller]
    pub fn erase<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let len = self.len;
        let Range { start, end } = slice_range(range, ..len);

        if start == end {
            return;
        }

        let tail = len - end;

        // SAFETY: `start <= end <= len`. The length is set to `start` before
        // anything is dropped, so if a destructor panics the tail is leaked
        // rather than dropped twice.
        unsafe {
            let base = self.as_mut_ptr();
            self.len = start;
            lifecycle::destroy_slice(base.add(start), end - start);
            lifecycle::shift(base.add(end), base.add(start), tail);
            self.len = start + tail;
        }
    }

    /// Clears the vector, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the
    /// vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut v = try_vec![1, 2, 3];
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 3);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Returns the number of elements in the vector, also referred to as its
    /// 'length'.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{try_vec, Error};
    ///
    /// let v = try_vec![8, 2, 3];
    /// assert_eq!(v.at(2)?, &3);
    /// assert!(matches!(v.at(3), Err(Error::OutOfRange { index: 3, len: 3, .. })));
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(Error::out_of_range(index, len))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::out_of_range(index, len))
    }

    /// Returns a cursor positioned at the first element.
    ///
    /// For an empty vector this is equal to [`end`].
    ///
    /// [`end`]: Vec::end
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let v = try_vec![1, 2, 3];
    ///
    /// let mut it = v.begin();
    /// let mut seen = Vec::new();
    ///
    /// while it != v.end() {
    ///     seen.push(*it);
    ///     it.step();
    /// }
    ///
    /// assert_eq!(seen, [1, 2, 3]);
    /// assert_eq!(v.end() - v.begin(), 3);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Returns a cursor positioned one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Returns a cursor positioned at `index`.
    ///
    /// The position is not checked, dereferencing a cursor outside of the
    /// live elements yields nothing.
    #[inline]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }
}

impl<T, A: Allocator + Clone> Vec<T, A> {
    /// Takes the contents out of this vector, leaving it empty and without
    /// storage. This is the move constructor: no element is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut a = try_vec![5; 10];
    /// let b = a.take();
    ///
    /// assert_eq!(b, [5; 10]);
    /// assert!(a.is_empty());
    /// assert_eq!(a.capacity(), 0);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn take(&mut self) -> Self {
        let alloc = self.allocator().clone();
        mem::replace(self, Vec::new_in(alloc))
    }

    /// Move-assigns `other` into this vector.
    ///
    /// The current elements are dropped and the current storage released,
    /// then this vector takes over the storage of `other`, which is left empty
    /// and without storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::{try_vec, Vec};
    ///
    /// let mut a = try_vec![6; 15];
    /// let mut b = Vec::new();
    /// b.assign_from(&mut a);
    ///
    /// assert_eq!(b.len(), 15);
    /// assert!(a.is_empty());
    /// assert_eq!(a.to_string(), "[]");
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn assign_from(&mut self, other: &mut Self) {
        *self = other.take();
    }
}

impl<T, A: Allocator> Vec<T, A>
where
    T: TryClone,
{
    /// Inserts `count` clones of `value` at position `index`, shifting the
    /// elements after it towards the end.
    ///
    /// The vector reallocates at most once, to hold at least `len + count`
    /// elements.
    ///
    /// # Errors
    ///
    /// If growing or cloning fails, the vector keeps its previous contents.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut vec = try_vec![1, 8, 2, 3];
    /// vec.try_insert_n(1, 3, 0)?;
    /// assert_eq!(vec, [1, 0, 0, 0, 8, 2, 3]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[track_caller]
    pub fn try_insert_n(&mut self, index: usize, count: usize, value: T) -> Result<(), Error> {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len;

        if index > len {
            assert_failed(index, len);
        }

        if count == 0 {
            return Ok(());
        }

        self.buf.try_reserve(len, count)?;

        // SAFETY: there is room for `len + count` elements. While the gap is
        // being filled only the prefix counts as live, the guard accounts for
        // the rest.
        unsafe {
            let p = self.as_mut_ptr().add(index);
            lifecycle::shift(p, p.add(count), len - index);
            self.len = index;

            let mut gap = FillGap {
                vec: self,
                index,
                count,
                tail: len - index,
                written: 0,
            };

            while gap.written + 1 < count {
                lifecycle::clone_into(p.add(gap.written), &value)?;
                gap.written += 1;
            }

            lifecycle::construct(p.add(gap.written), value);
            gap.written += 1;
        }

        Ok(())
    }

    /// Clones and appends all elements in a slice to the vector.
    ///
    /// If cloning an element fails, the clones appended so far are dropped
    /// and the vector keeps its previous contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut vec = try_vec![1];
    /// vec.try_extend_from_slice(&[2, 3, 4])?;
    /// assert_eq!(vec, [1, 2, 3, 4]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_extend_from_slice(&mut self, other: &[T]) -> Result<(), Error> {
        self.try_reserve(other.len())?;
        let mut guard = Rollback::new(self);

        for value in other {
            // SAFETY: room for every element of `other` was reserved above.
            unsafe {
                let len = guard.vec.len;
                lifecycle::clone_into(guard.vec.as_mut_ptr().add(len), value)?;
                guard.vec.len = len + 1;
            }
        }

        guard.commit();
        Ok(())
    }

    /// Resizes the vector in-place so that `len` is equal to `new_len`.
    ///
    /// If `new_len` is greater than `len`, the vector is extended by the
    /// difference, with each additional slot filled with `value`. If
    /// `new_len` is less than `len`, the vector is simply truncated. A failed
    /// extension leaves the vector at its previous length.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let mut vec = try_vec!["hello"];
    /// vec.try_resize(3, "world")?;
    /// assert_eq!(vec, ["hello", "world", "world"]);
    ///
    /// vec.try_resize(1, "unused")?;
    /// assert_eq!(vec, ["hello"]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), Error> {
        let len = self.len;

        if new_len > len {
            self.try_extend_with(new_len - len, value)
        } else {
            self.truncate(new_len);
            Ok(())
        }
    }

    /// Extend the vector by `n` clones of `value`, moving `value` itself into
    /// the last slot.
    fn try_extend_with(&mut self, n: usize, value: T) -> Result<(), Error> {
        if n == 0 {
            return Ok(());
        }

        self.try_reserve(n)?;
        let mut guard = Rollback::new(self);

        // SAFETY: room for `n` elements was reserved above. The length is
        // bumped after each write so the guard only drops what was written.
        unsafe {
            let mut ptr = guard.vec.as_mut_ptr().add(guard.vec.len);

            for _ in 1..n {
                lifecycle::clone_into(ptr, &value)?;
                ptr = ptr.add(1);
                guard.vec.len += 1;
            }

            lifecycle::construct(ptr, value);
            guard.vec.len += 1;
        }

        guard.commit();
        Ok(())
    }
}

/// Truncates a vector back to the length it had when the guard was created,
/// unless the guard is committed.
///
/// Used by appending operations so that a failure part way through leaves the
/// vector with its previous elements.
struct Rollback<'a, T, A: Allocator> {
    vec: &'a mut Vec<T, A>,
    len: usize,
}

impl<'a, T, A: Allocator> Rollback<'a, T, A> {
    fn new(vec: &'a mut Vec<T, A>) -> Self {
        let len = vec.len;
        Self { vec, len }
    }

    /// Keep everything appended so far.
    fn commit(self) {
        mem::forget(self);
    }
}

impl<T, A: Allocator> Drop for Rollback<'_, T, A> {
    fn drop(&mut self) {
        self.vec.truncate(self.len);
    }
}

/// Accounts for the hole opened up by [`Vec::try_insert_n`].
///
/// Once dropped, the vector is either grown by the written elements, or the
/// partially written elements are destroyed and the tail moved back into
/// place.
struct FillGap<'a, T, A: Allocator> {
    vec: &'a mut Vec<T, A>,
    index: usize,
    count: usize,
    tail: usize,
    written: usize,
}

impl<T, A: Allocator> Drop for FillGap<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: `index..index + written` holds freshly constructed elements
        // and the tail lives at `index + count`.
        unsafe {
            let p = self.vec.as_mut_ptr().add(self.index);

            if self.written == self.count {
                self.vec.len = self.index + self.count + self.tail;
                return;
            }

            lifecycle::destroy_slice(p, self.written);
            lifecycle::shift(p.add(self.count), p, self.tail);
            self.vec.len = self.index + self.tail;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Common trait implementations for Vec
////////////////////////////////////////////////////////////////////////////////

impl<T, A: Allocator> ops::Deref for Vec<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        // SAFETY: the first `len` elements are live.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> ops::DerefMut for Vec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: the first `len` elements are live.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

/// Copy construction.
///
/// The copy has the same elements as the original, in the same order, and a
/// capacity equal to its length. Copy assignment through
/// [`TryClone::try_clone_from`] builds the copy before replacing the old
/// contents, so a failure leaves the destination untouched.
///
/// ```
/// use kvec::prelude::*;
/// use kvec::try_vec;
///
/// let mut a = try_vec![1, 2, 3];
/// a.try_reserve(10)?;
///
/// let mut b = a.try_clone()?;
/// assert_eq!(b, a);
/// assert_eq!(b.capacity(), 3);
///
/// b.try_push(4)?;
/// assert_eq!(a, [1, 2, 3]);
/// # Ok::<_, kvec::Error>(())
/// ```
impl<T, A: Allocator + Clone> TryClone for Vec<T, A>
where
    T: TryClone,
{
    fn try_clone(&self) -> Result<Self, Error> {
        let alloc = self.allocator().clone();
        crate::slice::to_vec(self, alloc)
    }
}

impl<T: Hash, A: Allocator> Hash for Vec<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for Vec<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for Vec<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T, A: Allocator> IntoIterator for Vec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Creates a consuming iterator, that is, one that moves each value out of
    /// the vector (from start to end).
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::try_vec;
    ///
    /// let v = try_vec!["a".to_string(), "b".to_string()];
    /// let mut v_iter = v.into_iter();
    ///
    /// let first_element: Option<String> = v_iter.next();
    ///
    /// assert_eq!(first_element, Some("a".to_string()));
    /// assert_eq!(v_iter.next(), Some("b".to_string()));
    /// assert_eq!(v_iter.next(), None);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_raw_vec();
        IntoIter::new(buf, len)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Implements comparison of vectors, [lexicographically](Ord#lexicographical-comparison).
impl<T, A1, A2> PartialOrd<Vec<T, A2>> for Vec<T, A1>
where
    T: PartialOrd,
    A1: Allocator,
    A2: Allocator,
{
    #[inline]
    fn partial_cmp(&self, other: &Vec<T, A2>) -> Option<Ordering> {
        PartialOrd::partial_cmp(&**self, &**other)
    }
}

impl<T: Eq, A: Allocator> Eq for Vec<T, A> {}

/// Implements ordering of vectors, [lexicographically](Ord#lexicographical-comparison).
impl<T: Ord, A: Allocator> Ord for Vec<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&**self, &**other)
    }
}

impl<T, A: Allocator> Drop for Vec<T, A> {
    fn drop(&mut self) {
        // SAFETY: the first `len` elements are live and never used again.
        unsafe { lifecycle::destroy_slice(self.as_mut_ptr(), self.len) }
        // RawVec handles deallocation
    }
}

impl<T> Default for Vec<T> {
    /// Creates an empty `Vec<T>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    fn default() -> Vec<T> {
        Vec::new()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Renders the elements in order, comma separated and wrapped in brackets.
///
/// ```
/// use kvec::{try_vec, Vec};
///
/// assert_eq!(try_vec![1, 3, 5].to_string(), "[1, 3, 5]");
/// assert_eq!(Vec::<u32>::new().to_string(), "[]");
/// assert_eq!(format!("{:.1}", try_vec![5.5, 6.0]), "[5.5, 6.0]");
/// # Ok::<_, kvec::Error>(())
/// ```
impl<T: fmt::Display, A: Allocator> fmt::Display for Vec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (n, value) in self.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }

            value.fmt(f)?;
        }

        f.write_str("]")
    }
}

impl<T, A: Allocator> Borrow<[T]> for Vec<T, A> {
    fn borrow(&self) -> &[T] {
        &self[..]
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vec<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> TryFrom<&[T]> for Vec<T>
where
    T: TryClone,
{
    type Error = Error;

    /// Converts a `&[T]` into a [`Vec<T>`].
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// assert_eq!(Vec::try_from(&[1, 2, 3][..])?, [1, 2, 3]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    fn try_from(values: &[T]) -> Result<Self, Error> {
        crate::slice::to_vec(values, Global)
    }
}

impl<T, const N: usize> TryFrom<[T; N]> for Vec<T> {
    type Error = Error;

    /// Converts a `[T; N]` into a [`Vec<T>`].
    ///
    /// ```
    /// use kvec::Vec;
    ///
    /// assert_eq!(Vec::try_from([1, 2, 3])?, [1, 2, 3]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    fn try_from(arr: [T; N]) -> Result<Self, Error> {
        Vec::try_from_array_in(arr, Global)
    }
}

impl<T, A: Allocator> TryFromIteratorIn<T, A> for Vec<T, A> {
    fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut vec = Vec::new_in(alloc);
        vec.try_extend(iter)?;
        Ok(vec)
    }
}

impl<T, A: Allocator> TryExtend<T> for Vec<T, A> {
    fn try_extend<I>(&mut self, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.try_reserve(lower)?;

        let mut guard = Rollback::new(self);

        for value in iter {
            guard.vec.try_push(value)?;
        }

        guard.commit();
        Ok(())
    }
}
