use core::ops;

use crate::alloc::Allocator;
use crate::clone::TryClone;
use crate::error::Error;
use crate::lifecycle;
use crate::vec::Vec;

/// Copy every element of `s` into a new vector of exactly `s.len()` capacity.
///
/// If cloning fails halfway, the clones made so far are dropped together
/// with the new vector.
pub(crate) fn to_vec<T, A: Allocator>(s: &[T], alloc: A) -> Result<Vec<T, A>, Error>
where
    T: TryClone,
{
    let mut vec = Vec::<T, A>::try_with_capacity_in(s.len(), alloc)?;

    for value in s {
        // SAFETY: capacity for `s.len()` elements was reserved above.
        unsafe {
            let len = vec.len();
            lifecycle::clone_into(vec.as_mut_ptr().add(len), value)?;
            vec.set_len(len + 1);
        }
    }

    Ok(vec)
}

#[must_use]
#[track_caller]
pub(crate) fn range<R>(range: R, bounds: ops::RangeTo<usize>) -> ops::Range<usize>
where
    R: ops::RangeBounds<usize>,
{
    let len = bounds.end;

    let start = match range.start_bound() {
        ops::Bound::Included(&start) => start,
        ops::Bound::Excluded(start) => start
            .checked_add(1)
            .unwrap_or_else(|| slice_start_index_overflow_fail()),
        ops::Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        ops::Bound::Included(end) => end
            .checked_add(1)
            .unwrap_or_else(|| slice_end_index_overflow_fail()),
        ops::Bound::Excluded(&end) => end,
        ops::Bound::Unbounded => len,
    };

    if start > end {
        slice_index_order_fail(start, end);
    }

    if end > len {
        slice_end_index_len_fail(end, len);
    }

    ops::Range { start, end }
}

#[track_caller]
fn slice_start_index_overflow_fail() -> ! {
    panic!("attempted to index slice from after maximum usize");
}

#[track_caller]
fn slice_end_index_overflow_fail() -> ! {
    panic!("attempted to index slice up to maximum usize");
}

#[track_caller]
fn slice_index_order_fail(index: usize, end: usize) -> ! {
    panic!("slice index starts at {index} but ends at {end}");
}

#[track_caller]
fn slice_end_index_len_fail(index: usize, len: usize) -> ! {
    panic!("range end index {index} out of range for slice of length {len}");
}
