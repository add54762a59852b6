use crate::alloc::Allocator;

use super::Vec;

macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                self[..] == other[..]
            }
        }
    };
}

impl_slice_eq! { [A1: Allocator, A2: Allocator] Vec<T, A1>, Vec<U, A2> }
impl_slice_eq! { [A: Allocator] Vec<T, A>, std::vec::Vec<U> }
impl_slice_eq! { [A: Allocator] std::vec::Vec<T>, Vec<U, A> }
impl_slice_eq! { [A: Allocator] Vec<T, A>, &[U] }
impl_slice_eq! { [A: Allocator] Vec<T, A>, &mut [U] }
impl_slice_eq! { [A: Allocator] &[T], Vec<U, A> }
impl_slice_eq! { [A: Allocator] Vec<T, A>, [U] }
impl_slice_eq! { [A: Allocator, const N: usize] Vec<T, A>, [U; N] }
impl_slice_eq! { [A: Allocator, const N: usize] Vec<T, A>, &[U; N] }
