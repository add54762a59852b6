use crate::clone::TryClone;
use crate::error::Error;
use crate::iter::TryExtend;
use crate::testing::*;
use crate::vec::Vec;
use crate::{limit, Pool};

#[test]
fn test_vec_macro() -> Result<(), Error> {
    let vec: Vec<u32> = try_vec![1, 2, 3];
    assert_eq!(vec, [1, 2, 3]);

    let vec: Vec<u32> = try_vec![1; 3];
    assert_eq!(vec, [1, 1, 1]);

    let vec: Vec<u32> = try_vec![];
    assert_eq!(vec, []);
    Ok(())
}

#[test]
fn test_growth_doubles() -> Result<(), Error> {
    let mut vec = Vec::new();
    let mut capacities = std::vec::Vec::new();

    for n in 0..9u32 {
        vec.try_push(n)?;
        capacities.push(vec.capacity());
    }

    assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    assert_eq!(vec, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    Ok(())
}

#[test]
fn test_tracking_balanced() -> Result<(), Error> {
    let alloc = Tracking::new();

    {
        let mut vec = Vec::new_in(alloc.clone());
        assert_eq!(alloc.acquires(), 0);

        for n in 0..100u64 {
            vec.try_push(n)?;
            assert!(vec.len() <= vec.capacity());
        }

        // 1, 2, 4, .., 128
        assert_eq!(alloc.acquires(), 8);
        assert_eq!(alloc.releases(), 7);
        assert_eq!(alloc.outstanding(), 1);
    }

    assert_eq!(alloc.acquires(), alloc.releases());
    assert_eq!(alloc.outstanding(), 0);
    Ok(())
}

#[test]
fn test_empty_never_allocates() -> Result<(), Error> {
    let alloc = Tracking::new();

    let vec = Vec::<u32, _>::try_with_capacity_in(0, alloc.clone())?;
    let copy = vec.try_clone()?;
    drop(vec);
    drop(copy);

    let mut vec = Vec::<(), _>::new_in(alloc.clone());

    for _ in 0..10 {
        vec.try_push(())?;
    }

    assert_eq!(vec.len(), 10);
    assert_eq!(alloc.acquires(), 0);
    Ok(())
}

#[test]
fn test_insert_and_erase() -> Result<(), Error> {
    let mut vec = try_vec![1, 2, 3];
    vec.try_insert(1, 8)?;
    assert_eq!(vec, [1, 8, 2, 3]);

    vec.try_insert_n(1, 3, 0)?;
    assert_eq!(vec, [1, 0, 0, 0, 8, 2, 3]);

    let capacity = vec.capacity();
    vec.erase(..3);
    assert_eq!(vec, [0, 8, 2, 3]);
    assert_eq!(vec.capacity(), capacity);

    vec.erase(1..1);
    assert_eq!(vec, [0, 8, 2, 3]);

    assert_eq!(vec.remove(0), 0);
    assert_eq!(vec, [8, 2, 3]);

    vec.try_insert(3, 4)?;
    assert_eq!(vec, [8, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_insert_n_reallocates_once() -> Result<(), Error> {
    let alloc = Tracking::new();
    let mut vec = Vec::try_from_array_in([1u32, 2, 3, 4], alloc.clone())?;
    assert_eq!(alloc.acquires(), 1);

    vec.try_insert_n(2, 20, 7)?;
    assert_eq!(alloc.acquires(), 2);
    assert!(vec.capacity() >= 24);
    assert_eq!(vec.len(), 24);
    assert_eq!(vec[..2], [1, 2]);
    assert!(vec[2..22].iter().all(|&n| n == 7));
    assert_eq!(vec[22..], [3, 4]);
    Ok(())
}

#[test]
#[should_panic = "insertion index (is 4) should be <= len (is 3)"]
fn test_insert_out_of_bounds() {
    let mut vec: Vec<u32> = Vec::try_from([1, 2, 3]).abort();
    let _ = vec.try_insert(4, 0);
}

#[test]
#[should_panic = "range end index 4 out of range for slice of length 3"]
fn test_erase_out_of_bounds() {
    let mut vec: Vec<u32> = Vec::try_from([1, 2, 3]).abort();
    vec.erase(1..4);
}

#[test]
fn test_insert_n_rolls_back() -> Result<(), Error> {
    let counters = Counters::new();

    let mut vec = Vec::new();

    for n in 0..4 {
        vec.try_push(counters.make(n))?;
    }

    counters.fail_after(2);

    let value = counters.make(9);
    let result = vec.try_insert_n(1, 5, value);
    assert!(result.is_err());

    let values = vec.iter().map(|t| t.value).collect::<std::vec::Vec<_>>();
    assert_eq!(values, [0, 1, 2, 3]);
    assert_eq!(counters.clones(), 2);
    assert_eq!(counters.live(), 4);

    drop(vec);
    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_from_elem_failure_does_not_leak() {
    let counters = Counters::new();
    counters.fail_after(3);

    let result = Vec::try_from_elem(counters.make(1), 10);
    assert!(result.is_err());
    assert_eq!(counters.live(), 0);
    assert_eq!(counters.drops(), 4);
}

#[test]
fn test_erase_drops_exactly() -> Result<(), Error> {
    let counters = Counters::new();
    let mut vec = Vec::new();

    for n in 0..6 {
        vec.try_push(counters.make(n))?;
    }

    vec.erase(1..4);
    assert_eq!(counters.drops(), 3);

    let values = vec.iter().map(|t| t.value).collect::<std::vec::Vec<_>>();
    assert_eq!(values, [0, 4, 5]);

    vec.clear();
    assert_eq!(counters.drops(), 6);
    assert_eq!(vec.capacity(), 8);
    Ok(())
}

#[test]
fn test_move_does_not_clone() -> Result<(), Error> {
    let counters = Counters::new();
    let mut a = Vec::new();

    for n in 0..5 {
        a.try_push(counters.make(n))?;
    }

    let mut b = a.take();
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 0);
    assert_eq!(b.len(), 5);

    let mut c = Vec::new();
    c.try_push(counters.make(42))?;
    c.assign_from(&mut b);

    assert!(b.is_empty());
    assert_eq!(c.len(), 5);
    assert_eq!(c[0].value, 0);
    assert_eq!(counters.clones(), 0);
    // The previous contents of `c` are gone.
    assert_eq!(counters.drops(), 1);
    Ok(())
}

#[test]
fn test_copy_independent() -> Result<(), Error> {
    let mut a: Vec<u32> = try_vec![5; 10];
    a.try_reserve(100)?;

    let mut b = a.try_clone()?;
    assert_eq!(a, b);
    assert_eq!(b.capacity(), 10);

    b[0] = 1;
    b.try_push(2)?;
    assert_eq!(a, [5; 10]);

    let mut c: Vec<u32> = try_vec![1, 2];
    c.try_clone_from(&a)?;
    assert_eq!(c, a);
    Ok(())
}

#[test]
fn test_clone_counts() -> Result<(), Error> {
    let counters = Counters::new();
    let mut a = Vec::new();

    for n in 0..3 {
        a.try_push(counters.make(n))?;
    }

    let b = a.try_clone()?;
    assert_eq!(counters.clones(), 3);
    assert_eq!(a, b);

    drop(a);
    drop(b);
    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_at() -> Result<(), Error> {
    let mut vec: Vec<u32> = try_vec![8, 2, 3];
    assert_eq!(*vec.at(0)?, 8);

    *vec.at_mut(1)? = 4;
    assert_eq!(vec, [8, 4, 3]);

    assert_eq!(vec.at(3), Err(Error::out_of_range(3, 3)));
    assert_eq!(
        vec.at(3).map(|_| ()).map_err(|e| e.to_string()),
        Err(String::from("Index 3 is out of range for length 3"))
    );
    Ok(())
}

#[test]
fn test_shrink_to_fit() -> Result<(), Error> {
    let alloc = Tracking::new();
    let mut vec = Vec::<u32, _>::try_with_capacity_in(16, alloc.clone())?;
    vec.try_extend([1, 2, 3])?;

    vec.try_shrink_to_fit()?;
    assert_eq!(vec.capacity(), 3);
    assert_eq!(vec, [1, 2, 3]);

    vec.clear();
    vec.try_shrink_to_fit()?;
    assert_eq!(vec.capacity(), 0);
    assert_eq!(alloc.outstanding(), 0);
    Ok(())
}

#[test]
fn test_into_iter_drops_remaining() -> Result<(), Error> {
    let counters = Counters::new();
    let mut vec = Vec::new();

    for n in 0..5 {
        vec.try_push(counters.make(n))?;
    }

    let mut it = vec.into_iter();
    assert_eq!(it.next().map(|t| t.value), Some(0));
    assert_eq!(it.next_back().map(|t| t.value), Some(4));
    assert_eq!(it.len(), 3);
    drop(it);

    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_limit_failure_is_atomic() {
    let result = limit::with(64, || -> Result<(), Error> {
        let mut vec = Vec::<u64>::try_with_capacity(8)?;

        for n in 0..8 {
            vec.try_push(n)?;
        }

        let before = vec.as_ptr();
        assert!(vec.try_push(8).is_err());
        assert!(vec.try_insert(0, 8).is_err());
        assert!(vec.try_reserve_exact(1).is_err());
        assert!(vec.try_extend_from_slice(&[1, 2]).is_err());

        assert_eq!(vec.as_ptr(), before);
        assert_eq!(vec.capacity(), 8);
        assert_eq!(vec, [0, 1, 2, 3, 4, 5, 6, 7]);
        Ok(())
    })
    .call();

    assert_eq!(result, Ok(()));
    assert_eq!(limit::get(), usize::MAX);
}

#[test]
fn test_pool_reuses_blocks() -> Result<(), Error> {
    let pool = Pool::new();

    let mut a = Vec::new_in(pool.clone());

    for n in 0..4u32 {
        a.try_push(n)?;
    }

    // 1, 2 and 4 were missed, 1 and 2 are cached.
    let stats = pool.stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.cached, 2);

    let mut b = Vec::new_in(pool.clone());
    b.try_push(1u32)?;
    b.try_push(2u32)?;

    let stats = pool.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.cached, 1);

    pool.purge();
    assert_eq!(pool.stats().cached, 0);

    drop(a);
    drop(b);
    assert_eq!(pool.stats().cached, 2);
    Ok(())
}

#[test]
fn test_cursor_walk() -> Result<(), Error> {
    let vec: Vec<u32> = try_vec![1, 3, 5, 7, 9];

    let mut seen = std::vec::Vec::new();
    let mut it = vec.begin();

    while it != vec.end() {
        seen.push(*it);
        it.step();
    }

    assert_eq!(seen, [1, 3, 5, 7, 9]);
    assert_eq!(vec.end() - vec.begin(), 5);

    let it = vec.begin() + 2;
    assert_eq!(it.index(), 2);
    assert_eq!(it.get(), Some(&5));
    assert_eq!((it + 10).get(), None);
    assert_eq!((it - 3).get(), None);
    assert!(vec.begin() < it);

    let rest = it.copied().collect::<std::vec::Vec<_>>();
    assert_eq!(rest, [5, 7, 9]);

    let back = vec.begin().rev().copied().collect::<std::vec::Vec<_>>();
    assert_eq!(back, [9, 7, 5, 3, 1]);

    let empty: Vec<u32> = Vec::new();
    assert_eq!(empty.begin(), empty.end());
    assert!(empty.begin().is_end());
    Ok(())
}

#[test]
#[should_panic = "cursor at 3 is not dereferenceable in vector of length 3"]
fn test_cursor_deref_end() {
    let vec: Vec<u32> = Vec::try_from([1, 2, 3]).abort();
    let value: u32 = *vec.end();
    assert_eq!(value, 0);
}

#[test]
fn test_display() -> Result<(), Error> {
    let vec: Vec<u32> = try_vec![1, 3, 5];
    assert_eq!(vec.to_string(), "[1, 3, 5]");

    let vec: Vec<char> = try_vec!['a', 'b'];
    assert_eq!(vec.to_string(), "[a, b]");

    let vec: Vec<u32> = Vec::new();
    assert_eq!(vec.to_string(), "[]");
    Ok(())
}

#[test]
fn test_resize_and_truncate() -> Result<(), Error> {
    let counters = Counters::new();
    let mut vec = Vec::new();

    vec.try_resize(4, counters.make(1))?;
    assert_eq!(vec.len(), 4);
    assert_eq!(counters.clones(), 3);

    vec.truncate(1);
    assert_eq!(counters.live(), 1);

    vec.try_resize(0, counters.make(2))?;
    assert!(vec.is_empty());
    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_resize_rolls_back() -> Result<(), Error> {
    let counters = Counters::new();

    let mut vec = Vec::new();
    vec.try_push(counters.make(0))?;

    counters.fail_after(2);
    assert!(vec.try_resize(6, counters.make(1)).is_err());

    assert_eq!(vec.len(), 1);
    assert_eq!(vec[0].value, 0);
    assert_eq!(counters.clones(), 2);
    assert_eq!(counters.live(), 1);

    drop(vec);
    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_extend_from_slice_rolls_back() -> Result<(), Error> {
    let counters = Counters::new();
    let source = [counters.make(1), counters.make(2), counters.make(3)];

    let mut vec = Vec::new();
    vec.try_push(counters.make(0))?;

    counters.fail_after(1);
    assert!(vec.try_extend_from_slice(&source).is_err());

    assert_eq!(vec.len(), 1);
    assert_eq!(vec[0].value, 0);
    assert_eq!(counters.clones(), 1);
    assert_eq!(counters.live(), 4);

    drop(vec);
    drop(source);
    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_try_extend_rolls_back() {
    let result = limit::with(32, || -> Result<(), Error> {
        let mut vec = Vec::<u64>::try_with_capacity(2)?;
        vec.try_push(0)?;

        // No size hint, so the first value fits and the second needs to grow
        // past the budget.
        let values = (1..4).filter(|_| true);
        assert!(vec.try_extend(values).is_err());

        assert_eq!(vec, [0]);
        assert_eq!(vec.capacity(), 2);
        Ok(())
    })
    .call();

    assert_eq!(result, Ok(()));
}

#[test]
fn test_clone_from_failure_keeps_destination() -> Result<(), Error> {
    let counters = Counters::new();

    let mut dst = Vec::new();
    dst.try_push(counters.make(7))?;
    dst.try_push(counters.make(8))?;

    let mut src = Vec::new();

    for n in 0..3 {
        src.try_push(counters.make(n))?;
    }

    counters.fail_after(1);
    assert!(dst.try_clone_from(&src).is_err());

    let values = dst.iter().map(|t| t.value).collect::<std::vec::Vec<_>>();
    assert_eq!(values, [7, 8]);
    assert_eq!(counters.live(), 5);

    drop(dst);
    drop(src);
    assert_eq!(counters.live(), 0);
    Ok(())
}

#[test]
fn test_pool_credits_cached_blocks() {
    let pool = Pool::new();

    let result = limit::with(1024, || -> Result<(), Error> {
        let vec = Vec::<u8, _>::try_with_capacity_in(1024, pool.clone())?;
        assert_eq!(limit::get(), 0);

        drop(vec);
        assert_eq!(pool.stats().cached, 1);
        assert_eq!(limit::get(), 1024);

        // The cached block no longer holds any of the budget.
        let other = Vec::<u8>::try_with_capacity(1024)?;
        assert!(Vec::<u8, _>::try_with_capacity_in(1024, pool.clone()).is_err());
        assert_eq!(pool.stats().cached, 1);
        drop(other);

        let vec = Vec::<u8, _>::try_with_capacity_in(1024, pool.clone())?;
        assert_eq!(pool.stats().hits, 1);
        assert_eq!(limit::get(), 0);
        drop(vec);
        Ok(())
    })
    .call();

    assert_eq!(result, Ok(()));

    pool.purge();
    assert_eq!(pool.stats().cached, 0);
    assert_eq!(limit::get(), usize::MAX);
}
