use std::fmt;
use std::io::Write;

use anyhow::Result;
use clap::Parser;

use kvec::prelude::*;
use kvec::{Allocator, Pool, Vec};

use crate::Io;

#[derive(Parser, Debug)]
pub(super) struct Flags {
    /// Skip the walk through other element types.
    #[arg(long)]
    skip_types: bool,
}

fn show<T, A>(io: &mut Io<'_>, name: &str, vec: &Vec<T, A>) -> Result<()>
where
    T: fmt::Display,
    A: Allocator,
{
    writeln!(
        io.stdout,
        "{name}: size = {}, capacity = {}, values = {vec}",
        vec.len(),
        vec.capacity()
    )?;

    Ok(())
}

pub(super) fn run<A>(io: &mut Io<'_>, flags: &Flags, alloc: A) -> Result<()>
where
    A: Allocator + Clone,
{
    let mut vec = Vec::<i32, A>::new_in(alloc.clone());
    show(io, "empty", &vec)?;

    vec.try_push(1)?;
    vec.try_push(2)?;
    vec.try_push(3)?;
    show(io, "push", &vec)?;

    write!(io.stdout, "cursor:")?;

    let mut it = vec.begin();

    while it != vec.end() {
        write!(io.stdout, " {}", *it)?;
        it.step();
    }

    writeln!(io.stdout)?;

    let at = vec.begin() + 1;
    let index = at.index();
    vec.try_insert(index, 8)?;
    vec.try_insert_n(index, 3, 0)?;
    show(io, "insert", &vec)?;

    vec.remove(0);
    show(io, "erase", &vec)?;

    vec.erase(..3);
    show(io, "erase range", &vec)?;

    let copy = vec.try_clone()?;
    vec.clear();
    show(io, "clear", &vec)?;
    show(io, "copy", &copy)?;

    writeln!(io.stdout, "at(1) = {}, [2] = {}", copy.at(1)?, copy[2])?;

    if let Err(error) = copy.at(copy.len()) {
        writeln!(io.stdout, "at({}) = {error}", copy.len())?;
    }

    if !copy.is_empty() {
        let rendered = copy.to_string();
        writeln!(io.stdout, "to_string = {rendered}")?;
    }

    let v1 = Vec::<i32, A>::new_in(alloc.clone());
    show(io, "v1 (default)", &v1)?;

    let v2 = Vec::try_from_elem_in(5, 10, alloc.clone())?;
    show(io, "v2 (value fill)", &v2)?;

    let mut v3 = v2.try_clone()?;
    show(io, "v3 (copy)", &v3)?;

    let v4 = v3.take();
    show(io, "v4 (move)", &v4)?;
    show(io, "v3 (moved from)", &v3)?;

    let mut list = Vec::try_from_array_in([1, 3, 5, 7, 9], alloc.clone())?;
    list.try_push(11)?;
    show(io, "list", &list)?;

    let pool = Pool::new();

    let mut pooled = Vec::try_from_array_in([2, 4, 6, 8, 10], pool.clone())?;
    pooled.try_push(12)?;
    show(io, "pooled list", &pooled)?;

    let mut filled = Vec::try_from_elem_in(6, 15, pool.clone())?;
    filled.try_push(7)?;
    show(io, "pooled fill", &filled)?;

    let mut assigned = Vec::new_in(pool.clone());
    assigned.assign_from(&mut filled);
    show(io, "move assigned", &assigned)?;
    show(io, "moved from", &filled)?;

    if flags.skip_types {
        return Ok(());
    }

    let longs = Vec::<i64, A>::new_in(alloc.clone());
    show(io, "i64", &longs)?;

    let doubles = Vec::try_from_elem_in(5.5f64, 6, pool.clone())?;
    let doubles_copy = doubles.try_clone()?;
    show(io, "f64 copy", &doubles_copy)?;

    let mut chars = Vec::try_from_array_in(['a', 'b', 'c', 'd'], pool.clone())?;
    let chars_moved = chars.take();
    show(io, "char moved", &chars_moved)?;

    Ok(())
}
