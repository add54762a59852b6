use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use kvec::{Allocator, Vec};

use crate::Io;

#[derive(Parser, Debug)]
pub(super) struct Flags {
    /// The number of values to push.
    #[arg(long, default_value_t = 1000)]
    count: u64,
}

pub(super) fn run<A>(io: &mut Io<'_>, flags: &Flags, alloc: A) -> Result<()>
where
    A: Allocator,
{
    let mut vec = Vec::new_in(alloc);
    let mut reallocations = 0usize;

    for n in 0..flags.count {
        let before = vec.capacity();

        vec.try_push(n)
            .with_context(|| format!("pushing value #{n} at capacity {before}"))?;

        if vec.capacity() != before {
            reallocations += 1;
            writeln!(io.stdout, "{before} -> {}", vec.capacity())?;
        }
    }

    writeln!(
        io.stdout,
        "pushed {} values with {reallocations} reallocations",
        vec.len()
    )?;

    Ok(())
}
