//! The `kvec` command line exerciser.
//!
//! Run `kvec demo` to walk through the container API, or `kvec grow` to watch
//! the growth policy at work. Set `RUST_LOG=kvec=trace` to see every
//! reallocation and pool event as it happens.

mod demo;
mod grow;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::EnvFilter;

use kvec::{limit, Allocator, Global, Pool};

/// Output used by commands.
pub(crate) struct Io<'a> {
    pub(crate) stdout: &'a mut dyn Write,
}

#[derive(Default, Debug, Clone, Copy, ValueEnum)]
enum AllocatorArgument {
    /// The platform allocator.
    #[default]
    Global,
    /// A pooling allocator which recycles released blocks.
    Pool,
}

#[derive(Parser, Debug, Clone)]
#[command(rename_all = "kebab-case")]
struct SharedFlags {
    /// The allocator to back vectors with.
    #[arg(long, global = true, default_value = "global")]
    allocator: AllocatorArgument,

    /// Limit the number of bytes which may be allocated while the command
    /// runs.
    #[arg(long, global = true)]
    memory_limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through construction, mutation and queries of a vector.
    Demo(demo::Flags),
    /// Push values and report every reallocation.
    Grow(grow::Flags),
}

#[derive(Parser, Debug)]
#[command(name = "kvec", about = "Exerciser for the kvec container")]
struct Args {
    #[command(flatten)]
    shared: SharedFlags,

    /// The command to execute.
    #[command(subcommand)]
    cmd: Command,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut io = Io {
        stdout: &mut stdout,
    };

    match run(&mut io, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            for (n, e) in error.chain().enumerate() {
                if n == 0 {
                    eprintln!("error: {e}");
                } else {
                    eprintln!("caused by: {e}");
                }
            }

            ExitCode::FAILURE
        }
    }
}

fn run(io: &mut Io<'_>, args: &Args) -> Result<()> {
    tracing::debug!(
        allocator = ?args.shared.allocator,
        memory_limit = ?args.shared.memory_limit,
        "starting"
    );

    let mut task = || match args.shared.allocator {
        AllocatorArgument::Global => dispatch(io, &args.cmd, Global),
        AllocatorArgument::Pool => {
            let pool = Pool::new();
            dispatch(io, &args.cmd, pool.clone())?;
            writeln!(io.stdout, "pool: {:?}", pool.stats())?;
            Ok(())
        }
    };

    match args.shared.memory_limit {
        Some(memory) => limit::with(memory, task)
            .call()
            .with_context(|| format!("running with a memory limit of {memory} bytes")),
        None => task(),
    }
}

fn dispatch<A>(io: &mut Io<'_>, cmd: &Command, alloc: A) -> Result<()>
where
    A: Allocator + Clone,
{
    match cmd {
        Command::Demo(flags) => demo::run(io, flags, alloc),
        Command::Grow(flags) => grow::run(io, flags, alloc),
    }
}
