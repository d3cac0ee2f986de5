#![doc = include_str!("../README.md")]
#![warn(
    missing_docs,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::float_cmp,
    clippy::float_cmp_const,
    clippy::missing_panics_doc,
    clippy::todo
)]
#![no_std]
extern crate alloc;

/// Object references.
pub mod references;

mod common_traits;
mod config;
mod error;
mod memory;
mod object;
mod refmem;
mod shutdown;
mod table;
mod teardown;

pub use config::{DEFAULT_CASCADE_LIMIT, RefMemConfig};
pub use error::RefMemError;
pub use memory::{DEFAULT_PAGE_EXPONENT, MAX_PAGE_EXPONENT, Stamp, Utilization};
pub use object::{ArrayHeader, Block, BlockKind, Entry};
pub use references::{Children, Handle};
pub use refmem::RefMem;
pub use shutdown::{ShutdownMode, ShutdownReport};
pub use teardown::{Destructor, DestructorId, Teardown, TeardownKind};
