//! Non-core CLI glue: argument parsing and command handlers. All
//! allocation logic lives in `alloc-core`, `alloc-io`, `alloc-constraints`
//! and `alloc-solver` — this crate only loads files, builds a
//! `ConfigRecord`, and serializes results.

pub mod cli;
pub mod commands;
