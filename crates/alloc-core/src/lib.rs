//! # alloc-core: allocation domain model and Data Facade
//!
//! Provides the fundamental data structures for the SKU release allocator:
//! product records with their derived classification flags, round labels
//! and canonical ordering, the configuration record, the allocation
//! matrix, and the read-only Data Facade that ties them together.
//!
//! ## Design Philosophy
//!
//! The facade is storage-agnostic: it is built from already-parsed
//! records (`alloc-io` owns file parsing) and exposes immutable views.
//! Overrides from a `ConfigRecord` are never applied here — that merge is
//! `alloc-constraints::params`'s job, so the facade's table values and a
//! caller's overrides never disagree about which one "won".
//!
//! ## Quick Start
//!
//! ```
//! use alloc_core::{ConfigRecord, Round};
//!
//! let rounds = alloc_core::round::canonical_rounds(["第二轮", "第一轮"]).unwrap();
//! assert_eq!(rounds[0].label(), "第一轮");
//!
//! let config = ConfigRecord::default();
//! assert_eq!(config.volume_tolerance, 0.005);
//! ```

pub mod allocation;
pub mod config;
pub mod error;
pub mod facade;
pub mod product;
pub mod round;

pub use allocation::{fulfilment_row, AllocationMatrix, FulfilmentRow};
pub use config::ConfigRecord;
pub use error::{CigError, CigResult};
pub use facade::{DataFacade, RoundConstraintRaw};
pub use product::{CSubtype, ProductRecord};
pub use round::Round;
