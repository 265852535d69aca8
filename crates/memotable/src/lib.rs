//! # memotable
//!
//! Generic memoization wrapper over pluggable key-value tables.
//!
//! ## Architecture
//! - **Table**: Minimal get/put contract any backing store can meet
//! - **Memo**: Single-threaded wrapper, `RefCell` interior mutability
//! - **SyncMemo**: Shared wrapper, `RwLock` for statics and threads
//! - **MemoStats**: Hit/miss/insert counters per wrapper
//!
//! ## Example
//! ```
//! use memotable::{hash_table, memoize};
//!
//! let double = memoize(hash_table).wrap(|n: &u64| n * 2);
//! assert_eq!(double.call(21), 42);
//! assert_eq!(double.call(21), 42);
//! assert_eq!(double.stats().misses(), 1);
//! ```

#![warn(missing_docs)]

mod memo;
mod stats;
mod sync;
mod table;

pub use memo::{memoize, Memo, Memoize};
pub use stats::MemoStats;
pub use sync::SyncMemo;
pub use table::{hash_table, HashTable, Table, VecTable};
