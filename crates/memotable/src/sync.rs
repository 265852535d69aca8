//! Synchronized memoization wrapper
//!
//! Same contract as [`Memo`](crate::Memo), with the table behind an
//! `RwLock` so the wrapper can live in a `static` or be shared across
//! threads. The lock is never held while the underlying callable runs:
//! recursive re-entry cannot deadlock, and user code never executes
//! under the lock. Two threads missing the same key at once may
//! therefore both compute it; the later insert wins and the table still
//! ends with one entry per key.

use std::any::type_name;
use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::stats::MemoStats;
use crate::table::Table;

/// A memoized callable whose table is shared behind a lock.
///
/// Construction and call semantics match [`Memo`](crate::Memo); see
/// [`memoize`](crate::memoize) and
/// [`wrap_sync`](crate::Memoize::wrap_sync).
pub struct SyncMemo<F, T> {
    f: F,
    table: RwLock<T>,
    stats: MemoStats,
}

impl<F, T> SyncMemo<F, T> {
    /// Wrap `f`, materializing the backing table from `table_factory`.
    pub fn new<G>(table_factory: G, f: F) -> Self
    where
        G: FnOnce() -> T,
    {
        Self {
            f,
            table: RwLock::new(table_factory()),
            stats: MemoStats::new(),
        }
    }

    /// Name of the wrapped callable, as the compiler knows it.
    pub fn name(&self) -> &'static str {
        type_name::<F>()
    }

    /// Invocation counters for this wrapper.
    pub fn stats(&self) -> &MemoStats {
        &self.stats
    }

    /// Read access to the backing table.
    ///
    /// Release the guard before calling the wrapper again.
    pub fn table(&self) -> RwLockReadGuard<'_, T> {
        self.table.read()
    }

    /// Write access to the backing table, for manual cache management
    /// such as clearing entries.
    pub fn table_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.table.write()
    }
}

impl<F, T: Table> SyncMemo<F, T> {
    /// Call the wrapped callable through the cache.
    ///
    /// # Arguments
    /// * `args` - Full argument tuple; doubles as the table key
    ///
    /// # Returns
    /// * The cached result if the tuple has been seen before, otherwise
    ///   the freshly computed (and now cached) result
    pub fn call(&self, args: T::Key) -> T::Value
    where
        F: Fn(&T::Key) -> T::Value,
        T::Value: Clone,
    {
        // Try the table first
        {
            let table = self.table.read();
            if let Some(value) = table.get(&args) {
                self.stats.record_hit();
                return value.clone();
            }
        }

        // Miss - compute with the lock released
        self.stats.record_miss();
        let value = (self.f)(&args);

        self.table.write().put(args, value.clone());
        self.stats.record_insert();

        value
    }

    /// Call a fallible wrapped callable through the cache.
    ///
    /// An `Err` from the callable propagates unchanged and nothing is
    /// stored; only `Ok` results are ever cached.
    pub fn try_call<E>(&self, args: T::Key) -> Result<T::Value, E>
    where
        F: Fn(&T::Key) -> Result<T::Value, E>,
        T::Value: Clone,
    {
        {
            let table = self.table.read();
            if let Some(value) = table.get(&args) {
                self.stats.record_hit();
                return Ok(value.clone());
            }
        }

        self.stats.record_miss();
        let value = (self.f)(&args)?;

        self.table.write().put(args, value.clone());
        self.stats.record_insert();

        Ok(value)
    }
}

impl<F, T> fmt::Debug for SyncMemo<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncMemo")
            .field("f", &self.name())
            .finish_non_exhaustive()
    }
}
