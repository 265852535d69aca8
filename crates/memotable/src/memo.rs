//! Memoization wrappers: two-stage construction and the call path
//!
//! Construction is two-stage: `memoize(factory)` configures the table,
//! `wrap(f)` binds the callable and materializes the table exactly once. Receiver binding always composes outside the memo:
//! wrap the unbound function, and let the outer method pass the receiver
//! (or its type, or nothing) as the leading key element. The instance,
//! class, and static method tests in `sync.rs` pin this layering down.

use std::any::type_name;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use crate::stats::MemoStats;
use crate::sync::SyncMemo;
use crate::table::Table;

/// Stage one of wrapping: a configured table factory with the callable
/// still unbound.
///
/// No table exists yet; the factory fires when [`wrap`](Memoize::wrap)
/// or [`wrap_sync`](Memoize::wrap_sync) runs.
pub struct Memoize<G> {
    table_factory: G,
}

/// Configure memoization with a table factory.
///
/// The factory is any zero-argument constructor of an empty [`Table`]:
/// [`hash_table`](crate::hash_table), `HashMap::new`, `BTreeMap::new`,
/// [`VecTable::new`](crate::VecTable::new), or a caller-supplied store.
///
/// # Example
///
/// ```
/// use memotable::{hash_table, memoize};
///
/// let square = memoize(hash_table).wrap(|n: &u64| n * n);
///
/// assert_eq!(square.call(12), 144);
/// assert_eq!(square.call(12), 144);
/// assert_eq!(square.stats().misses(), 1);
/// ```
pub fn memoize<G>(table_factory: G) -> Memoize<G> {
    Memoize { table_factory }
}

impl<G> Memoize<G> {
    /// Bind a callable, producing the memoized wrapper.
    ///
    /// The table factory fires exactly once, here.
    pub fn wrap<F, T>(self, f: F) -> Memo<F, T>
    where
        G: FnOnce() -> T,
    {
        Memo::new(self.table_factory, f)
    }

    /// Bind a callable, producing the synchronized wrapper.
    pub fn wrap_sync<F, T>(self, f: F) -> SyncMemo<F, T>
    where
        G: FnOnce() -> T,
    {
        SyncMemo::new(self.table_factory, f)
    }
}

/// A memoized callable: one underlying callable plus the table caching
/// its results.
///
/// Results are computed on the first call per distinct argument tuple
/// and cloned out of the table afterwards. Single-threaded; the table
/// sits behind a `RefCell` that is never held across the underlying
/// call, so the callable may re-enter the wrapper recursively. For a
/// wrapper that can live in a `static` or cross threads, see
/// [`SyncMemo`].
pub struct Memo<F, T> {
    f: F,
    table: RefCell<T>,
    stats: MemoStats,
}

impl<F, T> Memo<F, T> {
    /// Wrap `f`, materializing the backing table from `table_factory`.
    ///
    /// The table is created here, once, and owned by the wrapper for
    /// its whole lifetime; it is never recreated or swapped.
    pub fn new<G>(table_factory: G, f: F) -> Self
    where
        G: FnOnce() -> T,
    {
        Self {
            f,
            table: RefCell::new(table_factory()),
            stats: MemoStats::new(),
        }
    }

    /// Name of the wrapped callable, as the compiler knows it.
    ///
    /// The wrapper reports the identity of the callable it wraps, not
    /// its own.
    pub fn name(&self) -> &'static str {
        type_name::<F>()
    }

    /// Invocation counters for this wrapper.
    pub fn stats(&self) -> &MemoStats {
        &self.stats
    }

    /// Read access to the backing table.
    ///
    /// Release the borrow before calling the wrapper again.
    pub fn table(&self) -> Ref<'_, T> {
        self.table.borrow()
    }

    /// Write access to the backing table, for manual cache management
    /// such as clearing entries.
    pub fn table_mut(&self) -> RefMut<'_, T> {
        self.table.borrow_mut()
    }
}

impl<F, T: Table> Memo<F, T> {
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
            let table = self.table.borrow();
            if let Some(value) = table.get(&args) {
                self.stats.record_hit();
                return value.clone();
            }
        }

        // Miss - compute with the borrow released so the callable may
        // re-enter this wrapper
        self.stats.record_miss();
        let value = (self.f)(&args);

        self.table.borrow_mut().put(args, value.clone());
        self.stats.record_insert();

        value
    }

    /// Call a fallible wrapped callable through the cache.
    ///
    /// An `Err` from the callable propagates unchanged and nothing is
    /// stored, so the next call with the same tuple computes again.
    /// Only `Ok` results are ever cached.
    pub fn try_call<E>(&self, args: T::Key) -> Result<T::Value, E>
    where
        F: Fn(&T::Key) -> Result<T::Value, E>,
        T::Value: Clone,
    {
        {
            let table = self.table.borrow();
            if let Some(value) = table.get(&args) {
                self.stats.record_hit();
                return Ok(value.clone());
            }
        }

        self.stats.record_miss();
        let value = (self.f)(&args)?;

        self.table.borrow_mut().put(args, value.clone());
        self.stats.record_insert();

        Ok(value)
    }
}

impl<F, T> fmt::Debug for Memo<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("f", &self.name())
            .finish_non_exhaustive()
    }
}
