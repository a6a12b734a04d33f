//! Closed-key in-memory cache
//!
//! A cache scope is a plain struct of `Option` slots; each slot is addressed by
//! a zero-sized key type implementing [`CacheKey`]. The key set is therefore
//! fixed at compile time and a slot holds `None` until its owner first fetches
//! it. Use [`define_cache_scope!`](crate::define_cache_scope) to declare both.

use std::fmt;

use parking_lot::RwLock;

/// Typed handle to one slot of a cache scope `S`
pub trait CacheKey<S> {
    type Value: Clone;

    /// Slot name as used in logs and events.
    const NAME: &'static str;

    fn slot(scope: &S) -> &Option<Self::Value>;

    fn slot_mut(scope: &mut S) -> &mut Option<Self::Value>;
}

/// Owner-side cache service for one scope
pub struct CacheService<S> {
    slots: RwLock<S>,
}

impl<S: Default> CacheService<S> {
    pub fn new() -> Self {
        Self { slots: RwLock::new(S::default()) }
    }

    /// Cached value, or `None` when the slot has not been fetched.
    pub fn get<K: CacheKey<S>>(&self) -> Option<K::Value> {
        K::slot(&self.slots.read()).clone()
    }

    pub fn contains<K: CacheKey<S>>(&self) -> bool {
        K::slot(&self.slots.read()).is_some()
    }

    /// Store a value and return the one it replaced.
    pub fn set<K: CacheKey<S>>(&self, value: K::Value) -> Option<K::Value> {
        tracing::trace!(key = K::NAME, "cache slot updated");
        K::slot_mut(&mut self.slots.write()).replace(value)
    }

    /// Reset one slot to "not fetched"; other slots are untouched.
    pub fn remove<K: CacheKey<S>>(&self) -> Option<K::Value> {
        K::slot_mut(&mut self.slots.write()).take()
    }

    /// Reset every slot.
    pub fn clear(&self) {
        *self.slots.write() = S::default();
    }

    /// Read-only handle for code that does not own the scope.
    pub fn view(&self) -> CacheView<'_, S> {
        CacheView { cache: self }
    }
}

impl<S: Default> Default for CacheService<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug> fmt::Debug for CacheService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheService").field("slots", &*self.slots.read()).finish()
    }
}

/// Consumer-side view: read and invalidate, never write
pub struct CacheView<'a, S> {
    cache: &'a CacheService<S>,
}

impl<S: Default> CacheView<'_, S> {
    pub fn get<K: CacheKey<S>>(&self) -> Option<K::Value> {
        self.cache.get::<K>()
    }

    pub fn contains<K: CacheKey<S>>(&self) -> bool {
        self.cache.contains::<K>()
    }

    pub fn remove<K: CacheKey<S>>(&self) -> Option<K::Value> {
        self.cache.remove::<K>()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// Declare a cache scope struct together with its key types.
///
/// ```rust
/// use squarecloud_core::{define_cache_scope, CacheService};
///
/// define_cache_scope! {
///     pub struct DemoCache {
///         logs: LogsKey => String,
///     }
/// }
///
/// let cache = CacheService::<DemoCache>::new();
/// assert_eq!(cache.set::<LogsKey>("boot".into()), None);
/// assert_eq!(cache.get::<LogsKey>().as_deref(), Some("boot"));
/// ```
#[macro_export]
macro_rules! define_cache_scope {
    (
        $(#[$meta:meta])*
        $vis:vis struct $scope:ident {
            $($field:ident : $key:ident => $value:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        $vis struct $scope {
            $($field: Option<$value>,)+
        }

        $(
            #[doc = concat!("Cache key for the `", stringify!($field), "` slot")]
            #[derive(Debug, Clone, Copy)]
            $vis struct $key;

            impl $crate::cache::CacheKey<$scope> for $key {
                type Value = $value;

                const NAME: &'static str = stringify!($field);

                fn slot(scope: &$scope) -> &Option<$value> {
                    &scope.$field
                }

                fn slot_mut(scope: &mut $scope) -> &mut Option<$value> {
                    &mut scope.$field
                }
            }
        )+
    };
}
