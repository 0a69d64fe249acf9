//! Typed user data attached to files.
//!
//! A [`Key`] names a slot and fixes its value type; a [`UserDataHolder`] stores
//! at most one value per key name.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A named, typed slot in a [`UserDataHolder`].
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

/// Thread-safe map from key names to values.
#[derive(Default)]
pub struct UserDataHolder {
    slots: RwLock<FxHashMap<&'static str, Box<dyn Any + Send + Sync>>>,
}

impl UserDataHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the value stored under `key`.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &Key<T>) -> Option<T> {
        let slots = self.slots.read();
        let value = slots.get(key.name)?;
        (**value).downcast_ref::<T>().cloned()
    }

    /// Store `value` under `key`, or clear the slot when `value` is `None`.
    pub fn put<T: Send + Sync + 'static>(&self, key: &Key<T>, value: Option<T>) {
        let mut slots = self.slots.write();
        match value {
            Some(value) => {
                slots.insert(key.name, Box::new(value));
            }
            None => {
                slots.remove(key.name);
            }
        }
    }

    /// True when a boolean flag is present and set.
    pub fn is_set(&self, key: &Key<bool>) -> bool {
        self.get(key).unwrap_or(false)
    }
}

impl fmt::Debug for UserDataHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read();
        let mut names: Vec<_> = slots.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("UserDataHolder")
            .field("keys", &names)
            .finish()
    }
}
