//! Key-value storage trait (LocalStorage shaped)

use crate::storage::StorageError;

/// String-keyed, string-valued persistent store.
///
/// Implementations serialize their own reads and writes; callers never hold
/// a lock across calls.
pub trait KeyValueStore {
    /// `Ok(None)` when nothing is stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; succeeds when the key was never set
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
