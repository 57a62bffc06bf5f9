//! Save/load/remove of JSON values in LocalStorage
//!
//! `save` always writes under [`SAVE_KEY`]; `load` and `remove` take any key.
//! A missing key loads as `Ok(None)` instead of being handed to the parser.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::consts::SAVE_KEY;
use crate::platform::KeyValueStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// No window, or the browser denies storage access
    #[error("local storage is unavailable")]
    Unavailable,

    #[error("failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Text under `key` is not the JSON form of the requested type
    #[error("value stored under `{key}` could not be parsed: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store rejected the call (quota exceeded, security error, ...)
    #[error("storage {operation} failed for `{key}`: {message}")]
    Backend {
        operation: &'static str,
        key: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Serialize `data` as JSON and write it under [`SAVE_KEY`], replacing any
/// previous value.
pub fn save<S, T>(store: &S, data: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(data).map_err(StorageError::Serialize)?;
    store.set_item(SAVE_KEY, &json)?;
    log::debug!("Saved {} bytes under {}", json.len(), SAVE_KEY);
    Ok(())
}

/// Read and parse the value under `key`
pub fn load<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(json) = store.get_item(key)? else {
        log::debug!("Nothing stored under {}", key);
        return Ok(None);
    };

    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StorageError::Deserialize {
            key: key.to_string(),
            source,
        })
}

/// Delete the value under `key`. Missing keys are not an error.
pub fn remove<S>(store: &S, key: &str) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.remove_item(key)?;
    log::debug!("Removed {}", key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::{Value, json};
    use std::collections::{BTreeMap, HashMap};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Progress {
        level: u32,
        name: String,
        unlocked: Vec<String>,
    }

    #[test]
    fn test_save_then_load_fixed_key() {
        let storage = MemoryStorage::new();
        save(&storage, &json!({"a": 1})).unwrap();

        let loaded: Option<Value> = load(&storage, "saveDataModule").unwrap();
        assert_eq!(loaded, Some(json!({"a": 1})));
        assert_eq!(storage.keys(), vec![SAVE_KEY.to_string()]);
    }

    #[test]
    fn test_save_overwrites() {
        let storage = MemoryStorage::new();
        save(&storage, &json!([1, 2, 3])).unwrap();
        save(&storage, "second").unwrap();

        let loaded: Option<String> = load(&storage, SAVE_KEY).unwrap();
        assert_eq!(loaded.as_deref(), Some("second"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_object_key_order_kept() {
        let storage = MemoryStorage::new();
        let data: Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        save(&storage, &data).unwrap();

        assert_eq!(
            storage.get_item(SAVE_KEY).unwrap().as_deref(),
            Some(r#"{"b":1,"a":2}"#)
        );
    }

    #[test]
    fn test_typed_round_trip() {
        let storage = MemoryStorage::new();
        let progress = Progress {
            level: 3,
            name: "ada".to_string(),
            unlocked: vec!["map".to_string(), "lamp".to_string()],
        };
        save(&storage, &progress).unwrap();

        let loaded: Option<Progress> = load(&storage, SAVE_KEY).unwrap();
        assert_eq!(loaded, Some(progress));
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<Value> = load(&storage, "never-set").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_remove_then_load_is_none() {
        let storage = MemoryStorage::new();
        save(&storage, &json!({"a": 1})).unwrap();
        remove(&storage, SAVE_KEY).unwrap();

        let loaded: Option<Value> = load(&storage, SAVE_KEY).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_remove_unknown_key_leaves_others() {
        let storage = MemoryStorage::new();
        save(&storage, &json!({"keep": true})).unwrap();
        storage.set_item("other", "\"x\"").unwrap();

        remove(&storage, "never-set").unwrap();

        assert_eq!(storage.len(), 2);
        let kept: Option<Value> = load(&storage, SAVE_KEY).unwrap();
        assert_eq!(kept, Some(json!({"keep": true})));
        let other: Option<String> = load(&storage, "other").unwrap();
        assert_eq!(other.as_deref(), Some("x"));
    }

    #[test]
    fn test_malformed_text_is_deserialize_error() {
        let storage = MemoryStorage::new();
        storage.set_item("broken", "{not json").unwrap();

        let err = load::<_, Value>(&storage, "broken").unwrap_err();
        match err {
            StorageError::Deserialize { key, .. } => assert_eq!(key, "broken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_deserialize_error() {
        let storage = MemoryStorage::new();
        save(&storage, &json!({"a": 1})).unwrap();

        let err = load::<_, Progress>(&storage, SAVE_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Deserialize { .. }));
    }

    #[test]
    fn test_unserializable_value_is_serialize_error() {
        let storage = MemoryStorage::new();
        let mut data = HashMap::new();
        data.insert((1u8, 2u8), "tuple keys have no JSON form");

        let err = save(&storage, &data).unwrap_err();
        assert!(matches!(err, StorageError::Serialize(_)));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_backend_error_propagates() {
        let storage = MemoryStorage::with_quota(16);
        let err = save(&storage, &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::Backend { .. }));
        assert!(err.to_string().contains(SAVE_KEY));
    }

    proptest! {
        #[test]
        fn prop_save_load_round_trip(data in prop::collection::btree_map(".*", any::<i64>(), 0..8)) {
            let storage = MemoryStorage::new();
            save(&storage, &data).unwrap();
            let loaded: Option<BTreeMap<String, i64>> = load(&storage, SAVE_KEY).unwrap();
            prop_assert_eq!(loaded, Some(data));
        }

        #[test]
        fn prop_remove_isolated(key in "[a-z]{1,12}") {
            prop_assume!(key != SAVE_KEY);
            let storage = MemoryStorage::new();
            save(&storage, &json!({"a": 1})).unwrap();
            remove(&storage, &key).unwrap();
            prop_assert_eq!(storage.len(), 1);
        }
    }
}
