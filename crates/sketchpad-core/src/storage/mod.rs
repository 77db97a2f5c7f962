//! Storage abstraction for persistence.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use crate::canvas::{Drawing, DrawingError};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value store, the shape of browser local storage.
///
/// A missing key is `Ok(None)`, never an error.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// What a load attempt found, without the drawing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A drawing was read and replaced the current one.
    Loaded,
    /// Nothing is stored under the key.
    NothingSaved,
    /// Something is stored but it is not a valid drawing.
    Corrupt,
    /// The store itself could not be read.
    Unavailable,
}

/// Result of reading a drawing from a store.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Drawing),
    NothingSaved,
    Corrupt(DrawingError),
    Unavailable(StorageError),
}

impl LoadOutcome {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadOutcome::Loaded(_) => LoadStatus::Loaded,
            LoadOutcome::NothingSaved => LoadStatus::NothingSaved,
            LoadOutcome::Corrupt(_) => LoadStatus::Corrupt,
            LoadOutcome::Unavailable(_) => LoadStatus::Unavailable,
        }
    }

    /// The drawing, if one was loaded.
    pub fn into_drawing(self) -> Option<Drawing> {
        match self {
            LoadOutcome::Loaded(drawing) => Some(drawing),
            _ => None,
        }
    }
}

/// Serialize `drawing` and store it under `key`.
pub fn save_drawing<S>(store: &mut S, key: &str, drawing: &Drawing) -> StorageResult<()>
where
    S: KeyValueStore + ?Sized,
{
    let json = drawing
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &json)?;
    log::debug!("Saved {} shapes under {key:?}", drawing.len());
    Ok(())
}

/// Read the drawing stored under `key`.
///
/// An empty saved drawing is `Loaded`, not `NothingSaved`.
pub fn load_drawing<S>(store: &S, key: &str) -> LoadOutcome
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(json)) => match Drawing::from_json(&json) {
            Ok(drawing) => LoadOutcome::Loaded(drawing),
            Err(e) => LoadOutcome::Corrupt(e),
        },
        Ok(None) => LoadOutcome::NothingSaved,
        Err(e) => LoadOutcome::Unavailable(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Shape, ShapeId};
    use kurbo::Point;

    /// A store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io("disk unplugged".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io("disk unplugged".to_string()))
        }

        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io("disk unplugged".to_string()))
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let drawing = Drawing::from_shapes(vec![Shape::Circle(Circle::new(
            ShapeId::new(9),
            Point::new(1.0, 2.0),
            3.0,
        ))])
        .unwrap();

        save_drawing(&mut store, "drawing", &drawing).unwrap();
        let loaded = load_drawing(&store, "drawing").into_drawing();
        assert_eq!(loaded, Some(drawing));
    }

    #[test]
    fn test_empty_drawing_is_loaded_not_missing() {
        let mut store = MemoryStore::new();
        save_drawing(&mut store, "drawing", &Drawing::new()).unwrap();
        assert_eq!(store.get("drawing").unwrap().as_deref(), Some("[]"));

        let outcome = load_drawing(&store, "drawing");
        assert_eq!(outcome.status(), LoadStatus::Loaded);
        assert_eq!(outcome.into_drawing().map(|d| d.len()), Some(0));
    }

    #[test]
    fn test_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(load_drawing(&store, "drawing").status(), LoadStatus::NothingSaved);
    }

    #[test]
    fn test_corrupt_values() {
        let mut store = MemoryStore::new();
        for bad in [
            "{oops",
            "{}",
            r#"[{"type":"rect","id":1,"x":0,"y":0,"width":1,"height":1,"strokeWidth":"wide"}]"#,
            r#"[{"type":"circle","id":1,"x":0,"y":0,"radius":-4}]"#,
            r#"[{"type":"pencil","id":1,"points":[]},{"type":"pencil","id":1,"points":[0,0]}]"#,
        ] {
            store.set("drawing", bad).unwrap();
            assert!(
                matches!(load_drawing(&store, "drawing"), LoadOutcome::Corrupt(_)),
                "{bad} should be corrupt"
            );
        }
    }

    #[test]
    fn test_unparsed_stroke_widths_load() {
        let mut store = MemoryStore::new();
        store
            .set(
                "drawing",
                r#"[{"type":"rect","id":1,"x":0,"y":0,"width":1,"height":1,"strokeWidth":null},
                    {"type":"line","id":2,"points":[0,0,5,5],"strokeWidth":50},
                    {"type":"circle","id":3,"x":9,"y":9,"radius":2,"strokeWidth":0}]"#,
            )
            .unwrap();

        let drawing = load_drawing(&store, "drawing").into_drawing().unwrap();
        let widths: Vec<u8> = drawing
            .shapes()
            .iter()
            .map(|s| s.style().stroke_width.get())
            .collect();
        assert_eq!(widths, vec![2, 20, 1]);
    }

    #[test]
    fn test_store_failures_propagate() {
        let mut store = BrokenStore;
        assert!(matches!(
            save_drawing(&mut store, "drawing", &Drawing::new()),
            Err(StorageError::Io(_))
        ));
        assert_eq!(load_drawing(&store, "drawing").status(), LoadStatus::Unavailable);
    }
}
