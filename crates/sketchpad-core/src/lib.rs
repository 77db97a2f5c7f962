//! Sketchpad Core Library
//!
//! Platform-agnostic drawing model: shapes, hit-testing, the pointer gesture
//! state machine, style edits and persistence of a 2D vector sketch.

pub mod canvas;
pub mod config;
pub mod notification;
pub mod shapes;
pub mod storage;
pub mod style;
pub mod tools;

pub use canvas::{Canvas, Drawing, DrawingError};
pub use config::{CanvasConfig, ConfigError};
pub use notification::{LogNotifier, Notice, Notifier, RecordingNotifier};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
pub use storage::{KeyValueStore, LoadOutcome, LoadStatus, MemoryStore, StorageError, StorageResult};
pub use style::{StyleError, StyleUpdate};
pub use tools::{Interaction, ToolKind, ToolManager};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
