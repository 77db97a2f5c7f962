//! Drawing document and interactive canvas state.

use crate::config::CanvasConfig;
use crate::notification::{Notice, Notifier};
use crate::shapes::{Shape, ShapeId};
use crate::storage::{self, KeyValueStore, LoadOutcome, LoadStatus, StorageResult};
use crate::style::{StyleError, StyleUpdate};
use crate::tools::{extend_shape, Grab, Interaction, ToolKind, ToolManager};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from building or decoding a drawing.
#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("duplicate shape id {0}")]
    DuplicateId(ShapeId),
    #[error("shape {id} has invalid geometry: {reason}")]
    InvalidGeometry { id: ShapeId, reason: &'static str },
    #[error("malformed drawing data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// An ordered collection of shapes.
///
/// Order is paint order (back to front) and is the insertion order.
/// Stored as a plain JSON array of shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct Drawing {
    shapes: Vec<Shape>,
    /// Next identifier to hand out; never reuses ids of removed shapes.
    next_id: u64,
}

impl PartialEq for Drawing {
    fn eq(&self, other: &Self) -> bool {
        self.shapes == other.shapes
    }
}

impl Drawing {
    /// Create a new empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a drawing from shapes, checking ids and geometry.
    pub fn from_shapes(shapes: Vec<Shape>) -> Result<Self, DrawingError> {
        let mut drawing = Self::new();
        for shape in shapes {
            drawing.add_shape(shape)?;
        }
        Ok(drawing)
    }

    /// Reserve a fresh, unused shape id.
    ///
    /// Returns `None` only when every `u64` is taken.
    pub fn allocate_id(&mut self) -> Option<ShapeId> {
        if let Some(next) = self.next_id.checked_add(1) {
            let id = ShapeId::new(self.next_id);
            self.next_id = next;
            return Some(id);
        }
        // Counter exhausted by a stored id of u64::MAX: hand out the lowest free id.
        let used: HashSet<u64> = self.shapes.iter().map(|s| s.id().get()).collect();
        (0..=u64::MAX).find(|raw| !used.contains(raw)).map(ShapeId::new)
    }

    /// Append a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) -> Result<(), DrawingError> {
        let id = shape.id();
        if let Some(reason) = shape.geometry_defect() {
            return Err(DrawingError::InvalidGeometry { id, reason });
        }
        if self.contains(id) {
            return Err(DrawingError::DuplicateId(id));
        }
        self.next_id = self.next_id.max(id.get().saturating_add(1));
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove a shape from the drawing.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    /// Clear all shapes from the drawing.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get_shape(id).is_some()
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The topmost shape at `point`, if any.
    ///
    /// Shapes are tested front to back, so where shapes overlap the one
    /// painted last wins.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.hit_test(point, tolerance))
            .map(Shape::id)
    }

    /// Every shape at `point`, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .filter(|s| s.hit_test(point, tolerance))
            .map(Shape::id)
            .collect()
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|a, b| a.union(b))
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the drawing to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.shapes)
    }

    /// Deserialize a drawing from JSON.
    pub fn from_json(json: &str) -> Result<Self, DrawingError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<Vec<Shape>> for Drawing {
    type Error = DrawingError;

    fn try_from(shapes: Vec<Shape>) -> Result<Self, Self::Error> {
        Self::from_shapes(shapes)
    }
}

impl From<Drawing> for Vec<Shape> {
    fn from(drawing: Drawing) -> Self {
        drawing.shapes
    }
}

/// Interactive canvas state: the drawing plus tool, selection and gesture.
///
/// Owned by the host's event loop; every handler runs to completion and
/// reports whether anything visible changed.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    drawing: Drawing,
    tool_manager: ToolManager,
    selection: Option<ShapeId>,
    config: CanvasConfig,
}

impl Canvas {
    /// Create a new canvas with an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a canvas with an existing drawing.
    pub fn with_drawing(drawing: Drawing) -> Self {
        Self {
            drawing,
            ..Self::default()
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    pub fn interaction(&self) -> Interaction {
        self.tool_manager.interaction
    }

    /// The shape currently being drawn, for live preview.
    pub fn in_progress(&self) -> Option<ShapeId> {
        match self.tool_manager.interaction {
            Interaction::Drawing { shape, .. } => Some(shape),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.drawing.get_shape(id))
    }

    /// Select a shape. Returns false if no such shape exists.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.drawing.contains(id) {
            self.selection = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Topmost shape at `point` using the configured tolerance.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.drawing.hit_test(point, self.config.hit_tolerance)
    }

    /// Switch tools. A gesture in progress ends as if the pointer was released.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool_manager.is_active() {
            log::debug!("tool switched to {tool} mid-gesture, ending gesture");
            self.end_gesture();
        }
        self.tool_manager.current_tool = tool;
    }

    /// Handle a pointer press.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.tool_manager.is_active() {
            // The release was never delivered.
            self.end_gesture();
        }

        let tool = self.tool_manager.current_tool;
        match (tool, self.hit_test(point)) {
            (ToolKind::Eraser, Some(id)) => {
                self.drawing.remove_shape(id);
                self.selection = None;
                log::debug!("erased shape {id}");
                true
            }
            (ToolKind::Select, Some(id)) => {
                if let Some(shape) = self.drawing.get_shape(id) {
                    let grab = Grab::for_shape(shape, point);
                    self.tool_manager.interaction = Interaction::Moving { shape: id, grab };
                }
                self.selection = Some(id);
                true
            }
            (_, Some(id)) => {
                let changed = self.selection != Some(id);
                self.selection = Some(id);
                changed
            }
            (tool, None) if tool.creates_shapes() => {
                let Some(id) = self.drawing.allocate_id() else {
                    log::warn!("no free shape id left, not starting a {tool} shape");
                    return false;
                };
                let style = self.config.default_style.clone();
                let Some(shape) = tool.start_shape(id, point, style) else {
                    return false;
                };
                if let Err(e) = self.drawing.add_shape(shape) {
                    log::warn!("could not start a {tool} shape at {point:?}: {e}");
                    return false;
                }
                self.selection = Some(id);
                self.tool_manager.interaction = Interaction::Drawing { shape: id, anchor: point };
                log::debug!("drawing {tool} shape {id} from {point:?}");
                true
            }
            (_, None) => self.selection.take().is_some(),
        }
    }

    /// Handle pointer motion. Only does something during a gesture.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let interaction = self.tool_manager.interaction;
        let Some(id) = interaction.shape() else {
            return false;
        };
        let Some(shape) = self.drawing.get_shape_mut(id) else {
            // The shape vanished under the gesture.
            self.tool_manager.finish();
            return false;
        };

        match interaction {
            Interaction::Drawing { anchor, .. } => {
                extend_shape(shape, anchor, point, self.config.max_freehand_points)
            }
            Interaction::Moving { mut grab, .. } => {
                grab.drag(shape, point);
                self.tool_manager.interaction = Interaction::Moving { shape: id, grab };
                true
            }
            Interaction::Idle => false,
        }
    }

    /// Handle a pointer release: the gesture's shape stays as it is.
    pub fn pointer_up(&mut self) -> bool {
        self.end_gesture()
    }

    /// The pointer left the tracked surface; treated as a release.
    pub fn pointer_leave(&mut self) -> bool {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> bool {
        let finished = self.tool_manager.finish();
        let Interaction::Drawing { shape: id, .. } = finished else {
            return !matches!(finished, Interaction::Idle);
        };

        if let (Some(tolerance), Some(Shape::Freehand(stroke))) = (
            self.config.freehand_simplify_tolerance,
            self.drawing.get_shape_mut(id),
        ) {
            let before = stroke.len();
            stroke.simplify(tolerance);
            log::debug!("simplified stroke {id} from {before} to {} points", stroke.len());
        }
        true
    }

    /// Change one style property of the selected shape.
    pub fn update_style(&mut self, update: StyleUpdate) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        match self.drawing.get_shape_mut(id) {
            Some(shape) => {
                update.apply(shape.style_mut());
                true
            }
            None => {
                self.selection = None;
                false
            }
        }
    }

    /// Parse a raw style control value and apply it to the selected shape.
    pub fn set_style_property(&mut self, property: &str, value: &str) -> Result<bool, StyleError> {
        match StyleUpdate::parse(property, value) {
            Ok(update) => Ok(self.update_style(update)),
            Err(e) => {
                log::warn!("Rejected style input: {e}");
                Err(e)
            }
        }
    }

    /// Delete the selected shape.
    pub fn remove_selected(&mut self) -> Option<Shape> {
        let id = self.selection.take()?;
        if self.tool_manager.interaction.shape() == Some(id) {
            self.tool_manager.finish();
        }
        self.drawing.remove_shape(id)
    }

    /// Save the drawing under the configured key.
    pub fn save<S, N>(&self, store: &mut S, notifier: &mut N) -> StorageResult<()>
    where
        S: KeyValueStore + ?Sized,
        N: Notifier + ?Sized,
    {
        match storage::save_drawing(store, &self.config.storage_key, &self.drawing) {
            Ok(()) => {
                notifier.notify(Notice::SaveSucceeded);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save drawing: {e}");
                notifier.notify(Notice::SaveFailed);
                Err(e)
            }
        }
    }

    /// Replace the drawing with the one saved under the configured key.
    ///
    /// Missing, corrupt or unreadable data leaves the canvas untouched.
    pub fn load<S, N>(&mut self, store: &S, notifier: &mut N) -> LoadStatus
    where
        S: KeyValueStore + ?Sized,
        N: Notifier + ?Sized,
    {
        let outcome = storage::load_drawing(store, &self.config.storage_key);
        let status = outcome.status();
        match outcome {
            LoadOutcome::Loaded(drawing) => {
                log::info!("Loaded drawing with {} shapes", drawing.len());
                self.drawing = drawing;
                self.selection = None;
                self.tool_manager.finish();
                notifier.notify(Notice::LoadSucceeded);
            }
            LoadOutcome::NothingSaved => notifier.notify(Notice::LoadFoundNothing),
            LoadOutcome::Corrupt(e) => {
                log::warn!("Saved drawing is unusable: {e}");
                notifier.notify(Notice::LoadFoundNothing);
            }
            LoadOutcome::Unavailable(e) => {
                log::warn!("Could not read saved drawing: {e}");
                notifier.notify(Notice::LoadFoundNothing);
            }
        }
        status
    }
}
