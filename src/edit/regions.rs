//! Editable sprite regions and scan areas.
//!
//! [`RegionEditor`] holds everything one editing session mutates: the ordered
//! sprite regions, the scan areas, the undo history, the zoom factor and the
//! interaction state (selection, pending swap, active gesture). Rectangles are
//! stored in image pixels; pointer positions arrive in screen pixels and are
//! mapped through the session's [`ViewScale`].
//!
//! Every mutation pushes one `(regions, areas)` snapshot first. A pointer
//! gesture (`press` → `motion`* → `release`) pushes once, at `press`.

use log::debug;

use crate::edit::undo::{Snapshot, SnapshotStack, UndoStack};
use crate::raster::geom::{EdgeMask, Rect, ViewScale};
use crate::utils::error::{Result, SpriteError};

/// Which rectangle set a [`Target`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Regions,
    Areas,
}

/// One rectangle inside the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub layer: Layer,
    pub index: usize,
}

impl Target {
    pub fn region(index: usize) -> Self {
        Self {
            layer: Layer::Regions,
            index,
        }
    }

    pub fn area(index: usize) -> Self {
        Self {
            layer: Layer::Areas,
            index,
        }
    }
}

/// Screen-space interaction limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Minimum width and height of a rectangle being resized, in screen pixels
    pub min_screen_size: i32,
    /// Half-width of the grab band around each edge, in screen pixels
    pub handle_size: i32,
    /// Drawn rectangles must exceed this many screen pixels in both dimensions
    pub min_drawn_size: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_screen_size: 10,
            handle_size: 8,
            min_drawn_size: 5,
        }
    }
}

/// Result of one click in the two-click swap gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// First click recorded; waiting for the partner.
    Pending(usize),
    /// Second click on a different region; the two were exchanged.
    Swapped(usize, usize),
    /// Second click on the same region; nothing changed.
    Cancelled,
    /// Index out of range.
    Ignored,
}

/// What a pointer press started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Empty space was clicked and the selection was cleared.
    Deselected,
    Resizing(Target, EdgeMask),
    Dragging(Target),
    Swap(SwapOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureKind {
    Resize(EdgeMask),
    Drag,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    target: Target,
    kind: GestureKind,
    press_pos: (i32, i32),
    /// Target rectangle in screen pixels when the gesture started
    screen_origin: Rect,
    /// Target rectangle in image pixels when the gesture started
    image_origin: Rect,
}

/// Per-session region editing state.
#[derive(Debug, Default)]
pub struct RegionEditor {
    regions: Vec<Rect>,
    areas: Vec<Rect>,
    undo: SnapshotStack<Snapshot>,
    scale: ViewScale,
    config: EditorConfig,
    selection: Option<Target>,
    pending_swap: Option<usize>,
    gesture: Option<Gesture>,
}

impl RegionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_scale(mut self, scale: ViewScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    pub fn areas(&self) -> &[Rect] {
        &self.areas
    }

    pub fn scale(&self) -> ViewScale {
        self.scale
    }

    /// Changes the zoom factor (clamped). Stored rectangles are unaffected.
    pub fn set_scale(&mut self, factor: f64) {
        self.scale = ViewScale::new(factor);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<Target> {
        self.selection
    }

    /// Selects `target`, or clears the selection if it does not exist.
    pub fn select(&mut self, target: Option<Target>) {
        self.selection = target.filter(|t| self.get(*t).is_some());
    }

    pub fn pending_swap(&self) -> Option<usize> {
        self.pending_swap
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            regions: self.regions.clone(),
            areas: self.areas.clone(),
        }
    }

    pub fn get(&self, target: Target) -> Option<Rect> {
        self.layer(target.layer).get(target.index).copied()
    }

    // --- Mutations ---

    /// Appends a sprite region and returns its index.
    pub fn add_region(&mut self, rect: Rect) -> Result<usize> {
        self.add(Layer::Regions, rect)
    }

    /// Appends a scan area and returns its index.
    pub fn add_area(&mut self, rect: Rect) -> Result<usize> {
        self.add(Layer::Areas, rect)
    }

    fn add(&mut self, layer: Layer, rect: Rect) -> Result<usize> {
        rect.validate()?;
        self.push_undo();
        let list = self.layer_mut(layer);
        list.push(rect);
        Ok(list.len() - 1)
    }

    /// Adds the rectangle spanned by two screen points, converted to image
    /// pixels. Returns `None` when the drawn box is too small to keep.
    pub fn add_drawn(
        &mut self,
        layer: Layer,
        start: (i32, i32),
        end: (i32, i32),
    ) -> Result<Option<Target>> {
        let screen = Rect::from_edges(start.0, start.1, end.0, end.1);
        let min = self.config.min_drawn_size;
        if (screen.width as i32) <= min || (screen.height as i32) <= min {
            return Ok(None);
        }
        let rect = self.scale.to_image(screen);
        let index = self.add(layer, rect)?;
        Ok(Some(Target { layer, index }))
    }

    /// Removes `target`. Later indices shift down by one; selection and the
    /// pending swap are renumbered to keep pointing at the same rectangles.
    pub fn delete(&mut self, target: Target) -> Result<Rect> {
        self.check(target)?;
        self.push_undo();
        let removed = self.layer_mut(target.layer).remove(target.index);

        self.selection = match self.selection {
            Some(sel) if sel.layer == target.layer && sel.index == target.index => None,
            Some(sel) if sel.layer == target.layer && sel.index > target.index => {
                Some(Target {
                    layer: sel.layer,
                    index: sel.index - 1,
                })
            }
            other => other,
        };
        if target.layer == Layer::Regions {
            self.pending_swap = match self.pending_swap {
                Some(i) if i == target.index => None,
                Some(i) if i > target.index => Some(i - 1),
                other => other,
            };
        }
        self.gesture = None;
        Ok(removed)
    }

    /// Deletes the selected rectangle, if any.
    pub fn delete_selected(&mut self) -> Option<Rect> {
        let target = self.selection?;
        self.delete(target).ok()
    }

    /// Resizes `target` by moving the edges in `edges` to the screen-space
    /// position `pos`.
    ///
    /// Horizontal edges are exclusive (LEFT wins over RIGHT), as are vertical
    /// ones (TOP wins over BOTTOM). The result is normalized, then held to the
    /// minimum screen size by pulling the edge opposite the dragged one.
    pub fn resize(&mut self, target: Target, edges: EdgeMask, pos: (i32, i32)) -> Result<()> {
        let current = self.check(target)?;
        self.push_undo();
        let screen_origin = self.scale.to_screen(current);
        let resized = self.resized_image_rect(screen_origin, edges, pos);
        self.set(target, resized);
        Ok(())
    }

    /// Moves `target` by a screen-space delta. The new top-left is clamped to
    /// be non-negative; the size is unchanged.
    pub fn drag(&mut self, target: Target, delta: (i32, i32)) -> Result<()> {
        let current = self.check(target)?;
        self.push_undo();
        let moved = self.dragged_image_rect(current, delta);
        self.set(target, moved);
        Ok(())
    }

    /// Exchanges regions `i` and `j`. Returns `false` (and records nothing)
    /// when `i == j`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<bool> {
        self.check(Target::region(i))?;
        self.check(Target::region(j))?;
        if i == j {
            return Ok(false);
        }
        self.push_undo();
        self.regions.swap(i, j);
        debug!("swapped regions {} and {}", i, j);
        Ok(true)
    }

    /// One click of the swap gesture on region `index`.
    pub fn swap_click(&mut self, index: usize) -> SwapOutcome {
        if index >= self.regions.len() {
            return SwapOutcome::Ignored;
        }
        match self.pending_swap.take() {
            None => {
                self.pending_swap = Some(index);
                self.selection = None;
                SwapOutcome::Pending(index)
            }
            Some(first) if first == index => {
                self.selection = Some(Target::region(index));
                SwapOutcome::Cancelled
            }
            Some(first) => {
                self.push_undo();
                self.regions.swap(first, index);
                self.selection = Some(Target::region(index));
                SwapOutcome::Swapped(first, index)
            }
        }
    }

    /// Drops a half-finished swap gesture.
    pub fn cancel_swap(&mut self) {
        self.pending_swap = None;
    }

    /// Restores the most recent snapshot. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo.undo() else {
            return false;
        };
        self.regions = snapshot.regions;
        self.areas = snapshot.areas;
        self.gesture = None;
        self.pending_swap = self.pending_swap.filter(|&i| i < self.regions.len());
        self.selection = self.selection.filter(|t| self.get(*t).is_some());
        true
    }

    /// Replaces all regions, e.g. with a fresh detection result.
    pub fn replace_regions(&mut self, regions: Vec<Rect>) {
        self.push_undo();
        self.regions = regions;
        self.selection = self.selection.filter(|t| t.layer == Layer::Areas);
        self.pending_swap = None;
        self.gesture = None;
    }

    pub fn clear_regions(&mut self) {
        self.replace_regions(Vec::new());
    }

    pub fn clear_areas(&mut self) {
        self.push_undo();
        self.areas.clear();
        self.selection = self.selection.filter(|t| t.layer == Layer::Regions);
        self.gesture = None;
    }

    // --- Hit testing (screen coordinates) ---

    /// First region whose on-screen box contains `pos`.
    pub fn region_at(&self, pos: (i32, i32)) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| self.scale.to_screen(*r).contains(pos.0, pos.1))
    }

    /// First scan area whose on-screen box contains `pos`.
    pub fn area_at(&self, pos: (i32, i32)) -> Option<usize> {
        self.areas
            .iter()
            .position(|r| self.scale.to_screen(*r).contains(pos.0, pos.1))
    }

    /// Rectangle under `pos`; regions take priority over scan areas.
    pub fn hit(&self, pos: (i32, i32)) -> Option<Target> {
        self.region_at(pos)
            .map(Target::region)
            .or_else(|| self.area_at(pos).map(Target::area))
    }

    /// Edges of the on-screen rectangle `screen` whose grab band contains
    /// `pos`. Each band is `2 * handle_size` wide, centered on its edge.
    pub fn edges_at(&self, pos: (i32, i32), screen: Rect) -> EdgeMask {
        let m = self.config.handle_size;
        let band = (2 * m).max(0) as u32;
        let (x, y) = (screen.x, screen.y);
        let (w, h) = (screen.width, screen.height);

        let left = Rect::new(x - m, y, band, h);
        let right = Rect::new(screen.x_max() - m, y, band, h);
        let top = Rect::new(x, y - m, w, band);
        let bottom = Rect::new(x, screen.y_max() - m, w, band);

        let mut edges = EdgeMask::NONE;
        if left.contains(pos.0, pos.1) {
            edges |= EdgeMask::LEFT;
        } else if right.contains(pos.0, pos.1) {
            edges |= EdgeMask::RIGHT;
        }
        if top.contains(pos.0, pos.1) {
            edges |= EdgeMask::TOP;
        } else if bottom.contains(pos.0, pos.1) {
            edges |= EdgeMask::BOTTOM;
        }
        edges
    }

    /// Edges of `target` under `pos`, for cursor feedback.
    pub fn edges_of(&self, target: Target, pos: (i32, i32)) -> EdgeMask {
        match self.get(target) {
            Some(rect) => self.edges_at(pos, self.scale.to_screen(rect)),
            None => EdgeMask::NONE,
        }
    }

    // --- Pointer gestures ---

    /// Starts a gesture at `pos`.
    ///
    /// With `swap_modifier` held, a click on a region feeds the swap gesture
    /// instead. Otherwise the rectangle under the pointer is selected and a
    /// resize (pointer on an edge band) or drag begins, recording one undo
    /// snapshot for the whole gesture.
    pub fn press(&mut self, pos: (i32, i32), swap_modifier: bool) -> PressOutcome {
        self.gesture = None;

        if swap_modifier && let Some(index) = self.region_at(pos) {
            return PressOutcome::Swap(self.swap_click(index));
        }
        self.pending_swap = None;

        let Some(target) = self.hit(pos) else {
            self.selection = None;
            return PressOutcome::Deselected;
        };
        let Some(image_origin) = self.get(target) else {
            return PressOutcome::Deselected;
        };

        self.selection = Some(target);
        let screen_origin = self.scale.to_screen(image_origin);
        let edges = self.edges_at(pos, screen_origin);
        let kind = if edges.is_empty() {
            GestureKind::Drag
        } else {
            GestureKind::Resize(edges)
        };

        self.push_undo();
        self.gesture = Some(Gesture {
            target,
            kind,
            press_pos: pos,
            screen_origin,
            image_origin,
        });

        match kind {
            GestureKind::Resize(edges) => PressOutcome::Resizing(target, edges),
            GestureKind::Drag => PressOutcome::Dragging(target),
        }
    }

    /// Updates the active gesture. Returns `false` when no gesture is running.
    pub fn motion(&mut self, pos: (i32, i32)) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        let updated = match gesture.kind {
            GestureKind::Resize(edges) => self.resized_image_rect(gesture.screen_origin, edges, pos),
            GestureKind::Drag => {
                let delta = (pos.0 - gesture.press_pos.0, pos.1 - gesture.press_pos.1);
                self.dragged_image_rect(gesture.image_origin, delta)
            }
        };
        self.set(gesture.target, updated);
        true
    }

    /// Ends the active gesture and returns the rectangle it edited.
    pub fn release(&mut self) -> Option<Target> {
        self.gesture.take().map(|g| g.target)
    }

    // --- Internals ---

    fn resized_image_rect(&self, origin: Rect, edges: EdgeMask, pos: (i32, i32)) -> Rect {
        let screen = resize_screen_rect(origin, edges, pos, self.config.min_screen_size);
        let mut rect = self.scale.to_image(screen);
        rect.width = rect.width.max(1);
        rect.height = rect.height.max(1);
        rect
    }

    fn dragged_image_rect(&self, origin: Rect, delta: (i32, i32)) -> Rect {
        let moved = origin.translate(
            self.scale.to_image_len(delta.0),
            self.scale.to_image_len(delta.1),
        );
        Rect::new(moved.x.max(0), moved.y.max(0), moved.width, moved.height)
    }

    fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo.push(snapshot);
    }

    fn check(&self, target: Target) -> Result<Rect> {
        self.get(target).ok_or_else(|| {
            SpriteError::InvalidArg(format!(
                "{:?} index {} out of range ({} present)",
                target.layer,
                target.index,
                self.layer(target.layer).len()
            ))
        })
    }

    fn set(&mut self, target: Target, rect: Rect) {
        if let Some(slot) = self.layer_mut(target.layer).get_mut(target.index) {
            *slot = rect;
        }
    }

    fn layer(&self, layer: Layer) -> &Vec<Rect> {
        match layer {
            Layer::Regions => &self.regions,
            Layer::Areas => &self.areas,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut Vec<Rect> {
        match layer {
            Layer::Regions => &mut self.regions,
            Layer::Areas => &mut self.areas,
        }
    }
}

/// Moves the requested edges of `origin` to `pos`, normalizes, and enforces a
/// `min_size` floor by pulling the edge opposite the dragged one.
pub fn resize_screen_rect(origin: Rect, edges: EdgeMask, pos: (i32, i32), min_size: i32) -> Rect {
    let (mut left, mut top) = (origin.x, origin.y);
    let (mut right, mut bottom) = (origin.x_max(), origin.y_max());

    if edges.contains(EdgeMask::LEFT) {
        left = pos.0;
    } else if edges.contains(EdgeMask::RIGHT) {
        right = pos.0;
    }
    if edges.contains(EdgeMask::TOP) {
        top = pos.1;
    } else if edges.contains(EdgeMask::BOTTOM) {
        bottom = pos.1;
    }

    let normalized = Rect::from_edges(left, top, right, bottom);
    let (mut left, mut top) = (normalized.x, normalized.y);
    let (mut right, mut bottom) = (normalized.x_max(), normalized.y_max());

    if right - left < min_size {
        if edges.contains(EdgeMask::LEFT) {
            left = right - min_size;
        } else {
            right = left + min_size;
        }
    }
    if bottom - top < min_size {
        if edges.contains(EdgeMask::TOP) {
            top = bottom - min_size;
        } else {
            bottom = top + min_size;
        }
    }
    Rect::from_edges(left, top, right, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(regions: &[Rect]) -> RegionEditor {
        let mut editor = RegionEditor::new();
        editor.replace_regions(regions.to_vec());
        editor
    }

    #[test]
    fn test_add_rejects_degenerate() {
        let mut editor = RegionEditor::new();
        assert!(editor.add_region(Rect::new(0, 0, 0, 5)).is_err());
        assert!(editor.regions().is_empty());
        assert_eq!(editor.undo_depth(), 0);
        assert_eq!(editor.add_region(Rect::new(0, 0, 5, 5)).ok(), Some(0));
    }

    #[test]
    fn test_delete_renumbers_selection() -> Result<()> {
        let mut editor = editor_with(&[
            Rect::new(0, 0, 10, 10),
            Rect::new(20, 0, 10, 10),
            Rect::new(40, 0, 10, 10),
        ]);
        editor.select(Some(Target::region(2)));
        editor.delete(Target::region(0))?;
        assert_eq!(editor.selection(), Some(Target::region(1)));
        assert_eq!(editor.regions()[1], Rect::new(40, 0, 10, 10));

        editor.delete(Target::region(1))?;
        assert_eq!(editor.selection(), None);
        assert!(editor.delete_selected().is_none());
        Ok(())
    }

    #[test]
    fn test_resize_right_edge() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(10, 10, 20, 20)]);
        editor.resize(Target::region(0), EdgeMask::RIGHT, (50, 0))?;
        assert_eq!(editor.regions()[0], Rect::new(10, 10, 40, 20));
        Ok(())
    }

    #[test]
    fn test_resize_past_opposite_edge_normalizes() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(10, 10, 20, 20)]);
        // drag the left edge far past the right edge
        editor.resize(Target::region(0), EdgeMask::LEFT, (60, 0))?;
        assert_eq!(editor.regions()[0], Rect::new(30, 10, 30, 20));
        Ok(())
    }

    #[test]
    fn test_resize_enforces_minimum_from_opposite_edge() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(10, 10, 20, 20)]);
        editor.resize(Target::region(0), EdgeMask::TOP_LEFT, (28, 27))?;
        // right/bottom stay at 30; left/top pulled back to 30 - 10
        assert_eq!(editor.regions()[0], Rect::new(20, 20, 10, 10));

        editor.resize(Target::region(0), EdgeMask::RIGHT, (21, 0))?;
        assert_eq!(editor.regions()[0], Rect::new(20, 20, 10, 10));
        Ok(())
    }

    #[test]
    fn test_resize_divides_by_scale() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(10, 10, 20, 20)]).with_scale(ViewScale::new(2.0));
        // on screen: (20, 20, 40, 40); move bottom to y=100 → image height (100-20)/2
        editor.resize(Target::region(0), EdgeMask::BOTTOM, (0, 100))?;
        assert_eq!(editor.regions()[0], Rect::new(10, 10, 20, 40));
        Ok(())
    }

    #[test]
    fn test_drag_clamps_to_origin() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(5, 5, 10, 10)]);
        editor.drag(Target::region(0), (-20, 3))?;
        assert_eq!(editor.regions()[0], Rect::new(0, 8, 10, 10));
        Ok(())
    }

    #[test]
    fn test_drag_delta_is_scaled() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(5, 5, 10, 10)]).with_scale(ViewScale::new(2.0));
        editor.drag(Target::region(0), (10, 20))?;
        assert_eq!(editor.regions()[0], Rect::new(10, 15, 10, 10));
        Ok(())
    }

    #[test]
    fn test_swap_is_involutive() -> Result<()> {
        let original = vec![
            Rect::new(0, 0, 10, 10),
            Rect::new(20, 0, 12, 14),
            Rect::new(40, 0, 16, 10),
        ];
        let mut editor = editor_with(&original);
        assert!(editor.swap(0, 2)?);
        assert_ne!(editor.regions(), &original[..]);
        assert!(editor.swap(0, 2)?);
        assert_eq!(editor.regions(), &original[..]);
        assert!(!editor.swap(1, 1)?);
        assert!(editor.swap(0, 9).is_err());
        Ok(())
    }

    #[test]
    fn test_swap_click_gesture() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 0, 10, 10);
        let mut editor = editor_with(&[a, b]);

        assert_eq!(editor.swap_click(0), SwapOutcome::Pending(0));
        assert_eq!(editor.swap_click(0), SwapOutcome::Cancelled);
        assert_eq!(editor.regions(), &[a, b]);

        assert_eq!(editor.swap_click(1), SwapOutcome::Pending(1));
        assert_eq!(editor.swap_click(0), SwapOutcome::Swapped(1, 0));
        assert_eq!(editor.regions(), &[b, a]);
        assert_eq!(editor.selection(), Some(Target::region(0)));
        assert_eq!(editor.swap_click(7), SwapOutcome::Ignored);
    }

    #[test]
    fn test_undo_restores_exact_snapshot() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10)]);
        editor.add_area(Rect::new(0, 0, 100, 100))?;
        let before = editor.snapshot();

        editor.resize(Target::area(0), EdgeMask::BOTTOM_RIGHT, (50, 50))?;
        assert!(editor.undo());
        assert_eq!(editor.snapshot(), before);

        editor.drag(Target::region(1), (5, 5))?;
        assert!(editor.undo());
        assert_eq!(editor.snapshot(), before);

        editor.swap(0, 1)?;
        assert!(editor.undo());
        assert_eq!(editor.snapshot(), before);
        Ok(())
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut editor = RegionEditor::new();
        assert!(!editor.undo());
        assert!(editor.regions().is_empty());
    }

    #[test]
    fn test_hit_testing_prefers_regions() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(10, 10, 10, 10)]);
        editor.add_area(Rect::new(0, 0, 100, 100))?;
        assert_eq!(editor.hit((15, 15)), Some(Target::region(0)));
        assert_eq!(editor.hit((50, 50)), Some(Target::area(0)));
        assert_eq!(editor.hit((150, 150)), None);
        Ok(())
    }

    #[test]
    fn test_edges_at_bands() {
        let editor = RegionEditor::new();
        let screen = Rect::new(100, 100, 50, 50);
        assert_eq!(editor.edges_at((101, 125), screen), EdgeMask::LEFT);
        assert_eq!(editor.edges_at((148, 125), screen), EdgeMask::RIGHT);
        assert_eq!(editor.edges_at((101, 101), screen), EdgeMask::TOP_LEFT);
        assert_eq!(editor.edges_at((125, 149), screen), EdgeMask::BOTTOM);
        assert_eq!(editor.edges_at((125, 125), screen), EdgeMask::NONE);
    }

    #[test]
    fn test_drag_gesture_pushes_one_snapshot() {
        let mut editor = editor_with(&[Rect::new(10, 10, 40, 40)]);
        let depth = editor.undo_depth();

        assert_eq!(editor.press((30, 30), false), PressOutcome::Dragging(Target::region(0)));
        assert!(editor.motion((35, 32)));
        assert!(editor.motion((40, 50)));
        assert_eq!(editor.release(), Some(Target::region(0)));

        assert_eq!(editor.regions()[0], Rect::new(20, 30, 40, 40));
        assert_eq!(editor.undo_depth(), depth + 1);
        assert!(editor.undo());
        assert_eq!(editor.regions()[0], Rect::new(10, 10, 40, 40));
    }

    #[test]
    fn test_resize_gesture_from_edge() {
        let mut editor = editor_with(&[Rect::new(10, 10, 40, 40)]);
        let outcome = editor.press((49, 30), false);
        assert_eq!(outcome, PressOutcome::Resizing(Target::region(0), EdgeMask::RIGHT));
        editor.motion((80, 30));
        editor.release();
        assert_eq!(editor.regions()[0], Rect::new(10, 10, 70, 40));
    }

    #[test]
    fn test_press_with_modifier_swaps() {
        let a = Rect::new(0, 0, 20, 20);
        let b = Rect::new(40, 0, 20, 20);
        let mut editor = editor_with(&[a, b]);
        editor.press((10, 10), true);
        let outcome = editor.press((50, 10), true);
        assert_eq!(outcome, PressOutcome::Swap(SwapOutcome::Swapped(0, 1)));
        assert_eq!(editor.regions(), &[b, a]);
        assert!(!editor.is_gesture_active());
    }

    #[test]
    fn test_press_on_empty_space_deselects() {
        let mut editor = editor_with(&[Rect::new(0, 0, 20, 20)]);
        editor.select(Some(Target::region(0)));
        assert_eq!(editor.press((200, 200), false), PressOutcome::Deselected);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_add_drawn_filters_tiny_boxes() -> Result<()> {
        let mut editor = RegionEditor::new().with_scale(ViewScale::new(2.0));
        assert_eq!(editor.add_drawn(Layer::Areas, (0, 0), (5, 40))?, None);
        let target = editor.add_drawn(Layer::Areas, (40, 40), (20, 10))?;
        assert_eq!(target, Some(Target::area(0)));
        assert_eq!(editor.areas()[0], Rect::new(10, 5, 10, 15));
        Ok(())
    }

    #[test]
    fn test_clear_operations_are_undoable() -> Result<()> {
        let mut editor = editor_with(&[Rect::new(0, 0, 10, 10)]);
        editor.add_area(Rect::new(0, 0, 50, 50))?;
        editor.clear_regions();
        editor.clear_areas();
        assert!(editor.regions().is_empty() && editor.areas().is_empty());
        editor.undo();
        editor.undo();
        assert_eq!(editor.regions().len(), 1);
        assert_eq!(editor.areas().len(), 1);
        Ok(())
    }
}
