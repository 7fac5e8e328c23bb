// src/geom.rs

//! Geometric primitives for sprite regions and scan areas.
//!
//! `Rect` is the value type used for both detected sprite regions and scan
//! areas, always in source-image pixel coordinates. `ViewScale` maps between
//! image pixels and the zoomed screen space the editor renders in.

use crate::utils::error::{Result, SpriteError};

/// Represents a 2D rectangle with integer coordinates.
///
/// The rectangle is defined by its top-left corner (`x`, `y`) and its `width` and `height`.
/// This struct is `Copy`, so it can be passed around cheaply by value; edits
/// replace it wholesale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle, rejecting zero width or height.
    pub fn try_new(x: i32, y: i32, width: u32, height: u32) -> Result<Self> {
        let rect = Rect::new(x, y, width, height);
        rect.validate()?;
        Ok(rect)
    }

    /// Creates an empty rectangle.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a rectangle from exclusive edges, swapping them if inverted.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (left, right) = (left.min(right), left.max(right));
        let (top, bottom) = (top.min(bottom), top.max(bottom));
        Rect::new(left, top, (right - left) as u32, (bottom - top) as u32)
    }

    /// Fails with a validation error if the rectangle is degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(SpriteError::Validation(format!(
                "rectangle at ({}, {}) has degenerate size {}x{}",
                self.x, self.y, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Returns the x-coordinate of the right edge (`x + width`).
    pub fn x_max(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Returns the y-coordinate of the bottom edge (`y + height`).
    pub fn y_max(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    /// Checks if the rectangle has zero width or height.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Checks if a point is contained within the rectangle's bounds.
    /// The right and bottom edges are exclusive.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        !self.is_empty() && px >= self.x && px < self.x_max() && py >= self.y && py < self.y_max()
    }

    /// Same as [`Rect::contains`] for fractional points such as region centers.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        !self.is_empty()
            && px >= self.x as f64
            && px < self.x_max() as f64
            && py >= self.y as f64
            && py < self.y_max() as f64
    }

    /// Returns the exact center point.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Returns a new rectangle that is the intersection of `self` and `other`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::empty();
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);

        let x_max = self.x_max().min(other.x_max());
        let y_max = self.y_max().min(other.y_max());

        if x >= x_max || y >= y_max {
            Rect::empty()
        } else {
            Rect::new(x, y, (x_max - x) as u32, (y_max - y) as u32)
        }
    }

    /// Returns a new rectangle translated by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Returns a new rectangle grown by `margin` on every side.
    pub fn inflate(&self, margin: i32) -> Rect {
        let new_width = self.width as i32 + 2 * margin;
        let new_height = self.height as i32 + 2 * margin;
        if new_width <= 0 || new_height <= 0 {
            return Rect::empty();
        }
        Rect::new(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            new_width as u32,
            new_height as u32,
        )
    }
}

/// Which edges of a rectangle a resize gesture moves.
///
/// Bit flags: 1 = LEFT, 2 = RIGHT, 4 = TOP, 8 = BOTTOM. Left takes precedence
/// over right and top over bottom when both are set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeMask(u8);

impl EdgeMask {
    pub const NONE: EdgeMask = EdgeMask(0);
    pub const LEFT: EdgeMask = EdgeMask(1);
    pub const RIGHT: EdgeMask = EdgeMask(2);
    pub const TOP: EdgeMask = EdgeMask(4);
    pub const BOTTOM: EdgeMask = EdgeMask(8);
    pub const TOP_LEFT: EdgeMask = EdgeMask(1 | 4);
    pub const TOP_RIGHT: EdgeMask = EdgeMask(2 | 4);
    pub const BOTTOM_LEFT: EdgeMask = EdgeMask(1 | 8);
    pub const BOTTOM_RIGHT: EdgeMask = EdgeMask(2 | 8);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: EdgeMask) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EdgeMask {
    type Output = EdgeMask;

    fn bitor(self, rhs: EdgeMask) -> EdgeMask {
        EdgeMask(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EdgeMask {
    fn bitor_assign(&mut self, rhs: EdgeMask) {
        self.0 |= rhs.0;
    }
}

/// Maps rectangles between image pixels and zoomed screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewScale {
    factor: f64,
}

impl ViewScale {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 5.0;

    /// Creates a mapper for the given zoom factor, clamped to `[MIN, MAX]`.
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_finite() { factor } else { 1.0 };
        ViewScale {
            factor: factor.clamp(Self::MIN, Self::MAX),
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Image pixels → screen pixels, truncating toward zero.
    pub fn to_screen(&self, rect: Rect) -> Rect {
        Rect::new(
            (rect.x as f64 * self.factor) as i32,
            (rect.y as f64 * self.factor) as i32,
            (rect.width as f64 * self.factor) as u32,
            (rect.height as f64 * self.factor) as u32,
        )
    }

    /// Screen pixels → image pixels, truncating toward zero.
    pub fn to_image(&self, rect: Rect) -> Rect {
        Rect::new(
            self.to_image_len(rect.x),
            self.to_image_len(rect.y),
            (rect.width as f64 / self.factor) as u32,
            (rect.height as f64 / self.factor) as u32,
        )
    }

    /// Converts a single screen-space length or coordinate to image space.
    pub fn to_image_len(&self, value: i32) -> i32 {
        (value as f64 / self.factor) as i32
    }
}

impl Default for ViewScale {
    fn default() -> Self {
        ViewScale::new(1.0)
    }
}
