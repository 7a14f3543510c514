//! Geometry and visual value types
//!
//! Everything a ticket is drawn with is expressed in these types: points,
//! sizes and rects for layout, angles and affine transforms for placing
//! corner fragments, and colors, brushes and clip shapes for painting.
//!
//! # Coordinate space
//!
//! The y axis grows downward. Angles are measured from the +x axis towards
//! +y, so increasing angles turn visually clockwise on screen.

use std::f32::consts::{PI, TAU};
use std::ops::{Add, Mul, Neg, Sub};

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether two points coincide within `tolerance`
    pub fn approx_eq(&self, other: Point, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }

    /// Largest size with the given `width / height` ratio that fits inside `self`
    pub fn fit_aspect(&self, aspect_ratio: f32) -> Size {
        if aspect_ratio <= 0.0 || self.width <= 0.0 || self.height <= 0.0 {
            return Size::ZERO;
        }
        if self.width / self.height > aspect_ratio {
            Size::new(self.height * aspect_ratio, self.height)
        } else {
            Size::new(self.width, self.width / aspect_ratio)
        }
    }
}

impl From<Size> for Rect {
    /// Convert Size to Rect at origin (0, 0)
    fn from(size: Size) -> Self {
        Rect {
            origin: Point::ZERO,
            size,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn mid_x(&self) -> f32 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }

    /// Get the size of this rect
    pub fn size(&self) -> Size {
        self.size
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Inset the rect by a delta (shrink from all sides)
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: Size::new(
                (self.size.width - 2.0 * dx).max(0.0),
                (self.size.height - 2.0 * dy).max(0.0),
            ),
        }
    }

    /// Create a rect from center point and size
    pub fn from_center(center: Point, size: Size) -> Self {
        Rect {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    /// Get the union of two rects (smallest rect containing both)
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect {
            origin: Point::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Check if this rect intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && self.max_x() > other.min_x()
            && self.min_y() < other.max_y()
            && self.max_y() > other.min_y()
    }
}

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Angles and Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// An angle, stored in radians
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    radians: f32,
}

impl Angle {
    pub const ZERO: Angle = Angle { radians: 0.0 };
    pub const QUARTER_TURN: Angle = Angle { radians: PI / 2.0 };
    pub const HALF_TURN: Angle = Angle { radians: PI };

    pub const fn radians(radians: f32) -> Self {
        Self { radians }
    }

    pub fn degrees(degrees: f32) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    pub fn to_radians(self) -> f32 {
        self.radians
    }

    pub fn to_degrees(self) -> f32 {
        self.radians.to_degrees()
    }

    /// The same direction folded into `[0, 2π)`
    pub fn normalized(self) -> Self {
        Self {
            radians: self.radians.rem_euclid(TAU),
        }
    }

    pub fn sin_cos(self) -> (f32, f32) {
        self.radians.sin_cos()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::radians(self.radians + rhs.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::radians(self.radians - rhs.radians)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::radians(-self.radians)
    }
}

impl Mul<f32> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f32) -> Angle {
        Angle::radians(self.radians * rhs)
    }
}

const SIMILARITY_EPSILON: f32 = 1e-5;

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    pub fn rotation(angle: Angle) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    /// Rotation by `angle` around `pivot`
    pub fn rotation_about(angle: Angle, pivot: Point) -> Self {
        Affine2D::translation(pivot.x, pivot.y)
            .then(&Affine2D::rotation(angle))
            .then(&Affine2D::translation(-pivot.x, -pivot.y))
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    pub fn determinant(&self) -> f32 {
        let [a, b, c, d, _, _] = self.elements;
        a * d - b * c
    }

    /// Angle the x axis is turned to by this transform
    pub fn rotation_angle(&self) -> Angle {
        let [a, b, ..] = self.elements;
        Angle::radians(b.atan2(a))
    }

    /// Length the unit x vector is scaled to
    pub fn uniform_scale(&self) -> f32 {
        let [a, b, ..] = self.elements;
        (a * a + b * b).sqrt()
    }

    /// True when circles map to circles (rotation, uniform scale,
    /// translation, optionally a reflection)
    pub fn is_similarity(&self) -> bool {
        let [a, b, c, d, _, _] = self.elements;
        let proper = (a - d).abs() < SIMILARITY_EPSILON && (b + c).abs() < SIMILARITY_EPSILON;
        let mirrored = (a + d).abs() < SIMILARITY_EPSILON && (b - c).abs() < SIMILARITY_EPSILON;
        proper || mirrored
    }

    pub fn is_identity(&self) -> bool {
        self.elements
            .iter()
            .zip(Self::IDENTITY.elements.iter())
            .all(|(a, b)| (a - b).abs() < SIMILARITY_EPSILON)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color and Visual Types
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb8(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// The color's channels as 8-bit values, alpha dropped
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Image fill mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale to cover the target, cropping overflow
    #[default]
    Cover,
    /// Scale to fit inside the target
    Contain,
    /// Stretch to the target, ignoring aspect ratio
    Fill,
}

/// Image brush for background fills
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBrush {
    /// Image source (asset name, file path or URL)
    pub source: String,
    pub fit: ImageFit,
    pub opacity: f32,
}

impl ImageBrush {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fit: ImageFit::Cover,
            opacity: 1.0,
        }
    }

    pub fn fit(mut self, fit: ImageFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    /// Image fill for backgrounds
    Image(ImageBrush),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<ImageBrush> for Brush {
    fn from(brush: ImageBrush) -> Self {
        Brush::Image(brush)
    }
}

/// Shadow configuration
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            color,
        }
    }
}

/// Shape used to clip drawing
#[derive(Clone, Debug, PartialEq)]
pub enum ClipShape {
    /// Axis-aligned rectangle clip
    Rect(Rect),
    /// Arbitrary path clip
    Path(crate::draw::Path),
}

impl ClipShape {
    pub fn rect(rect: Rect) -> Self {
        ClipShape::Rect(rect)
    }

    pub fn path(path: crate::draw::Path) -> Self {
        ClipShape::Path(path)
    }

    /// Get the bounding rect of this clip shape
    pub fn bounds(&self) -> Rect {
        match self {
            ClipShape::Rect(rect) => *rect,
            ClipShape::Path(path) => path.bounds(),
        }
    }
}
