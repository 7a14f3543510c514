//! Draw Context - paths and the recording drawing API
//!
//! [`Path`] is the geometric value every shape produces: an ordered list of
//! move, line, curve, arc and close commands. [`DrawContext`] is the
//! interface a renderer implements to receive fills, strokes, text, images
//! and clip/opacity/transform state; [`RecordingContext`] records the calls
//! as [`DrawCommand`]s so they can be serialised later.
//!
//! # Example
//!
//! ```
//! use ticket_core::{Color, DrawContext, DrawContextExt, Path, Rect, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(200.0, 100.0));
//! ctx.fill(&Path::rect(Rect::new(0.0, 0.0, 100.0, 50.0)), Color::BLACK);
//! assert_eq!(ctx.commands().len(), 1);
//! ```

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::layer::{Affine2D, Angle, Brush, ClipShape, Color, Point, Rect, Shadow, Size};

/// Points closer than this are treated as the same point
pub const POINT_EPSILON: f32 = 1e-3;

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Miter limit (for Miter joins)
    pub miter_limit: f32,
    /// Dash pattern (empty for solid line)
    pub dash: Vec<f32>,
    /// Dash offset
    pub dash_offset: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set line join style
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Set dash pattern
    pub fn with_dash(mut self, pattern: Vec<f32>, offset: f32) -> Self {
        self.dash = pattern;
        self.dash_offset = offset;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text baseline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// `origin.y` is the top of the first line
    #[default]
    Top,
    Middle,
    Alphabetic,
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight
    pub fn to_numeric(self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
        }
    }
}

/// Text style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Text color
    pub color: Color,
    /// Text alignment
    pub align: TextAlign,
    /// Text baseline
    pub baseline: TextBaseline,
    /// Line height multiplier
    pub line_height: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            size: 17.0,
            weight: FontWeight::Regular,
            color: Color::BLACK,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            line_height: 1.2,
        }
    }
}

impl TextStyle {
    /// Create a new text style with font size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font weight
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set font family
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Set text alignment
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point, starting a new subpath
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Circular arc starting at the current point
    ///
    /// `clockwise` arcs run from `start_angle` towards decreasing angles.
    Arc {
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    },
    /// Close the current subpath
    Close,
}

/// Signed sweep of an arc: negative for clockwise arcs
///
/// Angles a whole number of turns apart sweep a full circle.
pub fn arc_sweep(start: Angle, end: Angle, clockwise: bool) -> Angle {
    let raw = if clockwise {
        start.to_radians() - end.to_radians()
    } else {
        end.to_radians() - start.to_radians()
    };
    let mut magnitude = raw.rem_euclid(TAU);
    if magnitude < 1e-6 && raw.abs() > 1e-6 {
        magnitude = TAU;
    }
    if clockwise {
        Angle::radians(-magnitude)
    } else {
        Angle::radians(magnitude)
    }
}

/// Point on a circle at `angle`
pub fn point_on_circle(center: Point, radius: f32, angle: Angle) -> Point {
    let (s, c) = angle.sin_cos();
    Point::new(center.x + radius * c, center.y + radius * s)
}

/// Approximate an arc by cubic Béziers of at most a quarter turn each
fn arc_to_cubics(center: Point, radius: f32, start: Angle, sweep: Angle) -> Vec<PathCommand> {
    let total = sweep.to_radians();
    let segments = ((total.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = total / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut commands = Vec::with_capacity(segments);
    let mut angle = start.to_radians();
    for _ in 0..segments {
        let next = angle + step;
        let (s0, c0) = angle.sin_cos();
        let (s1, c1) = next.sin_cos();
        commands.push(PathCommand::CubicTo {
            control1: Point::new(
                center.x + radius * (c0 - k * s0),
                center.y + radius * (s0 + k * c0),
            ),
            control2: Point::new(
                center.x + radius * (c1 + k * s1),
                center.y + radius * (s1 - k * c1),
            ),
            end: Point::new(center.x + radius * c1, center.y + radius * s1),
        });
        angle = next;
    }
    commands
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a path from a vector of commands
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Quadratic Bézier curve
    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            end: Point::new(x, y),
        });
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Circular arc around `center`
    ///
    /// With no current point the path first moves to the arc start; with a
    /// current point elsewhere it draws a line to the arc start.
    pub fn add_arc(
        mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) -> Self {
        let start = point_on_circle(center, radius, start_angle);
        match self.current_point() {
            None => self.commands.push(PathCommand::MoveTo(start)),
            Some(current) if !current.approx_eq(start, POINT_EPSILON) => {
                self.commands.push(PathCommand::LineTo(start))
            }
            Some(_) => {}
        }
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        });
        self
    }

    /// Append a closed rectangle subpath
    pub fn add_rect(mut self, rect: Rect) -> Self {
        self.commands.extend(Path::rect(rect).commands);
        self
    }

    /// Append every command of `other`, keeping its subpaths separate
    pub fn add_path(mut self, other: &Path) -> Self {
        self.commands.extend(other.commands.iter().cloned());
        self
    }

    /// Append `other` as a continuation of the current subpath
    ///
    /// A leading move in `other` becomes a line, so the contour stays
    /// continuous.
    pub fn connect(mut self, other: &Path) -> Self {
        let mut commands = other.commands.iter().cloned();
        match commands.next() {
            Some(PathCommand::MoveTo(p)) if self.current_point().is_some() => {
                let continues = self
                    .current_point()
                    .is_some_and(|current| current.approx_eq(p, POINT_EPSILON));
                if !continues {
                    self.commands.push(PathCommand::LineTo(p));
                }
            }
            Some(first) => self.commands.push(first),
            None => return self,
        }
        self.commands.extend(commands);
        self
    }

    /// Create a rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.max_x(), rect.y())
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.x(), rect.max_y())
            .close()
    }

    /// Create a circle path
    pub fn circle(center: Point, radius: f32) -> Self {
        Self::new()
            .add_arc(
                center,
                radius,
                Angle::ZERO,
                Angle::radians(TAU),
                false,
            )
            .close()
    }

    /// Create a line path
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First point of the path
    pub fn start_point(&self) -> Option<Point> {
        match self.commands.first()? {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Arc {
                center,
                radius,
                start_angle,
                ..
            } => Some(point_on_circle(*center, *radius, *start_angle)),
            PathCommand::QuadTo { end, .. } | PathCommand::CubicTo { end, .. } => Some(*end),
            PathCommand::Close => None,
        }
    }

    /// Point the next command would start from
    pub fn current_point(&self) -> Option<Point> {
        let mut current = None;
        let mut subpath_start = None;
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => {
                    current = Some(*p);
                    subpath_start = Some(*p);
                }
                PathCommand::Close => current = subpath_start,
                other => {
                    let end = command_end(other);
                    if subpath_start.is_none() {
                        subpath_start = end;
                    }
                    current = end;
                }
            }
        }
        current
    }

    /// Split the path at every move into independent subpaths
    pub fn subpaths(&self) -> Vec<Path> {
        let mut subpaths: Vec<Path> = Vec::new();
        for cmd in &self.commands {
            let starts_new = matches!(cmd, PathCommand::MoveTo(_)) || subpaths.is_empty();
            if starts_new {
                subpaths.push(Path::new());
            }
            if let Some(last) = subpaths.last_mut() {
                last.commands.push(cmd.clone());
            }
        }
        subpaths
    }

    /// Number of subpaths
    pub fn subpath_count(&self) -> usize {
        self.subpaths().len()
    }

    /// True when every subpath ends where it started
    pub fn is_closed(&self) -> bool {
        let subpaths = self.subpaths();
        !subpaths.is_empty()
            && subpaths.iter().all(|sub| {
                matches!(sub.commands.last(), Some(PathCommand::Close))
                    || match (sub.start_point(), sub.current_point()) {
                        (Some(start), Some(end)) => start.approx_eq(end, POINT_EPSILON),
                        _ => false,
                    }
            })
    }

    /// Map every point through `transform`
    ///
    /// Arcs stay arcs under similarity transforms and are converted to cubic
    /// Béziers otherwise.
    pub fn transformed(&self, transform: &Affine2D) -> Path {
        if transform.is_identity() {
            return self.clone();
        }

        let similarity = transform.is_similarity();
        let mirrored = transform.determinant() < 0.0;
        let theta = transform.rotation_angle();
        let scale = transform.uniform_scale();
        let map = |p: &Point| transform.transform_point(*p);

        let mut commands = Vec::with_capacity(self.commands.len());
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => commands.push(PathCommand::MoveTo(map(p))),
                PathCommand::LineTo(p) => commands.push(PathCommand::LineTo(map(p))),
                PathCommand::QuadTo { control, end } => commands.push(PathCommand::QuadTo {
                    control: map(control),
                    end: map(end),
                }),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => commands.push(PathCommand::CubicTo {
                    control1: map(control1),
                    control2: map(control2),
                    end: map(end),
                }),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } if similarity => {
                    let (start_angle, end_angle, clockwise) = if mirrored {
                        (theta - *start_angle, theta - *end_angle, !*clockwise)
                    } else {
                        (theta + *start_angle, theta + *end_angle, *clockwise)
                    };
                    commands.push(PathCommand::Arc {
                        center: map(center),
                        radius: radius * scale,
                        start_angle,
                        end_angle,
                        clockwise,
                    });
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    tracing::trace!(radius, "flattening arc under non-similarity transform");
                    let sweep = arc_sweep(*start_angle, *end_angle, *clockwise);
                    for cubic in arc_to_cubics(*center, *radius, *start_angle, sweep) {
                        if let PathCommand::CubicTo {
                            control1,
                            control2,
                            end,
                        } = cubic
                        {
                            commands.push(PathCommand::CubicTo {
                                control1: map(&control1),
                                control2: map(&control2),
                                end: map(&end),
                            });
                        }
                    }
                }
                PathCommand::Close => commands.push(PathCommand::Close),
            }
        }
        Path { commands }
    }

    /// Calculate the bounding rectangle of this path
    pub fn bounds(&self) -> Rect {
        if self.commands.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut include = |p: Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(*p),
                PathCommand::QuadTo { control, end } => {
                    include(*control);
                    include(*end);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(*control1);
                    include(*control2);
                    include(*end);
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    let sweep = arc_sweep(*start_angle, *end_angle, *clockwise).to_radians();
                    include(point_on_circle(*center, *radius, *start_angle));
                    include(point_on_circle(
                        *center,
                        *radius,
                        *start_angle + Angle::radians(sweep),
                    ));
                    // Axis extremes the arc passes through
                    for quadrant in 0..4 {
                        let axis = Angle::radians(quadrant as f32 * FRAC_PI_2);
                        let travelled = if sweep >= 0.0 {
                            (axis - *start_angle).normalized().to_radians()
                        } else {
                            (*start_angle - axis).normalized().to_radians()
                        };
                        if travelled <= sweep.abs() {
                            include(point_on_circle(*center, *radius, axis));
                        }
                    }
                }
                PathCommand::Close => {}
            }
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        } else {
            Rect::ZERO
        }
    }
}

/// End point of a drawing command
fn command_end(cmd: &PathCommand) -> Option<Point> {
    match cmd {
        PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
        PathCommand::QuadTo { end, .. } | PathCommand::CubicTo { end, .. } => Some(*end),
        PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        } => {
            let sweep = arc_sweep(*start_angle, *end_angle, *clockwise);
            Some(point_on_circle(*center, *radius, *start_angle + sweep))
        }
        PathCommand::Close => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Image Types
// ─────────────────────────────────────────────────────────────────────────────

/// Image rendering options
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOptions {
    /// Opacity (1.0 = fully opaque)
    pub opacity: f32,
    /// Gaussian blur radius in pixels (0 = sharp)
    pub blur: f32,
    pub fit: crate::layer::ImageFit,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageOptions {
    pub fn new() -> Self {
        Self {
            opacity: 1.0,
            blur: 0.0,
            fit: crate::layer::ImageFit::Cover,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing interface shapes and views paint into
///
/// - Transform, clip, and opacity stacks
/// - 2D drawing operations (fill, stroke, text, images, shadows)
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // Transform Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push a transform onto the stack
    fn push_transform(&mut self, transform: Affine2D);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Affine2D;

    // ─────────────────────────────────────────────────────────────────────────
    // State Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push a clip shape onto the stack
    fn push_clip(&mut self, shape: ClipShape);

    /// Pop the top clip from the stack
    fn pop_clip(&mut self);

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    /// Pop the top opacity from the stack
    fn pop_opacity(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // 2D Drawing Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill a path with a brush
    fn fill_path(&mut self, path: &Path, brush: Brush);

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush);

    /// Fill a rectangle (convenience method)
    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.fill_path(&Path::rect(rect), brush);
    }

    /// Draw text at a position
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Draw an image into `rect`
    fn draw_image(&mut self, source: &str, rect: Rect, options: &ImageOptions);

    /// Draw a drop shadow cast by `path`
    fn draw_shadow(&mut self, path: &Path, shadow: Shadow);

    // ─────────────────────────────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the current viewport size
    fn viewport_size(&self) -> Size;

    /// Get the current opacity
    fn current_opacity(&self) -> f32;
}

/// Extension trait for DrawContext that provides ergonomic generic methods
pub trait DrawContextExt: DrawContext {
    /// Fill a path with a color or brush
    fn fill<B: Into<Brush>>(&mut self, path: &Path, brush: B) {
        self.fill_path(path, brush.into());
    }

    /// Stroke a path with a color or brush
    fn stroke<B: Into<Brush>>(&mut self, path: &Path, stroke: &Stroke, brush: B) {
        self.stroke_path(path, stroke, brush.into());
    }

    /// Run `f` with an opacity pushed, popping it afterwards
    fn with_opacity<F: FnOnce(&mut Self)>(&mut self, opacity: f32, f: F) {
        self.push_opacity(opacity);
        f(self);
        self.pop_opacity();
    }

    /// Run `f` with a clip pushed, popping it afterwards
    fn with_clip<F: FnOnce(&mut Self)>(&mut self, shape: ClipShape, f: F) {
        self.push_clip(shape);
        f(self);
        self.pop_clip();
    }
}

// Blanket implementation for all DrawContext implementers
impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Affine2D),
    PopTransform,
    PushClip(ClipShape),
    PopClip,
    PushOpacity(f32),
    PopOpacity,

    // 2D Drawing
    FillPath {
        path: Path,
        brush: Brush,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        brush: Brush,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    DrawImage {
        source: String,
        rect: Rect,
        options: ImageOptions,
    },
    DrawShadow {
        path: Path,
        shadow: Shadow,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Affine2D>,
    opacity_stack: Vec<f32>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Affine2D::IDENTITY],
            opacity_stack: vec![1.0],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Affine2D::IDENTITY];
        self.opacity_stack = vec![1.0];
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Affine2D) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Affine2D {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn push_clip(&mut self, shape: ClipShape) {
        self.commands.push(DrawCommand::PushClip(shape));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = *self.opacity_stack.last().unwrap_or(&1.0);
        self.opacity_stack.push(current * opacity);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            brush,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            brush,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, source: &str, rect: Rect, options: &ImageOptions) {
        self.commands.push(DrawCommand::DrawImage {
            source: source.to_string(),
            rect,
            options: options.clone(),
        });
    }

    fn draw_shadow(&mut self, path: &Path, shadow: Shadow) {
        self.commands.push(DrawCommand::DrawShadow {
            path: path.clone(),
            shadow,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn current_opacity(&self) -> f32 {
        *self.opacity_stack.last().unwrap_or(&1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_recording_context() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_transform(Affine2D::translation(10.0, 20.0));
        ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLACK.into());
        ctx.draw_text("Hello", Point::new(10.0, 30.0), &TextStyle::default());
        ctx.pop_transform();

        assert_eq!(ctx.commands().len(), 4);
    }

    #[test]
    fn test_path_builder() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .line_to(100.0, 100.0)
            .line_to(0.0, 100.0)
            .close();

        assert_eq!(path.commands().len(), 5);
        assert!(path.is_closed());
    }

    #[test]
    fn test_path_shortcuts() {
        let rect = Path::rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(rect.commands().len(), 5); // move + 3 lines + close

        let circle = Path::circle(Point::new(50.0, 50.0), 25.0);
        assert!(!circle.is_empty());
        let bounds = circle.bounds();
        assert_close(bounds.x(), 25.0);
        assert_close(bounds.width(), 50.0);
    }

    #[test]
    fn test_arc_moves_when_path_is_empty() {
        let path = Path::new().add_arc(
            Point::new(0.0, 0.0),
            10.0,
            Angle::degrees(0.0),
            Angle::degrees(90.0),
            false,
        );
        assert_eq!(path.commands().len(), 2);
        assert_eq!(
            path.commands()[0],
            PathCommand::MoveTo(Point::new(10.0, 0.0))
        );
        let end = path.current_point().unwrap();
        assert!(end.approx_eq(Point::new(0.0, 10.0), 1e-4));
    }

    #[test]
    fn test_arc_joins_current_point_with_line() {
        let path = Path::new().move_to(0.0, 0.0).add_arc(
            Point::new(0.0, 0.0),
            10.0,
            Angle::degrees(90.0),
            Angle::degrees(-90.0),
            true,
        );
        assert!(matches!(path.commands()[1], PathCommand::LineTo(_)));
        assert_eq!(path.commands().len(), 3);
    }

    #[test]
    fn test_clockwise_sweep_decreases_angle() {
        let sweep = arc_sweep(Angle::degrees(-90.0), Angle::degrees(90.0), true);
        assert_close(sweep.to_degrees(), -180.0);

        let sweep = arc_sweep(Angle::degrees(180.0), Angle::degrees(90.0), true);
        assert_close(sweep.to_degrees(), -90.0);

        let sweep = arc_sweep(Angle::degrees(-90.0), Angle::degrees(90.0), false);
        assert_close(sweep.to_degrees(), 180.0);
    }

    #[test]
    fn test_arc_bounds_follow_sweep() {
        // Half circle bulging to the left of (100, 50)
        let path = Path::new().add_arc(
            Point::new(100.0, 50.0),
            20.0,
            Angle::degrees(-90.0),
            Angle::degrees(90.0),
            true,
        );
        let bounds = path.bounds();
        assert_close(bounds.min_x(), 80.0);
        assert_close(bounds.max_x(), 100.0);
        assert_close(bounds.min_y(), 30.0);
        assert_close(bounds.max_y(), 70.0);
    }

    #[test]
    fn test_connect_continues_contour() {
        let head = Path::new().move_to(0.0, 0.0).line_to(10.0, 0.0);
        let tail = Path::new().move_to(10.0, 0.0).line_to(10.0, 10.0);
        let joined = head.clone().connect(&tail);
        assert_eq!(joined.subpath_count(), 1);
        assert_eq!(joined.commands().len(), 3);

        let appended = head.add_path(&tail);
        assert_eq!(appended.subpath_count(), 2);
    }

    #[test]
    fn test_curves() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .quad_to(50.0, -20.0, 100.0, 0.0)
            .cubic_to(120.0, 10.0, 120.0, 40.0, 100.0, 50.0);

        assert_eq!(
            path.commands()[1],
            PathCommand::QuadTo {
                control: Point::new(50.0, -20.0),
                end: Point::new(100.0, 0.0),
            }
        );
        assert_eq!(path.current_point(), Some(Point::new(100.0, 50.0)));

        // control points bound the curves
        let bounds = path.bounds();
        assert_close(bounds.min_y(), -20.0);
        assert_close(bounds.max_x(), 120.0);

        let moved = path.transformed(&Affine2D::translation(5.0, 5.0));
        assert_eq!(
            moved.commands()[2],
            PathCommand::CubicTo {
                control1: Point::new(125.0, 15.0),
                control2: Point::new(125.0, 45.0),
                end: Point::new(105.0, 55.0),
            }
        );
    }

    #[test]
    fn test_add_rect_appends_closed_subpath() {
        let path = Path::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
            .add_rect(Rect::new(20.0, 20.0, 5.0, 5.0));
        assert_eq!(path.subpath_count(), 2);
        assert_eq!(path.subpaths()[1], Path::rect(Rect::new(20.0, 20.0, 5.0, 5.0)));
        assert!(path.subpaths()[1].is_closed());
        assert_close(path.bounds().max_x(), 25.0);
    }

    #[test]
    fn test_subpaths_and_closure() {
        let path = Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0))
            .add_path(&Path::line(Point::new(0.0, 0.0), Point::new(5.0, 5.0)));
        assert_eq!(path.subpath_count(), 2);
        assert!(!path.is_closed());
        assert!(path.subpaths()[0].is_closed());
    }

    #[test]
    fn test_rotation_keeps_arcs() {
        let path = Path::new().add_arc(
            Point::new(10.0, 0.0),
            5.0,
            Angle::degrees(180.0),
            Angle::degrees(90.0),
            true,
        );
        let rotated = path.transformed(&Affine2D::rotation(Angle::degrees(90.0)));
        match &rotated.commands()[1] {
            PathCommand::Arc {
                center,
                start_angle,
                end_angle,
                clockwise,
                ..
            } => {
                assert!(center.approx_eq(Point::new(0.0, 10.0), 1e-4));
                assert_close(start_angle.to_degrees(), 270.0);
                assert_close(end_angle.to_degrees(), 180.0);
                assert!(*clockwise);
            }
            other => panic!("expected arc, got {other:?}"),
        }
        let mapped = Affine2D::rotation(Angle::degrees(90.0))
            .transform_point(path.current_point().unwrap());
        assert!(rotated.current_point().unwrap().approx_eq(mapped, 1e-3));
    }

    #[test]
    fn test_mirror_flips_arc_direction() {
        let path = Path::new().add_arc(
            Point::new(0.0, 0.0),
            5.0,
            Angle::degrees(0.0),
            Angle::degrees(90.0),
            false,
        );
        let mirrored = path.transformed(&Affine2D::scale(-1.0, 1.0));
        let end = mirrored.current_point().unwrap();
        assert!(end.approx_eq(Point::new(0.0, 5.0), 1e-3));
        assert!(matches!(
            mirrored.commands()[1],
            PathCommand::Arc {
                clockwise: true,
                ..
            }
        ));
    }

    #[test]
    fn test_non_uniform_scale_flattens_arcs() {
        let path = Path::circle(Point::new(0.0, 0.0), 10.0);
        let stretched = path.transformed(&Affine2D::scale(2.0, 1.0));
        assert!(stretched
            .commands()
            .iter()
            .all(|cmd| !matches!(cmd, PathCommand::Arc { .. })));
        let bounds = stretched.bounds();
        assert_close(bounds.width(), 40.0);
        assert_close(bounds.height(), 20.0);
    }

    #[test]
    fn test_transform_stack() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_transform(Affine2D::translation(10.0, 20.0));
        ctx.push_transform(Affine2D::scale(2.0, 2.0));
        let p = ctx.current_transform().transform_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 22.0));

        ctx.pop_transform();
        ctx.pop_transform();

        // Should not panic when popping past the root
        ctx.pop_transform();
        assert!(ctx.current_transform().is_identity());
    }

    #[test]
    fn test_opacity_stack() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        assert_eq!(ctx.current_opacity(), 1.0);

        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.5);

        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.25);

        ctx.pop_opacity();
        assert_eq!(ctx.current_opacity(), 0.5);
    }

    #[test]
    fn test_stroke_configuration() {
        let stroke = Stroke::new(3.0)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Bevel)
            .with_dash(vec![10.0, 10.0], 0.0);

        assert_eq!(stroke.width, 3.0);
        assert_eq!(stroke.cap, LineCap::Round);
        assert_eq!(stroke.join, LineJoin::Bevel);
        assert_eq!(stroke.dash.len(), 2);
    }

    #[test]
    fn test_draw_context_ext() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        let path = Path::rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        ctx.with_clip(ClipShape::path(path.clone()), |ctx| {
            ctx.fill(&path, Color::BLACK);
        });

        assert_eq!(ctx.commands().len(), 3);
        assert_eq!(ctx.commands()[2], DrawCommand::PopClip);
    }
}
