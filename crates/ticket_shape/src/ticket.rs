//! Ticket outline
//!
//! The outline is assembled from three kinds of parts:
//!
//! - four corner fragments, each drawn by the [`CornerStyle`] for the
//!   top-right corner and rotated into place
//! - the card body rectangle
//! - two semicircular stub notches on the left and right edges
//!
//! [`TicketShape::outline`] keeps the parts apart so callers can inspect or
//! stroke them individually. [`TicketShape::silhouette`] stitches the corner
//! traces and notches into one closed contour for clipping and shadows.

use ticket_core::{Affine2D, Angle, Path, Point, Rect};

use crate::corner::{CornerKind, CornerStyle};
use crate::metrics::TicketMetrics;
use crate::shape::Shape;

/// One of the four card corners
///
/// The discriminant is the corner's index in the outline; the fragment for
/// index `i` is rotated by `-90° * i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CornerPlacement {
    TopRight = 0,
    TopLeft = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl CornerPlacement {
    /// All corners, in outline order
    pub const ALL: [CornerPlacement; 4] = [
        CornerPlacement::TopRight,
        CornerPlacement::TopLeft,
        CornerPlacement::BottomLeft,
        CornerPlacement::BottomRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Per-corner offset signs, in cell sides
    fn offset(self) -> (f32, f32) {
        match self {
            CornerPlacement::TopRight => (-1.0, 0.0),
            CornerPlacement::TopLeft => (0.0, 0.0),
            CornerPlacement::BottomLeft => (0.0, -1.0),
            CornerPlacement::BottomRight => (-1.0, -1.0),
        }
    }

    /// Square cell of side `side` anchored at this corner of `rect`
    pub fn cell(self, rect: Rect, side: f32) -> Rect {
        let (dx, dy) = self.offset();
        let base_x = if dx == 0.0 { rect.min_x() } else { rect.max_x() };
        let base_y = if dy == 0.0 { rect.min_y() } else { rect.max_y() };
        Rect::new(base_x + dx * side, base_y + dy * side, side, side)
    }

    /// Rotation taking the top-right drawing onto this corner
    pub fn rotation(self) -> Angle {
        Angle::degrees(-90.0 * self.index() as f32)
    }

    /// Rotation about the centre of `cell`
    pub fn transform(self, cell: Rect) -> Affine2D {
        Affine2D::rotation_about(self.rotation(), cell.center())
    }
}

/// Parts of a ticket outline, kept separate
#[derive(Clone, Debug, PartialEq)]
pub struct TicketOutline {
    /// Corner fragments, in [`CornerPlacement::ALL`] order
    pub corners: [Path; 4],
    /// Card body rectangle
    pub body: Path,
    /// Right and left stub notches
    pub stubs: [Path; 2],
}

impl TicketOutline {
    pub fn corner(&self, placement: CornerPlacement) -> &Path {
        &self.corners[placement.index()]
    }

    /// All parts as one path: corners, body, then stubs
    pub fn to_path(&self) -> Path {
        let path = self
            .corners
            .iter()
            .fold(Path::new(), |path, corner| path.add_path(corner));
        let path = path.add_path(&self.body);
        self.stubs.iter().fold(path, |path, stub| path.add_path(stub))
    }
}

/// Ticket card shape with a pluggable corner style
#[derive(Clone, Debug, PartialEq)]
pub struct TicketShape<C: CornerStyle = CornerKind> {
    corner: C,
    metrics: TicketMetrics,
}

impl Default for TicketShape<CornerKind> {
    fn default() -> Self {
        Self::new(CornerKind::default())
    }
}

impl<C: CornerStyle> TicketShape<C> {
    pub fn new(corner: C) -> Self {
        Self {
            corner,
            metrics: TicketMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: TicketMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &TicketMetrics {
        &self.metrics
    }

    pub fn corner(&self) -> &C {
        &self.corner
    }

    /// Cell of `placement` within `rect`
    pub fn corner_cell(&self, rect: Rect, placement: CornerPlacement) -> Rect {
        placement.cell(rect, self.metrics.corner_extent())
    }

    /// Corner fragment for `placement`, rotated into position
    pub fn corner_fragment(&self, rect: Rect, placement: CornerPlacement) -> Path {
        let cell = self.corner_cell(rect, placement);
        self.corner
            .render_corner(cell)
            .transformed(&placement.transform(cell))
    }

    fn corner_trace(&self, rect: Rect, placement: CornerPlacement) -> Path {
        let cell = self.corner_cell(rect, placement);
        self.corner
            .trace_corner(cell)
            .transformed(&placement.transform(cell))
    }

    /// Notch centred on the right edge, bulging into the card
    fn right_stub(&self, path: Path, rect: Rect) -> Path {
        path.add_arc(
            Point::new(rect.max_x(), self.metrics.stub_y(rect)),
            self.metrics.stub_radius,
            Angle::degrees(-90.0),
            Angle::degrees(90.0),
            true,
        )
    }

    /// Mirror of [`Self::right_stub`] on the left edge
    fn left_stub(&self, path: Path, rect: Rect) -> Path {
        path.add_arc(
            Point::new(rect.min_x(), self.metrics.stub_y(rect)),
            self.metrics.stub_radius,
            Angle::degrees(90.0),
            Angle::degrees(-90.0),
            true,
        )
    }

    /// Build the outline parts for `rect`
    ///
    /// Rects smaller than [`TicketMetrics::minimum_extent`] give overlapping
    /// corner cells and a self-intersecting outline.
    pub fn outline(&self, rect: Rect) -> TicketOutline {
        if rect.width() < self.metrics.minimum_extent()
            || rect.height() < self.metrics.minimum_extent()
        {
            tracing::debug!(
                width = rect.width(),
                height = rect.height(),
                minimum = self.metrics.minimum_extent(),
                "ticket rect smaller than its corners"
            );
        }

        TicketOutline {
            corners: CornerPlacement::ALL.map(|placement| self.corner_fragment(rect, placement)),
            body: Path::rect(rect),
            stubs: [
                self.right_stub(Path::new(), rect),
                // starts at the notch centre, so the left stub carries the
                // radial line out to its arc
                self.left_stub(
                    Path::new().move_to(rect.min_x(), self.metrics.stub_y(rect)),
                    rect,
                ),
            ],
        }
    }

    /// Single closed contour around the card, running clockwise from the top
    /// edge
    pub fn silhouette(&self, rect: Rect) -> Path {
        let s = self.metrics.corner_extent();
        let path = Path::new()
            .move_to(rect.min_x() + s, rect.min_y())
            .connect(&self.corner_trace(rect, CornerPlacement::TopRight));
        let path = self
            .right_stub(path, rect)
            .connect(&self.corner_trace(rect, CornerPlacement::BottomRight))
            .connect(&self.corner_trace(rect, CornerPlacement::BottomLeft));
        self.left_stub(path, rect)
            .connect(&self.corner_trace(rect, CornerPlacement::TopLeft))
            .close()
    }
}

impl<C: CornerStyle> Shape for TicketShape<C> {
    fn path(&self, rect: Rect) -> Path {
        self.outline(rect).to_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corner::{InvertedRoundedCorner, RightAngleCorner};
    use ticket_core::{point_on_circle, PathCommand};

    const EPS: f32 = 1e-3;

    fn card() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 600.0)
    }

    fn arc_of(path: &Path) -> (Point, f32, bool) {
        path.commands()
            .iter()
            .find_map(|cmd| match cmd {
                PathCommand::Arc {
                    center,
                    radius,
                    clockwise,
                    ..
                } => Some((*center, *radius, *clockwise)),
                _ => None,
            })
            .expect("path has an arc")
    }

    /// Compare two paths by the points they visit
    fn assert_same_geometry(a: &Path, b: &Path) {
        assert_eq!(a.commands().len(), b.commands().len(), "{a:?} vs {b:?}");
        for (ca, cb) in a.commands().iter().zip(b.commands()) {
            match (ca, cb) {
                (PathCommand::MoveTo(p), PathCommand::MoveTo(q))
                | (PathCommand::LineTo(p), PathCommand::LineTo(q)) => {
                    assert!(p.approx_eq(*q, EPS), "{p:?} vs {q:?}")
                }
                (
                    PathCommand::Arc {
                        center: c1,
                        radius: r1,
                        start_angle: s1,
                        end_angle: e1,
                        clockwise: w1,
                    },
                    PathCommand::Arc {
                        center: c2,
                        radius: r2,
                        start_angle: s2,
                        end_angle: e2,
                        clockwise: w2,
                    },
                ) => {
                    assert!(c1.approx_eq(*c2, EPS));
                    assert!((r1 - r2).abs() < EPS);
                    assert_eq!(w1, w2);
                    assert!(point_on_circle(*c1, *r1, *s1)
                        .approx_eq(point_on_circle(*c2, *r2, *s2), EPS));
                    assert!(point_on_circle(*c1, *r1, *e1)
                        .approx_eq(point_on_circle(*c2, *r2, *e2), EPS));
                }
                (PathCommand::Close, PathCommand::Close) => {}
                other => panic!("mismatched commands {other:?}"),
            }
        }
    }

    #[test]
    fn test_stub_positions() {
        let outline = TicketShape::default().outline(card());

        let (center, radius, clockwise) = arc_of(&outline.stubs[0]);
        assert!(center.approx_eq(Point::new(300.0, 450.0), EPS));
        assert_eq!(radius, 20.0);
        assert!(clockwise);
        assert!(outline.stubs[0]
            .start_point()
            .unwrap()
            .approx_eq(Point::new(300.0, 430.0), EPS));

        let (center, radius, _) = arc_of(&outline.stubs[1]);
        assert!(center.approx_eq(Point::new(0.0, 450.0), EPS));
        assert_eq!(radius, 20.0);
        assert_eq!(outline.stubs[1].start_point(), Some(Point::new(0.0, 450.0)));
        match &outline.stubs[1].commands()[1] {
            PathCommand::LineTo(p) => assert!(p.approx_eq(Point::new(0.0, 470.0), EPS)),
            other => panic!("expected radial line, got {other:?}"),
        }
        assert_eq!(outline.stubs[1].commands().len(), 3);
        assert_eq!(outline.stubs[0].commands().len(), 2);
    }

    #[test]
    fn test_stubs_bulge_into_card() {
        let outline = TicketShape::default().outline(card());
        let right = outline.stubs[0].bounds();
        let left = outline.stubs[1].bounds();
        assert!((right.min_x() - 280.0).abs() < EPS);
        assert!((right.max_x() - 300.0).abs() < EPS);
        assert!((left.min_x() - 0.0).abs() < EPS);
        assert!((left.max_x() - 20.0).abs() < EPS);
    }

    #[test]
    fn test_stub_radius_is_independent_metric() {
        let metrics = TicketMetrics {
            stub_radius: 12.0,
            ..Default::default()
        };
        let outline = TicketShape::default()
            .with_metrics(metrics)
            .outline(card());
        assert_eq!(arc_of(&outline.stubs[0]).1, 12.0);
        // corners still use the corner radius
        let bounds = outline.corner(CornerPlacement::TopLeft).bounds();
        assert!((bounds.width() - 20.0).abs() < EPS);
        assert!((bounds.height() - 20.0).abs() < EPS);
    }

    #[test]
    fn test_outline_part_counts() {
        for corner in [CornerKind::Rounded, CornerKind::right_angle()] {
            let shape = TicketShape::new(corner);
            let outline = shape.outline(card());
            assert_eq!(outline.corners.len(), 4);
            assert_eq!(outline.stubs.len(), 2);
            assert_eq!(outline.body, Path::rect(card()));
            assert_eq!(shape.path(card()).subpath_count(), 4 + 1 + 2);
        }
    }

    #[test]
    fn test_corner_cells() {
        let shape = TicketShape::default();
        let cells = CornerPlacement::ALL.map(|p| shape.corner_cell(card(), p));
        assert_eq!(
            cells,
            [
                Rect::new(280.0, 0.0, 20.0, 20.0),
                Rect::new(0.0, 0.0, 20.0, 20.0),
                Rect::new(0.0, 580.0, 20.0, 20.0),
                Rect::new(280.0, 580.0, 20.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_fragments_fill_their_cells() {
        let shape = TicketShape::new(InvertedRoundedCorner);
        for placement in CornerPlacement::ALL {
            let cell = shape.corner_cell(card(), placement);
            let bounds = shape.corner_fragment(card(), placement).bounds();
            assert!((bounds.min_x() - cell.min_x()).abs() < EPS, "{placement:?}");
            assert!((bounds.min_y() - cell.min_y()).abs() < EPS, "{placement:?}");
            assert!((bounds.max_x() - cell.max_x()).abs() < EPS, "{placement:?}");
            assert!((bounds.max_y() - cell.max_y()).abs() < EPS, "{placement:?}");
        }
    }

    #[test]
    fn test_rounded_fillets_are_centred_on_card_corners() {
        let shape = TicketShape::new(InvertedRoundedCorner);
        let expected = [
            Point::new(300.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 600.0),
            Point::new(300.0, 600.0),
        ];
        for (placement, corner) in CornerPlacement::ALL.into_iter().zip(expected) {
            let (center, radius, _) = arc_of(&shape.corner_fragment(card(), placement));
            assert!(center.approx_eq(corner, EPS), "{placement:?}: {center:?}");
            assert!((radius - 20.0).abs() < EPS);
        }
    }

    #[test]
    fn test_rotation_invariance() {
        // On a square card, turning corner i by a quarter turn about the
        // card centre lands exactly on corner i + 1.
        let square = Rect::new(0.0, 0.0, 200.0, 200.0);
        let quarter = Affine2D::rotation_about(Angle::degrees(-90.0), square.center());

        for corner in [CornerKind::Rounded, CornerKind::RightAngle { inset: 4.0 }] {
            let outline = TicketShape::new(corner).outline(square);
            for i in 0..4 {
                let turned = outline.corners[i].transformed(&quarter);
                assert_same_geometry(&turned, &outline.corners[(i + 1) % 4]);
            }
        }
    }

    #[test]
    fn test_corner_style_isolation() {
        let rounded = TicketShape::new(CornerKind::Rounded).outline(card());
        let notched = TicketShape::new(CornerKind::right_angle()).outline(card());

        assert_eq!(rounded.body, notched.body);
        assert_eq!(rounded.stubs, notched.stubs);
        for i in 0..4 {
            assert_ne!(rounded.corners[i], notched.corners[i]);
        }
    }

    #[test]
    fn test_silhouette_is_one_closed_contour() {
        for corner in [CornerKind::Rounded, CornerKind::RightAngle { inset: 5.0 }] {
            let silhouette = TicketShape::new(corner).silhouette(card());
            assert_eq!(silhouette.subpath_count(), 1);
            assert!(silhouette.is_closed());

            let commands = silhouette.commands();
            assert_eq!(commands.last(), Some(&PathCommand::Close));
            let open = Path::from_commands(commands[..commands.len() - 1].to_vec());
            let start = open.start_point().unwrap();
            let end = open.current_point().unwrap();
            assert!(start.approx_eq(end, EPS), "{corner}: {start:?} != {end:?}");

            let bounds = silhouette.bounds();
            assert!((bounds.min_x() - 0.0).abs() < EPS);
            assert!((bounds.min_y() - 0.0).abs() < EPS);
            assert!((bounds.max_x() - 300.0).abs() < EPS);
            assert!((bounds.max_y() - 600.0).abs() < EPS);
        }
    }

    #[test]
    fn test_inset_silhouette_follows_fragments() {
        let metrics = TicketMetrics {
            corner_inset: 5.0,
            ..Default::default()
        };
        let shape = TicketShape::new(CornerKind::RightAngle { inset: 5.0 }).with_metrics(metrics);
        let silhouette = shape.silhouette(card());
        let vertices: Vec<Point> = silhouette
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect();

        for placement in CornerPlacement::ALL {
            for cmd in shape.corner_fragment(card(), placement).commands() {
                if let PathCommand::MoveTo(p) | PathCommand::LineTo(p) = cmd {
                    assert!(
                        vertices.iter().any(|v| v.approx_eq(*p, EPS)),
                        "{placement:?}: {p:?} not on silhouette"
                    );
                }
            }
        }
        assert!(vertices
            .iter()
            .any(|v| v.approx_eq(Point::new(295.0, 5.0), EPS)));

        let flush = TicketShape::new(CornerKind::right_angle()).silhouette(card());
        assert_ne!(silhouette, flush);
    }

    #[test]
    fn test_silhouette_contains_both_notches() {
        let silhouette = TicketShape::default().silhouette(card());
        let centers: Vec<Point> = silhouette
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                PathCommand::Arc { center, radius, .. } if *radius == 20.0 => Some(*center),
                _ => None,
            })
            .collect();
        assert!(centers
            .iter()
            .any(|c| c.approx_eq(Point::new(300.0, 450.0), EPS)));
        assert!(centers
            .iter()
            .any(|c| c.approx_eq(Point::new(0.0, 450.0), EPS)));
    }

    #[test]
    fn test_silhouette_with_plain_strategy_type() {
        let shape = TicketShape::new(RightAngleCorner::new(0.0));
        let silhouette = shape.silhouette(Rect::new(10.0, 20.0, 100.0, 200.0));
        assert!(silhouette.is_closed());
        assert_eq!(
            silhouette.start_point(),
            Some(Point::new(30.0, 20.0))
        );
    }

    #[test]
    fn test_degenerate_rects_do_not_panic() {
        let shape = TicketShape::default();
        for rect in [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::ZERO,
            Rect::new(5.0, 5.0, -20.0, -40.0),
        ] {
            let outline = shape.outline(rect);
            assert_eq!(outline.to_path().subpath_count(), 7);
            let silhouette = shape.silhouette(rect);
            let bounds = silhouette.bounds();
            assert!(bounds.width().is_finite() && bounds.height().is_finite());
        }
    }

    #[test]
    fn test_outline_is_idempotent() {
        let shape = TicketShape::new(CornerKind::RightAngle { inset: 3.0 });
        assert_eq!(shape.outline(card()), shape.outline(card()));
        assert_eq!(shape.silhouette(card()), shape.silhouette(card()));
    }
}
