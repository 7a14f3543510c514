//! Conversion between ticket paths and SVG path data

use std::f32::consts::FRAC_PI_2;

use ticket_core::{arc_sweep, point_on_circle, Angle, Path, PathCommand, Point, POINT_EPSILON};

/// Format a coordinate with at most three decimals, trailing zeros trimmed
pub(crate) fn num(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

fn point(p: Point) -> String {
    format!("{} {}", num(p.x), num(p.y))
}

/// SVG `d` attribute for `path`
///
/// Arcs become elliptical-arc commands of at most a quarter turn each.
/// Clockwise arcs run towards decreasing angles, which is SVG's
/// `sweep-flag = 0` in a y-down coordinate system.
pub fn path_data(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(path.commands().len());
    let mut current: Option<Point> = None;
    let mut subpath_start: Option<Point> = None;

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => {
                parts.push(format!("M{}", point(*p)));
                current = Some(*p);
                subpath_start = Some(*p);
            }
            PathCommand::LineTo(p) => {
                parts.push(format!("L{}", point(*p)));
                current = Some(*p);
            }
            PathCommand::QuadTo { control, end } => {
                parts.push(format!("Q{} {}", point(*control), point(*end)));
                current = Some(*end);
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                parts.push(format!(
                    "C{} {} {}",
                    point(*control1),
                    point(*control2),
                    point(*end)
                ));
                current = Some(*end);
            }
            PathCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                clockwise,
            } => {
                let start = point_on_circle(*center, *radius, *start_angle);
                match current {
                    None => {
                        parts.push(format!("M{}", point(start)));
                        subpath_start = Some(start);
                    }
                    Some(p) if !p.approx_eq(start, POINT_EPSILON) => {
                        parts.push(format!("L{}", point(start)));
                    }
                    Some(_) => {}
                }

                let sweep = arc_sweep(*start_angle, *end_angle, *clockwise).to_radians();
                let pieces = ((sweep.abs() / FRAC_PI_2 - 1e-4).ceil() as usize).max(1);
                let step = sweep / pieces as f32;
                let sweep_flag = if *clockwise { 0 } else { 1 };
                let mut end = start;
                for i in 1..=pieces {
                    let angle = *start_angle + Angle::radians(step * i as f32);
                    end = point_on_circle(*center, *radius, angle);
                    parts.push(format!(
                        "A{r} {r} 0 0 {sweep_flag} {}",
                        point(end),
                        r = num(*radius)
                    ));
                }
                current = Some(end);
            }
            PathCommand::Close => {
                parts.push("Z".to_string());
                current = subpath_start;
            }
        }
    }

    parts.join(" ")
}

/// Convert usvg path data to a ticket path
pub fn from_usvg(path_data: &usvg::tiny_skia_path::Path) -> Path {
    use usvg::tiny_skia_path::PathSegment;

    let commands = path_data
        .segments()
        .map(|segment| match segment {
            PathSegment::MoveTo(p) => PathCommand::MoveTo(Point::new(p.x, p.y)),
            PathSegment::LineTo(p) => PathCommand::LineTo(Point::new(p.x, p.y)),
            PathSegment::QuadTo(c, e) => PathCommand::QuadTo {
                control: Point::new(c.x, c.y),
                end: Point::new(e.x, e.y),
            },
            PathSegment::CubicTo(c1, c2, e) => PathCommand::CubicTo {
                control1: Point::new(c1.x, c1.y),
                control2: Point::new(c2.x, c2.y),
                end: Point::new(e.x, e.y),
            },
            PathSegment::Close => PathCommand::Close,
        })
        .collect();

    Path::from_commands(commands)
}
