//! Corner rounding and command emission for traced contours
use std::f64::consts::FRAC_PI_2;

use super::contour::{Contour, Direction, Vertex};
use super::{Arc, PathCommand, PathOptions};
use crate::models::{Point, QUIET_ZONE};

/// Maps module coordinates to output space: uniform scale, then offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Output units per module
    pub scale: f64,
    /// Output position of the symbol's top-left module corner
    pub origin: Point,
}

impl Placement {
    /// Fit a `symbol_size` symbol plus quiet zone into `width` x `height`, centered
    pub fn fit(symbol_size: usize, width: f64, height: f64) -> Self {
        let bordered = (symbol_size + 2 * QUIET_ZONE) as f64;
        let scale = width.min(height) / bordered;
        let margin = QUIET_ZONE as f64 * scale;
        Self {
            scale,
            origin: Point::new(
                (width - scale * bordered) / 2.0 + margin,
                (height - scale * bordered) / 2.0 + margin,
            ),
        }
    }

    fn map(&self, x: f64, y: f64) -> Point {
        Point::new(self.origin.x + x * self.scale, self.origin.y + y * self.scale)
    }

    /// `vertex` moved `distance` modules along `direction`
    fn along(&self, vertex: Vertex, direction: Direction, distance: f64) -> Point {
        self.map(
            vertex.0 as f64 + direction.dx as f64 * distance,
            vertex.1 as f64 + direction.dy as f64 * distance,
        )
    }
}

struct Corner {
    vertex: Vertex,
    incoming: Direction,
    outgoing: Direction,
    radius: f64,
    convex: bool,
}

impl Corner {
    /// Quarter circle tangent to both runs, `radius` modules from the vertex
    fn arc(&self, placement: &Placement) -> Arc {
        let r = self.radius;
        let center = placement.map(
            self.vertex.0 as f64 + (self.outgoing.dx - self.incoming.dx) as f64 * r,
            self.vertex.1 as f64 + (self.outgoing.dy - self.incoming.dy) as f64 * r,
        );
        let start_angle = self.outgoing.reverse().angle();
        let end_angle = if self.convex {
            start_angle + FRAC_PI_2
        } else {
            start_angle - FRAC_PI_2
        };
        Arc {
            center,
            radius: r * placement.scale,
            start_angle,
            end_angle,
            clockwise: self.convex,
        }
    }
}

/// Append one closed subpath: `MoveTo`, then `LineTo` + `ArcTo` per run, then `Close`
pub fn emit_contour(
    contour: &Contour,
    placement: &Placement,
    options: &PathOptions,
    out: &mut Vec<PathCommand>,
) {
    let n = contour.runs.len();
    if n == 0 {
        return;
    }

    let corners: Vec<Corner> = (0..n)
        .map(|k| {
            let run_in = &contour.runs[k];
            let run_out = &contour.runs[(k + 1) % n];
            let convex = contour.is_convex_corner(k);
            let wanted = if convex {
                options.corner_radius
            } else {
                options.concave_radius
            };
            let limit = run_in.length.min(run_out.length) as f64 / 2.0;
            Corner {
                vertex: run_in.end(),
                incoming: run_in.direction,
                outgoing: run_out.direction,
                radius: wanted.clamp(0.0, limit),
                convex,
            }
        })
        .collect();

    // The last corner's exit tangent is where the first run begins
    let last = &corners[n - 1];
    out.push(PathCommand::MoveTo(placement.along(
        last.vertex,
        last.outgoing,
        last.radius,
    )));
    for corner in &corners {
        out.push(PathCommand::LineTo(placement.along(
            corner.vertex,
            corner.incoming,
            -corner.radius,
        )));
        out.push(PathCommand::ArcTo(corner.arc(placement)));
    }
    out.push(PathCommand::Close);
}
