//! Rounded outline synthesis
//!
//! Turns the dark modules of a grid into closed subpaths:
//! - Union-find labelling of 4-connected dark regions
//! - Boundary tracing into straight runs (outer loops and holes)
//! - Corner rounding with separate convex and concave radii
//! - Uniform scaling into the target rectangle, quiet zone included

/// Boundary loops of a region
pub mod contour;
/// 4-connected dark regions
pub mod region;
/// Corner arcs and command emission
pub mod rounding;
/// Command consumers
pub mod sink;

use log::debug;

use crate::config;
use crate::models::{BitMatrix, ModuleGrid, Point, Size};
use contour::trace_region;
use region::find_regions;
use rounding::{Placement, emit_contour};

/// Circular arc of a rounded corner, in output coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Circle center
    pub center: Point,
    /// Radius in output units
    pub radius: f64,
    /// Angle of the first point, radians, 0 along +x, y down
    pub start_angle: f64,
    /// Angle of the last point
    pub end_angle: f64,
    /// True when the angle increases from start to end
    pub clockwise: bool,
}

impl Arc {
    fn point_at(&self, angle: f64) -> Point {
        self.center
            .translate(self.radius * angle.cos(), self.radius * angle.sin())
    }

    /// Where the arc begins
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// Where the arc ends
    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }
}

/// One drawing instruction of the outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath
    MoveTo(Point),
    /// Straight segment from the current point.
    ///
    /// Zero-length when the corner arcs on either side use up the whole edge,
    /// e.g. along a single module with the full 0.5 radius.
    LineTo(Point),
    /// Arc starting at the current point
    ArcTo(Arc),
    /// Close the current subpath
    Close,
}

/// Corner radii as fractions of a module
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    /// Radius at corners that bulge out of the dark area
    pub corner_radius: f64,
    /// Radius at corners that cut into the dark area
    pub concave_radius: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            corner_radius: config::corner_radius(),
            concave_radius: config::concave_radius(),
        }
    }
}

impl PathOptions {
    /// Radii clamped to 0..=0.5; NaN becomes 0
    pub fn new(corner_radius: f64, concave_radius: f64) -> Self {
        Self {
            corner_radius: config::clamp_radius(corner_radius),
            concave_radius: config::clamp_radius(concave_radius),
        }
    }

    /// Square corners
    pub fn sharp() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Rounded outline of `grid`, fitted into `width` x `height`
pub fn synthesize_path(
    grid: &ModuleGrid,
    width: f64,
    height: f64,
    options: &PathOptions,
) -> Vec<PathCommand> {
    synthesize_matrix_path(grid.matrix(), width, height, options)
}

/// Rounded outline of a square matrix (true = dark) with a quiet zone around it
pub fn synthesize_matrix_path(
    matrix: &BitMatrix,
    width: f64,
    height: f64,
    options: &PathOptions,
) -> Vec<PathCommand> {
    if Size::new(width, height).is_degenerate() {
        return Vec::new();
    }
    let placement = Placement::fit(matrix.width().max(matrix.height()), width, height);
    let options = PathOptions::new(options.corner_radius, options.concave_radius);

    let regions = find_regions(matrix);
    let mut commands = Vec::new();
    let mut loops = 0usize;
    for region in &regions {
        for contour in trace_region(matrix, region) {
            emit_contour(&contour, &placement, &options, &mut commands);
            loops += 1;
        }
    }
    debug!(
        "path: {} regions, {} loops, {} commands, scale {:.3}",
        regions.len(),
        loops,
        commands.len(),
        placement.scale
    );
    commands
}
