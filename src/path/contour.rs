//! Boundary loops of dark regions
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use super::region::Region;
use crate::models::BitMatrix;

/// Grid vertex; (0, 0) is the top-left corner of module (0, 0)
pub type Vertex = (isize, isize);

/// Unit heading on a y-down grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: isize,
    pub dy: isize,
}

impl Direction {
    pub const EAST: Direction = Direction { dx: 1, dy: 0 };
    pub const SOUTH: Direction = Direction { dx: 0, dy: 1 };
    pub const WEST: Direction = Direction { dx: -1, dy: 0 };
    pub const NORTH: Direction = Direction { dx: 0, dy: -1 };

    /// Clockwise quarter turn on screen
    pub fn turn_right(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    pub fn turn_left(self) -> Self {
        Self {
            dx: self.dy,
            dy: -self.dx,
        }
    }

    pub fn reverse(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    /// Angle in radians with +x at 0 and +y (down) at pi/2
    pub fn angle(self) -> f64 {
        match (self.dx, self.dy) {
            (1, 0) => 0.0,
            (0, 1) => FRAC_PI_2,
            (-1, 0) => PI,
            _ => 3.0 * FRAC_PI_2,
        }
    }

    fn step(self, from: Vertex, len: usize) -> Vertex {
        let len = len as isize;
        (from.0 + self.dx * len, from.1 + self.dy * len)
    }
}

/// Straight stretch of boundary between two corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: Vertex,
    pub direction: Direction,
    pub length: usize,
}

impl Run {
    pub fn end(&self) -> Vertex {
        self.direction.step(self.start, self.length)
    }
}

/// Closed boundary with dark modules on the right of travel.
///
/// Outer boundaries run clockwise on screen, hole boundaries counter-clockwise.
/// The corner between `runs[k]` and `runs[k + 1]` sits at `runs[k].end()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub runs: Vec<Run>,
}

impl Contour {
    /// True if the corner after run `k` turns right, i.e. bulges out of the dark area
    pub fn is_convex_corner(&self, k: usize) -> bool {
        let next = &self.runs[(k + 1) % self.runs.len()];
        next.direction == self.runs[k].direction.turn_right()
    }

    /// Merge collinear unit edges, starting at the first corner
    fn from_edges(edges: &[(Vertex, Direction)]) -> Self {
        let n = edges.len();
        let first_corner = (0..n)
            .find(|&i| edges[i].1 != edges[(i + n - 1) % n].1)
            .unwrap_or(0);

        let mut runs: Vec<Run> = Vec::new();
        for i in 0..n {
            let (from, direction) = edges[(first_corner + i) % n];
            match runs.last_mut() {
                Some(run) if run.direction == direction => run.length += 1,
                _ => runs.push(Run {
                    start: from,
                    direction,
                    length: 1,
                }),
            }
        }
        Self { runs }
    }
}

/// Trace every boundary loop of a region: the outer one first, then holes.
///
/// At a vertex shared by two diagonal modules the right-most turn is taken,
/// so dark modules touching only at a corner are rounded apart instead of joined.
pub fn trace_region(matrix: &BitMatrix, region: &Region) -> Vec<Contour> {
    let mut edges: Vec<(Vertex, Direction)> = Vec::with_capacity(region.len() * 4);
    for &(x, y) in &region.modules {
        let (xi, yi) = (x as isize, y as isize);
        if y == 0 || !matrix.get(x, y - 1) {
            edges.push(((xi, yi), Direction::EAST));
        }
        if !matrix.get(x + 1, y) {
            edges.push(((xi + 1, yi), Direction::SOUTH));
        }
        if !matrix.get(x, y + 1) {
            edges.push(((xi + 1, yi + 1), Direction::WEST));
        }
        if x == 0 || !matrix.get(x - 1, y) {
            edges.push(((xi, yi + 1), Direction::NORTH));
        }
    }

    let mut outgoing: HashMap<Vertex, Vec<usize>> = HashMap::with_capacity(edges.len());
    for (i, &(from, _)) in edges.iter().enumerate() {
        outgoing.entry(from).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut contours = Vec::new();
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        let mut loop_edges = Vec::new();
        let mut current = start;
        loop {
            used[current] = true;
            loop_edges.push(edges[current]);

            let (from, heading) = edges[current];
            let next = outgoing.get(&heading.step(from, 1)).and_then(|candidates| {
                [heading.turn_right(), heading, heading.turn_left()]
                    .into_iter()
                    .find_map(|dir| candidates.iter().copied().find(|&c| edges[c].1 == dir))
            });
            match next {
                Some(next) if !used[next] => current = next,
                _ => break,
            }
        }
        contours.push(Contour::from_edges(&loop_edges));
    }
    contours
}
