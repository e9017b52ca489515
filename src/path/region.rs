//! 4-connected dark regions of a module matrix
use crate::models::BitMatrix;

/// Union-Find data structure
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    /// Root of `x`, halving the path on the way up
    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x as usize] = root_y;
        }
    }
}

/// Maximal set of edge-adjacent dark modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Member modules as (x, y), row-major
    pub modules: Vec<(usize, usize)>,
}

impl Region {
    /// Top-most, then left-most module
    pub fn first(&self) -> Option<(usize, usize)> {
        self.modules.first().copied()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Label dark modules into 4-connected regions.
///
/// Regions are ordered by their first module in row-major order; diagonal
/// neighbours only join when an edge-adjacent path links them.
pub fn find_regions(matrix: &BitMatrix) -> Vec<Region> {
    let width = matrix.width();
    let height = matrix.height();
    let mut uf = UnionFind::new(width * height);

    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }
            let idx = (y * width + x) as u32;
            if x > 0 && matrix.get(x - 1, y) {
                uf.union(idx - 1, idx);
            }
            if y > 0 && matrix.get(x, y - 1) {
                uf.union(idx - width as u32, idx);
            }
        }
    }

    let mut region_of_root: Vec<Option<usize>> = vec![None; width * height];
    let mut regions: Vec<Region> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }
            let root = uf.find((y * width + x) as u32) as usize;
            let slot = *region_of_root[root].get_or_insert_with(|| {
                regions.push(Region {
                    modules: Vec::new(),
                });
                regions.len() - 1
            });
            regions[slot].modules.push((x, y));
        }
    }
    regions
}
