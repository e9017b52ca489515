//! Data masking and the four penalty rules used to pick a mask
use super::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// XOR the mask pattern into every data module.
///
/// Applying the same mask twice restores the original matrix, so this also unmasks.
pub fn apply_mask(matrix: &mut BitMatrix, mask: MaskPattern, func: &FunctionMask) {
    let size = func.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Total penalty of a finished (masked, format drawn) symbol; lower is better
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;

    for y in 0..size {
        score += line_penalty(size, |i| matrix.get(i, y));
    }
    for x in 0..size {
        score += line_penalty(size, |i| matrix.get(x, i));
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                score += PENALTY_N2;
            }
        }
    }

    let total = size * size;
    if total > 0 {
        let dark = matrix.count_ones();
        // Smallest k with (45 - 5k)% <= dark share <= (55 + 5k)%
        let k = ((dark * 20).abs_diff(total * 10) + total - 1) / total;
        score += k.saturating_sub(1) as u32 * PENALTY_N4;
    }
    score
}

/// Same-color runs (N1) and finder-like patterns (N3) along one row or column
fn line_penalty(size: usize, get: impl Fn(usize) -> bool) -> u32 {
    let mut score = 0;
    let mut run_color = false;
    let mut run_len = 0;
    let mut history = RunHistory::new(size);

    for i in 0..size {
        let color = get(i);
        if color == run_color {
            run_len += 1;
            if run_len == 5 {
                score += PENALTY_N1;
            } else if run_len > 5 {
                score += 1;
            }
        } else {
            history.push(run_len);
            if !run_color {
                score += history.finder_like_count() * PENALTY_N3;
            }
            run_color = color;
            run_len = 1;
        }
    }
    score + history.terminate(run_color, run_len) * PENALTY_N3
}

/// Lengths of the last seven runs, newest first, with the light border counted in
struct RunHistory {
    size: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { size, runs: [0; 7] }
    }

    fn push(&mut self, mut len: usize) {
        if self.runs[0] == 0 {
            // First run borders the quiet zone
            len += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = len;
    }

    /// Dark-light-dark(3)-light-dark run ending at `runs[1]`, with 4 light modules on either side
    fn finder_like_count(&self) -> u32 {
        let n = self.runs[1];
        let core = n > 0
            && self.runs[2] == n
            && self.runs[3] == n * 3
            && self.runs[4] == n
            && self.runs[5] == n;
        let before = core && self.runs[0] >= n * 4 && self.runs[6] >= n;
        let after = core && self.runs[6] >= n * 4 && self.runs[0] >= n;
        u32::from(before) + u32::from(after)
    }

    /// Close the line against the light border and count the final pattern
    fn terminate(&mut self, run_color: bool, mut run_len: usize) -> u32 {
        if run_color {
            self.push(run_len);
            run_len = 0;
        }
        self.push(run_len + self.size);
        self.finder_like_count()
    }
}
