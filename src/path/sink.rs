//! Consumers of path commands
use super::{Arc, PathCommand};
use crate::models::Point;

/// Receives an outline one command at a time
pub trait PathSink {
    /// Start a new subpath at `p`
    fn move_to(&mut self, p: Point);
    /// Straight segment to `p`, which may equal the current point
    fn line_to(&mut self, p: Point);
    /// Arc from the current point to `arc.end_point()`
    fn arc_to(&mut self, arc: &Arc);
    /// Close the current subpath
    fn close(&mut self);
}

/// Feed `commands` into `sink` in order
pub fn replay<S: PathSink + ?Sized>(commands: &[PathCommand], sink: &mut S) {
    for command in commands {
        match command {
            PathCommand::MoveTo(p) => sink.move_to(*p),
            PathCommand::LineTo(p) => sink.line_to(*p),
            PathCommand::ArcTo(arc) => sink.arc_to(arc),
            PathCommand::Close => sink.close(),
        }
    }
}

/// Recording sink
impl PathSink for Vec<PathCommand> {
    fn move_to(&mut self, p: Point) {
        self.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(PathCommand::LineTo(p));
    }

    fn arc_to(&mut self, arc: &Arc) {
        self.push(PathCommand::ArcTo(*arc));
    }

    fn close(&mut self) {
        self.push(PathCommand::Close);
    }
}

/// Accumulates SVG path data (`d` attribute) with absolute commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgPathData {
    data: String,
    precision: usize,
}

impl Default for SvgPathData {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgPathData {
    /// Coordinates with up to three decimals
    pub fn new() -> Self {
        Self::with_precision(3)
    }

    /// Coordinates with up to `precision` decimals
    pub fn with_precision(precision: usize) -> Self {
        Self {
            data: String::new(),
            precision,
        }
    }

    /// Path data so far
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Consume the sink, returning the path data
    pub fn into_string(self) -> String {
        self.data
    }

    fn number(&self, value: f64) -> String {
        let text = format!("{:.*}", self.precision, value);
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.')
        } else {
            text.as_str()
        };
        match text {
            "-0" => "0".to_string(),
            other => other.to_string(),
        }
    }

    fn command(&mut self, letter: char, args: &[f64]) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(letter);
        for &arg in args {
            let formatted = self.number(arg);
            self.data.push(' ');
            self.data.push_str(&formatted);
        }
    }
}

impl PathSink for SvgPathData {
    fn move_to(&mut self, p: Point) {
        self.command('M', &[p.x, p.y]);
    }

    fn line_to(&mut self, p: Point) {
        self.command('L', &[p.x, p.y]);
    }

    fn arc_to(&mut self, arc: &Arc) {
        let end = arc.end_point();
        let sweep = if arc.clockwise { 1.0 } else { 0.0 };
        // Quarter arcs never need the large-arc flag
        self.command('A', &[arc.radius, arc.radius, 0.0, 0.0, sweep, end.x, end.y]);
    }

    fn close(&mut self) {
        self.command('Z', &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BitMatrix;
    use crate::path::{PathOptions, synthesize_matrix_path};

    fn single_module() -> Vec<PathCommand> {
        let mut matrix = BitMatrix::square(21);
        matrix.set(0, 0, true);
        synthesize_matrix_path(&matrix, 29.0, 29.0, &PathOptions::new(0.5, 0.25))
    }

    #[test]
    fn test_replay_into_recording_sink() {
        let commands = single_module();
        let mut recorded: Vec<PathCommand> = Vec::new();
        replay(&commands, &mut recorded);
        assert_eq!(recorded, commands);
    }

    #[test]
    fn test_svg_single_module() {
        let mut svg = SvgPathData::new();
        replay(&single_module(), &mut svg);
        assert_eq!(
            svg.as_str(),
            "M 4.5 4 L 4.5 4 A 0.5 0.5 0 0 1 5 4.5 L 5 4.5 A 0.5 0.5 0 0 1 4.5 5 \
             L 4.5 5 A 0.5 0.5 0 0 1 4 4.5 L 4 4.5 A 0.5 0.5 0 0 1 4.5 4 Z"
        );
    }

    #[test]
    fn test_svg_concave_sweep_flag() {
        let arc = Arc {
            center: Point::new(1.0, 1.0),
            radius: 0.25,
            start_angle: std::f64::consts::PI,
            end_angle: std::f64::consts::FRAC_PI_2,
            clockwise: false,
        };
        let mut svg = SvgPathData::with_precision(2);
        svg.arc_to(&arc);
        assert_eq!(svg.into_string(), "A 0.25 0.25 0 0 0 1 1.25");
    }

    #[test]
    fn test_number_trims_zeros() {
        let svg = SvgPathData::new();
        assert_eq!(svg.number(10.0), "10");
        assert_eq!(svg.number(2.50), "2.5");
        assert_eq!(svg.number(-0.0001), "0");
        assert_eq!(svg.number(1.23456), "1.235");
    }
}
