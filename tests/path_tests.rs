//! Rounded outline checks on encoded symbols

use std::f64::consts::PI;

use rounded_qr::{
    Builder, ECLevel, PathCommand, PathOptions, Point, SvgPathData, encode, replay,
    synthesize_path,
};

/// Split a command stream at each `MoveTo`
fn subpaths(commands: &[PathCommand]) -> Vec<&[PathCommand]> {
    let starts: Vec<usize> = commands
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, PathCommand::MoveTo(_)))
        .map(|(i, _)| i)
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let end = starts.get(k + 1).copied().unwrap_or(commands.len());
            &commands[start..end]
        })
        .collect()
}

/// Twice the signed area of a polygon through the `MoveTo`/`LineTo` points
fn doubled_area(subpath: &[PathCommand]) -> f64 {
    let points: Vec<Point> = subpath
        .iter()
        .filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    (0..points.len())
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

#[test]
fn test_subpath_structure() {
    let grid = encode(b"https://example.com", ECLevel::M).unwrap();
    let commands = synthesize_path(&grid, 512.0, 512.0, &PathOptions::default());

    for subpath in subpaths(&commands) {
        assert!(matches!(subpath[0], PathCommand::MoveTo(_)));
        assert_eq!(subpath.last(), Some(&PathCommand::Close));
        let body = &subpath[1..subpath.len() - 1];
        assert!(body.len() >= 8);
        // Strict LineTo, ArcTo alternation
        for pair in body.chunks(2) {
            assert!(matches!(pair[0], PathCommand::LineTo(_)));
            assert!(matches!(pair[1], PathCommand::ArcTo(_)));
        }
        // A simple rectilinear loop turns one full revolution
        let turn: i32 = body
            .iter()
            .filter_map(|c| match c {
                PathCommand::ArcTo(arc) => Some(if arc.clockwise { 1 } else { -1 }),
                _ => None,
            })
            .sum();
        assert_eq!(turn.abs(), 4);
    }
}

#[test]
fn test_finder_patterns_produce_holes() {
    let grid = encode(b"1", ECLevel::L).unwrap();
    let commands = synthesize_path(&grid, 290.0, 290.0, &PathOptions::default());
    let holes = subpaths(&commands)
        .into_iter()
        .filter(|s| doubled_area(s) < 0.0)
        .count();
    // At least the light ring of each finder
    assert!(holes >= 3, "found {holes} holes");
}

#[test]
fn test_sharp_outline_area_equals_dark_modules() {
    for (payload, level) in [(&b"AREA"[..], ECLevel::L), (&b"area check 2"[..], ECLevel::H)] {
        let grid = encode(payload, level).unwrap();
        let side = (grid.size() + 8) as f64;
        let commands = synthesize_path(&grid, side, side, &PathOptions::sharp());
        let area: f64 = subpaths(&commands).iter().map(|s| doubled_area(s)).sum::<f64>() / 2.0;
        assert!((area - grid.dark_count() as f64).abs() < 1e-6);
    }
}

#[test]
fn test_outline_stays_inside_symbol_area() {
    let grid = encode(b"bounds", ECLevel::Q).unwrap();
    let (width, height) = (400.0, 300.0);
    let commands = synthesize_path(&grid, width, height, &PathOptions::default());

    let scale = height / (grid.size() + 8) as f64;
    let left = (width - scale * (grid.size() + 8) as f64) / 2.0 + 4.0 * scale;
    let top = 4.0 * scale;
    let right = left + grid.size() as f64 * scale;
    let bottom = top + grid.size() as f64 * scale;
    let inside = |p: Point| {
        p.x >= left - 1e-9 && p.x <= right + 1e-9 && p.y >= top - 1e-9 && p.y <= bottom + 1e-9
    };

    for command in &commands {
        match command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => assert!(inside(*p)),
            PathCommand::ArcTo(arc) => {
                assert!(inside(arc.start_point()));
                assert!(inside(arc.end_point()));
                assert!(arc.radius <= 0.5 * scale + 1e-9);
            }
            PathCommand::Close => {}
        }
    }
}

#[test]
fn test_radii_follow_options() {
    let grid = encode(b"radii", ECLevel::M).unwrap();
    let side = (grid.size() + 8) as f64;
    let commands = synthesize_path(&grid, side, side, &PathOptions::new(0.4, 0.1));
    for command in &commands {
        if let PathCommand::ArcTo(arc) = command {
            let expected = if arc.clockwise { 0.4 } else { 0.1 };
            assert!((arc.radius - expected).abs() < 1e-9);
            let sweep = arc.end_angle - arc.start_angle;
            let signed = if arc.clockwise { PI / 2.0 } else { -PI / 2.0 };
            assert!((sweep - signed).abs() < 1e-12);
        }
    }
}

#[test]
fn test_scaling_invariance() {
    let grid = encode(b"scaling", ECLevel::L).unwrap();
    let options = PathOptions::default();
    let base = synthesize_path(&grid, 200.0, 200.0, &options);
    let wide = synthesize_path(&grid, 600.0, 200.0, &options);
    let big = synthesize_path(&grid, 500.0, 500.0, &options);
    assert_eq!(base.len(), wide.len());
    assert_eq!(base.len(), big.len());

    // A wider target only shifts the outline; a larger one scales it
    for ((a, w), b) in base.iter().zip(&wide).zip(&big) {
        if let (PathCommand::LineTo(a), PathCommand::LineTo(w), PathCommand::LineTo(b)) = (a, w, b)
        {
            assert!((a.translate(200.0, 0.0)).distance(w) < 1e-9);
            assert!((*a * 2.5).distance(b) < 1e-9);
        }
    }
}

#[test]
fn test_svg_matches_command_count() {
    let qr = Builder::text("svg").size(128.0, 128.0).build().unwrap();
    let mut svg = SvgPathData::new();
    replay(&qr.commands, &mut svg);
    let letters = svg
        .as_str()
        .split(' ')
        .filter(|token| matches!(*token, "M" | "L" | "A" | "Z"))
        .count();
    assert_eq!(letters, qr.commands.len());
}
