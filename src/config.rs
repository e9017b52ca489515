use std::sync::OnceLock;

/// Convex corner radius used when `RQR_CORNER_RADIUS` is not set, in modules
pub const DEFAULT_CORNER_RADIUS: f64 = 0.5;
/// Concave corner radius used when `RQR_CONCAVE_RADIUS` is not set, in modules
pub const DEFAULT_CONCAVE_RADIUS: f64 = 0.25;

fn parse_env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Clamp a radius fraction to 0..=0.5; NaN becomes 0
pub(crate) fn clamp_radius(radius: f64) -> f64 {
    if radius.is_nan() {
        0.0
    } else {
        radius.clamp(0.0, 0.5)
    }
}

static CORNER_RADIUS: OnceLock<f64> = OnceLock::new();

pub(crate) fn corner_radius() -> f64 {
    *CORNER_RADIUS
        .get_or_init(|| clamp_radius(parse_env_f64("RQR_CORNER_RADIUS", DEFAULT_CORNER_RADIUS)))
}

static CONCAVE_RADIUS: OnceLock<f64> = OnceLock::new();

pub(crate) fn concave_radius() -> f64 {
    *CONCAVE_RADIUS.get_or_init(|| {
        clamp_radius(parse_env_f64("RQR_CONCAVE_RADIUS", DEFAULT_CONCAVE_RADIUS))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_fallback() {
        assert_eq!(parse_env_f64("RQR_TEST_UNSET_VARIABLE", 0.3), 0.3);
    }

    #[test]
    fn test_clamp_radius() {
        assert_eq!(clamp_radius(0.3), 0.3);
        assert_eq!(clamp_radius(-1.0), 0.0);
        assert_eq!(clamp_radius(f64::INFINITY), 0.5);
        assert_eq!(clamp_radius(f64::NAN), 0.0);
    }

    #[test]
    fn test_defaults_in_range() {
        assert!((0.0..=0.5).contains(&corner_radius()));
        assert!((0.0..=0.5).contains(&concave_radius()));
    }
}
