//! Cubic-bezier easing with implicit endpoints (0,0) and (1,1).

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_TOLERANCE: f64 = 1e-6;
const MIN_SLOPE: f64 = 1e-6;
const BISECTION_ITERATIONS: usize = 40;
const BISECTION_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Applied when a zoom region begins.
pub const EASE_IN: CubicBezier = CubicBezier::new(0.1, 0.0, 0.3, 1.0);
/// Applied when returning to the unzoomed frame.
pub const EASE_OUT: CubicBezier = CubicBezier::new(0.5, 0.0, 0.5, 1.0);

/// Polynomial form `((a*t + b)*t + c)*t` of one bezier axis.
#[derive(Debug, Clone, Copy)]
struct Axis {
    a: f64,
    b: f64,
    c: f64,
}

impl Axis {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    fn sample(self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

/// Maps a progress fraction to the eased output of `curve`.
///
/// Input is clamped to `[0, 1]`; the output is always finite and inside `[0, 1]`.
pub fn evaluate(curve: &CubicBezier, progress: f64) -> f64 {
    if progress.is_nan() || progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let x_axis = Axis::new(curve.x1, curve.x2);
    let y_axis = Axis::new(curve.y1, curve.y2);
    let t = solve_t_for_x(x_axis, progress);
    let eased = y_axis.sample(t);

    if eased.is_nan() {
        // Nearest boundary of the input.
        return if progress < 0.5 { 0.0 } else { 1.0 };
    }
    eased.clamp(0.0, 1.0)
}

fn solve_t_for_x(x_axis: Axis, x: f64) -> f64 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let error = x_axis.sample(t) - x;
        if error.abs() < NEWTON_TOLERANCE {
            return t;
        }
        let slope = x_axis.slope(t);
        if !slope.is_finite() || slope.abs() < MIN_SLOPE {
            break;
        }
        t -= error / slope;
        if !(0.0..=1.0).contains(&t) {
            break;
        }
    }

    bisect_t_for_x(x_axis, x)
}

fn bisect_t_for_x(x_axis: Axis, x: f64) -> f64 {
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut t = x;
    for _ in 0..BISECTION_ITERATIONS {
        let sample = x_axis.sample(t);
        if (sample - x).abs() < BISECTION_TOLERANCE {
            return t;
        }
        if sample < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn endpoints_are_exact() {
        for curve in [EASE_IN, EASE_OUT] {
            assert_eq!(evaluate(&curve, 0.0), 0.0);
            assert_eq!(evaluate(&curve, 1.0), 1.0);
            assert_eq!(evaluate(&curve, -3.0), 0.0);
            assert_eq!(evaluate(&curve, 42.0), 1.0);
        }
    }

    #[test]
    fn named_curves_are_monotonic() {
        for curve in [EASE_IN, EASE_OUT] {
            let mut previous = 0.0;
            for step in 0..=400 {
                let value = evaluate(&curve, step as f64 / 400.0);
                assert!(value + 1e-9 >= previous, "{curve:?} dipped at step {step}");
                assert!((0.0..=1.0).contains(&value));
                previous = value;
            }
        }
    }

    #[test]
    fn symmetric_curve_passes_through_midpoint() {
        assert!(approx_eq(evaluate(&EASE_OUT, 0.5), 0.5));
    }

    #[test]
    fn linear_control_points_are_identity() {
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for step in 1..10 {
            let x = step as f64 / 10.0;
            assert!(approx_eq(evaluate(&linear, x), x));
        }
    }

    #[test]
    fn ease_in_front_loads_progress() {
        // Steep start: most of the motion happens in the first half.
        assert!(evaluate(&EASE_IN, 0.5) > 0.75);
    }

    #[test]
    fn flat_start_falls_back_to_bisection() {
        // x'(0) == 0 forces the bisection path near the origin.
        let curve = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        let value = evaluate(&curve, 0.001);
        assert!(value.is_finite());
        assert!((0.0..=1.0).contains(&value));
        assert!(approx_eq(evaluate(&curve, 0.5), 0.5));
    }

    #[test]
    fn nan_progress_collapses_to_start() {
        assert_eq!(evaluate(&EASE_IN, f64::NAN), 0.0);
    }
}
