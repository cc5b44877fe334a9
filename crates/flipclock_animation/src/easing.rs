//! Easing curves

/// Progress-to-progress mapping applied to animation time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Material emphasized curve used by the digit flip: `cubic-bezier(.2, 0, 0, 1)`
    pub const EMPHASIZED: Easing = Easing::CubicBezier(0.2, 0.0, 0.0, 1.0);

    /// CSS `ease`
    pub const CSS_EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);

    /// CSS `ease-out`
    pub const CSS_EASE_OUT: Easing = Easing::CubicBezier(0.0, 0.0, 0.58, 1.0);

    /// Map linear progress in `[0, 1]` to eased progress. Input is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Polynomial coefficients of one curve axis with endpoints fixed at 0 and 1
#[derive(Clone, Copy)]
struct Axis {
    a: f64,
    b: f64,
    c: f64,
}

impl Axis {
    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (p1 as f64, p2 as f64);
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn at(&self, u: f64) -> f64 {
        ((self.a * u + self.b) * u + self.c) * u
    }

    fn derivative(&self, u: f64) -> f64 {
        (3.0 * self.a * u + 2.0 * self.b) * u + self.c
    }
}

const EPSILON: f64 = 1e-7;

/// CSS `cubic-bezier(x1, y1, x2, y2)` evaluated at input progress `t`.
///
/// Solves x(u) = t for the curve parameter with Newton steps, falling back to
/// bisection where the curve is too flat, then returns y(u). Runs in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (x, y) = (Axis::new(x1, x2), Axis::new(y1, y2));
    y.at(solve_parameter(&x, t as f64)) as f32
}

fn solve_parameter(x: &Axis, target: f64) -> f64 {
    let mut u = target;
    for _ in 0..8 {
        let err = x.at(u) - target;
        if err.abs() < EPSILON {
            return u;
        }
        let d = x.derivative(u);
        if d.abs() < EPSILON {
            break;
        }
        u = (u - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    u = target;
    for _ in 0..24 {
        let err = x.at(u) - target;
        if err.abs() < EPSILON {
            break;
        }
        if err < 0.0 {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }
    u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::CSS_EASE_OUT, Easing::EMPHASIZED] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::EMPHASIZED.apply(3.0), 1.0);
    }

    #[test]
    fn test_emphasized_front_loads_motion() {
        // (.2, 0, 0, 1) races ahead of linear early on
        let mid = Easing::EMPHASIZED.apply(0.5);
        assert!(mid > 0.8, "got {mid}");
    }

    #[test]
    fn test_bezier_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let v = Easing::CSS_EASE_OUT.apply(i as f32 / 100.0);
            assert!(v >= last - 1e-5);
            last = v;
        }
    }
}
