//! Small numeric helpers.

use serde::{Deserialize, Serialize};

/// A complex number with a real and an imaginary part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn is_real(self) -> bool {
        self.im == 0.0
    }
}

/// Roots of `a*x^2 + b*x + c = 0`, lowest real part first.
///
/// A degenerate linear equation yields a single root, `a == b == 0` none.
/// Complex conjugate roots come ordered by imaginary part.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<Complex> {
    if a == 0.0 {
        if b != 0.0 {
            return vec![Complex::real(-c / b)];
        }
        return Vec::new();
    }
    // Normalize to a positive leading coefficient so the smallest root
    // comes first.
    let (a, b, c) = if a < 0.0 { (-a, -b, -c) } else { (a, b, c) };
    let delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        let delta_sqrt = (-delta).sqrt();
        vec![
            Complex::new(-b / (2.0 * a), -delta_sqrt / (2.0 * a)),
            Complex::new(-b / (2.0 * a), delta_sqrt / (2.0 * a)),
        ]
    } else if delta > 0.0 {
        let delta_sqrt = delta.sqrt();
        vec![
            Complex::real((-b - delta_sqrt) / (2.0 * a)),
            Complex::real((-b + delta_sqrt) / (2.0 * a)),
        ]
    } else {
        vec![Complex::real(-b / (2.0 * a))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_solutions() {
        assert_eq!(solve_quadratic(1.0, -2.0, 1.0), vec![Complex::real(1.0)]);
        assert_eq!(solve_quadratic(0.0, 1.0, 2.0), vec![Complex::real(-2.0)]);
        // (x - 2) * (x - 1) = x^2 - 3x + 2
        assert_eq!(
            solve_quadratic(1.0, -3.0, 2.0),
            vec![Complex::real(1.0), Complex::real(2.0)]
        );
        assert_eq!(
            solve_quadratic(-1.0, 3.0, -2.0),
            vec![Complex::real(1.0), Complex::real(2.0)]
        );
    }

    #[test]
    fn imaginary_solutions() {
        assert_eq!(
            solve_quadratic(1.0, 2.0, 2.0),
            vec![Complex::new(-1.0, -1.0), Complex::new(-1.0, 1.0)]
        );
        assert_eq!(
            solve_quadratic(-1.0, -2.0, -2.0),
            vec![Complex::new(-1.0, -1.0), Complex::new(-1.0, 1.0)]
        );
    }

    #[test]
    fn no_solutions() {
        assert!(solve_quadratic(0.0, 0.0, 3.0).is_empty());
    }
}
