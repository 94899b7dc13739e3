//! Scalar solvers shared by the drop models.
//!
//! Both solvers take their tolerances and iteration caps explicitly so a
//! caller can tighten or relax them without touching the physics.

use crate::errors::SimulationError;

/// Result of a converged scalar solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub value: f64,
    pub iterations: usize,
}

/// Brent's method on a bracket `[lower, upper]` whose end values differ in sign.
///
/// Stops once the bracket half-width drops below `(xtol + rtol·|x|) / 2`.
/// A bracket without a sign change is a [`SimulationError::DomainError`];
/// running out of iterations is a [`SimulationError::NonConvergence`].
pub fn brent_root_find<F>(
    f: F,
    lower: f64,
    upper: f64,
    xtol: f64,
    rtol: f64,
    max_iterations: usize,
) -> Result<Solution, SimulationError>
where
    F: Fn(f64) -> f64,
{
    let mut x_pre = lower;
    let mut x_cur = upper;
    let mut f_pre = f(x_pre);
    let mut f_cur = f(x_cur);

    if f_pre.is_nan() || f_cur.is_nan() {
        return Err(SimulationError::DomainError(format!(
            "Root function is undefined on the bracket: f({}) = {}, f({}) = {}",
            lower, f_pre, upper, f_cur
        )));
    }
    if f_pre == 0.0 {
        return Ok(Solution {
            value: x_pre,
            iterations: 0,
        });
    }
    if f_cur == 0.0 {
        return Ok(Solution {
            value: x_cur,
            iterations: 0,
        });
    }
    if f_pre.signum() == f_cur.signum() {
        return Err(SimulationError::DomainError(format!(
            "Root not bracketed: f({}) = {}, f({}) = {}",
            lower, f_pre, upper, f_cur
        )));
    }

    let mut x_blk = 0.0;
    let mut f_blk = 0.0;
    let mut s_pre = 0.0;
    let mut s_cur = 0.0;

    for iteration in 1..=max_iterations {
        if f_pre != 0.0 && f_cur != 0.0 && f_pre.signum() != f_cur.signum() {
            x_blk = x_pre;
            f_blk = f_pre;
            s_pre = x_cur - x_pre;
            s_cur = s_pre;
        }
        if f_blk.abs() < f_cur.abs() {
            x_pre = x_cur;
            x_cur = x_blk;
            x_blk = x_pre;

            f_pre = f_cur;
            f_cur = f_blk;
            f_blk = f_pre;
        }

        let delta = (xtol + rtol * x_cur.abs()) / 2.0;
        let s_bis = (x_blk - x_cur) / 2.0;
        if f_cur == 0.0 || s_bis.abs() < delta {
            return Ok(Solution {
                value: x_cur,
                iterations: iteration,
            });
        }

        if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
            let s_try = if x_pre == x_blk {
                // secant
                -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
            } else {
                // inverse quadratic
                let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
            };

            if 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                s_pre = s_cur;
                s_cur = s_try;
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }
        } else {
            s_pre = s_bis;
            s_cur = s_bis;
        }

        x_pre = x_cur;
        f_pre = f_cur;
        if s_cur.abs() > delta {
            x_cur += s_cur;
        } else if s_bis > 0.0 {
            x_cur += delta;
        } else {
            x_cur -= delta;
        }

        f_cur = f(x_cur);
        if f_cur.is_nan() {
            return Err(SimulationError::DomainError(format!(
                "Root function is undefined at x = {}",
                x_cur
            )));
        }
    }

    Err(SimulationError::NonConvergence(format!(
        "Brent's method did not converge in {} iterations (last x = {})",
        max_iterations, x_cur
    )))
}

/// Fixed point `x = g(x)` by iteration with Aitken's Δ² acceleration
/// (Steffensen's method).
///
/// Converges when the relative change between accelerated iterates is below
/// `rtol`. Errors raised by `g` are propagated unchanged.
pub fn fixed_point<G>(
    g: G,
    initial_guess: f64,
    rtol: f64,
    max_iterations: usize,
) -> Result<Solution, SimulationError>
where
    G: Fn(f64) -> Result<f64, SimulationError>,
{
    let mut p0 = initial_guess;

    for iteration in 1..=max_iterations {
        let p1 = g(p0)?;
        let p2 = g(p1)?;
        let denominator = p2 - 2.0 * p1 + p0;
        let p = if denominator != 0.0 {
            p0 - (p1 - p0).powi(2) / denominator
        } else {
            p2
        };

        if !p.is_finite() {
            return Err(SimulationError::NonConvergence(format!(
                "Fixed-point iterate diverged to {} after {} iterations",
                p, iteration
            )));
        }

        let relative_error = if p0 != 0.0 {
            ((p - p0) / p0).abs()
        } else {
            p.abs()
        };
        if relative_error < rtol {
            return Ok(Solution {
                value: p,
                iterations: iteration,
            });
        }
        p0 = p;
    }

    Err(SimulationError::NonConvergence(format!(
        "Fixed-point iteration did not converge in {} iterations (last value = {})",
        max_iterations, p0
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_brent_finds_square_root() {
        let root = brent_root_find(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 4.0 * f64::EPSILON, 100)
            .expect("bracket contains sqrt(2)");

        assert_abs_diff_eq!(root.value, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(root.iterations < 20);
    }

    #[test]
    fn test_brent_accepts_reversed_sign() {
        let root = brent_root_find(|x| 1.0 - x.powi(3), 0.0, 3.0, 1e-12, 0.0, 100).unwrap();
        assert_abs_diff_eq!(root.value, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_brent_endpoint_root() {
        let root = brent_root_find(|x| x - 1.0, 1.0, 2.0, 1e-12, 0.0, 100).unwrap();
        assert_eq!(root.value, 1.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn test_brent_rejects_unbracketed() {
        let result = brent_root_find(|x| x * x + 1.0, -1.0, 1.0, 1e-12, 0.0, 100);
        assert!(matches!(result, Err(SimulationError::DomainError(_))));
    }

    #[test]
    fn test_brent_reports_exhausted_budget() {
        let result = brent_root_find(|x| x.powi(3) - 0.3, 0.0, 1.0, 1e-15, 0.0, 2);
        assert!(matches!(result, Err(SimulationError::NonConvergence(_))));
    }

    #[test]
    fn test_fixed_point_cosine() {
        let solution = fixed_point(|x| Ok(x.cos()), 1.0, 1e-12, 100).unwrap();
        assert_abs_diff_eq!(solution.value, 0.739_085_133_215_160_6, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_point_square_root_map() {
        // x = 3·sqrt(x) has the fixed point 9
        let solution = fixed_point(|x: f64| Ok(3.0 * x.abs().sqrt()), 1e-3, 1e-10, 500).unwrap();
        assert_abs_diff_eq!(solution.value, 9.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_point_reports_exhausted_budget() {
        let result = fixed_point(|x: f64| Ok(3.0 * x.abs().sqrt()), 1e-3, 1e-14, 1);
        assert!(matches!(result, Err(SimulationError::NonConvergence(_))));
    }

    #[test]
    fn test_fixed_point_propagates_map_errors() {
        let result = fixed_point(
            |_| Err(SimulationError::Singularity("boom".to_string())),
            1.0,
            1e-8,
            10,
        );
        assert!(matches!(result, Err(SimulationError::Singularity(_))));
    }
}
