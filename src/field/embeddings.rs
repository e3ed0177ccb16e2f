// src/field/embeddings.rs
//
// Numeric embeddings of a number field: closed forms for degrees 1 and 2,
// Aberth–Ehrlich simultaneous iteration above that.

use log::debug;
use num::complex::Complex;

use crate::polynomial::RationalPoly;

pub const ABERTH_MAX_ITERATIONS: u32 = 200;
pub const ABERTH_TOLERANCE: f64 = 1e-14;

/// Roots with |Im| below this are snapped onto the real axis.
pub const REAL_SNAP_EPSILON: f64 = 1e-8;

/// All complex roots of the polynomial, sorted by (re, im). Real roots
/// come out with an exactly zero imaginary part.
pub fn numeric_roots(poly: &RationalPoly) -> Vec<Complex<f64>> {
    numeric_roots_with_cap(poly, ABERTH_MAX_ITERATIONS)
}

pub fn numeric_roots_with_cap(poly: &RationalPoly, max_iterations: u32) -> Vec<Complex<f64>> {
    let degree = match poly.degree() {
        None | Some(0) => return Vec::new(),
        Some(d) => d,
    };

    let mut roots = match degree {
        1 => {
            let c0 = poly.coeff(0).to_f64();
            let c1 = poly.coeff(1).to_f64();
            vec![Complex::new(-c0 / c1, 0.0)]
        }
        2 => quadratic_roots(poly),
        _ => aberth(poly, max_iterations),
    };

    for root in &mut roots {
        if root.im.abs() < REAL_SNAP_EPSILON {
            root.im = 0.0;
        }
    }
    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    roots
}

/// Signature (r, s): real embeddings and conjugate pairs, from the
/// snapped root list.
pub fn signature(roots: &[Complex<f64>]) -> (usize, usize) {
    let real = roots.iter().filter(|z| z.im == 0.0).count();
    (real, (roots.len() - real) / 2)
}

fn quadratic_roots(poly: &RationalPoly) -> Vec<Complex<f64>> {
    let a = poly.coeff(2).to_f64();
    let b = poly.coeff(1).to_f64();
    let c = poly.coeff(0).to_f64();
    let disc = b * b - 4.0 * a * c;

    if disc >= 0.0 {
        let sq = disc.sqrt();
        vec![
            Complex::new((-b - sq) / (2.0 * a), 0.0),
            Complex::new((-b + sq) / (2.0 * a), 0.0),
        ]
    } else {
        let sq = (-disc).sqrt();
        vec![
            Complex::new(-b / (2.0 * a), -sq / (2.0 * a)),
            Complex::new(-b / (2.0 * a), sq / (2.0 * a)),
        ]
    }
}

/// Aberth–Ehrlich: all roots at once. Each point takes a Newton step
/// corrected by the repulsion of the other current estimates; the
/// iteration stops when the largest correction falls under the tolerance
/// or the cap is reached.
fn aberth(poly: &RationalPoly, max_iterations: u32) -> Vec<Complex<f64>> {
    let n = poly.degree().unwrap();
    let lc = poly.leading_coeff().unwrap().to_f64();

    let coeffs: Vec<Complex<f64>> = poly
        .coeffs()
        .iter()
        .map(|c| Complex::new(c.to_f64() / lc, 0.0))
        .collect();
    let deriv: Vec<Complex<f64>> = coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| *c * i as f64)
        .collect();

    // Cauchy bound: all roots lie within 1 + max |a_i|.
    let bound = 1.0 + coeffs[..n].iter().map(|c| c.norm()).fold(0.0, f64::max);

    let mut z: Vec<Complex<f64>> = (0..n)
        .map(|k| {
            let angle = 2.0 * std::f64::consts::PI * k as f64 / n as f64 + 0.25;
            Complex::from_polar(bound, angle)
        })
        .collect();

    for iteration in 0..max_iterations {
        let mut max_correction: f64 = 0.0;

        for k in 0..n {
            let fz = horner(&coeffs, z[k]);
            let dfz = horner(&deriv, z[k]);
            if dfz.norm() == 0.0 {
                // Sitting on a critical point; nudge off it.
                z[k] += Complex::new(ABERTH_TOLERANCE.sqrt(), ABERTH_TOLERANCE.sqrt());
                max_correction = f64::MAX;
                continue;
            }

            let newton = fz / dfz;
            let mut repulsion = Complex::new(0.0, 0.0);
            for j in 0..n {
                if j != k {
                    let diff = z[k] - z[j];
                    if diff.norm() > 0.0 {
                        repulsion += diff.inv();
                    }
                }
            }

            let denom = Complex::new(1.0, 0.0) - newton * repulsion;
            let correction = if denom.norm() > 0.0 { newton / denom } else { newton };
            z[k] -= correction;
            max_correction = max_correction.max(correction.norm());
        }

        if max_correction < ABERTH_TOLERANCE {
            debug!("aberth converged after {} iterations", iteration + 1);
            return z;
        }
    }

    debug!("aberth hit the {}-iteration cap", max_iterations);
    z
}

fn horner(coeffs: &[Complex<f64>], z: Complex<f64>) -> Complex<f64> {
    let mut acc = Complex::new(0.0, 0.0);
    for c in coeffs.iter().rev() {
        acc = acc * z + *c;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear() {
        let f = RationalPoly::from_integers(&[-3, 2]); // 2x - 3
        let roots = numeric_roots(&f);
        assert_eq!(roots.len(), 1);
        assert!(close(roots[0].re, 1.5));
    }

    #[test]
    fn test_sqrt2() {
        let f = RationalPoly::from_integers(&[-2, 0, 1]);
        let roots = numeric_roots(&f);
        assert_eq!(roots.len(), 2);
        assert!(close(roots[0].re, -std::f64::consts::SQRT_2));
        assert!(close(roots[1].re, std::f64::consts::SQRT_2));
        assert_eq!(signature(&roots), (2, 0));
    }

    #[test]
    fn test_gaussian() {
        let f = RationalPoly::from_integers(&[1, 0, 1]); // x² + 1
        let roots = numeric_roots(&f);
        assert_eq!(roots.len(), 2);
        assert!(close(roots[0].im, -1.0));
        assert!(close(roots[1].im, 1.0));
        assert_eq!(signature(&roots), (0, 1));
    }

    #[test]
    fn test_cubic_signature() {
        // x³ - x - 1: one real root ≈ 1.3247, one conjugate pair
        let f = RationalPoly::from_integers(&[-1, -1, 0, 1]);
        let roots = numeric_roots(&f);
        assert_eq!(roots.len(), 3);
        assert_eq!(signature(&roots), (1, 1));
        let real = roots.iter().find(|z| z.im == 0.0).unwrap();
        assert!((real.re - 1.324717957244746).abs() < 1e-9);
    }

    #[test]
    fn test_totally_real_cubic() {
        // x³ - 3x + 1 has three real roots
        let f = RationalPoly::from_integers(&[1, -3, 0, 1]);
        let roots = numeric_roots(&f);
        assert_eq!(signature(&roots), (3, 0));
        for z in &roots {
            let v = f.evaluate_complex(*z);
            assert!(v.norm() < 1e-8, "residual too large: {}", v.norm());
        }
    }

    #[test]
    fn test_iteration_cap_still_yields_all_roots() {
        // One pass cannot converge, but every estimate is still reported.
        let f = RationalPoly::from_integers(&[1, -3, 0, 1]);
        let roots = numeric_roots_with_cap(&f, 1);
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn test_quartic_two_pairs() {
        // x⁴ + 1: no real roots, two conjugate pairs
        let f = RationalPoly::from_integers(&[1, 0, 0, 0, 1]);
        let roots = numeric_roots(&f);
        assert_eq!(signature(&roots), (0, 2));
        for z in &roots {
            assert!(f.evaluate_complex(*z).norm() < 1e-8);
        }
    }
}
