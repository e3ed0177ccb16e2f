// tests/prime_splitting_tests.rs
//
// Kummer–Dedekind splitting in fields with textbook behavior.

use nfield::order::{factor_prime_in_field, SplittingKind};
use nfield::polynomial::RationalPoly;
use num::BigInt;

fn gaussian() -> RationalPoly {
    RationalPoly::from_integers(&[1, 0, 1]) // x² + 1, K = Q(i)
}

#[test]
fn gaussian_splitting_by_residue_mod_four() {
    // p ≡ 1 (mod 4) splits, p ≡ 3 (mod 4) is inert, p = 2 ramifies
    let split = factor_prime_in_field(&BigInt::from(5), &gaussian()).unwrap();
    assert_eq!(split.entries.len(), 2);
    assert_eq!(split.splitting_kind(2), SplittingKind::SplitCompletely);

    let inert = factor_prime_in_field(&BigInt::from(3), &gaussian()).unwrap();
    assert_eq!(inert.entries.len(), 1);
    assert_eq!(inert.entries[0].residue_degree, 2);
    assert_eq!(inert.splitting_kind(2), SplittingKind::Inert);

    let ramified = factor_prime_in_field(&BigInt::from(2), &gaussian()).unwrap();
    assert_eq!(ramified.entries.len(), 1);
    assert_eq!(ramified.entries[0].ramification, 2);
    assert_eq!(ramified.splitting_kind(2), SplittingKind::TotallyRamified);
}

#[test]
fn local_degrees_always_sum_to_the_field_degree() {
    let fields: [&[i64]; 3] = [
        &[1, 0, 1],        // Q(i)
        &[-1, -1, 0, 1],   // cubic, disc -23
        &[1, 1, 1, 1, 1],  // Q(ζ₅)
    ];
    let primes = [2i64, 3, 5, 7, 11, 13];

    for coeffs in fields {
        let poly = RationalPoly::from_integers(coeffs);
        let degree = poly.degree().unwrap();
        for &p in &primes {
            let splitting = factor_prime_in_field(&BigInt::from(p), &poly).unwrap();
            assert_eq!(
                splitting.local_degree_sum(),
                degree,
                "Σ e·f ≠ n for p = {} in {}",
                p,
                poly
            );
        }
    }
}

#[test]
fn cyclotomic_five_splitting_follows_order_mod_five() {
    let poly = RationalPoly::from_integers(&[1, 1, 1, 1, 1]); // Φ₅
    // 11 ≡ 1 (mod 5): splits completely
    let s = factor_prime_in_field(&BigInt::from(11), &poly).unwrap();
    assert_eq!(s.splitting_kind(4), SplittingKind::SplitCompletely);

    // 2 has order 4 mod 5: inert
    let s = factor_prime_in_field(&BigInt::from(2), &poly).unwrap();
    assert_eq!(s.splitting_kind(4), SplittingKind::Inert);

    // 19 ≡ 4 (mod 5), order 2: two factors of residue degree 2
    let s = factor_prime_in_field(&BigInt::from(19), &poly).unwrap();
    assert_eq!(s.entries.len(), 2);
    assert!(s.entries.iter().all(|e| e.residue_degree == 2 && e.ramification == 1));
    assert_eq!(s.splitting_kind(4), SplittingKind::General);

    // 5 is totally ramified: Φ₅ ≡ (x - 1)⁴ (mod 5)
    let s = factor_prime_in_field(&BigInt::from(5), &poly).unwrap();
    assert_eq!(s.splitting_kind(4), SplittingKind::TotallyRamified);
}

#[test]
fn ramification_tracks_the_discriminant() {
    // disc(x³ - x - 1) = -23, so ramification occurs exactly at 23
    let poly = RationalPoly::from_integers(&[-1, -1, 0, 1]);
    let s = factor_prime_in_field(&BigInt::from(23), &poly).unwrap();
    assert!(s.entries.iter().any(|e| e.ramification > 1));

    for &p in &[2i64, 3, 5, 7] {
        let s = factor_prime_in_field(&BigInt::from(p), &poly).unwrap();
        assert!(s.entries.iter().all(|e| e.ramification == 1), "unexpected ramification at {}", p);
    }
}

#[test]
fn leading_coefficient_vanishing_is_an_error() {
    // 3x² + x loses its degree mod 3
    let poly = RationalPoly::new(vec![
        nfield::rational::Rational::from_i64(0),
        nfield::rational::Rational::from_i64(1),
        nfield::rational::Rational::from_i64(3),
    ]);
    let result = factor_prime_in_field(&BigInt::from(3), &poly);
    assert!(result.is_err());
}
