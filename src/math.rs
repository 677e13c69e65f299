// Modular arithmetic helpers used by the attack engines.

use crate::Error;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Returns `(g, x, y)` such that `a*x + b*y = g = gcd(a, b)` with `g >= 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.abs(), b.abs());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let remainder = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, remainder);
        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);
        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    // The loop ran on absolute values; flip the coefficients back so the
    // Bezout identity holds for the original signs.
    if a.is_negative() {
        old_x = -old_x;
    }
    if b.is_negative() {
        old_y = -old_y;
    }
    (old_r, old_x, old_y)
}

/// Returns `x` in `[0, m)` such that `a*x = 1 (mod m)`.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt, Error> {
    let (g, x, _) = extended_gcd(a, m);
    if !g.is_one() {
        return Err(Error::NoModularInverse);
    }
    Ok(((x % m) + m) % m)
}

/// Exact integer division rounding toward +inf. Only defined for `b > 0`.
pub fn ceil_div(a: &BigInt, b: &BigInt) -> BigInt {
    debug_assert!(b.is_positive());
    let quotient = a / b;
    if (a % b).is_positive() {
        quotient + 1
    } else {
        quotient
    }
}

/// Exact integer division rounding toward -inf. Only defined for `b > 0`.
pub fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    debug_assert!(b.is_positive());
    let quotient = a / b;
    if (a % b).is_negative() {
        quotient - 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(240, 46)]
    #[case(46, 240)]
    #[case(-240, 46)]
    #[case(240, -46)]
    #[case(-240, -46)]
    #[case(17, 0)]
    #[case(0, 17)]
    fn extended_gcd_satisfies_bezout_identity(#[case] a: i64, #[case] b: i64) {
        let (a, b) = (BigInt::from(a), BigInt::from(b));

        let (g, x, y) = extended_gcd(&a, &b);

        assert!(!g.is_negative());
        assert_eq!(&a * &x + &b * &y, g);
    }

    #[test]
    fn extended_gcd_of_240_and_46_is_2() {
        let (g, _, _) = extended_gcd(&BigInt::from(240), &BigInt::from(46));

        assert_eq!(g, BigInt::from(2));
    }

    #[rstest]
    #[case(3, 11, 4)]
    #[case(17, 3120, 2753)]
    #[case(1, 101, 1)]
    fn mod_inverse_returns_known_inverses(
        #[case] a: i64,
        #[case] m: i64,
        #[case] inverse: i64,
    ) {
        let result = mod_inverse(&BigInt::from(a), &BigInt::from(m)).unwrap();

        assert_eq!(result, BigInt::from(inverse));
    }

    #[test]
    fn mod_inverse_fails_for_non_coprime_arguments() {
        let result = mod_inverse(&BigInt::from(6), &BigInt::from(9));

        assert_eq!(result, Err(Error::NoModularInverse));
    }

    #[rstest]
    #[case(7, 2, 4, 3)]
    #[case(8, 2, 4, 4)]
    #[case(-7, 2, -3, -4)]
    #[case(0, 5, 0, 0)]
    #[case(1, 5, 1, 0)]
    #[case(-1, 5, 0, -1)]
    fn division_rounds_toward_the_expected_infinity(
        #[case] a: i64,
        #[case] b: i64,
        #[case] ceiling: i64,
        #[case] floor: i64,
    ) {
        let (a, b) = (BigInt::from(a), BigInt::from(b));

        assert_eq!(ceil_div(&a, &b), BigInt::from(ceiling));
        assert_eq!(floor_div(&a, &b), BigInt::from(floor));
    }
}
