// Binary search over the plaintext driven by a parity oracle.
//
// Multiplying the ciphertext by 2^e mod n doubles the underlying
// plaintext modulo n. The modulus is odd, so the doubled value is even iff
// it did not wrap, which places the plaintext in the lower or upper half
// of the current bound. One bit leaks per query; ceil(log2 n) queries pin
// the plaintext exactly.
//
// The bounds are kept as integers scaled by 2^i after i halvings, so the
// midpoints are exact. No precision parameter to get wrong.

use crate::{i2osp, os2ip, Error, ParityOracle};

use num_bigint::BigUint;
use num_traits::{One, Zero};

pub fn parity_oracle_attack(oracle: &ParityOracle, ciphertext: &[u8]) -> Result<BigUint, Error> {
    let n = oracle.n();
    let k = oracle.k();
    let iterations = n.bits();
    let doubler = BigUint::from(2u8).modpow(oracle.e(), n);

    let mut c = os2ip(ciphertext);
    let mut lower = BigUint::zero();
    let mut upper = n.clone();

    for _ in 0..iterations {
        c = (&c * &doubler) % n;
        lower <<= 1u8;
        upper <<= 1u8;
        let midpoint = (&lower + &upper) >> 1u8;
        if oracle.is_even(&i2osp(&c, k)?) {
            upper = midpoint;
        } else {
            lower = midpoint;
        }
    }

    // lower/2^iterations <= m < upper/2^iterations and the bound is now
    // at most one wide, so the plaintext is the lone integer left in it.
    let scale_mask = (BigUint::one() << iterations) - 1u8;
    Ok((lower + scale_mask) >> iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_traits::Num;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    fn test_oracle() -> ParityOracle {
        let mut rng = StdRng::from_seed([77; 32]);
        ParityOracle::new(256, &mut rng)
    }

    #[test]
    fn parity_search_recovers_the_fixture_plaintext_exactly() {
        let oracle = test_oracle();
        let m = BigUint::from_str_radix("123456789123456789123456789", 10).unwrap();

        let ciphertext = oracle.encrypt(&m).unwrap();
        let recovered = parity_oracle_attack(&oracle, &ciphertext).unwrap();

        assert_eq!(recovered, m);
    }

    #[rstest]
    #[case(BigUint::from(1u8))]
    #[case(BigUint::from(42u8))]
    #[case((BigUint::from(1u8) << 200u32) + 12345u64)]
    fn parity_search_has_no_off_by_one_drift(#[case] m: BigUint) {
        let oracle = test_oracle();

        let ciphertext = oracle.encrypt(&m).unwrap();
        let recovered = parity_oracle_attack(&oracle, &ciphertext).unwrap();

        assert_eq!(recovered, m);
    }

    #[test]
    fn parity_search_recovers_the_largest_plaintext() {
        let oracle = test_oracle();
        let m = oracle.n() - 1u8;

        let ciphertext = oracle.encrypt(&m).unwrap();
        let recovered = parity_oracle_attack(&oracle, &ciphertext).unwrap();

        assert_eq!(recovered, m);
    }
}
