// Functions related to identification and generation of prime numbers.

use num_bigint::{BigUint, RandBigInt};
use rand::rngs::StdRng;

const MILLER_RABIN_ROUNDS: u32 = 5;

const SMALL_ODD_PRIMES: [u64; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Generates a prime with exactly `bits` bits (top and bottom bits forced).
pub fn generate_prime(bits: u64, rng: &mut StdRng) -> BigUint {
    loop {
        let mut candidate = rng.gen_biguint(bits);
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(0, true);
        if is_likely_prime(&candidate, rng) {
            return candidate;
        }
    }
}

pub fn is_likely_prime(candidate: &BigUint, miller_rabin_rng: &mut StdRng) -> bool {
    let zero = BigUint::default();
    let one = BigUint::from(1u64);
    if candidate == &zero || candidate == &one {
        return false;
    }
    let two = BigUint::from(2u64);
    if candidate == &two {
        return true;
    }
    if candidate % &two == zero {
        return false;
    }

    for small_prime in SMALL_ODD_PRIMES {
        let small_prime = BigUint::from(small_prime);
        if candidate == &small_prime {
            return true;
        }
        if candidate % &small_prime == zero {
            return false;
        }
    }

    miller_rabin(candidate, MILLER_RABIN_ROUNDS, miller_rabin_rng)
}

fn miller_rabin(candidate: &BigUint, n_rounds: u32, rng: &mut StdRng) -> bool {
    let zero = BigUint::default();
    let one = BigUint::from(1u64);
    let two = BigUint::from(2u64);

    // Write candidate - 1 as d * 2^r with d odd.
    let mut d: BigUint = candidate - &one;
    let mut r = 0;
    while &d % &two == zero {
        d /= &two;
        r += 1;
    }

    'witness: for _ in 0..n_rounds {
        let a = rng.gen_biguint_range(&two, &(candidate - &two));
        let mut x = a.modpow(&d, candidate);
        if x == one || x == candidate - &one {
            continue;
        }
        for _ in 0..(r - 1) {
            x = x.modpow(&two, candidate);
            if x == candidate - &one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}
