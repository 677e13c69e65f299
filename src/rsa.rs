// Textbook RSA key generation and the raw encrypt/decrypt primitive the
// oracles are built on. Padding lives in the pkcs module.

use crate::{extended_gcd, generate_prime, mod_inverse};

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rand::rngs::StdRng;

pub struct RsaKeyPair {
    pub public: BigUint,
    pub private: BigUint,
    pub n: BigUint,
}

pub fn generate_rsa_key_pair(n_bits: u64, e: &BigUint, rng: &mut StdRng) -> RsaKeyPair {
    let one = BigUint::one();

    // Loop until we find primes such that gcd(e, totient) = 1.
    loop {
        // Key size refers to the size of n = p*q, so get primes each with
        // half as many bits as we need.
        let p = generate_prime(n_bits / 2, rng);
        let q = generate_prime(n_bits / 2, rng);
        if p == q {
            continue;
        }

        let n = &p * &q;
        let totient = BigInt::from((&p - &one) * (&q - &one));
        let e = BigInt::from(e.clone());
        let (g, _, _) = extended_gcd(&e, &totient);
        if !g.is_one() {
            continue;
        }

        if let Ok(d) = mod_inverse(&e, &totient) {
            return RsaKeyPair {
                public: e.to_biguint().expect("public exponent is non-negative"),
                private: d.to_biguint().expect("inverse is normalized to [0, totient)"),
                n,
            };
        }
    }
}

/// Raw RSA: `m^key mod n`. Encryption and decryption are the same
/// operation with different exponents.
pub fn rsa_apply(key: &BigUint, n: &BigUint, m: &BigUint) -> BigUint {
    m.modpow(key, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;

    #[test]
    fn rsa_applies_to_the_expected_ciphertext_and_back() {
        let public_key = BigUint::from(29u64);
        let private_key = BigUint::from(41u64);
        let n = BigUint::from(133u64);
        let msg = BigUint::from(99u64);

        let ciphertext = rsa_apply(&public_key, &n, &msg);
        let decrypted = rsa_apply(&private_key, &n, &ciphertext);

        assert_eq!(ciphertext, BigUint::from(92u64));
        assert_eq!(decrypted, msg);
    }

    #[test]
    fn generated_key_pair_round_trips_a_message() {
        let mut rng = StdRng::from_seed([12; 32]);
        let e = BigUint::from(65537u64);

        let keys = generate_rsa_key_pair(256, &e, &mut rng);
        let msg = BigUint::from_bytes_be(b"Factoring is hard.");

        let ciphertext = rsa_apply(&keys.public, &keys.n, &msg);
        let decrypted = rsa_apply(&keys.private, &keys.n, &ciphertext);

        assert_eq!(decrypted, msg);
    }
}
