// The decryption capabilities available to the attacker. Each oracle owns
// its key material; the only thing it ever reveals about a chosen
// ciphertext is a single boolean.

use crate::{
    generate_rsa_key_pair, i2osp, os2ip, pkcs1v15_pad, rsa_apply, Error, RsaKeyPair,
};

use num_bigint::BigUint;
use num_traits::One;
use rand::rngs::StdRng;

/// How much of the PKCS#1 v1.5 structure the padding oracle checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleStrictness {
    /// Only the leading `00 02` bytes. Deliberately weak; equivalent to the
    /// range test `2B <= m < 3B`.
    LeadingBytes,
    /// Leading bytes plus a `00` separator after at least 8 padding bytes.
    RequireSeparator,
}

/// The interface the interval-narrowing attack drives. All parameters are
/// stable for the lifetime of the oracle; `eavesdrop` returns the same
/// target ciphertext on every call.
pub trait PaddingOracle {
    fn n(&self) -> &BigUint;
    fn e(&self) -> &BigUint;
    /// Modulus length in bytes.
    fn k(&self) -> usize;
    fn eavesdrop(&self) -> Vec<u8>;
    fn is_conformant(&self, ciphertext: &[u8]) -> Result<bool, Error>;
}

fn check_length(ciphertext: &[u8], k: usize) -> Result<(), Error> {
    if ciphertext.len() != k {
        return Err(Error::InvalidCiphertextLength {
            expected: k,
            actual: ciphertext.len(),
        });
    }
    Ok(())
}

fn modulus_byte_length(n: &BigUint) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// A real PKCS#1 v1.5 padding oracle: decrypts each query and reports
/// whether the result is a validly padded block.
pub struct Pkcs1Oracle {
    keys: RsaKeyPair,
    k: usize,
    ciphertext: Vec<u8>,
    strictness: OracleStrictness,
}

impl Pkcs1Oracle {
    /// Generates a fresh `n_bits` keypair, pads and encrypts `secret`.
    pub fn new(
        secret: &[u8],
        n_bits: u64,
        strictness: OracleStrictness,
        rng: &mut StdRng,
    ) -> Result<Self, Error> {
        let keys = generate_rsa_key_pair(n_bits, &BigUint::from(65537u64), rng);
        let k = modulus_byte_length(&keys.n);
        let block = pkcs1v15_pad(secret, k, rng)?;
        let ciphertext = i2osp(&rsa_apply(&keys.public, &keys.n, &os2ip(&block)), k)?;
        Ok(Self {
            keys,
            k,
            ciphertext,
            strictness,
        })
    }

    fn block_is_conformant(&self, block: &[u8]) -> bool {
        if !block.starts_with(&[0x00, 0x02]) {
            return false;
        }
        match self.strictness {
            OracleStrictness::LeadingBytes => true,
            OracleStrictness::RequireSeparator => block[2..]
                .iter()
                .position(|&byte| byte == 0x00)
                .is_some_and(|position| position + 2 >= 10),
        }
    }
}

impl PaddingOracle for Pkcs1Oracle {
    fn n(&self) -> &BigUint {
        &self.keys.n
    }

    fn e(&self) -> &BigUint {
        &self.keys.public
    }

    fn k(&self) -> usize {
        self.k
    }

    fn eavesdrop(&self) -> Vec<u8> {
        self.ciphertext.clone()
    }

    fn is_conformant(&self, ciphertext: &[u8]) -> Result<bool, Error> {
        check_length(ciphertext, self.k)?;
        let m = rsa_apply(&self.keys.private, &self.keys.n, &os2ip(ciphertext));
        // m < n, so it always fits in k bytes.
        let block = i2osp(&m, self.k)?;
        Ok(self.block_is_conformant(&block))
    }
}

/// Conformance by direct modular inequality: the exponent is the identity,
/// so queries carry `m * s mod n` and the oracle just range-checks it.
/// This is the attack run against its own arithmetic, no key material
/// involved.
pub struct RangeOracle {
    n: BigUint,
    e: BigUint,
    k: usize,
    ciphertext: Vec<u8>,
    b2: BigUint,
    b3: BigUint,
}

impl RangeOracle {
    /// `plaintext` must already lie in the conformant range `[2B, 3B)`.
    pub fn new(n: BigUint, plaintext: &BigUint) -> Result<Self, Error> {
        let k = modulus_byte_length(&n);
        assert!(k >= 3, "modulus too small for PKCS#1 v1.5 framing");
        let b = BigUint::one() << (8 * (k - 2));
        let b2 = &b * 2u8;
        let b3 = &b * 3u8;
        assert!(
            &b2 <= plaintext && plaintext < &b3,
            "plaintext must already lie in the conformant range"
        );
        let ciphertext = i2osp(plaintext, k)?;
        Ok(Self {
            n,
            e: BigUint::one(),
            k,
            ciphertext,
            b2,
            b3,
        })
    }
}

impl PaddingOracle for RangeOracle {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }

    fn k(&self) -> usize {
        self.k
    }

    fn eavesdrop(&self) -> Vec<u8> {
        self.ciphertext.clone()
    }

    fn is_conformant(&self, ciphertext: &[u8]) -> Result<bool, Error> {
        check_length(ciphertext, self.k)?;
        let value = os2ip(ciphertext);
        Ok(self.b2 <= value && value < self.b3)
    }
}

/// Leaks only the least significant bit of each decryption.
pub struct ParityOracle {
    keys: RsaKeyPair,
    k: usize,
}

impl ParityOracle {
    pub fn new(n_bits: u64, rng: &mut StdRng) -> Self {
        let keys = generate_rsa_key_pair(n_bits, &BigUint::from(65537u64), rng);
        let k = modulus_byte_length(&keys.n);
        Self { keys, k }
    }

    pub fn n(&self) -> &BigUint {
        &self.keys.n
    }

    pub fn e(&self) -> &BigUint {
        &self.keys.public
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn encrypt(&self, plaintext: &BigUint) -> Result<Vec<u8>, Error> {
        i2osp(&rsa_apply(&self.keys.public, &self.keys.n, plaintext), self.k)
    }

    /// True iff the decrypted plaintext is even.
    pub fn is_even(&self, ciphertext: &[u8]) -> bool {
        let m = rsa_apply(&self.keys.private, &self.keys.n, &os2ip(ciphertext));
        !m.bit(0)
    }
}
