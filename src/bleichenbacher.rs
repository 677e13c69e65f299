// Bleichenbacher's adaptive chosen-ciphertext attack against RSA with
// PKCS#1 v1.5 padding (CRYPTO '98).
//
// A padded plaintext starts with the bytes 00 02, which for a k-byte
// modulus means it lies in [2B, 3B) with B = 2^(8(k-2)). The oracle tells
// us, for any ciphertext we choose, whether its decryption lies in that
// range. RSA is multiplicative, so submitting
//
//                       c0 * s^e mod n
//
// asks the oracle whether m*s mod n is in [2B, 3B). Each conformant
// multiplier s pins m*s mod n into the range for some wrap count r:
//
//                  2B <= m*s - r*n <= 3B - 1,
//
// which rearranges to a family of candidate intervals for m:
//
//          (2B + r*n) / s <= m <= (3B - 1 + r*n) / s.
//
// Intersecting those with what we already know narrows the solution set;
// picking the next s so that roughly half the remaining range survives
// halves the set each round, until a single value m remains.
//
// The candidate search has three branches: the opening scan from
// ceil(n / 3B) (step 2a), a plain upward scan when several intervals
// remain (step 2b), and the wrap-count-guided scan that makes the attack
// practical once a single interval is left (step 2c).

use crate::{ceil_div, floor_div, mod_inverse, os2ip, Error};
use crate::{i2osp, Interval, IntervalSet, PaddingOracle};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// Everything a run reveals: the recovered plaintext integer, the oracle
/// cost, and the refined interval set after each iteration.
#[derive(Debug)]
pub struct AttackReport {
    pub plaintext: BigUint,
    pub oracle_queries: u64,
    pub iterations: u64,
    pub blinding_factor: BigUint,
    pub trace: Vec<IntervalSet>,
}

pub struct BleichenbacherAttack<'a, O: PaddingOracle> {
    oracle: &'a O,
    n: BigInt,
    e: BigInt,
    k: usize,
    b2: BigInt,
    b3: BigInt,
    query_cap: Option<u64>,
    queries: u64,
}

impl<'a, O: PaddingOracle> BleichenbacherAttack<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        let k = oracle.k();
        assert!(k >= 3, "modulus too small for PKCS#1 v1.5 framing");
        let b = BigInt::one() << (8 * (k - 2));
        Self {
            oracle,
            n: BigInt::from(oracle.n().clone()),
            e: BigInt::from(oracle.e().clone()),
            k,
            b2: &b * 2,
            b3: &b * 3,
            query_cap: None,
            queries: 0,
        }
    }

    /// Caps the number of oracle queries; the run fails with
    /// `SearchExhausted` instead of scanning forever. Off by default.
    pub fn with_query_cap(mut self, cap: u64) -> Self {
        self.query_cap = Some(cap);
        self
    }

    pub fn run(mut self) -> Result<AttackReport, Error> {
        let c = BigInt::from(os2ip(&self.oracle.eavesdrop()));
        let (c0, s0) = self.blind(&c)?;

        let mut set_m = IntervalSet::from(Interval::new(
            self.b2.clone(),
            &self.b3 - BigInt::one(),
        ));
        let mut s_prev = BigInt::zero();
        let mut iteration: u64 = 1;
        let mut trace = Vec::new();

        loop {
            // Step 2: find the next conformant multiplier.
            let s = if iteration == 1 {
                let start = ceil_div(&self.n, &self.b3);
                self.smallest_conformant_from(&c0, start)?
            } else if set_m.len() >= 2 {
                self.smallest_conformant_from(&c0, &s_prev + 1)?
            } else {
                let interval = set_m
                    .iter()
                    .next()
                    .ok_or(Error::EmptyRefinementResult)?
                    .clone();
                self.conformant_in_single_interval(&c0, &interval, &s_prev)?
            };

            // Step 3: narrow the solution set.
            set_m = set_m.refine(&s, &self.n, &self.b2, &self.b3);
            if set_m.is_empty() {
                return Err(Error::EmptyRefinementResult);
            }
            trace.push(set_m.clone());

            // Step 4: done once a single point remains.
            if let Some(point) = set_m.converged_point() {
                let plaintext = (point * mod_inverse(&s0, &self.n)?) % &self.n;
                return Ok(AttackReport {
                    plaintext: plaintext
                        .to_biguint()
                        .expect("residue mod n is non-negative"),
                    oracle_queries: self.queries,
                    iterations: iteration,
                    blinding_factor: s0
                        .to_biguint()
                        .expect("blinding factor is positive"),
                    trace,
                });
            }

            s_prev = s;
            iteration += 1;
        }
    }

    /// Step 1. The eavesdropped ciphertext is already conformant for every
    /// oracle built here, so this settles on s0 = 1 after one query;
    /// otherwise it searches for a blinding factor that makes c0
    /// conformant.
    fn blind(&mut self, c: &BigInt) -> Result<(BigInt, BigInt), Error> {
        let one = BigInt::one();
        if self.query(c, &one)? {
            return Ok((c.clone(), one));
        }
        let mut s0 = BigInt::from(2);
        loop {
            if self.query(c, &s0)? {
                let c0 = (c * s0.modpow(&self.e, &self.n)) % &self.n;
                return Ok((c0, s0));
            }
            s0 += 1;
        }
    }

    /// Steps 2a and 2b: scan upward from `start` for the smallest
    /// conformant multiplier.
    fn smallest_conformant_from(&mut self, c0: &BigInt, start: BigInt) -> Result<BigInt, Error> {
        let mut s = start;
        loop {
            if self.query(c0, &s)? {
                return Ok(s);
            }
            s += 1;
        }
    }

    /// Step 2c: with one interval [a, b] left, step the wrap count r and
    /// scan only the s values that could place m*s back in range.
    fn conformant_in_single_interval(
        &mut self,
        c0: &BigInt,
        interval: &Interval,
        s_prev: &BigInt,
    ) -> Result<BigInt, Error> {
        let (a, b) = (&interval.lower, &interval.upper);
        let mut r = ceil_div(&((b * s_prev - &self.b2) * 2), &self.n);
        loop {
            let s_min = ceil_div(&(&self.b2 + &r * &self.n), b);
            let s_max = floor_div(&(&self.b3 - BigInt::one() + &r * &self.n), a);
            let mut s = s_min;
            while s <= s_max {
                if self.query(c0, &s)? {
                    return Ok(s);
                }
                s += 1;
            }
            r += 1;
        }
    }

    /// One oracle query: asks whether c0 * s^e mod n decrypts to a
    /// conformant block. Counts every call; enforces the cap.
    fn query(&mut self, c0: &BigInt, s: &BigInt) -> Result<bool, Error> {
        if let Some(cap) = self.query_cap {
            if self.queries >= cap {
                return Err(Error::SearchExhausted {
                    queries: self.queries,
                });
            }
        }
        self.queries += 1;

        let c = (c0 * s.modpow(&self.e, &self.n)) % &self.n;
        let ciphertext = i2osp(
            &c.to_biguint().expect("residue mod n is non-negative"),
            self.k,
        )?;
        self.oracle.is_conformant(&ciphertext)
    }
}
