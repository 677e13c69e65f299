// Fatal conditions surfaced by the oracles and attack engines. None of
// these are retried; the candidate-search loops inside the attacks are part
// of the algorithm, not error recovery.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The oracle was handed a ciphertext whose length is not exactly the
    /// modulus byte-length `k`.
    InvalidCiphertextLength { expected: usize, actual: usize },
    /// `mod_inverse` was called on non-coprime arguments. Unreachable for
    /// valid RSA parameters and blinding factors coprime to `n`.
    NoModularInverse,
    /// Interval refinement produced an empty set. Indicates an inconsistent
    /// oracle or broken arithmetic, never a recoverable state.
    EmptyRefinementResult,
    /// `i2osp` was asked to encode a value that does not fit in `capacity`
    /// bytes.
    IntegerEncodingOverflow { bits: u64, capacity: usize },
    /// The configured query cap was hit before the search converged.
    SearchExhausted { queries: u64 },
    /// The message does not leave room for the PKCS#1 v1.5 framing.
    MessageTooLong { limit: usize, actual: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCiphertextLength { expected, actual } => {
                write!(f, "ciphertext is {actual} bytes, oracle expects exactly {expected}")
            }
            Error::NoModularInverse => {
                write!(f, "no modular inverse exists, arguments are not coprime")
            }
            Error::EmptyRefinementResult => {
                write!(f, "interval refinement produced an empty set")
            }
            Error::IntegerEncodingOverflow { bits, capacity } => {
                write!(f, "{bits}-bit integer does not fit in {capacity} bytes")
            }
            Error::SearchExhausted { queries } => {
                write!(f, "search hit the query cap after {queries} oracle queries")
            }
            Error::MessageTooLong { limit, actual } => {
                write!(f, "message is {actual} bytes, padding allows at most {limit}")
            }
        }
    }
}

impl std::error::Error for Error {}
