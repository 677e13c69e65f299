mod bleichenbacher;
mod error;
mod interval;
mod math;
mod oracle;
mod parity;
mod pkcs;
mod prime;
mod rsa;

pub use bleichenbacher::{AttackReport, BleichenbacherAttack};
pub use error::Error;
pub use interval::{Interval, IntervalSet};
pub use math::{ceil_div, extended_gcd, floor_div, mod_inverse};
pub use oracle::{OracleStrictness, PaddingOracle, ParityOracle, Pkcs1Oracle, RangeOracle};
pub use parity::parity_oracle_attack;
pub use pkcs::{i2osp, os2ip, pkcs1v15_pad, pkcs1v15_unpad};
pub use prime::{generate_prime, is_likely_prime};
pub use rsa::{generate_rsa_key_pair, rsa_apply, RsaKeyPair};
