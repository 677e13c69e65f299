// PKCS#1 v1.5 (RFC 2313) primitives: the OS2IP/I2OSP integer encodings and
// the encryption-block framing 00 02 <nonzero padding> 00 <message>.

use crate::Error;

use num_bigint::BigUint;
use rand::{rngs::StdRng, Rng};

const PADDING_OVERHEAD: usize = 11;

/// Octet-String-to-Integer primitive. Total for any input length.
pub fn os2ip(octets: &[u8]) -> BigUint {
    BigUint::from_bytes_be(octets)
}

/// Integer-to-Octet-String primitive: big-endian, zero-padded to exactly
/// `k` bytes.
pub fn i2osp(x: &BigUint, k: usize) -> Result<Vec<u8>, Error> {
    if x.bits() > 8 * k as u64 {
        return Err(Error::IntegerEncodingOverflow {
            bits: x.bits(),
            capacity: k,
        });
    }
    let digits = x.to_bytes_be();
    let mut octets = vec![0u8; k - digits.len()];
    octets.extend_from_slice(&digits);
    Ok(octets)
}

/// Frames `message` as a PKCS#1 v1.5 encryption block of `k` bytes. The
/// padding string is at least 8 random nonzero bytes.
pub fn pkcs1v15_pad(message: &[u8], k: usize, rng: &mut StdRng) -> Result<Vec<u8>, Error> {
    if message.len() + PADDING_OVERHEAD > k {
        return Err(Error::MessageTooLong {
            limit: k.saturating_sub(PADDING_OVERHEAD),
            actual: message.len(),
        });
    }

    let padding_len = k - 3 - message.len();
    let mut block = Vec::with_capacity(k);
    block.extend_from_slice(&[0x00, 0x02]);
    while block.len() < 2 + padding_len {
        let byte = rng.gen::<u8>();
        if byte != 0 {
            block.push(byte);
        }
    }
    block.push(0x00);
    block.extend_from_slice(message);
    Ok(block)
}

/// Recovers the message from an encryption block, or `None` if the block is
/// not well-formed.
pub fn pkcs1v15_unpad(block: &[u8]) -> Option<&[u8]> {
    if block.len() < PADDING_OVERHEAD || !block.starts_with(&[0x00, 0x02]) {
        return None;
    }
    let separator = block[2..].iter().position(|&byte| byte == 0x00)? + 2;
    if separator < 10 {
        return None;
    }
    Some(&block[separator + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;

    #[test]
    fn i2osp_zero_pads_to_the_requested_width() {
        let octets = i2osp(&BigUint::from(0x1234u64), 4).unwrap();

        assert_eq!(octets, vec![0x00, 0x00, 0x12, 0x34]);
    }

    #[test]
    fn i2osp_encodes_zero_as_all_zero_bytes() {
        let octets = i2osp(&BigUint::default(), 3).unwrap();

        assert_eq!(octets, vec![0x00, 0x00, 0x00]);
    }

    #[test]
    fn i2osp_fails_when_the_value_does_not_fit() {
        let too_big = BigUint::from(1u64) << 32;

        let result = i2osp(&too_big, 4);

        assert_eq!(
            result,
            Err(Error::IntegerEncodingOverflow {
                bits: 33,
                capacity: 4
            })
        );
    }

    #[test]
    fn i2osp_accepts_the_largest_value_that_fits() {
        let max = (BigUint::from(1u64) << 32) - 1u64;

        let octets = i2osp(&max, 4).unwrap();

        assert_eq!(octets, vec![0xff; 4]);
    }

    #[test]
    fn os2ip_inverts_i2osp_including_leading_zeros() {
        let value = BigUint::from(0xdeadbeefu64);

        let octets = i2osp(&value, 8).unwrap();

        assert_eq!(os2ip(&octets), value);
    }

    #[test]
    fn pad_produces_a_well_formed_block_and_unpad_inverts_it() {
        let mut rng = StdRng::from_seed([7; 32]);

        let block = pkcs1v15_pad(b"ABCD", 16, &mut rng).unwrap();

        assert_eq!(block.len(), 16);
        assert_eq!(&block[..2], &[0x00, 0x02]);
        assert!(block[2..11].iter().all(|&byte| byte != 0));
        assert_eq!(block[11], 0x00);
        assert_eq!(pkcs1v15_unpad(&block), Some(&b"ABCD"[..]));
    }

    #[test]
    fn pad_rejects_messages_that_leave_no_room_for_framing() {
        let mut rng = StdRng::from_seed([7; 32]);

        let result = pkcs1v15_pad(b"ABCDEF", 16, &mut rng);

        assert_eq!(
            result,
            Err(Error::MessageTooLong {
                limit: 5,
                actual: 6
            })
        );
    }

    #[test]
    fn unpad_rejects_a_block_without_a_separator() {
        let mut block = vec![0x00, 0x02];
        block.extend_from_slice(&[0xff; 14]);

        assert_eq!(pkcs1v15_unpad(&block), None);
    }

    #[test]
    fn unpad_rejects_a_block_with_short_padding() {
        // Separator directly after five padding bytes.
        let block = [0x00, 0x02, 0x11, 0x22, 0x33, 0x44, 0x55, 0x00, 0x61, 0x62, 0x63, 0x64];

        assert_eq!(pkcs1v15_unpad(&block), None);
    }
}
