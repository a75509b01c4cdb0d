//! HMAC-based one-time passcodes (RFC 4226).

use hmac::Mac;

use crate::{OtpError, Result};

type Sha1Hmac = hmac::Hmac<sha1::Sha1>;

pub(crate) const MIN_DIGITS: u32 = 6;
pub(crate) const MAX_DIGITS: u32 = 8;

/// Computes the HOTP value for `secret` and `counter`, rendered as a
/// zero-padded decimal string of `digits` characters.
///
/// `secret` must be non-empty and `digits` must lie in `[6, 8]`;
/// violating either is an error, not a fallback to defaults.
pub fn generate(secret: &[u8], counter: u64, digits: u32) -> Result<String> {
    if secret.is_empty() {
        return Err(OtpError::EmptySecret);
    }
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(OtpError::DigitsOutOfRange(digits));
    }

    // Step 1: Generate an HMAC-SHA-1 value
    let hs = hmac(secret, counter)?;

    // Step 2: Generate a 4-byte string (Dynamic Truncation)
    let sbits = dt(&hs);

    // Step 3: Compute an HOTP value
    let snum = u32::from_be_bytes(sbits) % 10_u32.pow(digits);

    Ok(format!("{snum:0width$}", width = digits as usize))
}

fn hmac(secret: &[u8], counter: u64) -> Result<[u8; 20]> {
    let mut mac = Sha1Hmac::new_from_slice(secret)?;
    mac.update(&counter.to_be_bytes());
    Ok(mac.finalize().into_bytes().into())
}

fn dt(hs: &[u8; 20]) -> [u8; 4] {
    let offset = dt_offset(hs);
    let mut substr = dt_substr(hs, offset);
    substr[0] &= 0b0111_1111;
    substr
}

fn dt_substr(hs: &[u8; 20], offset: u8) -> [u8; 4] {
    // offset is at most 15, so offset + 4 stays within the 20-byte digest
    let substr = &hs[offset as usize..(offset + 4) as usize];
    substr.try_into().unwrap()
}

fn dt_offset(hs: &[u8; 20]) -> u8 {
    hs[19] & 0b1111
}

#[cfg(test)]
mod test {
    use hex::FromHex;
    use test_case::test_case;

    use super::{dt, dt_offset, dt_substr, generate, hmac};
    use crate::OtpError;

    #[test]
    fn it_computes_correct_offset() {
        let s: [u8; 20] = hex_literal::hex!("1f8698690e02ca16618550ef7f19da8e945b555a");
        // Last byte is 0x5a, with low 4 bits 0xa
        let expected: [u8; 1] = hex_literal::hex!("0a");
        let actual = dt_offset(&s);
        assert_eq!(actual, expected[0]);
    }

    #[test]
    fn it_computes_correct_4byte_substring() {
        let s: [u8; 20] = hex_literal::hex!("1f8698690e02ca16618550ef7f19da8e945b555a");
        let expected: [u8; 4] = hex_literal::hex!("50ef7f19");
        let actual = dt_substr(&s, dt_offset(&s));
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_computes_correct_dt() {
        let s: [u8; 20] = hex_literal::hex!("1f8698690e02ca166185ffef7f19da8e945b555a");
        let expected: [u8; 4] = hex_literal::hex!("7fef7f19");
        let actual = dt(&s);
        assert_eq!(actual, expected);
    }

    #[test_case(0, "cc93cf18508d94934c64b65d8ba7667fb7cde4b0")]
    #[test_case(1, "75a48a19d4cbe100644e8ac1397eea747a2d33ab")]
    #[test_case(2, "0bacb7fa082fef30782211938bc1c5e70416ff44")]
    #[test_case(3, "66c28227d03a2d5529262ff016a1e6ef76557ece")]
    #[test_case(4, "a904c900a64b35909874b33e61c5938a8e15ed1c")]
    #[test_case(5, "a37e783d7b7233c083d4f62926c7a25f238d0316")]
    #[test_case(6, "bc9cd28561042c83f219324d3c607256c03272ae")]
    #[test_case(7, "a4fb960c0bc06e1eabb804e5b397cdc4b45596fa")]
    #[test_case(8, "1b3c89f65e6c9e883012052823443f048b4332db")]
    #[test_case(9, "1637409809a679dc698207310c8c7fc07290d9e5")]
    fn it_computes_correct_hmac(counter: u64, expected: &str) {
        let expected = <[u8; 20]>::from_hex(expected).unwrap();
        let actual = hmac(b"12345678901234567890", counter).unwrap();
        assert_eq!(actual, expected);
    }

    // These test cases are copied from RFC 4226
    // https://datatracker.ietf.org/doc/html/rfc4226#appendix-D
    #[test_case(0, "755224")]
    #[test_case(1, "287082")]
    #[test_case(2, "359152")]
    #[test_case(3, "969429")]
    #[test_case(4, "338314")]
    #[test_case(5, "254676")]
    #[test_case(6, "287922")]
    #[test_case(7, "162583")]
    #[test_case(8, "399871")]
    #[test_case(9, "520489")]
    fn it_computes_correct_hotp(counter: u64, expected: &str) {
        let actual = generate(b"12345678901234567890", counter, 6).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_supports_eight_digit_codes() {
        let code = generate(b"12345678901234567890", 1, 8).unwrap();
        assert_eq!(code, "94287082");
    }

    #[test]
    fn it_rejects_an_empty_secret() {
        assert!(matches!(
            generate(b"", 0, 6),
            Err(OtpError::EmptySecret)
        ));
    }

    #[test_case(0)]
    #[test_case(5)]
    #[test_case(9)]
    fn it_rejects_digits_outside_range(digits: u32) {
        assert!(matches!(
            generate(b"12345678901234567890", 0, digits),
            Err(OtpError::DigitsOutOfRange(d)) if d == digits
        ));
    }
}
