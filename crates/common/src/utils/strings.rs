use std::fmt::Write;

use eyre::{eyre, Result};

/// Decodes a hex string into a vector of bytes
///
/// ```
/// use flatframe_common::utils::strings::decode_hex;
///
/// let bytecode = decode_hex("0x600500").expect("should decode hex");
/// assert_eq!(bytecode, vec![0x60, 0x05, 0x00]);
/// ```
pub fn decode_hex(mut s: &str) -> Result<Vec<u8>> {
    // normalize
    s = s.trim_start_matches("0x").trim();

    if s.is_empty() {
        return Ok(vec![]);
    }

    if s.len() % 2 != 0 {
        return Err(eyre!("odd-length hex string: {}", s));
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| eyre!("invalid hex string: {}", s))
}

/// Encodes a slice of bytes into a hex string
///
/// ```
/// use flatframe_common::utils::strings::encode_hex;
///
/// assert_eq!(encode_hex(&[0x60, 0x05, 0x00]), "600500");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::new(), |mut acc, b| {
        write!(acc, "{b:02x}").expect("unable to write");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        let result = decode_hex("600456005b00").expect("should decode hex");
        assert_eq!(result, vec![0x60, 0x04, 0x56, 0x00, 0x5b, 0x00]);

        let result = decode_hex("0xffee").expect("should decode hex");
        assert_eq!(result, vec![0xff, 0xee]);

        let result = decode_hex("").expect("should decode hex");
        assert!(result.is_empty());
    }

    #[test]
    fn test_decode_hex_rejects_garbage() {
        assert!(decode_hex("zz").is_err());
        assert!(decode_hex("abc").is_err());
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0x00, 0x5b, 0xff]), "005bff");
        assert_eq!(encode_hex(&[]), "");
    }

    #[test]
    fn test_round_trip() {
        let bytes = vec![0x60, 0x2a, 0x60, 0x07, 0x55];
        assert_eq!(decode_hex(&encode_hex(&bytes)).expect("should decode hex"), bytes);
    }
}
